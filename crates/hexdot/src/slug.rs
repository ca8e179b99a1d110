//! URL-safe slugs for palette entry names.

/// Derive a URL-safe slug from a color name.
///
/// Lowercases the name, collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, and trims leading/trailing hyphens.
/// Idempotent: slugifying a slug returns it unchanged.
///
/// Shared by SVG group ids, mask filenames, STL filenames, and metadata
/// part names, so all artifacts for one color line up.
///
/// # Example
/// ```
/// use hexdot::slugify;
/// assert_eq!(slugify("Sky Blue"), "sky-blue");
/// assert_eq!(slugify("  Lemon -- Yellow!"), "lemon-yellow");
/// ```
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }
    slug
}
