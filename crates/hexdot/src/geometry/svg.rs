//! Vector (SVG) export of a dot layout.

use crate::grid::DotLayout;
use crate::palette::Palette;
use crate::slug::slugify;

/// Palette name whose color backs the drawing when present. Falls back to
/// black otherwise.
const BACKGROUND_NAME: &str = "charcoal";

/// Render a dot layout as an SVG document string.
///
/// The root element carries explicit millimeter width/height equal to the
/// layout's used extents (the stagger and trim policy can shift the true
/// bounding box away from the nominal requested width) and a matching
/// viewBox. A full-size background rectangle comes first, filled with the
/// palette entry named "charcoal" if one exists (case-insensitive), else
/// black. Then, for each palette entry with at least one dot, in palette
/// order, one group (`id` = slug of the name, `fill` = entry color)
/// containing one circle per dot with 3-decimal-place coordinates.
///
/// Entries with no dots produce no group.
pub fn render_svg(layout: &DotLayout, palette: &Palette) -> String {
    let (width_mm, height_mm) = layout.used_extents();
    let radius = layout.radius_mm();

    let background = palette
        .find_by_name(BACKGROUND_NAME)
        .map(|e| e.color.to_hex())
        .unwrap_or_else(|| "#000000".to_string());

    let mut svg = String::new();
    svg.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width_mm}mm\" height=\"{height_mm}mm\" viewBox=\"0 0 {width_mm} {height_mm}\">\n",
    ));
    svg.push_str(&format!(
        "<rect x=\"0\" y=\"0\" width=\"{width_mm}\" height=\"{height_mm}\" fill=\"{background}\" />\n",
    ));

    for (idx, entry) in palette.entries().iter().enumerate() {
        let points = layout.points(idx);
        if points.is_empty() {
            continue;
        }
        svg.push_str(&format!(
            "<g id=\"{}\" fill=\"{}\">\n",
            slugify(&entry.name),
            entry.color.to_hex(),
        ));
        for point in points {
            svg.push_str(&format!(
                "<circle cx=\"{:.3}\" cy=\"{:.3}\" r=\"{:.3}\" />\n",
                point.x, point.y, radius,
            ));
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::PixelBuffer;
    use crate::color::Rgb;
    use crate::dither::dither;
    use crate::grid::map_hex;
    use crate::palette::PaletteEntry;

    fn layout_for(palette: &Palette, raw: &[u8], width: usize, height: usize) -> DotLayout {
        let buffer = PixelBuffer::from_raw_rgb(width, height, raw);
        let dithered = dither(buffer, palette);
        map_hex(&dithered.grid, palette, 1.0, 1.0)
    }

    #[test]
    fn test_document_structure() {
        let palette = Palette::new(vec![
            PaletteEntry::new("A", Rgb::new(255, 0, 0)),
            PaletteEntry::new("B", Rgb::new(0, 0, 255)),
        ])
        .unwrap();
        let layout = layout_for(
            &palette,
            &[255, 0, 0, 0, 0, 255, 0, 0, 255, 255, 0, 0],
            2,
            2,
        );
        let svg = render_svg(&layout, &palette);

        assert!(svg.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<svg "));
        assert!(svg.contains("width=\"2mm\""));
        assert!(svg.contains("viewBox=\"0 0 2"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn test_background_defaults_to_black() {
        let palette = Palette::new(vec![PaletteEntry::new("A", Rgb::new(255, 0, 0))]).unwrap();
        let layout = layout_for(&palette, &[255, 0, 0], 1, 1);
        let svg = render_svg(&layout, &palette);
        assert!(svg.contains("fill=\"#000000\" />"));
    }

    #[test]
    fn test_background_uses_charcoal_when_present() {
        let palette = Palette::new(vec![
            PaletteEntry::new("Charcoal", Rgb::new(34, 34, 34)),
            PaletteEntry::new("A", Rgb::new(255, 0, 0)),
        ])
        .unwrap();
        let layout = layout_for(&palette, &[255, 0, 0], 1, 1);
        let svg = render_svg(&layout, &palette);
        assert!(svg.contains("fill=\"#222222\" />"), "rect filled with charcoal");
    }

    #[test]
    fn test_groups_and_circle_precision() {
        let palette = Palette::new(vec![
            PaletteEntry::new("Sky Blue", Rgb::new(86, 180, 233)),
            PaletteEntry::new("Unused", Rgb::new(1, 2, 3)),
        ])
        .unwrap();
        let layout = layout_for(&palette, &[86, 180, 233], 1, 1);
        let svg = render_svg(&layout, &palette);

        assert!(svg.contains("<g id=\"sky-blue\" fill=\"#56B4E9\">"));
        assert!(svg.contains("<circle cx=\"0.500\" cy=\"0.500\" r=\"0.500\" />"));
        assert!(
            !svg.contains("unused"),
            "entries without dots emit no group"
        );
    }

    #[test]
    fn test_row_one_circles_are_staggered() {
        let palette = Palette::new(vec![PaletteEntry::new("A", Rgb::new(0, 0, 0))]).unwrap();
        let layout = layout_for(&palette, &[0u8; 12], 2, 2);
        let svg = render_svg(&layout, &palette);
        assert!(svg.contains("cx=\"0.500\""), "row 0 unstaggered");
        assert!(svg.contains("cx=\"1.000\""), "row 1 offset by half spacing");
    }
}
