//! Palette file loading.
//!
//! Two parser variants sit behind one entry point, selected by file
//! extension: a JSON array of `{name, hex}` objects, or a Markdown table
//! whose rows carry a name in the first column and a 6-digit hex code in a
//! later one (the filament vendor table format). Both normalize to the
//! same entry sequence before palette validation.

use std::collections::HashSet;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use hexdot::Palette;
use regex::Regex;
use serde::Deserialize;

use crate::error::PipelineError;

#[derive(Debug, Deserialize)]
struct PaletteFileEntry {
    name: String,
    hex: String,
}

fn hex_token_pattern() -> &'static Regex {
    static HEX_TOKEN: OnceLock<Regex> = OnceLock::new();
    HEX_TOKEN.get_or_init(|| {
        Regex::new(r"#?[0-9A-Fa-f]{6}").expect("hex token pattern is valid")
    })
}

/// Load a palette from a `.json` file (array of objects with `name`/`hex`)
/// or a Markdown table (`Name | ... | #HEX`).
///
/// `selection` filters entries case-insensitively by name; the first file
/// occurrence wins for each selected name. Fails if nothing is left after
/// loading and filtering, or if any surviving hex token is malformed.
pub fn load_palette(
    path: &Path,
    selection: Option<&[String]>,
) -> Result<Palette, PipelineError> {
    let text = fs::read_to_string(path)?;

    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let mut pairs = if is_json {
        parse_json(&text).map_err(|e| PipelineError::PaletteFormat {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?
    } else {
        parse_markdown_table(&text)
    };

    if let Some(selection) = selection {
        let wanted: Vec<String> = selection.iter().map(|s| s.to_lowercase()).collect();
        let mut seen = HashSet::new();
        pairs.retain(|(name, _)| {
            let lower = name.to_lowercase();
            wanted.contains(&lower) && seen.insert(lower)
        });
    }

    if pairs.is_empty() {
        return Err(PipelineError::EmptyPaletteSelection {
            path: path.to_path_buf(),
        });
    }

    let refs: Vec<(&str, &str)> = pairs
        .iter()
        .map(|(name, hex)| (name.as_str(), hex.as_str()))
        .collect();
    Ok(Palette::from_hex(&refs)?)
}

fn parse_json(text: &str) -> Result<Vec<(String, String)>, serde_json::Error> {
    let entries: Vec<PaletteFileEntry> = serde_json::from_str(text)?;
    Ok(entries.into_iter().map(|e| (e.name, e.hex)).collect())
}

/// Extract `(name, hex)` pairs from Markdown table rows.
///
/// Rows without a `|`, header rows (first cell "name"), and rows without a
/// 6-hex-digit token are skipped rather than rejected: vendor tables carry
/// separator lines and prose around the data.
fn parse_markdown_table(text: &str) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for line in text.lines() {
        if !line.contains('|') {
            continue;
        }
        // Tables may or may not carry outer pipes; strip them so the name
        // always lands in the first cell.
        let row = line.trim().trim_matches('|');
        let cells: Vec<&str> = row.split('|').map(str::trim).collect();
        if cells.len() < 2 || cells[0].is_empty() || cells[0].eq_ignore_ascii_case("name") {
            continue;
        }
        let Some(hex_cell) = cells[1..].iter().find(|c| c.contains('#')) else {
            continue;
        };
        let Some(token) = hex_token_pattern().find(hex_cell) else {
            continue;
        };
        pairs.push((cells[0].to_string(), token.as_str().to_string()));
    }
    pairs
}
