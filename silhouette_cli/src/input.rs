// silhouette_cli/src/input.rs
#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use silhouette_engine::engine::Polygon;

/// Load a polygon point list ("x,y x,y ..." across any whitespace).
pub fn load_polygon(path: &Path) -> Result<Polygon> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let polygon = Polygon::parse_points(&text)
        .with_context(|| format!("malformed polygon in {}", path.display()))?;
    Ok(polygon)
}

/// Load a segmentation mask: one row per line, top row first, cells written
/// as 0/1 (whitespace between cells is ignored).
pub fn load_mask(path: &Path) -> Result<Vec<Vec<bool>>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let mut rows = Vec::new();
    for (line_no, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut row = Vec::new();
        for c in line.chars() {
            match c {
                '0' => row.push(false),
                '1' => row.push(true),
                c if c.is_whitespace() => {}
                other => bail!(
                    "unexpected character {other:?} in {} line {}",
                    path.display(),
                    line_no + 1
                ),
            }
        }
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("mask {} contains no rows", path.display());
    }
    Ok(rows)
}
