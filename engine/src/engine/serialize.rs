// engine/src/engine/serialize.rs
#![forbid(unsafe_code)]

use std::fs;
use std::path::Path;

use log::debug;

use crate::engine::constants::{COORD_DECIMALS, GROUND_HEIGHT};
use crate::engine::pig::TokenKind;
use crate::engine::structure::Structure;

#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    #[error("failed to write level document")]
    Io(#[from] std::io::Error),
}

/// Rotation attribute sentinel: `None` means the attribute is omitted from
/// the element entirely (the consumer treats a literal `0` differently).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
    None,
    Degrees(f64),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectKind {
    Block,
    Pig,
    Tnt,
}

/// One positioned output record. Produced only here; never mutated after
/// creation.
#[derive(Clone, Debug)]
pub struct GameObject {
    pub kind: ObjectKind,
    pub type_tag: &'static str,
    pub material: &'static str,
    pub x: f64,
    pub y: f64,
    pub rotation: Rotation,
}

impl GameObject {
    pub fn xml_element(&self) -> String {
        let element = match self.kind {
            ObjectKind::Block => "Block",
            ObjectKind::Pig => "Pig",
            ObjectKind::Tnt => "TNT",
        };
        let mut line = format!(
            "<{} type=\"{}\" material=\"{}\" x=\"{}\" y=\"{}\"",
            element,
            self.type_tag,
            self.material,
            fmt_coord(self.x),
            fmt_coord(self.y),
        );
        if let Rotation::Degrees(degrees) = self.rotation {
            line.push_str(&format!(" rotation=\"{}\"", fmt_coord(degrees)));
        }
        line.push_str("/>");
        line
    }
}

/// Round to the fixed coordinate precision, then print the shortest exact
/// representation of the rounded value.
fn fmt_coord(value: f64) -> String {
    let scale = 10f64.powi(COORD_DECIMALS as i32);
    let rounded = (value * scale).round() / scale;
    // Normalize negative zero.
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{}", rounded)
}

/// Walk the finalized structure and emit all positioned objects in
/// deterministic order: primary blocks column-major, platform blocks by
/// ascending row then left to right, tokens by ascending platform row then
/// column.
pub(crate) fn game_objects(s: &Structure) -> Vec<GameObject> {
    let primary = s.blocks.primary;
    let platform = s.blocks.platform;
    let mut objects = Vec::new();

    for col in 0..s.grid.num_cols() {
        for row in 0..s.grid.num_rows() {
            if !s.grid.get(row, col) {
                continue;
            }
            objects.push(GameObject {
                kind: ObjectKind::Block,
                type_tag: primary.element_name,
                material: primary.material,
                x: col as f64 * primary.width + primary.width / 2.0,
                y: vertical_distance(s, row, false, primary.height / 2.0),
                rotation: Rotation::None,
            });
        }
    }

    for row in s.platforms.rendered() {
        let Some(distances) = s.laterals.get(&row) else {
            continue;
        };
        for &x in distances {
            objects.push(GameObject {
                kind: ObjectKind::Block,
                type_tag: platform.element_name,
                material: platform.material,
                x,
                // A platform sits on top of its own row's blocks.
                y: vertical_distance(s, row, true, platform.height / 2.0),
                rotation: Rotation::None,
            });
        }
    }

    for placement in &s.placements {
        let token = match placement.token {
            TokenKind::Pig => s.blocks.pig,
            TokenKind::Tnt => s.blocks.tnt,
        };
        let (kind, type_tag) = match placement.token {
            TokenKind::Pig => (ObjectKind::Pig, token.element_name),
            TokenKind::Tnt => (ObjectKind::Tnt, ""),
        };
        // Tokens rest on top of the row beneath their chamber instead of
        // straddling it: evaluate at the chamber's bottom row with the
        // token's own half-height.
        let resting_row = s.fit.resting_row(placement.site.platform_row);
        objects.push(GameObject {
            kind,
            type_tag,
            material: token.material,
            x: placement.site.column as f64 * primary.width + primary.width / 2.0,
            y: vertical_distance(s, resting_row, false, token.height / 2.0),
            rotation: Rotation::None,
        });
    }

    objects
}

/// World y for an object anchored at `row`. Every rendered platform below
/// the row is a literal physical layer, so it permanently lifts everything
/// above it by one platform height.
fn vertical_distance(s: &Structure, row: usize, on_top_of_row: bool, own_half: f64) -> f64 {
    let platform_lift = s.offsets.platforms_below(row) as f64 * s.blocks.platform.height;
    let mut block_lift = row as f64 * s.blocks.primary.height;
    if on_top_of_row {
        block_lift += s.blocks.primary.height;
    }
    GROUND_HEIGHT + platform_lift + block_lift + own_half
}

/*
The consuming engine's level browser is byte-picky: a leading blank line, or
any element sharing a line with its parent container tag, makes it silently
fail to render the level. The document is therefore assembled line by line
rather than through a generic XML writer.
*/
pub(crate) fn level_document(s: &Structure) -> String {
    let objects = game_objects(s);
    let (bird_count, bird_type) = s.difficulty.birds();

    let mut doc = String::new();
    doc.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    doc.push_str("<Level width=\"2\">\n");
    doc.push_str("  <Camera x=\"0\" y=\"2\" minWidth=\"20\" maxWidth=\"30\">\n");
    doc.push_str("    <Birds>\n");
    for _ in 0..bird_count {
        doc.push_str("      <Bird type=\"");
        doc.push_str(bird_type);
        doc.push_str("\"/>\n");
    }
    doc.push_str("    </Birds>\n");
    doc.push_str("    <Slingshot x=\"-8\" y=\"-2.5\">\n");
    doc.push_str("      <GameObjects>\n");
    for object in &objects {
        doc.push_str("        ");
        doc.push_str(&object.xml_element());
        doc.push('\n');
    }
    doc.push_str("      </GameObjects>\n");
    doc.push_str("    </Slingshot>\n");
    doc.push_str("  </Camera>\n");
    doc.push_str("</Level>");

    debug!("level document: {} objects, {} bytes", objects.len(), doc.len());
    doc
}

pub(crate) fn write_level(s: &Structure, path: &Path) -> Result<(), SerializeError> {
    // Assemble fully in memory first: either the complete document lands on
    // disk or the write fails before the file holds a partial body.
    let doc = level_document(s);
    fs::write(path, doc)?;
    Ok(())
}
