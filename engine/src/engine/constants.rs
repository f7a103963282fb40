// engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Scale applied when converting a physical distance to the fixed-point
/// integers used by coverage-count arithmetic. See `units`.
pub const MULTIPLIER: i64 = 100;

/// World-space y of the ground plane the structure rests on.
pub const GROUND_HEIGHT: f64 = -3.5;

/// Decimal places kept when printing world coordinates.
pub const COORD_DECIMALS: u32 = 3;

/// Immutable block descriptor. Dimensions are in game-world units.
///
/// Pigs and TNT are pseudo-blocks: their dimensions feed placement-fit
/// arithmetic only; they are never written into the occupancy grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockType {
    /// Element name the game expects in the level document.
    pub element_name: &'static str,
    pub width: f64,
    pub height: f64,
    /// Material attribute emitted for this block; empty for tokens.
    pub material: &'static str,
}

/// The pig token pseudo-block (placement-fit arithmetic only).
pub const PIG: BlockType = BlockType {
    element_name: "BasicSmall",
    width: 0.5,
    height: 0.5,
    material: "",
};

/// The TNT token pseudo-block (placement-fit arithmetic only).
pub const TNT: BlockType = BlockType {
    element_name: "TNT",
    width: 0.55,
    height: 0.55,
    material: "",
};

/// Resolve a symbolic block name against the fixed registry.
///
/// Callers select blocks by name, never by raw dimensions.
pub fn block_by_name(name: &str) -> Option<BlockType> {
    let block = match name {
        "square_with_hole" => BlockType {
            element_name: "SquareHole",
            width: 0.85,
            height: 0.85,
            material: "stone",
        },
        "small_square" => BlockType {
            element_name: "SquareSmall",
            width: 0.43,
            height: 0.43,
            material: "stone",
        },
        "tiny_square" => BlockType {
            element_name: "SquareTiny",
            width: 0.22,
            height: 0.22,
            material: "ice",
        },
        "long_rectangle" => BlockType {
            element_name: "RectBig",
            width: 2.06,
            height: 0.22,
            material: "stone",
        },
        "medium_rectangle" => BlockType {
            element_name: "RectMedium",
            width: 1.68,
            height: 0.22,
            material: "stone",
        },
        "small_rectangle" => BlockType {
            element_name: "RectSmall",
            width: 0.85,
            height: 0.22,
            material: "stone",
        },
        "pig" => PIG,
        "tnt" => TNT,
        _ => return None,
    };
    Some(block)
}

/// Names accepted by `block_by_name`, for CLI help and error messages.
pub fn block_names() -> &'static [&'static str] {
    &[
        "square_with_hole",
        "small_square",
        "tiny_square",
        "long_rectangle",
        "medium_rectangle",
        "small_rectangle",
        "pig",
        "tnt",
    ]
}

/// Difficulty selects the projectile loadout written into the level preamble.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn from_cli(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" | "1" => Some(Self::Easy),
            "medium" | "2" => Some(Self::Medium),
            "hard" | "3" => Some(Self::Hard),
            _ => None,
        }
    }

    /// Fixed table: (bird count, bird type).
    pub fn birds(self) -> (usize, &'static str) {
        match self {
            Self::Easy => (3, "BirdRed"),
            Self::Medium => (2, "BirdBlack"),
            Self::Hard => (3, "BirdBlack"),
        }
    }
}
