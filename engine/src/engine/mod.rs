// engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod constants;
mod geometry;
mod grid;
mod pig;
mod platform;
mod raster;
mod serialize;
mod structure;
mod units;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use constants::{
    block_by_name, block_names, BlockType, Difficulty, COORD_DECIMALS, GROUND_HEIGHT, MULTIPLIER,
};
pub use geometry::{GeometryError, Point, Polygon};
pub use grid::OccupancyGrid;
pub use pig::{CarvePlan, PigSite, Placement, TokenKind};
pub use platform::{Chamber, OffsetTable, PlatformSet};
pub use serialize::{GameObject, ObjectKind, Rotation, SerializeError};
pub use structure::{ConfigError, Structure, StructureConfig};
pub use units::{blocks_to_cover, column_at, column_span, to_fixed};
