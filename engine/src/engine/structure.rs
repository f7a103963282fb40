// engine/src/engine/structure.rs
#![forbid(unsafe_code)]

use std::path::Path;

use log::{debug, info};
use rustc_hash::FxHashMap;

use crate::engine::constants::{block_by_name, BlockType, Difficulty, PIG, TNT};
use crate::engine::geometry::Polygon;
use crate::engine::grid::OccupancyGrid;
use crate::engine::pig::{candidate_sites, placement_map, CarvePlan, PigFit, Placement};
use crate::engine::platform::{lateral_distances, OffsetTable, PlatformSet};
use crate::engine::raster::{grid_from_mask, rasterize};
use crate::engine::serialize::{self, SerializeError};
use crate::policy::PigPolicy;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown block type {0:?}")]
    UnknownBlock(String),
    #[error("number of primary blocks on the x axis must be positive")]
    InvalidBlockCount,
    #[error("coverage fraction must be in (0, 1], got {0}")]
    InvalidCoverage(f64),
}

/// Pipeline configuration (data only; no logic). Blocks are selected by
/// registry name, never by raw dimensions.
#[derive(Clone, Debug)]
pub struct StructureConfig {
    pub primary_block: String,
    pub platform_block: String,
    /// Target primary-block count along the x axis.
    pub blocks_x: usize,
    /// Fraction of a cell's area the shape must cover for occupancy.
    pub coverage: f64,
    pub difficulty: Difficulty,
}

impl Default for StructureConfig {
    fn default() -> Self {
        Self {
            primary_block: "tiny_square".to_string(),
            platform_block: "long_rectangle".to_string(),
            blocks_x: 50,
            coverage: 0.5,
            difficulty: Difficulty::Medium,
        }
    }
}

/// Resolved block set for one pipeline run.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Blocks {
    pub primary: BlockType,
    pub platform: BlockType,
    pub pig: BlockType,
    pub tnt: BlockType,
}

/// The per-shape pipeline instance.
///
/// Owns the occupancy grid exclusively; every entity here lives and dies
/// with the processing of a single input shape. Stages run once, in order:
/// rasterize, plan platforms, place pigs (policy-chosen, two-phase carve),
/// then the grid is final and ready to serialize.
pub struct Structure {
    pub(crate) blocks: Blocks,
    pub(crate) grid: OccupancyGrid,
    pub(crate) platforms: PlatformSet,
    pub(crate) offsets: OffsetTable,
    /// Lateral platform-block distances per platform row (ceiling included),
    /// computed before carving so inserted chambers cannot retroactively
    /// unseat the platforms that bound them.
    pub(crate) laterals: FxHashMap<usize, Vec<f64>>,
    pub(crate) placements: Vec<Placement>,
    pub(crate) fit: PigFit,
    pub(crate) difficulty: Difficulty,
}

impl Structure {
    /// Run the full pipeline over a polygon silhouette.
    pub fn from_polygon(
        shape: &Polygon,
        config: &StructureConfig,
        policy: &mut dyn PigPolicy,
    ) -> Result<Self, ConfigError> {
        let blocks = resolve_blocks(config)?;
        let grid = rasterize(shape, &blocks.primary, config.blocks_x, config.coverage);
        Ok(Self::build(blocks, grid, config.difficulty, policy))
    }

    /// Run the pipeline over a pre-built boolean matrix (segmentation-mask
    /// variant; rows arrive top-to-bottom). The rasterizer is skipped.
    pub fn from_mask(
        mask_top_down: &[Vec<bool>],
        config: &StructureConfig,
        policy: &mut dyn PigPolicy,
    ) -> Result<Self, ConfigError> {
        let blocks = resolve_blocks(config)?;
        let grid = grid_from_mask(mask_top_down);
        Ok(Self::build(blocks, grid, config.difficulty, policy))
    }

    fn build(
        blocks: Blocks,
        mut grid: OccupancyGrid,
        difficulty: Difficulty,
        policy: &mut dyn PigPolicy,
    ) -> Self {
        let fit = PigFit::new(&blocks.primary, &blocks.pig);
        let platforms = PlatformSet::plan(&grid, fit.rows);
        let offsets = OffsetTable::new(&platforms, grid.num_rows());

        let mut laterals: FxHashMap<usize, Vec<f64>> = FxHashMap::default();
        for chamber in platforms.chambers() {
            if let Some(support_row) = platforms.support_row(chamber.platform_row) {
                laterals.insert(
                    chamber.platform_row,
                    lateral_distances(&grid, support_row, &blocks.primary, &blocks.platform),
                );
            }
        }

        let candidates =
            candidate_sites(&grid, &platforms, &laterals, &fit, &blocks.primary, &blocks.platform);
        let mut placements = policy.choose_pigs(&grid, &candidates);
        placements.sort_by_key(|p| (p.site.platform_row, p.site.column));
        placements.dedup_by_key(|p| p.site);

        let plan = CarvePlan::for_placements(&placements, &grid, &fit);
        plan.apply(&mut grid);

        info!(
            "structure: {} blocks, {} platform rows, {} tokens",
            grid.occupied_count(),
            platforms.rendered().count(),
            placements.len(),
        );
        debug!("final grid:\n{}", grid.render_ascii());

        Self {
            blocks,
            grid,
            platforms,
            offsets,
            laterals,
            placements,
            fit,
            difficulty,
        }
    }

    pub fn grid(&self) -> &OccupancyGrid {
        &self.grid
    }

    pub fn platforms(&self) -> &PlatformSet {
        &self.platforms
    }

    pub fn offsets(&self) -> &OffsetTable {
        &self.offsets
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement map view: platform row -> sorted token center columns.
    pub fn placement_map(&self) -> FxHashMap<usize, Vec<usize>> {
        placement_map(&self.placements)
    }

    /// Render the complete level document.
    pub fn to_level_document(&self) -> String {
        serialize::level_document(self)
    }

    /// Write the level document to `path`. Either the complete document is
    /// written or nothing is; I/O errors surface unmodified.
    pub fn write_level(&self, path: &Path) -> Result<(), SerializeError> {
        serialize::write_level(self, path)
    }
}

fn resolve_blocks(config: &StructureConfig) -> Result<Blocks, ConfigError> {
    let primary = block_by_name(&config.primary_block)
        .ok_or_else(|| ConfigError::UnknownBlock(config.primary_block.clone()))?;
    let platform = block_by_name(&config.platform_block)
        .ok_or_else(|| ConfigError::UnknownBlock(config.platform_block.clone()))?;
    if config.blocks_x == 0 {
        return Err(ConfigError::InvalidBlockCount);
    }
    if !(config.coverage > 0.0 && config.coverage <= 1.0) {
        return Err(ConfigError::InvalidCoverage(config.coverage));
    }
    Ok(Blocks {
        primary,
        platform,
        // The token pseudo-blocks are fixed registry entries.
        pig: PIG,
        tnt: TNT,
    })
}
