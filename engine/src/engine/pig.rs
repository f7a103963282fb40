// engine/src/engine/pig.rs
#![forbid(unsafe_code)]

use log::debug;
use rustc_hash::FxHashMap;

use crate::engine::constants::BlockType;
use crate::engine::grid::OccupancyGrid;
use crate::engine::platform::PlatformSet;
use crate::engine::units;

/// Token embedded in a carved chamber.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Pig,
    Tnt,
}

/// A candidate (or chosen) chamber location: the platform bounding the
/// chamber from above, and the primary-block column of the token's center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PigSite {
    pub platform_row: usize,
    pub column: usize,
}

/// A policy-selected site together with the token it receives.
#[derive(Clone, Copy, Debug)]
pub struct Placement {
    pub site: PigSite,
    pub token: TokenKind,
}

/// Fit arithmetic shared by candidate enumeration and carving.
#[derive(Clone, Copy, Debug)]
pub struct PigFit {
    /// Primary-block rows needed to cover the pig's height.
    pub rows: usize,
    /// Primary-block columns needed to cover the pig's width.
    pub cols: usize,
}

impl PigFit {
    pub fn new(primary: &BlockType, pig: &BlockType) -> Self {
        Self {
            rows: units::blocks_to_cover(pig.height, primary.height),
            cols: units::blocks_to_cover(pig.width, primary.width),
        }
    }

    /// Bottom row of the chamber under `platform_row`: where the token rests.
    pub fn resting_row(&self, platform_row: usize) -> usize {
        platform_row + 1 - self.rows
    }
}

/// Enumerate every site a pig could occupy: platforms whose chamber is at
/// least the pig's height, one candidate per lateral platform-block
/// position, centered on the column under the block's physical midpoint.
/// Sites whose resting row falls outside the grid are discarded.
pub fn candidate_sites(
    grid: &OccupancyGrid,
    platforms: &PlatformSet,
    laterals: &FxHashMap<usize, Vec<f64>>,
    fit: &PigFit,
    primary: &BlockType,
    platform_block: &BlockType,
) -> Vec<PigSite> {
    let mut sites = Vec::new();
    for chamber in platforms.chambers() {
        if chamber.gap < fit.rows {
            continue;
        }
        if fit.resting_row(chamber.platform_row) >= grid.num_rows() {
            continue;
        }
        let Some(distances) = laterals.get(&chamber.platform_row) else {
            continue;
        };
        for &x in distances {
            let mid = units::span_midpoint(x, platform_block.width, primary.width);
            if mid < 0 || mid as usize >= grid.num_cols() {
                continue;
            }
            sites.push(PigSite {
                platform_row: chamber.platform_row,
                column: mid as usize,
            });
        }
    }
    debug!("{} candidate pig sites", sites.len());
    sites
}

/// Cell flips for all chosen chambers, computed before any mutation.
///
/// Applying is two-phase: every clear lands before any wall fill, so
/// overlapping carve regions cannot produce order-dependent grids and the
/// one-cell support frame always survives.
#[derive(Clone, Debug, Default)]
pub struct CarvePlan {
    clears: Vec<(usize, usize)>,
    walls: Vec<(usize, usize)>,
}

impl CarvePlan {
    pub fn for_placements(placements: &[Placement], grid: &OccupancyGrid, fit: &PigFit) -> Self {
        let mut plan = CarvePlan::default();
        let num_rows = grid.num_rows() as i64;
        let num_cols = grid.num_cols() as i64;
        for placement in placements {
            let site = placement.site;
            let left = site.column as i64 - (fit.cols as i64 - 1) / 2;
            let bottom = fit.resting_row(site.platform_row) as i64;
            for row in bottom..=site.platform_row as i64 {
                if row >= num_rows {
                    // The chamber may poke past the grid top (ceiling case).
                    continue;
                }
                for col in left..left + fit.cols as i64 {
                    if col < 0 || col >= num_cols {
                        // Boundary columns are skipped, never wrapped.
                        continue;
                    }
                    plan.clears.push((row as usize, col as usize));
                }
                for col in [left - 1, left + fit.cols as i64] {
                    if col >= 0 && col < num_cols {
                        plan.walls.push((row as usize, col as usize));
                    }
                }
            }
        }
        plan
    }

    pub fn apply(&self, grid: &mut OccupancyGrid) {
        for &(row, col) in &self.clears {
            grid.set(row, col, false);
        }
        for &(row, col) in &self.walls {
            grid.set(row, col, true);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clears.is_empty() && self.walls.is_empty()
    }
}

/// Placement map keyed by platform row, columns sorted, for the serializer.
pub fn placement_map(placements: &[Placement]) -> FxHashMap<usize, Vec<usize>> {
    let mut map: FxHashMap<usize, Vec<usize>> = FxHashMap::default();
    for placement in placements {
        map.entry(placement.site.platform_row)
            .or_default()
            .push(placement.site.column);
    }
    for columns in map.values_mut() {
        columns.sort_unstable();
    }
    map
}
