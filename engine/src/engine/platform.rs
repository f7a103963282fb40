// engine/src/engine/platform.rs
#![forbid(unsafe_code)]

use std::collections::BTreeSet;

use log::debug;

use crate::engine::constants::BlockType;
use crate::engine::grid::OccupancyGrid;
use crate::engine::units;

/// Ordered, duplicate-free set of platform rows.
///
/// A platform at row `r` is the physical slab between rows `r` and `r + 1`:
/// it supports the material of row `r + 1` and lifts every row above `r` by
/// one platform height. The set may contain one row `>= num_rows`: the
/// imaginary ceiling platform that bounds the topmost pig chamber and is
/// never rendered.
#[derive(Clone, Debug)]
pub struct PlatformSet {
    rows: BTreeSet<usize>,
    num_rows: usize,
}

/// One vertical span bounded above by a platform. `gap` counts the rows
/// between this platform and the previous one (virtual ground for the
/// lowest).
#[derive(Clone, Copy, Debug)]
pub struct Chamber {
    pub platform_row: usize,
    pub gap: usize,
}

impl PlatformSet {
    /// Detect needed platforms, then synthesize the periodic extras.
    ///
    /// Detection: per column, every maximal run of empty cells with occupied
    /// material directly above and directly below it marks its top row (the
    /// row immediately below the floating material) as needing a platform.
    ///
    /// Synthesis: outward from the lowest and highest detected rows at
    /// `pig_rows` intervals, down to the grid bottom and up past its top;
    /// the first candidate past the top is kept as the unrendered ceiling.
    /// No detected rows means no platforms at all.
    pub fn plan(grid: &OccupancyGrid, pig_rows: usize) -> Self {
        let mut rows = detect_floating_rows(grid);
        debug_assert!(pig_rows >= 1);

        let lowest = rows.iter().next().copied();
        let highest = rows.iter().next_back().copied();
        if let (Some(lowest), Some(highest)) = (lowest, highest) {
            let mut row = lowest;
            while row >= pig_rows {
                row -= pig_rows;
                rows.insert(row);
            }
            let mut row = highest;
            loop {
                row += pig_rows;
                rows.insert(row);
                if row >= grid.num_rows() {
                    break;
                }
            }
        }

        debug!(
            "planned {} platform rows (ceiling: {:?})",
            rows.len(),
            rows.iter().next_back().filter(|&&r| r >= grid.num_rows()),
        );
        Self {
            rows,
            num_rows: grid.num_rows(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Platform rows that exist physically (inside the grid).
    pub fn rendered(&self) -> impl Iterator<Item = usize> + '_ {
        let num_rows = self.num_rows;
        self.rows.iter().copied().filter(move |&r| r < num_rows)
    }

    /// The imaginary ceiling row, if one was synthesized.
    pub fn ceiling(&self) -> Option<usize> {
        self.rows
            .iter()
            .next_back()
            .copied()
            .filter(|&r| r >= self.num_rows)
    }

    /// All chambers in ascending platform order, ceiling included.
    pub fn chambers(&self) -> Vec<Chamber> {
        let mut previous: i64 = -1; // virtual ground below the lowest platform
        self.rows
            .iter()
            .map(|&platform_row| {
                let gap = (platform_row as i64 - previous) as usize;
                previous = platform_row as i64;
                Chamber { platform_row, gap }
            })
            .collect()
    }

    /// The grid row a platform's blocks must support, if it exists: the row
    /// directly above a rendered platform, or the grid's top row for the
    /// ceiling.
    pub fn support_row(&self, platform_row: usize) -> Option<usize> {
        if platform_row >= self.num_rows {
            self.num_rows.checked_sub(1)
        } else if platform_row + 1 < self.num_rows {
            Some(platform_row + 1)
        } else {
            None
        }
    }
}

fn detect_floating_rows(grid: &OccupancyGrid) -> BTreeSet<usize> {
    let mut rows = BTreeSet::new();
    for col in 0..grid.num_cols() {
        let mut seen_occupied_above = false;
        let mut run_top: Option<usize> = None;
        for row in (0..grid.num_rows()).rev() {
            if grid.get(row, col) {
                if let Some(top) = run_top {
                    // The run is bounded: occupied above its top, occupied here.
                    rows.insert(top);
                }
                run_top = None;
                seen_occupied_above = true;
            } else if seen_occupied_above && run_top.is_none() {
                run_top = Some(row);
            }
        }
        // A run reaching the grid bottom is not a floating overhang.
    }
    rows
}

/// Count of rendered platform rows strictly below each grid row, derived
/// once so the monotonic-offset invariant stays independently checkable.
#[derive(Clone, Debug)]
pub struct OffsetTable {
    below: Vec<usize>,
}

impl OffsetTable {
    pub fn new(platforms: &PlatformSet, num_rows: usize) -> Self {
        let rendered: Vec<usize> = platforms.rendered().collect();
        let below = (0..num_rows)
            .map(|row| rendered.partition_point(|&p| p < row))
            .collect::<Vec<_>>();
        debug_assert!(below.windows(2).all(|w| w[0] <= w[1]));
        Self { below }
    }

    /// Rendered platforms strictly below `row`; 0 for any row at or below
    /// the lowest platform.
    #[inline]
    pub fn platforms_below(&self, row: usize) -> usize {
        self.below.get(row).copied().unwrap_or_else(|| {
            self.below.last().copied().unwrap_or(0)
        })
    }
}

/// Physical center distances for one platform row's blocks.
///
/// The span to cover runs from the first to the last occupied column of the
/// supported row. An odd block count places one block at the span center, an
/// even count a symmetric pair; further blocks extend outward two at a time.
/// Every candidate position must actually have supported cells inside its
/// window; tiling arithmetic alone never puts a block under empty air.
pub fn lateral_distances(
    grid: &OccupancyGrid,
    support_row: usize,
    primary: &BlockType,
    platform: &BlockType,
) -> Vec<f64> {
    let Some((first, last)) = grid.row_occupied_span(support_row) else {
        // A platform row with nothing above it is a legitimate empty span.
        return Vec::new();
    };
    let covered_blocks = last - first + 1;
    let center = (first as f64 + covered_blocks as f64 / 2.0) * primary.width;
    let distance_to_cover = covered_blocks as f64 * primary.width;
    let mut remaining = units::blocks_to_cover(distance_to_cover, platform.width);

    let mut lateral = Vec::with_capacity(remaining);
    if remaining % 2 == 0 {
        lateral.push(center - platform.width / 2.0);
        lateral.push(center + platform.width / 2.0);
        remaining -= 2;
    } else {
        lateral.push(center);
        remaining -= 1;
    }
    for _ in 0..remaining / 2 {
        lateral.insert(0, lateral[0] - platform.width);
        lateral.push(lateral[lateral.len() - 1] + platform.width);
    }

    lateral.retain(|&x| {
        let (lo, hi) = units::column_span(x, platform.width, primary.width);
        grid.any_occupied_in_cols(support_row, lo, hi)
    });
    lateral
}
