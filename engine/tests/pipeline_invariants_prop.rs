// engine/tests/pipeline_invariants_prop.rs
#![forbid(unsafe_code)]

/**
 * Property/invariant tests for the shape-to-structure pipeline.
 *
 * Purpose:
 * - Provide fuzz-like coverage using generated rectangles and occupancy
 *   masks.
 * - Lock core invariants that must hold regardless of the input silhouette
 *   or the pig policy in use.
 *
 * Invariants covered:
 * - Rectangular polygons rasterize to fully occupied grids (no partial
 *   occupancy is possible when the shape exactly tiles the grid).
 * - Platform rows are strictly increasing and `platforms_below` is a
 *   monotonically non-decreasing step function starting at zero.
 * - Every placed token keeps its one-cell support frame after carving, even
 *   when chambers overlap.
 * - The full pipeline is idempotent: identical inputs yield byte-identical
 *   level documents.
 */
use proptest::prelude::*;

use silhouette_engine::engine::{Point, Polygon, Structure, StructureConfig};
use silhouette_engine::policy::ChamberPolicy;

fn config(blocks_x: usize) -> StructureConfig {
    StructureConfig {
        blocks_x,
        ..StructureConfig::default()
    }
}

/// Wall columns just outside a token's cleared span, for the shipped
/// registry (a pig covers three primary columns).
fn wall_columns(column: usize) -> (i64, i64) {
    let left = column as i64 - 1;
    (left - 1, left + 3)
}

fn mask_strategy() -> impl Strategy<Value = Vec<Vec<bool>>> {
    prop::collection::vec(prop::collection::vec(any::<bool>(), 1..8), 1..12)
}

proptest! {
    #[test]
    fn rectangles_rasterize_to_fully_occupied_grids(
        width in 1.0f64..20.0,
        height in 1.0f64..20.0,
        blocks_x in 1usize..20,
    ) {
        let shape = Polygon::from_points(vec![
            Point { x: 0.0, y: 0.0 },
            Point { x: width, y: 0.0 },
            Point { x: width, y: height },
            Point { x: 0.0, y: height },
        ]).expect("valid rectangle");

        let structure = Structure::from_polygon(&shape, &config(blocks_x), &mut ChamberPolicy)
            .expect("valid configuration");
        let grid = structure.grid();

        // A rectangle shorter than half a cell trims to zero rows; whatever
        // rows survive must be solid.
        prop_assert_eq!(grid.num_cols(), blocks_x);
        for row in 0..grid.num_rows() {
            for col in 0..grid.num_cols() {
                prop_assert!(grid.get(row, col), "cell ({},{}) empty", row, col);
            }
        }

        // A solid rectangle never floats, so nothing is lifted.
        prop_assert!(structure.platforms().is_empty());
        for row in 0..grid.num_rows() {
            prop_assert_eq!(structure.offsets().platforms_below(row), 0);
        }
    }

    #[test]
    fn platform_rows_and_offsets_stay_consistent(mask in mask_strategy()) {
        let structure = Structure::from_mask(&mask, &config(8), &mut ChamberPolicy)
            .expect("valid configuration");
        let grid = structure.grid();
        let offsets = structure.offsets();

        let rendered: Vec<usize> = structure.platforms().rendered().collect();
        prop_assert!(rendered.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(rendered.iter().all(|&r| r < grid.num_rows()));

        let mut previous = 0usize;
        for row in 0..grid.num_rows() {
            let below = offsets.platforms_below(row);
            prop_assert!(below >= previous, "offsets must be non-decreasing");
            previous = below;
        }
        if let Some(&lowest) = rendered.first() {
            for row in 0..=lowest {
                prop_assert_eq!(offsets.platforms_below(row), 0);
            }
        }
    }

    #[test]
    fn carved_chambers_keep_their_support_frame(mask in mask_strategy()) {
        let structure = Structure::from_mask(&mask, &config(8), &mut ChamberPolicy)
            .expect("valid configuration");
        let grid = structure.grid();

        for placement in structure.placements() {
            let site = placement.site;
            prop_assert!(site.column < grid.num_cols());
            let (wall_left, wall_right) = wall_columns(site.column);

            let bottom = site.platform_row + 1 - 3;
            let top = site.platform_row.min(grid.num_rows().saturating_sub(1));
            prop_assert!(bottom < grid.num_rows());
            for row in bottom..=top {
                for wall in [wall_left, wall_right] {
                    if wall >= 0 && (wall as usize) < grid.num_cols() {
                        prop_assert!(
                            grid.get(row, wall as usize),
                            "wall cell ({}, {}) must survive carving",
                            row,
                            wall
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn identical_inputs_yield_byte_identical_documents(mask in mask_strategy()) {
        let first = Structure::from_mask(&mask, &config(8), &mut ChamberPolicy)
            .expect("valid configuration")
            .to_level_document();
        let second = Structure::from_mask(&mask, &config(8), &mut ChamberPolicy)
            .expect("valid configuration")
            .to_level_document();
        prop_assert_eq!(first, second);
    }
}
