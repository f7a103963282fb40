// engine/tests/structure_characterization.rs
#![forbid(unsafe_code)]

/**
 * Pipeline characterization tests.
 *
 * Purpose:
 * - Lock in observable end-to-end behavior for fixture shapes before any
 *   deeper refactors.
 * - Cover the documented scenarios: a perfectly tiling square, a floating
 *   span that forces a platform, a structure too shallow for chambers, and
 *   an entirely empty grid.
 *
 * How the tests work:
 * - They drive the public pipeline entry points (`from_polygon`,
 *   `from_mask`) and assert on the rendered level document, not on private
 *   intermediate state, so internals can be refactored freely as long as
 *   output bytes hold.
 */
use silhouette_engine::engine::{Point, Polygon, Structure, StructureConfig, GROUND_HEIGHT};
use silhouette_engine::policy::{ChamberPolicy, NoPigs, SurprisePolicy};

fn square_polygon(side: f64) -> Polygon {
    Polygon::from_points(vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: side, y: 0.0 },
        Point { x: side, y: side },
        Point { x: 0.0, y: side },
    ])
    .expect("valid square")
}

fn config(blocks_x: usize) -> StructureConfig {
    StructureConfig {
        blocks_x,
        ..StructureConfig::default()
    }
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn square_polygon_fills_the_grid_completely() {
    let shape = square_polygon(10.0);
    let structure = Structure::from_polygon(&shape, &config(10), &mut ChamberPolicy)
        .expect("valid configuration");

    let grid = structure.grid();
    assert_eq!(grid.num_cols(), 10);
    assert_eq!(grid.num_rows(), 10);
    for row in 0..grid.num_rows() {
        for col in 0..grid.num_cols() {
            assert!(grid.get(row, col), "cell ({row},{col}) must be occupied");
        }
    }

    // A fully supported solid produces no platforms and hosts no pigs.
    assert!(structure.platforms().is_empty());
    assert!(structure.placements().is_empty());

    let doc = structure.to_level_document();
    assert_eq!(count_occurrences(&doc, "<Block type=\"SquareTiny\""), 100);
    assert_eq!(count_occurrences(&doc, "<Pig"), 0);

    // Rotation is the omitted-attribute sentinel, never a literal zero.
    assert!(!doc.contains("rotation="));

    // Bottom row rests on the ground plane: y = ground + block_height / 2.
    assert_eq!(GROUND_HEIGHT, -3.5);
    assert!(doc.contains("y=\"-3.39\""));
    // Leftmost column is centered half a block from the origin.
    assert!(doc.contains("x=\"0.11\""));
}

#[test]
fn floating_span_gets_a_platform_directly_beneath_it() {
    // Top-down mask: an occupied slab, a one-row gap, an occupied slab.
    let mask = vec![
        vec![true, true, true],
        vec![false, false, false],
        vec![true, true, true],
    ];
    let structure =
        Structure::from_mask(&mask, &config(3), &mut NoPigs).expect("valid configuration");

    let rendered: Vec<usize> = structure.platforms().rendered().collect();
    assert_eq!(rendered, vec![1], "the gap row itself carries the platform");

    let doc = structure.to_level_document();
    // One platform block, centered under the floating span's extent and
    // sitting on top of its own row: y = -3.5 + 2 * 0.22 + 0.11.
    assert!(doc.contains("<Block type=\"RectBig\" material=\"stone\" x=\"0.33\" y=\"-2.95\"/>"));
}

#[test]
fn ceiling_chamber_hosts_a_pig_on_the_roof() {
    let mask = vec![
        vec![true, true, true],
        vec![false, false, false],
        vec![true, true, true],
    ];
    let structure =
        Structure::from_mask(&mask, &config(3), &mut ChamberPolicy).expect("valid configuration");

    // The only chamber tall enough sits under the imaginary ceiling.
    assert_eq!(structure.placements().len(), 1);
    let placement = structure.placements()[0];
    assert_eq!(placement.site.column, 1);
    assert!(structure.platforms().ceiling().is_some());

    let doc = structure.to_level_document();
    assert_eq!(count_occurrences(&doc, "<Pig type=\"BasicSmall\""), 1);
    // Resting row 2, one rendered platform below it:
    // y = -3.5 + 0.22 + 2 * 0.22 + 0.25.
    assert!(doc.contains("<Pig type=\"BasicSmall\" material=\"\" x=\"0.33\" y=\"-2.59\"/>"));
}

#[test]
fn shallow_structure_places_zero_pigs_without_error() {
    // One occupied row: nothing is floating, no chamber can ever fit.
    let mask = vec![vec![true, true, true]];
    let structure =
        Structure::from_mask(&mask, &config(3), &mut ChamberPolicy).expect("valid configuration");

    assert!(structure.platforms().is_empty());
    assert!(structure.placements().is_empty());
    let doc = structure.to_level_document();
    assert_eq!(count_occurrences(&doc, "<Pig"), 0);
    assert_eq!(count_occurrences(&doc, "<Block type=\"SquareTiny\""), 3);
}

#[test]
fn all_empty_grid_serializes_to_a_well_formed_empty_body() {
    let mask = vec![vec![false, false], vec![false, false]];
    let structure =
        Structure::from_mask(&mask, &config(2), &mut ChamberPolicy).expect("valid configuration");

    assert_eq!(structure.grid().num_rows(), 0);
    assert_eq!(structure.grid().occupied_count(), 0);

    let doc = structure.to_level_document();
    assert!(doc.starts_with("<?xml"), "no leading blank line allowed");
    assert_eq!(count_occurrences(&doc, "<Block"), 0);
    assert_eq!(count_occurrences(&doc, "<Pig"), 0);
    // The body element survives, empty, on its own lines.
    assert!(doc.contains("      <GameObjects>\n      </GameObjects>\n"));
}

#[test]
fn pipeline_output_is_byte_identical_across_runs() {
    let shape = Polygon::from_points(vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 12.0, y: 0.0 },
        Point { x: 12.0, y: 3.0 },
        Point { x: 7.0, y: 3.0 },
        Point { x: 7.0, y: 9.0 },
        Point { x: 12.0, y: 9.0 },
        Point { x: 12.0, y: 12.0 },
        Point { x: 0.0, y: 12.0 },
    ])
    .expect("valid polygon");

    let first = Structure::from_polygon(&shape, &config(12), &mut ChamberPolicy)
        .expect("valid configuration")
        .to_level_document();
    let second = Structure::from_polygon(&shape, &config(12), &mut ChamberPolicy)
        .expect("valid configuration")
        .to_level_document();
    assert_eq!(first, second);
}

#[test]
fn surprise_policy_is_deterministic_for_a_fixed_seed() {
    let mask = vec![
        vec![true, true, true, true, true, true],
        vec![false, false, false, false, false, false],
        vec![true, true, true, true, true, true],
        vec![true, true, true, true, true, true],
        vec![true, true, true, true, true, true],
    ];

    let first = Structure::from_mask(&mask, &config(6), &mut SurprisePolicy::new(99))
        .expect("valid configuration")
        .to_level_document();
    let second = Structure::from_mask(&mask, &config(6), &mut SurprisePolicy::new(99))
        .expect("valid configuration")
        .to_level_document();
    assert_eq!(first, second);
}

#[test]
fn degenerate_polygons_fail_before_any_grid_is_built() {
    assert!(Polygon::from_points(vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 1.0, y: 1.0 },
    ])
    .is_err());

    // Zero height.
    assert!(Polygon::from_points(vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 1.0, y: 0.0 },
        Point { x: 2.0, y: 0.0 },
    ])
    .is_err());

    // Closing point duplicating the first is tolerated.
    assert!(Polygon::from_points(vec![
        Point { x: 0.0, y: 0.0 },
        Point { x: 1.0, y: 0.0 },
        Point { x: 1.0, y: 1.0 },
        Point { x: 0.0, y: 0.0 },
    ])
    .is_ok());
}

#[test]
fn invalid_configuration_fails_before_rasterization() {
    let shape = square_polygon(10.0);

    let unknown = StructureConfig {
        primary_block: "granite_sphere".to_string(),
        ..StructureConfig::default()
    };
    assert!(Structure::from_polygon(&shape, &unknown, &mut ChamberPolicy).is_err());

    let zero_blocks = StructureConfig {
        blocks_x: 0,
        ..StructureConfig::default()
    };
    assert!(Structure::from_polygon(&shape, &zero_blocks, &mut ChamberPolicy).is_err());

    let bad_coverage = StructureConfig {
        coverage: 1.5,
        ..StructureConfig::default()
    };
    assert!(Structure::from_polygon(&shape, &bad_coverage, &mut ChamberPolicy).is_err());
}
