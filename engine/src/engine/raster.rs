// engine/src/engine/raster.rs
#![forbid(unsafe_code)]

use log::debug;

use crate::engine::constants::BlockType;
use crate::engine::geometry::Polygon;
use crate::engine::grid::OccupancyGrid;
use crate::engine::units;

/// Multiplier that scales the primary block so exactly `blocks_x` of them
/// span the shape's width. The same factor is applied to the block's height
/// so cells keep the block's aspect ratio.
pub fn primary_block_factor(shape: &Polygon, primary: &BlockType, blocks_x: usize) -> f64 {
    let target_width = shape.width() / blocks_x as f64;
    target_width / primary.width
}

/// Rasterize the polygon into an occupancy grid of `blocks_x` columns.
///
/// A cell is occupied when its intersection area with the shape exceeds
/// `coverage` of the cell's own area. Fully-empty bottom/top rows are
/// trimmed afterwards.
pub fn rasterize(
    shape: &Polygon,
    primary: &BlockType,
    blocks_x: usize,
    coverage: f64,
) -> OccupancyGrid {
    let factor = primary_block_factor(shape, primary, blocks_x);
    let cell_width = primary.width * factor;
    let cell_height = primary.height * factor;
    let num_rows = units::blocks_to_cover(shape.height(), cell_height);
    let (min_x, min_y, _, _) = shape.bounds();

    let cell_area = cell_width * cell_height;
    let mut rows = Vec::with_capacity(num_rows);
    for row in 0..num_rows {
        let y = min_y + row as f64 * cell_height;
        let mut cells = Vec::with_capacity(blocks_x);
        for col in 0..blocks_x {
            let x = min_x + col as f64 * cell_width;
            let overlap = shape.clip_area(x, y, x + cell_width, y + cell_height);
            cells.push(overlap > cell_area * coverage);
        }
        rows.push(cells);
    }

    let mut grid = OccupancyGrid::from_rows_bottom_up(rows);
    let (dropped_bottom, dropped_top) = grid.trim_empty_rows();
    debug!(
        "rasterized {}x{} grid (cell {:.4}x{:.4}, trimmed {} bottom / {} top empty rows)",
        grid.num_rows(),
        grid.num_cols(),
        cell_width,
        cell_height,
        dropped_bottom,
        dropped_top,
    );
    grid
}

/// Grid-based rasterization variant: consume a pre-built boolean matrix from
/// the external pixel-classification service. Mask rows arrive top-to-bottom
/// (image order) and are flipped bottom-up; ragged rows are padded with
/// empty cells.
pub fn grid_from_mask(mask_top_down: &[Vec<bool>]) -> OccupancyGrid {
    let num_cols = mask_top_down.iter().map(Vec::len).max().unwrap_or(0);
    let mut rows = Vec::with_capacity(mask_top_down.len());
    for mask_row in mask_top_down.iter().rev() {
        let mut row = mask_row.clone();
        row.resize(num_cols, false);
        rows.push(row);
    }
    let mut grid = OccupancyGrid::from_rows_bottom_up(rows);
    let (dropped_bottom, dropped_top) = grid.trim_empty_rows();
    debug!(
        "mask grid {}x{} (trimmed {} bottom / {} top empty rows)",
        grid.num_rows(),
        grid.num_cols(),
        dropped_bottom,
        dropped_top,
    );
    grid
}
