// engine/src/engine/units.rs
#![forbid(unsafe_code)]

use crate::engine::constants::MULTIPLIER;

/*
Quantized distance arithmetic.

Counts derived from divided distances feed loop bounds and grid indices, so
every such division goes through this module: distances are scaled to
fixed-point integers first, then compared/divided as integers. A physical
span that is an exact multiple of a block dimension must yield an exact
count, which binary floating-point division cannot promise.
*/

/// Convert a physical distance to fixed-point.
#[inline]
pub fn to_fixed(distance: f64) -> i64 {
    (distance * MULTIPLIER as f64) as i64
}

/// Number of `covering`-sized instances needed to cover `covered`
/// (quantized ceiling division).
pub fn blocks_to_cover(covered: f64, covering: f64) -> usize {
    let num = to_fixed(covered);
    let den = to_fixed(covering);
    debug_assert!(den > 0, "covering distance must be positive");
    debug_assert!(num >= 0, "covered distance must be non-negative");
    let mut count = num / den;
    if num % den != 0 {
        count += 1;
    }
    count as usize
}

/// Primary-block column index containing the given lateral distance.
/// Columns extend left of the grid into negative indices; callers clamp.
#[inline]
pub fn column_at(distance: f64, block_width: f64) -> i64 {
    let num = to_fixed(distance);
    let den = to_fixed(block_width);
    debug_assert!(den > 0, "block width must be positive");
    num.div_euclid(den)
}

/// Inclusive column range covered by a physical span centered at `center`.
///
/// A span ending exactly on a cell boundary does not enter the next cell.
pub fn column_span(center: f64, width: f64, block_width: f64) -> (i64, i64) {
    let half = width / 2.0;
    let lo = column_at(center - half, block_width);
    let hi_edge = to_fixed(center + half);
    let den = to_fixed(block_width);
    let hi = if hi_edge.rem_euclid(den) == 0 {
        hi_edge.div_euclid(den) - 1
    } else {
        hi_edge.div_euclid(den)
    };
    (lo, hi.max(lo))
}

/// Midpoint column of a physical span (the pig-candidate rule).
#[inline]
pub fn span_midpoint(center: f64, width: f64, block_width: f64) -> i64 {
    let (lo, hi) = column_span(center, width, block_width);
    (lo + hi).div_euclid(2)
}
