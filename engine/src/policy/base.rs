// engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{OccupancyGrid, PigSite, Placement};

/// Policy decides which candidate chambers actually receive a token.
///
/// `candidates` is every site the placer found room for; the returned
/// placements must be a subset of it. Returning an empty vector is a valid,
/// non-erroneous outcome (a structure too shallow for chambers).
///
/// Object-safe so it can be used as `Box<dyn PigPolicy>`.
pub trait PigPolicy {
    fn choose_pigs(&mut self, grid: &OccupancyGrid, candidates: &[PigSite]) -> Vec<Placement>;
}
