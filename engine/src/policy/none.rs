// engine/src/policy/none.rs
#![forbid(unsafe_code)]

use crate::engine::{OccupancyGrid, PigSite, Placement};

use super::base::PigPolicy;

/// Places nothing: blocks-only output.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPigs;

impl PigPolicy for NoPigs {
    fn choose_pigs(&mut self, _grid: &OccupancyGrid, _candidates: &[PigSite]) -> Vec<Placement> {
        Vec::new()
    }
}
