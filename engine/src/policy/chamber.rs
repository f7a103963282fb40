// engine/src/policy/chamber.rs
#![forbid(unsafe_code)]

use crate::engine::{OccupancyGrid, PigSite, Placement, TokenKind};

use super::base::PigPolicy;

/// Canonical policy: every qualifying chamber receives a pig.
#[derive(Clone, Copy, Debug, Default)]
pub struct ChamberPolicy;

impl PigPolicy for ChamberPolicy {
    fn choose_pigs(&mut self, _grid: &OccupancyGrid, candidates: &[PigSite]) -> Vec<Placement> {
        candidates
            .iter()
            .map(|&site| Placement {
                site,
                token: TokenKind::Pig,
            })
            .collect()
    }
}
