// engine/src/policy/surprise.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{OccupancyGrid, PigSite, Placement, TokenKind};

use super::base::PigPolicy;

/// Like `ChamberPolicy`, but roughly one chamber in ten hides a TNT crate
/// instead of a pig. Deterministic for a fixed seed; block placement is
/// unaffected either way.
pub struct SurprisePolicy {
    rng: StdRng,
}

impl SurprisePolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl PigPolicy for SurprisePolicy {
    fn choose_pigs(&mut self, _grid: &OccupancyGrid, candidates: &[PigSite]) -> Vec<Placement> {
        candidates
            .iter()
            .map(|&site| {
                let token = if self.rng.gen_range(0..100) >= 90 {
                    TokenKind::Tnt
                } else {
                    TokenKind::Pig
                };
                Placement { site, token }
            })
            .collect()
    }
}
