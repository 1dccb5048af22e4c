//! Opening-hand decisions.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::personality::MulliganStrategy;
use crate::cards::Card;
use crate::core::entity::CardInstanceId;
use crate::core::rng::GameRng;

/// Highest cost the heuristic keeps in an opening hand.
const HEURISTIC_MAX_COST: u32 = 3;

/// Top of the early curve the curve strategy tries to fill.
const CURVE_TOP: u32 = 4;

/// Pick the cards to send back.
pub fn choose_mulligan(strategy: MulliganStrategy, hand: &[Card], rng: &mut GameRng) -> SmallVec<[CardInstanceId; 4]> {
    match strategy {
        MulliganStrategy::Random => hand.iter().filter(|_| rng.coin_flip()).map(|c| c.id).collect(),
        MulliganStrategy::Heuristic => {
            let mut seen = FxHashSet::default();
            hand.iter()
                .filter(|c| {
                    let first_copy = seen.insert(c.definition.id);
                    c.cost() > HEURISTIC_MAX_COST || !first_copy
                })
                .map(|c| c.id)
                .collect()
        }
        MulliganStrategy::Curve => {
            let mut ordered: SmallVec<[&Card; 8]> = hand.iter().collect();
            ordered.sort_by_key(|c| (c.cost(), c.id));

            let mut filled = FxHashSet::default();
            ordered
                .into_iter()
                .filter(|c| {
                    let step = c.cost().max(1);
                    step > CURVE_TOP || !filled.insert(step)
                })
                .map(|c| c.id)
                .collect()
        }
    }
}
