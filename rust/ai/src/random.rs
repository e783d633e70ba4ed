//! Uniform-random action selection.
//!
//! Picks uniformly among the action kinds that are currently legal, with
//! raise amounts drawn uniformly from the legal raise-to range. Seeded, so
//! a fixed seed replays the same decisions; useful as the weakest baseline
//! and for fuzzing the state machine in tests.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};

use holdem_engine::game::GameState;
use holdem_engine::player::PlayerAction;
use holdem_engine::rules::LegalActions;

use crate::DecisionPolicy;

#[derive(Debug)]
pub struct RandomPolicy {
    rng: StdRng,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl DecisionPolicy for RandomPolicy {
    fn decide(&mut self, state: &GameState, seat: usize, legal: &LegalActions) -> PlayerAction {
        let stack = state.player_at(seat).map_or(0, |p| p.stack);

        let mut kinds = Vec::with_capacity(5);
        if legal.can_check {
            kinds.push(Kind::Check);
        }
        kinds.push(Kind::Fold);
        if stack > 0 {
            kinds.push(Kind::Call);
            if legal.min_raise_to < legal.max_raise_to {
                kinds.push(Kind::Raise);
            }
            kinds.push(Kind::AllIn);
        }

        match kinds.choose(&mut self.rng).copied().unwrap_or(Kind::Fold) {
            Kind::Fold => PlayerAction::Fold,
            Kind::Check => PlayerAction::Check,
            Kind::Call => PlayerAction::Call,
            Kind::AllIn => PlayerAction::AllIn,
            Kind::Raise => {
                let to = self
                    .rng
                    .random_range(legal.min_raise_to..=legal.max_raise_to);
                PlayerAction::Raise(to)
            }
        }
    }

    fn name(&self) -> &str {
        "RandomPolicy"
    }
}
