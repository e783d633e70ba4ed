//! # holdem-ai: Decision Policies for the Table Engine
//!
//! Action selection lives behind the [`DecisionPolicy`] trait: a function
//! from the table state and the legal-action bounds to a chosen action.
//! The engine's state machine never depends on any particular policy, so
//! deterministic test policies and stronger AI swap in freely.
//!
//! ## Policies
//!
//! - [`random::RandomPolicy`] - seedable uniform choice among legal actions
//! - [`baseline::BaselinePolicy`] - chart-and-pot-odds rule-based play
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::{create_policy, DecisionPolicy};
//! use holdem_engine::engine::Engine;
//! use holdem_engine::game::TableConfig;
//!
//! let mut table = Engine::new_with_seed(TableConfig::default(), 11);
//! table.seat_player("a", "A", 0, 2_000).unwrap();
//! table.seat_player("b", "B", 1, 2_000).unwrap();
//! table.start_hand().unwrap();
//!
//! let mut policy = create_policy("baseline", 0);
//! let seat = table.state().actor_seat.unwrap();
//! let id = table.state().player_at(seat).unwrap().id.clone();
//! let legal = table.legal_actions_for(&id).unwrap();
//! let action = policy.decide(table.state(), seat, &legal);
//! table.apply_action(&id, action).unwrap();
//! ```

use holdem_engine::game::GameState;
use holdem_engine::player::PlayerAction;
use holdem_engine::rules::LegalActions;

pub mod baseline;
pub mod random;

/// A pluggable action-selection strategy.
///
/// `decide` must return an action legal under `legal`; the engine still
/// validates whatever comes back and rejects anything illegal rather than
/// repairing it.
pub trait DecisionPolicy: Send {
    /// Choose an action for the player at `seat`, who is next to act.
    fn decide(&mut self, state: &GameState, seat: usize, legal: &LegalActions) -> PlayerAction;

    /// Identifier for logs and matchup reports.
    fn name(&self) -> &str;
}

/// Create a policy by kind: `"random"` or `"baseline"`. The seed only
/// matters for randomized policies; deterministic ones ignore it.
pub fn create_policy(kind: &str, seed: u64) -> Box<dyn DecisionPolicy> {
    match kind {
        "random" => Box::new(random::RandomPolicy::new(seed)),
        "baseline" => Box::new(baseline::BaselinePolicy::new()),
        other => panic!("unknown policy kind: {}", other),
    }
}
