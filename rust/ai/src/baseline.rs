//! Rule-based baseline policy.
//!
//! A deterministic reference opponent: preflop hand-strength chart,
//! postflop 7-card evaluation and pot-odds calls. Strong enough to punish
//! the random policy, simple enough that its decisions are predictable in
//! tests.

use holdem_engine::cards::Card;
use holdem_engine::game::{GameState, Stage};
use holdem_engine::hand::{evaluate, Category};
use holdem_engine::player::PlayerAction;
use holdem_engine::rules::LegalActions;

use crate::DecisionPolicy;

/// Deterministic chart-and-pot-odds opponent.
///
/// **Preflop:** premium pairs and big aces raise, medium hands call when
/// cheap, trash folds to any bet. **Postflop:** made hands (two pair and
/// up) bet and call; one pair calls small bets by pot odds; everything
/// else checks or folds.
#[derive(Debug, Clone, Default)]
pub struct BaselinePolicy;

impl BaselinePolicy {
    pub fn new() -> Self {
        Self
    }

    /// Preflop hand strength on a 0-10 scale.
    ///
    /// 9-10 premium (AA-JJ, AKs), 7-8 strong (TT-99, AK, AQs), 5-6 medium
    /// (88-77, AJ, KQ, good suited connectors), 3-4 marginal, 0-2 trash.
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let r1 = hole[0].rank as u8;
        let r2 = hole[1].rank as u8;
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;

        if r1 == r2 {
            return match high {
                14 | 13 => 10, // AA, KK
                12 | 11 => 9,  // QQ, JJ
                10 => 8,       // TT
                9 => 7,        // 99
                8 => 6,        // 88
                7 => 5,        // 77
                _ => 4,        // 66-22
            };
        }

        match (high, low) {
            (14, 13) => 8 + 2 * suited as u8, // AK
            (14, 12) => 7 + suited as u8,     // AQ
            (14, 11) => 6 + suited as u8,     // AJ
            (14, 10) => 5 + suited as u8,     // AT
            (14, _) => 4 + suited as u8,      // Ax
            (13, 12) => 6 + suited as u8,     // KQ
            (13, 11) => 5 + suited as u8,     // KJ
            (13, 10) => 4 + suited as u8,     // KT
            (12, 11) => 5 + suited as u8,     // QJ
            (12, 10) => 4 + suited as u8,     // QT
            _ => {
                if suited && high - low <= 2 {
                    if high >= 9 {
                        5
                    } else {
                        4
                    }
                } else if high >= 11 && low >= 9 {
                    4 // broadway
                } else {
                    2
                }
            }
        }
    }

    /// Postflop strength from the best hand over hole + board, or None
    /// before the flop.
    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }
        let mut cards = vec![hole[0], hole[1]];
        cards.extend_from_slice(board);
        let strength = evaluate(&cards).ok()?;

        let base = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        let kicker_boost = u8::from(strength.kickers[0] >= 12);
        Some((base + kicker_boost).min(10))
    }

    /// Pot odds of a call: pot / (pot + call). 1.0 when the call is free.
    fn pot_odds(pot: u32, call: u32) -> f32 {
        if call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + call) as f32
    }

    fn decide_facing_bet(strength: u8, pot: u32, stack: u32, legal: &LegalActions) -> PlayerAction {
        let odds = Self::pot_odds(pot, legal.to_call);

        // short stack: shove strong hands, dump the rest
        if legal.to_call >= stack {
            return if strength >= 7 {
                PlayerAction::AllIn
            } else {
                PlayerAction::Fold
            };
        }

        match strength {
            9..=10 => {
                let target = legal.min_raise_to + pot / 2;
                if target < legal.max_raise_to {
                    PlayerAction::Raise(target)
                } else {
                    PlayerAction::Call
                }
            }
            7..=8 => PlayerAction::Call,
            5..=6 => {
                if odds >= 0.3 || legal.to_call <= pot / 4 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            3..=4 => {
                if odds >= 0.4 || legal.to_call <= pot / 6 {
                    PlayerAction::Call
                } else {
                    PlayerAction::Fold
                }
            }
            _ => PlayerAction::Fold,
        }
    }

    fn decide_unopened(strength: u8, pot: u32, legal: &LegalActions) -> PlayerAction {
        match strength {
            7..=10 => {
                let target = legal.min_raise_to + pot / 3;
                if target < legal.max_raise_to {
                    PlayerAction::Raise(target)
                } else {
                    PlayerAction::Check
                }
            }
            _ => PlayerAction::Check,
        }
    }
}

impl DecisionPolicy for BaselinePolicy {
    fn decide(&mut self, state: &GameState, seat: usize, legal: &LegalActions) -> PlayerAction {
        let Some(player) = state.player_at(seat) else {
            return PlayerAction::Fold;
        };
        // without cards there is nothing to evaluate; take the free option
        let Some(hole) = player.hole_cards() else {
            return if legal.can_check {
                PlayerAction::Check
            } else {
                PlayerAction::Fold
            };
        };

        let strength = if state.stage == Stage::PreFlop || state.community.len() < 3 {
            Self::preflop_strength(hole)
        } else {
            Self::postflop_strength(hole, &state.community)
                .unwrap_or_else(|| Self::preflop_strength(hole))
        };

        if legal.can_check {
            Self::decide_unopened(strength, state.pot, legal)
        } else {
            Self::decide_facing_bet(strength, state.pot, player.stack, legal)
        }
    }

    fn name(&self) -> &str {
        "BaselinePolicy"
    }
}
