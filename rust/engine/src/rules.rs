use serde::Serialize;

use crate::errors::{GameError, GameResult};
use crate::player::PlayerAction;

/// The legal bounds published to whoever must act: decision policies pick
/// from these, and rejected actions report them back.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct LegalActions {
    /// True when nothing is owed this round
    pub can_check: bool,
    /// Chips owed to continue, capped at the player's stack
    pub to_call: u32,
    /// Smallest legal raise-to total
    pub min_raise_to: u32,
    /// The player's all-in total (bet so far + stack)
    pub max_raise_to: u32,
}

/// An action that passed validation, with the chips it moves resolved.
/// `to` on Raise/AllIn is the player's new round total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise { pay: u32, to: u32 },
    AllIn { pay: u32, to: u32 },
}

/// Bounds available to a player holding `stack` behind with `player_bet`
/// already committed this round.
pub fn legal_actions(
    stack: u32,
    player_bet: u32,
    current_bet: u32,
    min_raise: u32,
) -> LegalActions {
    let owed = current_bet.saturating_sub(player_bet);
    LegalActions {
        can_check: owed == 0,
        to_call: owed.min(stack),
        min_raise_to: current_bet + min_raise,
        max_raise_to: player_bet + stack,
    }
}

/// Validate an action against the betting rules without touching any state.
///
/// A short stack converts Call and Raise into all-in commitments; an
/// under-minimum raise is only legal as exactly that all-in. Everything
/// else below the minimum is rejected with the bound that was missed, and
/// an illegal check reports the amount owed. The caller applies the
/// returned [`ValidatedAction`] atomically or not at all.
pub fn validate_action(
    stack: u32,
    player_bet: u32,
    current_bet: u32,
    min_raise: u32,
    action: PlayerAction,
) -> GameResult<ValidatedAction> {
    let owed = current_bet.saturating_sub(player_bet);
    let all_in_to = player_bet + stack;
    match action {
        PlayerAction::Fold => Ok(ValidatedAction::Fold),
        PlayerAction::Check => {
            if owed == 0 {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call: owed })
            }
        }
        PlayerAction::Call => {
            if stack <= owed {
                Ok(ValidatedAction::AllIn {
                    pay: stack,
                    to: all_in_to,
                })
            } else {
                Ok(ValidatedAction::Call(owed))
            }
        }
        PlayerAction::Raise(to) => {
            if to >= all_in_to {
                // anything at or past the stack caps to all-in
                return Ok(ValidatedAction::AllIn {
                    pay: stack,
                    to: all_in_to,
                });
            }
            let minimum = current_bet + min_raise;
            if to < minimum {
                return Err(GameError::RaiseTooSmall {
                    minimum,
                    attempted: to,
                });
            }
            Ok(ValidatedAction::Raise {
                pay: to - player_bet,
                to,
            })
        }
        PlayerAction::AllIn => {
            if stack == 0 {
                return Err(GameError::CannotAct);
            }
            Ok(ValidatedAction::AllIn {
                pay: stack,
                to: all_in_to,
            })
        }
    }
}
