use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Where a player stands within the current hand.
///
/// Folded is terminal for the hand: the player leaves turn rotation and pot
/// eligibility. AllIn players leave rotation but their cards still play.
/// Disconnected players are treated as folded for the hand in progress.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    /// Seated, not dealt into the current hand
    Waiting,
    /// Dealt in and still able to act
    Active,
    /// Surrendered the hand
    Folded,
    /// Entire stack committed; cards play to showdown
    AllIn,
    /// Connection lost; folded out of the running hand
    Disconnected,
}

/// An action submitted by a player. `Raise` carries the raise-to total for
/// the betting round, not the increment.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Raise(u32),
    AllIn,
}

/// One seat's occupant: identity, chips, hole cards and per-round/per-hand
/// betting bookkeeping. Players persist across hands; `reset_for_new_hand`
/// clears the per-hand fields while the stack carries over.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub seat: usize,
    pub stack: u32,
    pub hole: [Option<Card>; 2],
    /// Chips committed in the current betting round
    pub current_bet: u32,
    /// Chips committed over the whole hand; drives side-pot tiers
    pub total_bet: u32,
    pub status: PlayerStatus,
    pub is_dealer: bool,
    pub is_small_blind: bool,
    pub is_big_blind: bool,
    pub last_action: Option<PlayerAction>,
}

impl Player {
    pub fn new(id: &str, name: &str, seat: usize, stack: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            seat,
            stack,
            hole: [None, None],
            current_bet: 0,
            total_bet: 0,
            status: PlayerStatus::Waiting,
            is_dealer: false,
            is_small_blind: false,
            is_big_blind: false,
            last_action: None,
        }
    }

    pub fn give_card(&mut self, c: Card) {
        if self.hole[0].is_none() {
            self.hole[0] = Some(c);
        } else if self.hole[1].is_none() {
            self.hole[1] = Some(c);
        }
    }

    /// Both hole cards, or None if the player was not dealt in.
    pub fn hole_cards(&self) -> Option<[Card; 2]> {
        match self.hole {
            [Some(a), Some(b)] => Some([a, b]),
            _ => None,
        }
    }

    /// Move up to `amount` chips from the stack into the current bet,
    /// capping at the stack. Flips the player all-in when the stack empties.
    /// Returns the amount actually paid.
    pub fn place_bet(&mut self, amount: u32) -> u32 {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.current_bet += paid;
        self.total_bet += paid;
        if self.stack == 0 && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }

    pub fn fold(&mut self) {
        self.status = PlayerStatus::Folded;
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack = self.stack.saturating_add(amount);
    }

    /// Able to take an action this round.
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Still holding cards that play: not folded, not disconnected.
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub fn reset_for_new_round(&mut self) {
        self.current_bet = 0;
        self.last_action = None;
    }

    pub fn reset_for_new_hand(&mut self) {
        self.hole = [None, None];
        self.current_bet = 0;
        self.total_bet = 0;
        self.last_action = None;
        self.is_dealer = false;
        self.is_small_blind = false;
        self.is_big_blind = false;
        if self.status != PlayerStatus::Disconnected {
            self.status = if self.stack > 0 {
                PlayerStatus::Active
            } else {
                PlayerStatus::Waiting
            };
        }
    }
}
