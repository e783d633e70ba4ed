use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::player::{Player, PlayerStatus};
use crate::pot::Pot;

/// Room configuration fixed at table creation.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct TableConfig {
    pub max_players: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub min_buy_in: u32,
    pub max_buy_in: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_players: 6,
            small_blind: 10,
            big_blind: 20,
            min_buy_in: 1_000,
            max_buy_in: 10_000,
        }
    }
}

/// Stages of one hand. Waiting is both the initial stage and where the
/// engine returns after a showdown; stacks carry over between hands.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Waiting,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Stage {
    /// True during a betting round.
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Stage::PreFlop | Stage::Flop | Stage::Turn | Stage::River
        )
    }

    /// Community cards dealt on entry to this stage.
    pub fn cards_dealt(self) -> usize {
        match self {
            Stage::Flop => 3,
            Stage::Turn | Stage::River => 1,
            _ => 0,
        }
    }

    pub fn next(self) -> Stage {
        match self {
            Stage::Waiting => Stage::PreFlop,
            Stage::PreFlop => Stage::Flop,
            Stage::Flop => Stage::Turn,
            Stage::Turn => Stage::River,
            Stage::River => Stage::Showdown,
            Stage::Showdown => Stage::Waiting,
        }
    }
}

/// Complete table state. The engine owns the single mutable instance;
/// `Engine::snapshot` hands out read-only clones and observers receive a
/// shared reference after every mutation.
///
/// Seat numbers, not vector indices, identify players everywhere
/// (`dealer_seat`, pot eligibility, payouts), so seating changes between
/// hands never invalidate references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub config: TableConfig,
    /// Seated players, ascending seat order
    pub players: Vec<Player>,
    pub stage: Stage,
    /// 0, 3, 4 or 5 shared cards
    pub community: Vec<Card>,
    /// Chips wagered this hand across all players
    pub pot: u32,
    /// Pot tiers computed at showdown; empty during betting
    pub side_pots: Vec<Pot>,
    /// Highest round total any player has committed; non-decreasing within
    /// a round
    pub current_bet: u32,
    /// Minimum raise increment over `current_bet`
    pub min_raise: u32,
    pub dealer_seat: usize,
    pub small_blind_seat: usize,
    pub big_blind_seat: usize,
    /// Seat due to act, None outside a betting round
    pub actor_seat: Option<usize>,
}

impl GameState {
    pub fn new(config: TableConfig) -> Self {
        let min_raise = config.big_blind;
        Self {
            config,
            players: Vec::new(),
            stage: Stage::Waiting,
            community: Vec::new(),
            pot: 0,
            side_pots: Vec::new(),
            current_bet: 0,
            min_raise,
            dealer_seat: 0,
            small_blind_seat: 0,
            big_blind_seat: 0,
            actor_seat: None,
        }
    }

    pub fn player_at(&self, seat: usize) -> Option<&Player> {
        self.players.iter().find(|p| p.seat == seat)
    }

    pub fn player_at_mut(&mut self, seat: usize) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.seat == seat)
    }

    pub fn player_by_id(&self, id: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Seats whose cards still play this hand.
    pub fn seats_in_hand(&self) -> usize {
        self.players.iter().filter(|p| p.is_in_hand()).count()
    }

    /// Seats that can still take an action.
    pub fn seats_can_act(&self) -> usize {
        self.players.iter().filter(|p| p.can_act()).count()
    }

    /// Next seat clockwise from `seat` whose player satisfies `pred`,
    /// scanning every other seat once. Returns None when nobody matches.
    pub fn next_seat_where<F>(&self, seat: usize, pred: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        if self.players.is_empty() {
            return None;
        }
        let start = self
            .players
            .iter()
            .position(|p| p.seat == seat)
            .unwrap_or(0);
        let n = self.players.len();
        for step in 1..=n {
            let p = &self.players[(start + step) % n];
            if p.seat != seat && pred(p) {
                return Some(p.seat);
            }
        }
        None
    }

    /// Everyone's chips plus the pot; constant for the duration of a hand.
    pub fn chips_on_table(&self) -> u32 {
        self.players.iter().map(|p| p.stack).sum::<u32>() + self.pot
    }

    /// Funded seats eligible to be dealt into the next hand.
    pub fn funded_players(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.stack > 0 && p.status != PlayerStatus::Disconnected)
            .count()
    }
}
