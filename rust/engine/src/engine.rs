use std::cmp::Ordering;

use tracing::{debug, info, warn};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::{GameError, GameResult};
use crate::game::{GameState, Stage, TableConfig};
use crate::hand::{self, HandStrength};
use crate::logger::{ActionRecord, HandRecord, ShowdownInfo};
use crate::player::{Player, PlayerAction, PlayerStatus};
use crate::pot::PotManager;
use crate::rules::{self, LegalActions, ValidatedAction};

/// Receives the table state synchronously after every mutating call.
/// Observers must treat the state as read-only; they decide the next move
/// and call back into the engine on their own schedule.
pub trait StateObserver {
    fn on_state_change(&mut self, state: &GameState);
}

/// The table engine: owns one table's [`GameState`] and a per-hand deck,
/// and serializes every mutation through its methods (single writer, no
/// timers, no I/O). Hosts drive it through `seat_player` / `start_hand` /
/// `apply_action` and read it through `state` / `snapshot`.
///
/// Illegal actions are rejected synchronously with the rule that failed and
/// never leave partial state behind; the engine never reinterprets one
/// action as another.
pub struct Engine {
    state: GameState,
    deck: Deck,
    seed: Option<u64>,
    observers: Vec<Box<dyn StateObserver>>,
    /// Chips on the table at hand start; every action is checked against it
    hand_baseline: u32,
    hand_no: u32,
    record: Option<HandRecord>,
    last_record: Option<HandRecord>,
    /// Players removed mid-hand; their chips stay on the table until the
    /// hand settles, then the seats empty before the next deal
    pending_removal: Vec<String>,
}

impl Engine {
    /// Table with an entropy-seeded deck.
    pub fn new(config: TableConfig) -> Self {
        Self::build(config, None)
    }

    /// Table whose deck shuffles reproducibly; the same seed and action
    /// sequence replays the same hands.
    pub fn new_with_seed(config: TableConfig, seed: u64) -> Self {
        Self::build(config, Some(seed))
    }

    fn build(config: TableConfig, seed: Option<u64>) -> Self {
        let deck = match seed {
            Some(s) => Deck::new_with_seed(s),
            None => Deck::new(),
        };
        Self {
            state: GameState::new(config),
            deck,
            seed,
            observers: Vec::new(),
            hand_baseline: 0,
            hand_no: 0,
            record: None,
            last_record: None,
            pending_removal: Vec::new(),
        }
    }

    /// Read access to the live state. UI layers wanting an owned copy use
    /// [`Engine::snapshot`].
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Read-only copy of the current state.
    pub fn snapshot(&self) -> GameState {
        self.state.clone()
    }

    pub fn subscribe(&mut self, observer: Box<dyn StateObserver>) {
        self.observers.push(observer);
    }

    /// The finished record of the most recently completed hand.
    pub fn last_hand_record(&self) -> Option<&HandRecord> {
        self.last_record.as_ref()
    }

    pub fn hands_played(&self) -> u32 {
        self.hand_no
    }

    /// Seat a player at an explicit seat index with a chip buy-in. Joining
    /// while a hand runs is allowed; the newcomer waits for the next deal.
    pub fn seat_player(
        &mut self,
        player_id: &str,
        name: &str,
        seat: usize,
        buy_in: u32,
    ) -> GameResult<()> {
        let cfg = &self.state.config;
        if seat >= cfg.max_players {
            return Err(GameError::InvalidSeat {
                seat,
                max_seats: cfg.max_players,
            });
        }
        if self.state.players.len() >= cfg.max_players {
            return Err(GameError::RoomFull {
                max_players: cfg.max_players,
            });
        }
        if self.state.player_at(seat).is_some() {
            return Err(GameError::SeatTaken { seat });
        }
        if self.state.player_by_id(player_id).is_some() {
            return Err(GameError::AlreadySeated {
                player_id: player_id.to_string(),
            });
        }
        if buy_in < cfg.min_buy_in || buy_in > cfg.max_buy_in {
            return Err(GameError::BuyInOutOfRange {
                amount: buy_in,
                min: cfg.min_buy_in,
                max: cfg.max_buy_in,
            });
        }

        self.state
            .players
            .push(Player::new(player_id, name, seat, buy_in));
        self.state.players.sort_by_key(|p| p.seat);
        if self.state.stage != Stage::Waiting {
            // keep the conservation tripwire honest about the new chips
            self.hand_baseline += buy_in;
        }
        info!(player_id, seat, buy_in, "player seated");
        self.notify();
        Ok(())
    }

    /// Remove a player. Mid-hand the player is folded out first and the
    /// seat is cleared once the hand settles, so committed chips stay in
    /// the pot they already funded.
    pub fn remove_player(&mut self, player_id: &str) -> GameResult<()> {
        let Some(player) = self.state.player_by_id(player_id) else {
            return Err(GameError::PlayerNotFound {
                player_id: player_id.to_string(),
            });
        };
        let seat = player.seat;

        if self.state.stage == Stage::Waiting {
            self.state.players.retain(|p| p.id != player_id);
            info!(player_id, seat, "player removed");
        } else {
            let was_actor = self.state.actor_seat == Some(seat);
            let was_in_hand = player.is_in_hand();
            if let Some(p) = self.state.player_at_mut(seat) {
                p.status = PlayerStatus::Folded;
            }
            self.pending_removal.push(player_id.to_string());
            info!(player_id, seat, "player leaving, folded out of the hand");
            if was_in_hand {
                self.settle_departure(was_actor)?;
            }
        }
        self.notify();
        Ok(())
    }

    /// Force-fold a player who dropped their connection so turn rotation
    /// can never deadlock waiting on them. An all-in player keeps their
    /// cards; everyone else is out of the hand immediately.
    pub fn mark_disconnected(&mut self, player_id: &str) -> GameResult<()> {
        let Some(player) = self.state.player_by_id(player_id) else {
            return Err(GameError::PlayerNotFound {
                player_id: player_id.to_string(),
            });
        };
        let seat = player.seat;
        let was_actor = self.state.actor_seat == Some(seat);
        let folded_out = player.status == PlayerStatus::Active;
        if player.status != PlayerStatus::AllIn {
            if let Some(p) = self.state.player_at_mut(seat) {
                p.status = PlayerStatus::Disconnected;
            }
        }
        info!(player_id, seat, "player disconnected");
        if folded_out && self.state.stage.is_betting() {
            self.settle_departure(was_actor)?;
        }
        self.notify();
        Ok(())
    }

    /// Begin a new hand: rotate the button, deal hole cards, post blinds.
    pub fn start_hand(&mut self) -> GameResult<()> {
        if self.state.stage != Stage::Waiting {
            return Err(GameError::HandInProgress);
        }
        if !self.pending_removal.is_empty() {
            let pending = std::mem::take(&mut self.pending_removal);
            self.state.players.retain(|p| !pending.contains(&p.id));
        }
        let funded = self.state.funded_players();
        if funded < 2 {
            return Err(GameError::NotEnoughPlayers {
                seated: funded,
                required: 2,
            });
        }

        for p in &mut self.state.players {
            p.reset_for_new_hand();
        }
        self.state.community.clear();
        self.state.side_pots.clear();
        self.state.pot = 0;
        self.state.current_bet = 0;
        self.state.min_raise = self.state.config.big_blind;
        self.hand_baseline = self.state.chips_on_table();

        // button rotates hand to hand over funded seats
        let dealer = if self.hand_no == 0 {
            self.state
                .players
                .iter()
                .find(|p| p.can_act())
                .map(|p| p.seat)
        } else {
            self.state
                .next_seat_where(self.state.dealer_seat, |p| p.can_act())
        };
        let dealer = dealer.ok_or(GameError::NotEnoughPlayers {
            seated: funded,
            required: 2,
        })?;
        self.state.dealer_seat = dealer;

        // heads-up the dealer posts the small blind and acts first pre-flop
        let (sb_seat, bb_seat) = if self.state.seats_can_act() == 2 {
            let other = self.state.next_seat_where(dealer, |p| p.can_act()).ok_or(
                GameError::NotEnoughPlayers {
                    seated: funded,
                    required: 2,
                },
            )?;
            (dealer, other)
        } else {
            let sb = self.state.next_seat_where(dealer, |p| p.can_act()).ok_or(
                GameError::NotEnoughPlayers {
                    seated: funded,
                    required: 2,
                },
            )?;
            let bb = self.state.next_seat_where(sb, |p| p.can_act()).ok_or(
                GameError::NotEnoughPlayers {
                    seated: funded,
                    required: 2,
                },
            )?;
            (sb, bb)
        };
        self.state.small_blind_seat = sb_seat;
        self.state.big_blind_seat = bb_seat;
        for p in &mut self.state.players {
            p.is_dealer = p.seat == dealer;
            p.is_small_blind = p.seat == sb_seat;
            p.is_big_blind = p.seat == bb_seat;
        }

        // one card at a time around the table, starting left of the button
        self.deck.shuffle();
        let mut order = vec![sb_seat];
        let mut s = sb_seat;
        while let Some(next) = self.state.next_seat_where(s, |p| p.can_act()) {
            if next == sb_seat {
                break;
            }
            order.push(next);
            s = next;
        }
        for _ in 0..2 {
            for &seat in &order {
                let card = self.deck.deal_card().ok_or(GameError::InsufficientCards {
                    needed: 1,
                    available: 0,
                })?;
                if let Some(p) = self.state.player_at_mut(seat) {
                    p.give_card(card);
                }
            }
        }

        // blinds post capped at stack; a short stack is all-in before acting
        let sb_paid = self.post_blind(sb_seat, self.state.config.small_blind);
        let bb_paid = self.post_blind(bb_seat, self.state.config.big_blind);
        self.state.current_bet = self.state.config.big_blind;
        self.state.min_raise = self.state.config.big_blind;

        self.state.stage = Stage::PreFlop;
        self.hand_no += 1;
        self.record = Some(HandRecord::new(format!("{:06}", self.hand_no), self.seed));

        info!(
            hand = self.hand_no,
            dealer, sb_seat, sb_paid, bb_seat, bb_paid, "hand started"
        );

        // first to act sits after the big blind; with the blinds already
        // all-in there may be nobody left to act at all
        self.state.actor_seat = self.state.next_seat_where(bb_seat, |p| p.can_act());
        if self.state.actor_seat.is_none() {
            self.advance_stage()?;
        }
        self.notify();
        Ok(())
    }

    /// Apply one player action. Fails without mutating anything when the
    /// action is out of turn or breaks a betting rule.
    pub fn apply_action(&mut self, player_id: &str, action: PlayerAction) -> GameResult<()> {
        if !self.state.stage.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        let actor_seat = self.state.actor_seat.ok_or(GameError::NoHandInProgress)?;
        let Some(player) = self.state.player_by_id(player_id) else {
            return Err(GameError::PlayerNotFound {
                player_id: player_id.to_string(),
            });
        };
        if player.seat != actor_seat {
            let expected = self
                .state
                .player_at(actor_seat)
                .map(|p| p.id.clone())
                .unwrap_or_default();
            return Err(GameError::NotYourTurn {
                expected,
                actual: player_id.to_string(),
            });
        }
        if !player.can_act() {
            return Err(GameError::CannotAct);
        }

        let validated = rules::validate_action(
            player.stack,
            player.current_bet,
            self.state.current_bet,
            self.state.min_raise,
            action,
        )?;

        let seat = actor_seat;
        let big_blind = self.state.config.big_blind;
        let mut paid = 0u32;
        let mut raised_to: Option<u32> = None;
        match validated {
            ValidatedAction::Fold => {
                if let Some(p) = self.state.player_at_mut(seat) {
                    p.fold();
                }
            }
            ValidatedAction::Check => {}
            ValidatedAction::Call(amount) => {
                if let Some(p) = self.state.player_at_mut(seat) {
                    paid = p.place_bet(amount);
                }
            }
            ValidatedAction::Raise { pay, to } => {
                if let Some(p) = self.state.player_at_mut(seat) {
                    paid = p.place_bet(pay);
                }
                raised_to = Some(to);
            }
            ValidatedAction::AllIn { pay, to } => {
                if let Some(p) = self.state.player_at_mut(seat) {
                    paid = p.place_bet(pay);
                }
                if to > self.state.current_bet {
                    raised_to = Some(to);
                }
            }
        }
        self.state.pot += paid;
        if let Some(to) = raised_to {
            // a raise re-opens the action for everyone still able to act
            self.state.min_raise = (to - self.state.current_bet).max(big_blind);
            self.state.current_bet = to;
            for p in &mut self.state.players {
                if p.seat != seat && p.can_act() {
                    p.last_action = None;
                }
            }
        }
        if let Some(p) = self.state.player_at_mut(seat) {
            p.last_action = Some(action);
        }
        if let Some(rec) = &mut self.record {
            rec.actions.push(ActionRecord {
                seat,
                stage: self.state.stage,
                action,
            });
        }
        debug!(
            player_id,
            seat,
            ?action,
            paid,
            pot = self.state.pot,
            current_bet = self.state.current_bet,
            "action applied"
        );

        self.check_conservation()?;
        self.advance_after_action()?;
        self.notify();
        Ok(())
    }

    /// Legal bounds for a seated player, as the betting stands right now.
    pub fn legal_actions_for(&self, player_id: &str) -> GameResult<LegalActions> {
        let Some(player) = self.state.player_by_id(player_id) else {
            return Err(GameError::PlayerNotFound {
                player_id: player_id.to_string(),
            });
        };
        Ok(rules::legal_actions(
            player.stack,
            player.current_bet,
            self.state.current_bet,
            self.state.min_raise,
        ))
    }

    /// A betting round is complete when at most one live player remains, or
    /// when every player who can still act has taken an action this round
    /// and matched the highest bet (all-in players are settled by
    /// definition).
    pub fn is_round_complete(&self) -> bool {
        if self.state.seats_in_hand() <= 1 {
            return true;
        }
        // all-in players are settled by definition; if nobody can act at
        // all the round is over and the board runs out
        for p in &self.state.players {
            if !p.can_act() {
                continue;
            }
            if p.last_action.is_none() || p.current_bet != self.state.current_bet {
                return false;
            }
        }
        true
    }

    fn post_blind(&mut self, seat: usize, amount: u32) -> u32 {
        let paid = match self.state.player_at_mut(seat) {
            Some(p) => {
                let paid = p.place_bet(amount);
                // the blind counts as this round's action; pre-flop play
                // returns to the blinds only if someone raises
                p.last_action = Some(if p.status == PlayerStatus::AllIn {
                    PlayerAction::AllIn
                } else {
                    PlayerAction::Call
                });
                paid
            }
            None => 0,
        };
        self.state.pot += paid;
        paid
    }

    fn advance_after_action(&mut self) -> GameResult<()> {
        if self.state.seats_in_hand() <= 1 {
            return self.finish_uncontested();
        }
        if self.is_round_complete() {
            return self.advance_stage();
        }
        self.advance_actor()
    }

    /// Re-check the flow after a player left the hand outside their turn.
    fn settle_departure(&mut self, was_actor: bool) -> GameResult<()> {
        if !self.state.stage.is_betting() {
            return Ok(());
        }
        if self.state.seats_in_hand() <= 1 {
            return self.finish_uncontested();
        }
        if self.is_round_complete() {
            return self.advance_stage();
        }
        if was_actor {
            return self.advance_actor();
        }
        Ok(())
    }

    fn advance_actor(&mut self) -> GameResult<()> {
        let from = self.state.actor_seat.unwrap_or(self.state.dealer_seat);
        match self.state.next_seat_where(from, |p| p.can_act()) {
            Some(seat) => {
                self.state.actor_seat = Some(seat);
                Ok(())
            }
            // nobody else can act: force the stage forward
            None => self.advance_stage(),
        }
    }

    /// Close the betting round and move the hand forward: deal the next
    /// street, run the board out when betting is finished for good, or go
    /// to showdown after the river.
    fn advance_stage(&mut self) -> GameResult<()> {
        for p in &mut self.state.players {
            p.reset_for_new_round();
        }
        self.state.current_bet = 0;
        self.state.min_raise = self.state.config.big_blind;
        self.state.actor_seat = None;

        if self.state.seats_in_hand() <= 1 {
            return self.finish_uncontested();
        }
        if self.state.stage == Stage::River {
            return self.resolve_showdown();
        }
        if self.state.seats_can_act() < 2 {
            // betting can't continue; deal everything and show down
            self.deal_runout()?;
            return self.resolve_showdown();
        }

        let next = self.state.stage.next();
        self.deal_community(next.cards_dealt())?;
        self.state.stage = next;

        let dealer = self.state.dealer_seat;
        self.state.actor_seat = self.state.next_seat_where(dealer, |p| p.can_act());
        info!(
            stage = ?self.state.stage,
            board = self.state.community.len(),
            "street dealt"
        );
        Ok(())
    }

    fn deal_community(&mut self, n: usize) -> GameResult<()> {
        // cards already in play stay out of the deck even if the deck was
        // rebuilt from a persisted snapshot
        let mut dealt: Vec<Card> = self.state.community.clone();
        for p in &self.state.players {
            dealt.extend(p.hole.iter().flatten().copied());
        }
        self.deck.remove(&dealt);
        self.deck.burn_card();
        let mut cards = self.deck.draw(n)?;
        self.state.community.append(&mut cards);
        Ok(())
    }

    fn deal_runout(&mut self) -> GameResult<()> {
        while self.state.community.len() < 5 {
            let n = if self.state.community.is_empty() {
                3
            } else {
                1
            };
            self.deal_community(n)?;
        }
        Ok(())
    }

    /// Reveal, rank and pay. Side pots partition the hand's contributions
    /// into tiers bounded by each all-in commitment; each tier pays its own
    /// best hand, ties split with the odd chip going to the earliest seat.
    fn resolve_showdown(&mut self) -> GameResult<()> {
        self.state.stage = Stage::Showdown;

        let community = self.state.community.clone();
        let mut strengths: Vec<(usize, HandStrength)> = Vec::new();
        for p in &self.state.players {
            if !p.is_in_hand() {
                continue;
            }
            let hole = p
                .hole_cards()
                .ok_or_else(|| GameError::InvariantViolation {
                    detail: format!("seat {} reached showdown without hole cards", p.seat),
                })?;
            let mut cards = vec![hole[0], hole[1]];
            cards.extend_from_slice(&community);
            strengths.push((p.seat, hand::evaluate(&cards)?));
        }

        let contributions: Vec<(usize, u32, bool)> = self
            .state
            .players
            .iter()
            .filter(|p| p.total_bet > 0)
            .map(|p| (p.seat, p.total_bet, p.is_in_hand()))
            .collect();
        let pots = PotManager::from_contributions(&contributions);
        if pots.total() != self.state.pot {
            self.abort_hand();
            return Err(GameError::InvariantViolation {
                detail: format!(
                    "pot tiers sum to {} but the pot holds {}",
                    pots.total(),
                    self.state.pot
                ),
            });
        }

        let mut winners_by_pot: Vec<Vec<usize>> = Vec::new();
        for pot in &pots.pots {
            let contenders: Vec<&(usize, HandStrength)> = strengths
                .iter()
                .filter(|(seat, _)| pot.eligible.contains(seat))
                .collect();
            let best = contenders
                .iter()
                .map(|(_, hs)| hs)
                .max_by(|a, b| hand::compare_hands(a, b));
            let winners = match best {
                Some(best) => contenders
                    .iter()
                    .filter(|(_, hs)| hand::compare_hands(hs, best) == Ordering::Equal)
                    .map(|(seat, _)| *seat)
                    .collect(),
                None => Vec::new(),
            };
            winners_by_pot.push(winners);
        }

        let payouts = pots.award(&winners_by_pot);
        for (&seat, &amount) in &payouts {
            if let Some(p) = self.state.player_at_mut(seat) {
                p.add_chips(amount);
            }
        }
        self.state.side_pots = pots.pots.clone();
        self.state.pot = 0;
        self.check_conservation()?;

        let main_winners = winners_by_pot.first().cloned().unwrap_or_default();
        let best_name = strengths
            .iter()
            .max_by(|(_, a), (_, b)| hand::compare_hands(a, b))
            .map(|(_, hs)| hs.category.name().to_string());
        info!(
            winners = ?main_winners,
            best = best_name.as_deref().unwrap_or("-"),
            ?payouts,
            "showdown resolved"
        );
        if let Some(rec) = &mut self.record {
            rec.payouts = payouts;
            rec.showdown = Some(ShowdownInfo {
                winners: main_winners,
                best_hand: best_name,
            });
        }
        self.finish_hand();
        Ok(())
    }

    /// Everyone else folded; the last live player takes the pot unseen.
    fn finish_uncontested(&mut self) -> GameResult<()> {
        let winner = self
            .state
            .players
            .iter()
            .find(|p| p.is_in_hand())
            .map(|p| p.seat)
            .ok_or_else(|| GameError::InvariantViolation {
                detail: "no live player left to win the pot".to_string(),
            })?;
        let amount = self.state.pot;
        self.state.pot = 0;
        self.state.side_pots.clear();
        if let Some(p) = self.state.player_at_mut(winner) {
            p.add_chips(amount);
        }
        self.check_conservation()?;
        info!(seat = winner, amount, "hand won uncontested");
        if let Some(rec) = &mut self.record {
            rec.payouts.insert(winner, amount);
        }
        self.finish_hand();
        Ok(())
    }

    fn finish_hand(&mut self) {
        self.state.stage = Stage::Waiting;
        self.state.actor_seat = None;
        self.state.current_bet = 0;
        if let Some(mut rec) = self.record.take() {
            rec.board = self.state.community.clone();
            self.last_record = Some(rec);
        }
    }

    fn abort_hand(&mut self) {
        self.state.stage = Stage::Waiting;
        self.state.actor_seat = None;
        self.record = None;
    }

    /// Tripwire for the chip-conservation invariant. A mismatch is an
    /// engine bug, not user error: the hand aborts for investigation.
    fn check_conservation(&mut self) -> GameResult<()> {
        let now = self.state.chips_on_table();
        if now != self.hand_baseline {
            warn!(
                expected = self.hand_baseline,
                found = now,
                "chip conservation violated, aborting hand"
            );
            self.abort_hand();
            return Err(GameError::InvariantViolation {
                detail: format!(
                    "chips on table {} differ from hand baseline {}",
                    now, self.hand_baseline
                ),
            });
        }
        Ok(())
    }

    fn notify(&mut self) {
        let state = &self.state;
        for obs in &mut self.observers {
            obs.on_state_change(state);
        }
    }
}
