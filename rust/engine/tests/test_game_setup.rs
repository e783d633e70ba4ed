use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Stage, TableConfig};

fn table() -> Engine {
    Engine::new_with_seed(TableConfig::default(), 42)
}

#[test]
fn seating_validates_seat_and_buy_in() {
    let mut t = table();
    assert_eq!(
        t.seat_player("a", "A", 9, 2_000).unwrap_err(),
        GameError::InvalidSeat {
            seat: 9,
            max_seats: 6
        }
    );
    assert_eq!(
        t.seat_player("a", "A", 0, 100).unwrap_err(),
        GameError::BuyInOutOfRange {
            amount: 100,
            min: 1_000,
            max: 10_000
        }
    );
    t.seat_player("a", "A", 0, 2_000).unwrap();
    assert_eq!(
        t.seat_player("b", "B", 0, 2_000).unwrap_err(),
        GameError::SeatTaken { seat: 0 }
    );
    assert_eq!(
        t.seat_player("a", "A again", 1, 2_000).unwrap_err(),
        GameError::AlreadySeated {
            player_id: "a".to_string()
        }
    );
}

#[test]
fn room_full_when_every_seat_is_taken() {
    let config = TableConfig {
        max_players: 2,
        ..TableConfig::default()
    };
    let mut t = Engine::new_with_seed(config, 1);
    t.seat_player("a", "A", 0, 2_000).unwrap();
    t.seat_player("b", "B", 1, 2_000).unwrap();
    assert_eq!(
        t.seat_player("c", "C", 1, 2_000).unwrap_err(),
        GameError::RoomFull { max_players: 2 }
    );
}

#[test]
fn start_needs_two_funded_players() {
    let mut t = table();
    t.seat_player("a", "A", 0, 2_000).unwrap();
    assert_eq!(
        t.start_hand().unwrap_err(),
        GameError::NotEnoughPlayers {
            seated: 1,
            required: 2
        }
    );
}

#[test]
fn start_twice_is_rejected() {
    let mut t = table();
    t.seat_player("a", "A", 0, 2_000).unwrap();
    t.seat_player("b", "B", 1, 2_000).unwrap();
    t.start_hand().unwrap();
    assert_eq!(t.start_hand().unwrap_err(), GameError::HandInProgress);
}

#[test]
fn blinds_and_positions_three_handed() {
    let mut t = table();
    t.seat_player("a", "A", 0, 2_000).unwrap();
    t.seat_player("b", "B", 1, 2_000).unwrap();
    t.seat_player("c", "C", 2, 2_000).unwrap();
    t.start_hand().unwrap();

    let s = t.state();
    assert_eq!(s.stage, Stage::PreFlop);
    assert_eq!(s.dealer_seat, 0);
    assert_eq!(s.small_blind_seat, 1);
    assert_eq!(s.big_blind_seat, 2);
    // three-handed the button is first to act pre-flop
    assert_eq!(s.actor_seat, Some(0));

    assert_eq!(s.pot, 30);
    assert_eq!(s.current_bet, 20);
    assert_eq!(s.min_raise, 20);
    assert_eq!(s.player_at(1).unwrap().current_bet, 10);
    assert_eq!(s.player_at(2).unwrap().current_bet, 20);
    assert_eq!(s.player_at(1).unwrap().stack, 1_990);
    assert_eq!(s.player_at(2).unwrap().stack, 1_980);

    for p in &s.players {
        assert!(p.hole_cards().is_some(), "everyone gets two hole cards");
    }
    assert!(s.player_at(0).unwrap().is_dealer);
    assert!(s.player_at(1).unwrap().is_small_blind);
    assert!(s.player_at(2).unwrap().is_big_blind);
}

#[test]
fn heads_up_dealer_posts_small_blind_and_acts_first() {
    let mut t = table();
    t.seat_player("a", "A", 0, 2_000).unwrap();
    t.seat_player("b", "B", 1, 2_000).unwrap();
    t.start_hand().unwrap();

    let s = t.state();
    assert_eq!(s.dealer_seat, 0);
    assert_eq!(s.small_blind_seat, 0);
    assert_eq!(s.big_blind_seat, 1);
    assert_eq!(s.actor_seat, Some(0));
    assert_eq!(s.player_at(0).unwrap().current_bet, 10);
    assert_eq!(s.player_at(1).unwrap().current_bet, 20);
}

#[test]
fn dealer_button_rotates_between_hands() {
    let mut t = table();
    t.seat_player("a", "A", 0, 2_000).unwrap();
    t.seat_player("b", "B", 1, 2_000).unwrap();
    t.seat_player("c", "C", 2, 2_000).unwrap();
    t.start_hand().unwrap();
    assert_eq!(t.state().dealer_seat, 0);

    // everyone folds to the big blind to end the hand quickly
    t.apply_action("a", holdem_engine::player::PlayerAction::Fold)
        .unwrap();
    t.apply_action("b", holdem_engine::player::PlayerAction::Fold)
        .unwrap();
    assert_eq!(t.state().stage, Stage::Waiting);

    t.start_hand().unwrap();
    assert_eq!(t.state().dealer_seat, 1, "button moves one funded seat");
}

#[test]
fn short_stack_posts_a_partial_allin_blind() {
    let config = TableConfig {
        min_buy_in: 10,
        ..TableConfig::default()
    };
    let mut t = Engine::new_with_seed(config, 9);
    t.seat_player("a", "A", 0, 2_000).unwrap();
    // big blind seat can only cover 15 of the 20 blind
    t.seat_player("b", "B", 1, 15).unwrap();
    t.start_hand().unwrap();

    let s = t.state();
    let bb = s.player_at(1).unwrap();
    assert_eq!(bb.current_bet, 15);
    assert_eq!(bb.stack, 0);
    assert_eq!(bb.status, holdem_engine::player::PlayerStatus::AllIn);
    // callers still owe the full big blind
    assert_eq!(s.current_bet, 20);
    assert_eq!(s.pot, 25);
}

#[test]
fn same_seed_deals_identical_hands() {
    let build = || {
        let mut t = Engine::new_with_seed(TableConfig::default(), 314);
        t.seat_player("a", "A", 0, 2_000).unwrap();
        t.seat_player("b", "B", 1, 2_000).unwrap();
        t.start_hand().unwrap();
        t
    };
    let t1 = build();
    let t2 = build();
    assert_eq!(
        t1.state().player_at(0).unwrap().hole,
        t2.state().player_at(0).unwrap().hole
    );
    assert_eq!(
        t1.state().player_at(1).unwrap().hole,
        t2.state().player_at(1).unwrap().hole
    );
}

#[test]
fn joining_mid_hand_waits_for_the_next_deal() {
    let mut t = table();
    t.seat_player("a", "A", 0, 2_000).unwrap();
    t.seat_player("b", "B", 1, 2_000).unwrap();
    t.start_hand().unwrap();

    t.seat_player("c", "C", 2, 2_000).unwrap();
    let c = t.state().player_at(2).unwrap();
    assert_eq!(c.status, holdem_engine::player::PlayerStatus::Waiting);
    assert!(c.hole_cards().is_none(), "not dealt into a running hand");
}
