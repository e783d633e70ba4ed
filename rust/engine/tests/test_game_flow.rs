use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Stage, TableConfig};
use holdem_engine::player::PlayerAction;

fn heads_up() -> Engine {
    let mut t = Engine::new_with_seed(TableConfig::default(), 2024);
    t.seat_player("a", "A", 0, 2_000).unwrap();
    t.seat_player("b", "B", 1, 2_000).unwrap();
    t.start_hand().unwrap();
    t
}

fn chips_total(t: &Engine) -> u32 {
    t.state().chips_on_table()
}

#[test]
fn acting_out_of_turn_is_rejected_without_mutation() {
    let mut t = heads_up();
    let pot_before = t.state().pot;
    let err = t.apply_action("b", PlayerAction::Call).unwrap_err();
    assert_eq!(
        err,
        GameError::NotYourTurn {
            expected: "a".to_string(),
            actual: "b".to_string()
        }
    );
    assert_eq!(t.state().pot, pot_before);
    assert_eq!(t.state().actor_seat, Some(0));
}

#[test]
fn illegal_check_is_rejected_and_state_is_untouched() {
    let mut t = heads_up();
    // dealer owes 10 on top of the small blind
    let err = t.apply_action("a", PlayerAction::Check).unwrap_err();
    assert_eq!(err, GameError::CannotCheck { to_call: 10 });
    assert_eq!(t.state().pot, 30);
    assert_eq!(t.state().actor_seat, Some(0));
    assert_eq!(t.state().player_at(0).unwrap().stack, 1_990);
}

#[test]
fn raise_below_minimum_is_rejected_with_bounds() {
    let mut t = heads_up();
    // current bet 20, min raise 20: raise-to must be at least 40
    let err = t.apply_action("a", PlayerAction::Raise(30)).unwrap_err();
    assert_eq!(
        err,
        GameError::RaiseTooSmall {
            minimum: 40,
            attempted: 30
        }
    );
    assert_eq!(t.state().pot, 30);
}

#[test]
fn full_hand_checked_down_to_showdown() {
    let mut t = heads_up();
    let s = t.state();
    assert_eq!(s.stage, Stage::PreFlop);
    assert_eq!(s.current_bet, 20);
    assert_eq!(s.pot, 30);

    // dealer completes the small blind
    t.apply_action("a", PlayerAction::Call).unwrap();
    // blind action closes the round; the flop comes out
    let s = t.state();
    assert_eq!(s.stage, Stage::Flop);
    assert_eq!(s.community.len(), 3);
    assert_eq!(s.pot, 40);
    assert_eq!(s.current_bet, 0, "bets reset between streets");
    assert_eq!(s.actor_seat, Some(1), "big blind acts first postflop");
    assert_eq!(s.player_at(0).unwrap().current_bet, 0);

    t.apply_action("b", PlayerAction::Check).unwrap();
    t.apply_action("a", PlayerAction::Check).unwrap();
    assert_eq!(t.state().stage, Stage::Turn);
    assert_eq!(t.state().community.len(), 4);

    t.apply_action("b", PlayerAction::Check).unwrap();
    t.apply_action("a", PlayerAction::Check).unwrap();
    assert_eq!(t.state().stage, Stage::River);
    assert_eq!(t.state().community.len(), 5);

    t.apply_action("b", PlayerAction::Check).unwrap();
    t.apply_action("a", PlayerAction::Check).unwrap();

    // showdown resolved and the table is ready for the next hand
    let s = t.state();
    assert_eq!(s.stage, Stage::Waiting);
    assert_eq!(s.pot, 0);
    assert_eq!(chips_total(&t), 4_000, "chips conserved through the hand");

    let rec = t.last_hand_record().expect("hand record");
    let paid: u32 = rec.payouts.values().sum();
    assert_eq!(paid, 40, "the whole pot was paid out");
    assert!(rec.showdown.is_some());
    assert_eq!(rec.board.len(), 5);
}

#[test]
fn three_way_round_completes_only_after_everyone_matches() {
    let mut t = Engine::new_with_seed(TableConfig::default(), 5);
    t.seat_player("p1", "P1", 0, 2_000).unwrap();
    t.seat_player("p2", "P2", 1, 2_000).unwrap();
    t.seat_player("p3", "P3", 2, 2_000).unwrap();
    t.start_hand().unwrap();
    // dealer seat 0 opens the action three-handed

    t.apply_action("p1", PlayerAction::Raise(50)).unwrap();
    assert_eq!(t.state().stage, Stage::PreFlop, "two players still owe");
    assert_eq!(t.state().actor_seat, Some(1));

    t.apply_action("p2", PlayerAction::Call).unwrap();
    assert_eq!(t.state().stage, Stage::PreFlop, "one player still owes");
    assert_eq!(t.state().actor_seat, Some(2));

    t.apply_action("p3", PlayerAction::Call).unwrap();
    assert_eq!(t.state().stage, Stage::Flop, "all matched at 50");
    assert_eq!(t.state().pot, 150);
    assert_eq!(chips_total(&t), 6_000);
}

#[test]
fn raise_reopens_the_action() {
    let mut t = heads_up();
    t.apply_action("a", PlayerAction::Call).unwrap();
    assert_eq!(t.state().stage, Stage::Flop);

    t.apply_action("b", PlayerAction::Raise(60)).unwrap();
    // the bet re-opens the round for the caller
    assert_eq!(t.state().stage, Stage::Flop);
    assert_eq!(t.state().actor_seat, Some(0));
    assert_eq!(t.state().current_bet, 60);

    t.apply_action("a", PlayerAction::Raise(140)).unwrap();
    // min raise tracks the last raise size
    assert_eq!(t.state().min_raise, 80);
    assert_eq!(t.state().actor_seat, Some(1));

    t.apply_action("b", PlayerAction::Call).unwrap();
    assert_eq!(t.state().stage, Stage::Turn);
    assert_eq!(t.state().pot, 40 + 140 * 2);
}

#[test]
fn current_bet_never_decreases_within_a_round() {
    let mut t = heads_up();
    let mut highest = t.state().current_bet;
    t.apply_action("a", PlayerAction::Raise(60)).unwrap();
    assert!(t.state().current_bet >= highest);
    highest = t.state().current_bet;
    t.apply_action("b", PlayerAction::Raise(160)).unwrap();
    assert!(t.state().current_bet >= highest);
}

#[test]
fn folding_ends_the_hand_uncontested() {
    let mut t = heads_up();
    t.apply_action("a", PlayerAction::Fold).unwrap();

    let s = t.state();
    assert_eq!(s.stage, Stage::Waiting);
    assert_eq!(s.pot, 0);
    // the blind winner keeps everything without a showdown
    assert_eq!(s.player_at(1).unwrap().stack, 2_010);
    assert_eq!(s.player_at(0).unwrap().stack, 1_990);
    let rec = t.last_hand_record().unwrap();
    assert!(rec.showdown.is_none());
    assert_eq!(rec.payouts.get(&1), Some(&30));
}

#[test]
fn call_exceeding_stack_caps_and_goes_allin() {
    let config = TableConfig {
        min_buy_in: 100,
        ..TableConfig::default()
    };
    let mut t = Engine::new_with_seed(config, 77);
    t.seat_player("a", "A", 0, 5_000).unwrap();
    t.seat_player("b", "B", 1, 150).unwrap();
    t.start_hand().unwrap();

    t.apply_action("a", PlayerAction::Raise(400)).unwrap();
    t.apply_action("b", PlayerAction::Call).unwrap();

    // the short stack is all-in for less; the board runs out to showdown
    let s = t.state();
    assert_eq!(s.stage, Stage::Waiting, "hand settled");
    assert_eq!(s.community.len(), 5, "board ran out for the all-in");
    assert_eq!(chips_total(&t), 5_150);
    let b = s.player_by_id("b").unwrap();
    // b either busted or doubled through
    assert!(b.stack == 0 || b.stack == 300);
}

#[test]
fn chip_conservation_holds_after_every_action() {
    let mut t = Engine::new_with_seed(TableConfig::default(), 99);
    t.seat_player("p1", "P1", 0, 2_000).unwrap();
    t.seat_player("p2", "P2", 1, 2_000).unwrap();
    t.seat_player("p3", "P3", 2, 2_000).unwrap();
    t.start_hand().unwrap();

    let total = 6_000;
    assert_eq!(chips_total(&t), total);
    t.apply_action("p1", PlayerAction::Raise(60)).unwrap();
    assert_eq!(chips_total(&t), total);
    t.apply_action("p2", PlayerAction::Call).unwrap();
    assert_eq!(chips_total(&t), total);
    t.apply_action("p3", PlayerAction::Raise(200)).unwrap();
    assert_eq!(chips_total(&t), total);
    t.apply_action("p1", PlayerAction::Fold).unwrap();
    assert_eq!(chips_total(&t), total);
    t.apply_action("p2", PlayerAction::Call).unwrap();
    assert_eq!(chips_total(&t), total);
}
