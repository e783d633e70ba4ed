use holdem_cli::commands::handle_deal;
use holdem_cli::error::CliError;

#[test]
fn deal_prints_board_and_per_seat_hands() {
    let mut out = Vec::new();
    handle_deal(3, Some(7), &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("deal: players=3 seed=7"));
    assert!(text.contains("board:"));
    assert!(text.contains("seat 0:"));
    assert!(text.contains("seat 2:"));
    assert!(text.contains("best:"));
}

#[test]
fn deal_is_reproducible_for_a_seed() {
    let mut a = Vec::new();
    let mut b = Vec::new();
    handle_deal(2, Some(99), &mut a).unwrap();
    handle_deal(2, Some(99), &mut b).unwrap();
    assert_eq!(a, b);
}

#[test]
fn deal_rejects_silly_player_counts() {
    let mut out = Vec::new();
    assert!(matches!(
        handle_deal(1, Some(1), &mut out),
        Err(CliError::InvalidInput(_))
    ));
    assert!(matches!(
        handle_deal(10, Some(1), &mut out),
        Err(CliError::InvalidInput(_))
    ));
}

#[test]
fn run_dispatches_subcommands() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(
        ["holdem", "deal", "--players", "2", "--seed", "5"],
        &mut out,
        &mut err,
    );
    assert_eq!(code, 0, "stderr: {}", String::from_utf8_lossy(&err));
    assert!(String::from_utf8(out).unwrap().contains("board:"));
}

#[test]
fn run_reports_bad_flags_on_stderr() {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = holdem_cli::run(["holdem", "frobnicate"], &mut out, &mut err);
    assert_eq!(code, 2);
    assert!(!err.is_empty());
}
