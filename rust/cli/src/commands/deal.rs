//! # Deal Command
//!
//! Deals one sample board to a handful of seats and prints each seat's
//! evaluated best hand, mostly useful for eyeballing the evaluator and for
//! reproducing a deck from a seed.

use std::io::Write;

use holdem_engine::cards::Card;
use holdem_engine::deck::Deck;
use holdem_engine::hand::{compare_hands, evaluate, HandStrength};

use crate::error::CliError;

pub fn handle_deal(players: usize, seed: Option<u64>, out: &mut dyn Write) -> Result<(), CliError> {
    if !(2..=9).contains(&players) {
        return Err(CliError::InvalidInput(
            "players must be in 2..=9".to_string(),
        ));
    }
    let seed = seed.unwrap_or_else(rand::random);
    writeln!(out, "deal: players={} seed={}", players, seed)?;

    let mut deck = Deck::new_with_seed(seed);
    deck.shuffle();

    let mut holes: Vec<Vec<Card>> = vec![Vec::with_capacity(2); players];
    for _ in 0..2 {
        for hole in holes.iter_mut() {
            hole.extend(deck.draw(1)?);
        }
    }
    let mut board: Vec<Card> = Vec::with_capacity(5);
    deck.burn_card();
    board.extend(deck.draw(3)?);
    deck.burn_card();
    board.extend(deck.draw(1)?);
    deck.burn_card();
    board.extend(deck.draw(1)?);

    let shown: Vec<String> = board.iter().map(ToString::to_string).collect();
    writeln!(out, "board: {}", shown.join(" "))?;

    let mut strengths: Vec<(usize, HandStrength)> = Vec::with_capacity(players);
    for (seat, hole) in holes.iter().enumerate() {
        let mut cards = hole.clone();
        cards.extend_from_slice(&board);
        let hs = evaluate(&cards)?;
        writeln!(
            out,
            "seat {}: {} {} -> {}",
            seat,
            hole[0],
            hole[1],
            hs.category.name()
        )?;
        strengths.push((seat, hs));
    }

    if let Some((_, best)) = strengths
        .iter()
        .max_by(|(_, a), (_, b)| compare_hands(a, b))
    {
        let winners: Vec<String> = strengths
            .iter()
            .filter(|(_, hs)| compare_hands(hs, best) == std::cmp::Ordering::Equal)
            .map(|(seat, _)| seat.to_string())
            .collect();
        writeln!(
            out,
            "best: {} (seat {})",
            best.category.name(),
            winners.join(", ")
        )?;
    }
    Ok(())
}
