//! # Sim Command
//!
//! Seats AI players at one table and plays hands to completion. The loop
//! here is the host side of the engine's contract: read the actor from the
//! state, ask that seat's policy for a move, submit it through
//! `apply_action`, repeat. Anything the policy gets wrong is rejected by
//! the engine and handled here, the way an external timeout policy would,
//! by folding the seat.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use holdem_ai::{create_policy, DecisionPolicy};
use holdem_engine::engine::Engine;
use holdem_engine::logger::HandLogger;
use holdem_engine::player::PlayerAction;

use crate::config::SimConfig;
use crate::error::CliError;

pub struct SimArgs {
    pub hands: u32,
    pub players: usize,
    pub seed: Option<u64>,
    pub policy: String,
    pub log: Option<PathBuf>,
}

pub fn handle_sim(cfg: &SimConfig, args: &SimArgs, out: &mut dyn Write) -> Result<(), CliError> {
    if args.hands == 0 {
        return Err(CliError::InvalidInput("hands must be >= 1".to_string()));
    }
    if args.players < 2 || args.players > cfg.max_players {
        return Err(CliError::InvalidInput(format!(
            "players must be in 2..={}",
            cfg.max_players
        )));
    }
    if !matches!(args.policy.as_str(), "random" | "baseline") {
        return Err(CliError::InvalidInput(format!(
            "unknown policy '{}', expected random or baseline",
            args.policy
        )));
    }

    let seed = args.seed.or(cfg.seed).unwrap_or_else(rand::random);
    writeln!(
        out,
        "sim: players={} hands={} policy={} seed={}",
        args.players, args.hands, args.policy, seed
    )?;

    let mut table = Engine::new_with_seed(cfg.table_config(), seed);
    let mut policies: HashMap<usize, Box<dyn DecisionPolicy>> = HashMap::new();
    for seat in 0..args.players {
        let id = format!("ai_{}", seat + 1);
        let name = format!("AI {}", seat + 1);
        table.seat_player(&id, &name, seat, cfg.buy_in)?;
        // per-seat seed so seats don't mirror each other's decisions
        policies.insert(
            seat,
            create_policy(&args.policy, seed.wrapping_add(seat as u64 + 1)),
        );
    }

    let mut logger = match &args.log {
        Some(path) => Some(HandLogger::create(path)?),
        None => None,
    };

    let mut played = 0u32;
    for hand_no in 1..=args.hands {
        if table.state().funded_players() < 2 {
            writeln!(out, "table breaks after {} hands", played)?;
            break;
        }
        table.start_hand()?;
        run_betting(&mut table, &mut policies)?;
        played += 1;

        if let Some(rec) = table.last_hand_record() {
            let mut rec = rec.clone();
            if let Some(logger) = &mut logger {
                rec.hand_id = logger.next_id();
                logger.write(&rec)?;
            }
            let board: Vec<String> = rec.board.iter().map(ToString::to_string).collect();
            let payouts: Vec<String> = rec
                .payouts
                .iter()
                .map(|(seat, amount)| format!("seat {} +{}", seat, amount))
                .collect();
            writeln!(
                out,
                "hand {}: board [{}] {}",
                hand_no,
                board.join(" "),
                payouts.join(", ")
            )?;
        }
    }

    writeln!(out, "final stacks:")?;
    for p in &table.state().players {
        writeln!(out, "  seat {} {}: {}", p.seat, p.name, p.stack)?;
    }
    Ok(())
}

/// Drive one hand's betting to completion.
fn run_betting(
    table: &mut Engine,
    policies: &mut HashMap<usize, Box<dyn DecisionPolicy>>,
) -> Result<(), CliError> {
    // a hand can't contain more actions than this without a turn-order bug
    let mut budget = 1_000u32;
    while table.state().stage.is_betting() {
        budget -= 1;
        if budget == 0 {
            return Err(CliError::Engine(
                "betting loop failed to converge".to_string(),
            ));
        }
        let Some(seat) = table.state().actor_seat else {
            break;
        };
        let Some(player) = table.state().player_at(seat) else {
            break;
        };
        let id = player.id.clone();
        let legal = table.legal_actions_for(&id)?;
        let action = match policies.get_mut(&seat) {
            Some(policy) => policy.decide(table.state(), seat, &legal),
            None => PlayerAction::Fold,
        };
        if let Err(err) = table.apply_action(&id, action) {
            // the engine rejects instead of repairing; the host folds the
            // seat like a timeout would
            tracing::warn!(%err, seat, ?action, "policy chose an illegal action, folding");
            table.apply_action(&id, PlayerAction::Fold)?;
        }
    }
    Ok(())
}
