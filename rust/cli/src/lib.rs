//! # Holdem CLI Library
//!
//! Command-line host for the hold'em table engine. The engine itself never
//! does I/O or scheduling; this crate seats players, asks decision policies
//! for actions, feeds them back through `apply_action` and prints what
//! happened.
//!
//! ## Main Entry Point
//!
//! The primary entry point is the [`run`] function, which parses
//! command-line arguments and executes the appropriate subcommand.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--hands", "10", "--players", "3"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `sim`: seat AI players at one table and play hands to completion
//! - `deal`: deal a sample board and show each seat's evaluated hand

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod commands;
pub mod config;
pub mod error;

use crate::error::CliError;

#[derive(Debug, Parser)]
#[command(name = "holdem", about = "Multi-player Texas Hold'em table driver")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Seat AI players at one table and play hands to completion
    Sim {
        /// Number of hands to play
        #[arg(long, default_value_t = 1)]
        hands: u32,
        /// Number of AI players to seat
        #[arg(long, default_value_t = 2)]
        players: usize,
        /// RNG seed for reproducible decks (default: random)
        #[arg(long)]
        seed: Option<u64>,
        /// Decision policy for every seat: "random" or "baseline"
        #[arg(long, default_value = "baseline")]
        policy: String,
        /// Table profile TOML (falls back to HOLDEM_CONFIG, then defaults)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Append JSONL hand histories to this file
        #[arg(long)]
        log: Option<PathBuf>,
    },
    /// Deal a sample board and show each seat's evaluated hand
    Deal {
        /// Number of seats to deal to
        #[arg(long, default_value_t = 2)]
        players: usize,
        /// RNG seed (default: random)
        #[arg(long)]
        seed: Option<u64>,
    },
}

/// Install the fmt subscriber honoring RUST_LOG, with the -v flags as the
/// fallback filter.
pub fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Parse `args` and run the selected command, writing human output to
/// `out` and failures to `err`. Returns the process exit code.
pub fn run<I, T>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let _ = write!(err, "{}", e);
            return 2;
        }
    };
    execute(cli, out, err)
}

/// Run an already-parsed command line.
pub fn execute(cli: Cli, out: &mut dyn Write, err: &mut dyn Write) -> i32 {
    match dispatch(cli, out) {
        Ok(()) => 0,
        Err(e) => {
            let _ = writeln!(err, "error: {}", e);
            1
        }
    }
}

fn dispatch(cli: Cli, out: &mut dyn Write) -> Result<(), CliError> {
    match cli.command {
        Command::Sim {
            hands,
            players,
            seed,
            policy,
            config,
            log,
        } => {
            let cfg =
                config::load(config.as_deref()).map_err(|e| CliError::Config(e.to_string()))?;
            let args = commands::SimArgs {
                hands,
                players,
                seed,
                policy,
                log,
            };
            commands::handle_sim(&cfg, &args, out)
        }
        Command::Deal { players, seed } => commands::handle_deal(players, seed, out),
    }
}
