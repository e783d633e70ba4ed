use std::io::{stderr, stdout};

use clap::Parser;

use holdem_cli::Cli;

fn main() {
    let cli = Cli::parse();
    holdem_cli::init_tracing(cli.verbose);

    let mut out = stdout();
    let mut err = stderr();
    std::process::exit(holdem_cli::execute(cli, &mut out, &mut err));
}
