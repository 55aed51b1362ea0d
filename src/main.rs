//! implfix CLI entry point.

use clap::Parser;
use implfix::cli::{self, Cli, EXIT_ERROR};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = cli::init_tracing(cli.quiet, cli.verbose) {
        eprintln!("Error: {}", e);
        std::process::exit(EXIT_ERROR);
    }

    let exit_code = match cli::run_fix(&cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
