//! shipkit - release and asset tooling.
//!
//! `shipkit wrap` embeds png assets in svg containers; `shipkit publish`
//! bumps, builds and uploads a python package.

mod asset;
mod cli;
mod config;
mod error;
mod logger;
mod publish;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::ShipConfig;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    if let Err(e) = setup_interrupt_handler() {
        log!("warning"; "{:#}", e);
    }

    let code = match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let kind = error::classify(&e);
            log!("error"; "{}: {:#}", kind.label(), e);
            ExitCode::from(kind.exit_code())
        }
    };

    if cli.interactive {
        hold_terminal();
    }
    code
}

fn run(cli: &Cli) -> Result<()> {
    let config = ShipConfig::load(cli)?;
    match &cli.command {
        Commands::Wrap { args } => cli::wrap::run_wrap(&config, args),
        Commands::Publish { args } => cli::publish::run_publish(&config, args),
    }
}

/// Exit with 130 on Ctrl+C; child processes receive the signal themselves.
fn setup_interrupt_handler() -> Result<()> {
    ctrlc::set_handler(|| {
        log!("error"; "interrupted");
        std::process::exit(error::INTERRUPTED_EXIT_CODE);
    })
    .map_err(|e| anyhow::anyhow!("failed to set Ctrl+C handler: {}", e))
}

/// Keep a double-clicked terminal window open until Enter is pressed.
fn hold_terminal() {
    use std::io::{self, Write};

    println!();
    logger::banner("finished, press Enter to close");
    io::stdout().flush().ok();

    let mut input = String::new();
    // EOF or a closed stdin just ends the wait
    io::stdin().read_line(&mut input).ok();
}
