//! Tessera CLI - batch interpreter and interactive mode for the
//! territory-claiming board game.

// Allow print in the CLI binary
#![allow(clippy::print_stdout, clippy::print_stderr)]

mod cli;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

/// Tessera - a territory-claiming board game engine
#[derive(Parser, Debug)]
#[command(name = "tessera")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the line-oriented batch interpreter over stdin
    Batch {
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: cli::OutputFormat,
    },

    /// Play an interactive game in the terminal
    Play {
        /// Board width in cells
        #[arg(required = true)]
        width: u32,

        /// Board height in cells
        #[arg(required = true)]
        height: u32,

        /// Number of players
        #[arg(required = true)]
        players: u32,

        /// Maximum number of regions per player
        #[arg(required = true)]
        areas: u32,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let result = match args.command {
        Commands::Batch { format } => cli::batch(format),

        Commands::Play {
            width,
            height,
            players,
            areas,
        } => cli::play::execute(width, height, players, areas),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
