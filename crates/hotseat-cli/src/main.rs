//! Hotseat - terminal chess for two players sharing one keyboard.
//!
//! Reads coordinate moves from stdin and draws the board on stdout. Logs go
//! to stderr so they never interleave with the board.

mod config;
mod session;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::HotseatConfig;
use hotseat_engine::{perft, perft_divide, Board};
use session::Session;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

/// Hotseat - two-player chess in the terminal.
#[derive(Parser)]
#[command(name = "hotseat")]
#[command(about = "Two-player chess in the terminal")]
struct Args {
    /// Path to the configuration file
    #[arg(long, default_value_os_t = HotseatConfig::default_path())]
    config: PathBuf,

    /// Start position in notation, overriding the configuration
    #[arg(long)]
    fen: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game (the default)
    Play,
    /// Count leaf nodes of the move tree to check the move generator
    Perft {
        /// Search depth in plies
        depth: u32,
        /// Print the node count under each root move
        #[arg(long)]
        divide: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    let mut config = HotseatConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(fen) = args.fen {
        config.start_position = Some(fen);
    }
    tracing::info!("Config: {:?}", config);

    match args.command.unwrap_or(Commands::Play) {
        Commands::Play => {
            let mut session = Session::new(config)?;
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            session.run(stdin.lock(), &mut stdout)?;
        }
        Commands::Perft { depth, divide } => {
            let board = match &config.start_position {
                Some(text) => Board::from_notation(text)?,
                None => Board::standard(),
            };
            let started = Instant::now();
            let nodes: u64 = if divide {
                let results = perft_divide(&board, depth)?;
                for (mv, count) in &results {
                    println!("{}: {}", mv, count);
                }
                results.iter().map(|(_, count)| count).sum()
            } else {
                perft(&board, depth)?
            };
            println!("Nodes: {}", nodes);
            tracing::info!("perft {} took {:?}", depth, started.elapsed());
        }
    }
    Ok(())
}
