//! kmapgame CLI — terminal player for the K-map quiz game.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "kmapgame", version, about = "K-map boolean simplification quiz")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a practice session or the daily timed challenge
    Play {
        /// Player display name
        #[arg(long)]
        name: String,

        /// easy, medium, hard, progressive, or timed
        #[arg(long, default_value = "medium")]
        difficulty: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scoring server URL (overrides config)
        #[arg(long)]
        server: Option<String>,
    },

    /// Run a 30-second time-attack
    Attack {
        /// Player display name
        #[arg(long)]
        name: String,

        /// easy, medium, or hard
        #[arg(long, default_value = "easy")]
        tier: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scoring server URL (overrides config)
        #[arg(long)]
        server: Option<String>,
    },

    /// Show a leaderboard
    Leaderboard {
        #[command(subcommand)]
        board: commands::leaderboard::Board,
    },

    /// Create a starter config file
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kmapgame=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            name,
            difficulty,
            config,
            server,
        } => commands::play::execute(name, difficulty, config, server).await,
        Commands::Attack {
            name,
            tier,
            config,
            server,
        } => commands::attack::execute(name, tier, config, server).await,
        Commands::Leaderboard { board } => commands::leaderboard::execute(board).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
