//! The `kmapgame leaderboard` command.

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

use kmapgame_core::model::AttackTier;

use super::{build_client, print_attack_board, print_timed_board};

#[derive(Subcommand)]
pub enum Board {
    /// Today's daily-challenge standings
    Daily {
        /// Show this player's rank
        #[arg(long)]
        name: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Scoring server URL (overrides config)
        #[arg(long)]
        server: Option<String>,
    },

    /// Time-attack standings for a tier
    Attack {
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
}

pub async fn execute(board: Board) -> Result<()> {
    match board {
        Board::Daily {
            name,
            config,
            server,
        } => {
            let client = build_client(config.as_deref(), server)?;
            let board = client.daily_leaderboard(name.as_deref()).await?;
            println!(
                "Daily challenge {} ({} participants)",
                board.date, board.total_participants
            );
            print_timed_board(&board.leaderboard);
            if let Some(rank) = board.user_rank {
                println!("Your rank: #{rank}");
            }
        }
        Board::Attack {
            tier,
            config,
            server,
        } => {
            let tier: AttackTier = tier.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            let client = build_client(config.as_deref(), server)?;
            let entries = client.time_attack_leaderboard(tier).await?;
            println!("Time attack ({tier})");
            print_attack_board(&entries);
        }
    }
    Ok(())
}
