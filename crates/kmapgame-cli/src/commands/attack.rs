//! The `kmapgame attack` command: the 30-second time-attack run.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use kmapgame_client::HttpScoringClient;
use kmapgame_core::model::{AttackTier, GradeOutcome};
use kmapgame_core::session::{AttackPhase, TimeAttackSession, ATTACK_TIME_LIMIT_SECS};

use super::{build_client, describe_question, next_input, print_attack_board, Input};

pub async fn execute(
    name: String,
    tier: String,
    config: Option<PathBuf>,
    server: Option<String>,
) -> Result<()> {
    let tier: AttackTier = tier.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let client = build_client(config.as_deref(), server)?;

    let start = client.start_time_attack(&name, tier).await?;
    eprintln!("Registered {name} for time attack ({tier})");
    println!("{ATTACK_TIME_LIMIT_SECS} seconds on the clock; the run ends on the first rejected answer.");

    let mut session = TimeAttackSession::new(Arc::new(client), start);
    render_active(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !session.is_finished() {
        // Bound first so the timer borrow ends before the arms touch the
        // session again.
        let input = next_input(session.timer_mut(), &mut lines).await?;
        match input {
            Input::Tick => {
                session.on_tick().await;
                let remaining = session.time_remaining();
                if matches!(session.phase(), AttackPhase::Active)
                    && (remaining <= 5 || remaining % 10 == 0)
                {
                    println!("  {remaining}s remaining");
                }
            }
            Input::Eof => break,
            Input::Line(line) => {
                let line = line.trim().to_string();
                match line.as_str() {
                    ":quit" | ":q" => break,
                    // Retry a finish stuck on a transport failure.
                    ":finish" => session.finish().await,
                    answer => {
                        session.set_input(answer);
                        session.submit().await;
                        if !session.is_finished() {
                            render_active(&session);
                        }
                    }
                }
            }
        }
    }

    render_final(&session);
    Ok(())
}

fn render_active(session: &TimeAttackSession<HttpScoringClient>) {
    if let Some(error) = session.error() {
        println!("  ! {error}");
    }
    match session.phase() {
        AttackPhase::Active => {
            if session.last_outcome() == Some(GradeOutcome::Correct) {
                println!("Correct!");
            }
            println!();
            println!(
                "{} | solved {} | {}s remaining",
                session.username(),
                session.questions_solved(),
                session.time_remaining()
            );
            println!("{}", describe_question(session.question()));
        }
        AttackPhase::Ended { .. } | AttackPhase::Finishing { .. } => {
            println!("Recording your run... (:finish to retry)");
        }
        AttackPhase::Finished { .. } => {}
    }
}

fn render_final(session: &TimeAttackSession<HttpScoringClient>) {
    let AttackPhase::Finished { outcome } = session.phase() else {
        if let Some(error) = session.error() {
            println!("  ! {error}");
        }
        return;
    };

    println!();
    if outcome.valid {
        println!("Time's up! Great job, {}!", session.username());
    } else {
        println!("Game over! Wrong answer.");
    }
    println!("  Questions solved: {}", session.questions_solved());
    match session.rank() {
        Some(rank) => println!("  Rank: #{rank}"),
        None if outcome.valid => println!("  Rank: unranked"),
        None => {}
    }
    if outcome.valid {
        println!("Leaderboard ({})", session.tier());
        print_attack_board(&outcome.leaderboard);
    }
}
