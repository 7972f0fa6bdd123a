//! The `kmapgame play` command: practice and the daily timed challenge.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};

use kmapgame_client::HttpScoringClient;
use kmapgame_core::model::Difficulty;
use kmapgame_core::session::{AnswerPhase, AnswerSession};

use super::{
    build_client, describe_question, format_duration, next_input, print_timed_board, Input,
};

pub async fn execute(
    name: String,
    difficulty: String,
    config: Option<PathBuf>,
    server: Option<String>,
) -> Result<()> {
    let difficulty: Difficulty = difficulty.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    let client = build_client(config.as_deref(), server)?;

    let snapshot = client.register(&name, difficulty).await?;
    eprintln!("Registered {name} ({difficulty})");
    let mut session = AnswerSession::new(Arc::new(client), snapshot);
    render(&session);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while !session.is_finished() {
        // Bound first so the timer borrow ends before the arms touch the
        // session again.
        let input = next_input(session.timer_mut(), &mut lines).await?;
        match input {
            Input::Tick => session.on_tick(),
            Input::Eof => break,
            Input::Line(line) => {
                let line = line.trim().to_string();
                match line.as_str() {
                    ":quit" | ":q" => break,
                    ":finish" => {
                        session.finish().await;
                        render(&session);
                    }
                    "" => match session.phase() {
                        AnswerPhase::Revealed { .. } => {
                            session.advance().await;
                            render(&session);
                        }
                        AnswerPhase::Idle => {
                            // Surfaces the empty-answer validation error.
                            session.submit().await;
                            render(&session);
                        }
                        _ => {}
                    },
                    answer => match session.phase() {
                        AnswerPhase::Idle => {
                            session.set_input(answer);
                            session.submit().await;
                            render(&session);
                        }
                        AnswerPhase::Revealed { .. } => {
                            session.advance().await;
                            render(&session);
                        }
                        _ => {}
                    },
                }
            }
        }
    }

    Ok(())
}

fn render(session: &AnswerSession<HttpScoringClient>) {
    if let Some(error) = session.error() {
        println!("  ! {error}");
    }
    match session.phase() {
        AnswerPhase::Idle | AnswerPhase::AwaitingGrade => {
            let snapshot = session.snapshot();
            println!();
            if snapshot.difficulty.is_timed_challenge() {
                println!(
                    "{} | score {} | time {}",
                    snapshot.username,
                    snapshot.score,
                    format_duration(session.elapsed_seconds())
                );
            } else {
                println!("{} | score {}", snapshot.username, snapshot.score);
            }
            println!("{}", describe_question(&snapshot.question));
            println!("Type your answer (e.g. AB+BC'+A'C), or :quit");
        }
        AnswerPhase::Revealed { reveal } => {
            println!();
            if reveal.outcome.is_correct() {
                println!("Correct!");
            } else {
                println!("Wrong!");
            }
            if !reveal.correct_answers.is_empty() {
                println!(
                    "  Correct answer(s): {}",
                    reveal.correct_answers.join(", ")
                );
            }
            if session.can_finish() {
                println!("Type :finish to record your time");
            } else if session.snapshot().difficulty.is_timed_challenge() {
                println!("Press Enter to try again");
            } else {
                println!("Press Enter for the next map");
            }
        }
        AnswerPhase::Finishing { .. } => {
            println!("Recording your time...");
        }
        AnswerPhase::Finished { outcome } => {
            println!();
            println!("Challenge complete!");
            println!(
                "  Time {} | Rank #{}",
                format_duration(outcome.elapsed_seconds),
                outcome.rank
            );
            print_timed_board(&outcome.leaderboard);
            println!("Play again tomorrow!");
        }
    }
}
