//! Subcommand implementations and shared console helpers.

pub mod attack;
pub mod init;
pub mod leaderboard;
pub mod play;

use std::io;
use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Table};
use tokio::io::{BufReader, Lines, Stdin};

use kmapgame_client::{load_config_from, HttpScoringClient};
use kmapgame_core::clock::Ticker;
use kmapgame_core::model::{AttackLeaderboardEntry, Question, TimedLeaderboardEntry};

/// One event of the interactive loop: a clock tick or a line of input.
pub(crate) enum Input {
    Tick,
    Line(String),
    Eof,
}

/// Wait for whichever comes first: a session tick or the next stdin line.
/// With no live timer this just reads input.
pub(crate) async fn next_input(
    timer: Option<&mut Ticker>,
    lines: &mut Lines<BufReader<Stdin>>,
) -> io::Result<Input> {
    match timer {
        Some(ticker) => tokio::select! {
            _ = ticker.tick() => Ok(Input::Tick),
            line = lines.next_line() => Ok(line?.map(Input::Line).unwrap_or(Input::Eof)),
        },
        None => Ok(lines
            .next_line()
            .await?
            .map(Input::Line)
            .unwrap_or(Input::Eof)),
    }
}

pub(crate) fn build_client(
    config_path: Option<&Path>,
    server_override: Option<String>,
) -> Result<HttpScoringClient> {
    let mut config = load_config_from(config_path)?;
    if let Some(server) = server_override {
        config.server_url = server;
    }
    Ok(config.client())
}

/// Render seconds the way the game shows them: `1h 2m 3s`, `4m 5s`, `6s`.
pub(crate) fn format_duration(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        format!("{hours}h {minutes}m {secs}s")
    } else if minutes > 0 {
        format!("{minutes}m {secs}s")
    } else {
        format!("{secs}s")
    }
}

/// Human prompt for a question: which expression style over which terms.
pub(crate) fn describe_question(question: &Question) -> String {
    let terms = join_terms(&question.terms);
    let mut prompt = format!(
        "Find the {} expression: {} variables, terms ({terms})",
        question.form.expression_style(),
        question.num_vars
    );
    if !question.dont_cares.is_empty() {
        prompt.push_str(&format!(", don't cares ({})", join_terms(&question.dont_cares)));
    }
    prompt
}

fn join_terms(terms: &[u32]) -> String {
    terms
        .iter()
        .map(|t| t.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub(crate) fn print_timed_board(entries: &[TimedLeaderboardEntry]) {
    if entries.is_empty() {
        println!("No completions yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Time"]);
    for (idx, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&entry.username),
            Cell::new(format_duration(entry.completion_time_seconds)),
        ]);
    }
    println!("{table}");
}

pub(crate) fn print_attack_board(entries: &[AttackLeaderboardEntry]) {
    if entries.is_empty() {
        println!("No runs recorded yet.");
        return;
    }
    let mut table = Table::new();
    table.set_header(vec!["#", "Player", "Solved"]);
    for (idx, entry) in entries.iter().enumerate() {
        table.add_row(vec![
            Cell::new(idx + 1),
            Cell::new(&entry.username),
            Cell::new(entry.questions_solved),
        ]);
    }
    println!("{table}");
}
