//! Practice and daily-timed-challenge session.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Ticker;
use crate::model::{GradeOutcome, PlayerSnapshot, TimedLeaderboardEntry};
use crate::traits::{FinishTimedRequest, ScoringClient};

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Grading result retained for rendering while a reveal is showing.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReveal {
    pub outcome: GradeOutcome,
    pub correct_answers: Vec<String>,
}

/// Terminal snapshot of a completed timed challenge.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedOutcome {
    pub elapsed_seconds: u64,
    pub rank: u32,
    pub leaderboard: Vec<TimedLeaderboardEntry>,
}

/// Discrete stage of an answer session.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerPhase {
    /// No submission outstanding; the answer is editable.
    Idle,
    /// A grading request is in flight; input is locked.
    AwaitingGrade,
    /// A grading result is showing; advance (or finish) is available.
    Revealed { reveal: GradeReveal },
    /// A finish call is in flight. The reveal is retained so a transport
    /// failure can fall back to it with the finish still re-invokable.
    Finishing { reveal: GradeReveal },
    /// Terminal: the challenge is recorded and ranked.
    Finished { outcome: TimedOutcome },
}

/// Drives submit → grade → reveal → advance for single-question play, plus
/// the finish transition of the daily timed challenge.
///
/// The session owns its stopwatch and all mutable fields exclusively;
/// score and question only ever change by adopting a service response.
pub struct AnswerSession<C: ?Sized> {
    id: Uuid,
    client: Arc<C>,
    snapshot: PlayerSnapshot,
    input: String,
    phase: AnswerPhase,
    elapsed_seconds: u64,
    timer: Option<Ticker>,
    error: Option<String>,
}

impl<C: ScoringClient + ?Sized> AnswerSession<C> {
    /// Create a session from the registration snapshot. The timed tier
    /// starts its stopwatch immediately.
    pub fn new(client: Arc<C>, snapshot: PlayerSnapshot) -> Self {
        let mut session = Self {
            id: Uuid::new_v4(),
            client,
            snapshot,
            input: String::new(),
            phase: AnswerPhase::Idle,
            elapsed_seconds: 0,
            timer: None,
            error: None,
        };
        session.sync_timer();
        debug!(
            session = %session.id,
            user = %session.snapshot.username,
            difficulty = %session.snapshot.difficulty,
            "answer session created"
        );
        session
    }

    pub fn phase(&self) -> &AnswerPhase {
        &self.phase
    }

    pub fn snapshot(&self) -> &PlayerSnapshot {
        &self.snapshot
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Inline user-visible error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Stopwatch value in whole seconds. Stays 0 outside the timed tier.
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, AnswerPhase::Finished { .. })
    }

    /// Finish is offered only on the timed tier after a correct reveal.
    pub fn can_finish(&self) -> bool {
        self.snapshot.difficulty.is_timed_challenge()
            && matches!(&self.phase, AnswerPhase::Revealed { reveal } if reveal.outcome.is_correct())
    }

    /// Replace the pending answer text. Editing clears any inline error.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.error = None;
    }

    /// The live stopwatch ticker, if one is running. The driver awaits it
    /// and reports each boundary back through [`AnswerSession::on_tick`].
    pub fn timer_mut(&mut self) -> Option<&mut Ticker> {
        self.timer.as_mut()
    }

    /// Apply one elapsed second. A no-op once the stopwatch is stopped.
    pub fn on_tick(&mut self) {
        if self.timer.is_some() {
            self.elapsed_seconds += 1;
        }
    }

    /// Submit the pending answer for grading.
    ///
    /// Valid only in `Idle`; ignored in any other phase. An empty answer is
    /// rejected locally without a network call.
    pub async fn submit(&mut self) {
        if !matches!(self.phase, AnswerPhase::Idle) {
            debug!(session = %self.id, "submit ignored outside Idle");
            return;
        }
        if self.input.is_empty() {
            self.error = Some("Input something!".to_string());
            return;
        }
        self.error = None;
        self.phase = AnswerPhase::AwaitingGrade;
        match self.client.grade_answer(&self.snapshot, &self.input).await {
            Ok(reply) if reply.outcome == GradeOutcome::Malformed => {
                self.phase = AnswerPhase::Idle;
                self.error =
                    Some("Incorrect format (check variables or operators)".to_string());
            }
            Ok(reply) => {
                self.phase = AnswerPhase::Revealed {
                    reveal: GradeReveal {
                        outcome: reply.outcome,
                        correct_answers: reply.correct_answers,
                    },
                };
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "grading request failed");
                self.phase = AnswerPhase::Idle;
                self.error = Some(err.to_string());
            }
        }
        self.sync_timer();
    }

    /// Acknowledge the reveal and load the next question.
    ///
    /// Valid only in `Revealed`. On success the whole snapshot is replaced
    /// by the service's (score and question together) and the input clears.
    pub async fn advance(&mut self) {
        let AnswerPhase::Revealed { reveal } = &self.phase else {
            debug!(session = %self.id, "advance ignored outside Revealed");
            return;
        };
        let acknowledged = reveal.outcome;
        match self.client.next_question(&self.snapshot, acknowledged).await {
            Ok(next) => {
                self.snapshot = next;
                self.input.clear();
                self.error = None;
                self.phase = AnswerPhase::Idle;
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "advance failed");
                self.error = Some(err.to_string());
            }
        }
        self.sync_timer();
    }

    /// Conclude a timed challenge after a correct reveal.
    ///
    /// No-op unless [`AnswerSession::can_finish`] holds. The stopwatch
    /// freezes on entering `Finishing`; a transport failure falls back to
    /// the reveal (resuming the stopwatch) with the finish re-invokable.
    pub async fn finish(&mut self) {
        if !self.can_finish() {
            debug!(session = %self.id, "finish ignored");
            return;
        }
        let reveal = match &self.phase {
            AnswerPhase::Revealed { reveal } => reveal.clone(),
            _ => return,
        };
        self.error = None;
        self.phase = AnswerPhase::Finishing {
            reveal: reveal.clone(),
        };
        self.sync_timer();
        let request = FinishTimedRequest {
            username: self.snapshot.username.clone(),
            score: self.snapshot.score,
            difficulty: self.snapshot.difficulty,
            elapsed_seconds: self.elapsed_seconds,
        };
        match self.client.finish_timed(&request).await {
            Ok(standing) => {
                self.phase = AnswerPhase::Finished {
                    outcome: TimedOutcome {
                        elapsed_seconds: standing.elapsed_seconds,
                        rank: standing.rank,
                        leaderboard: standing.leaderboard,
                    },
                };
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "finish-timed failed");
                self.error = Some(err.to_string());
                self.phase = AnswerPhase::Revealed { reveal };
            }
        }
        self.sync_timer();
    }

    /// The stopwatch runs on the timed tier through every pre-finish phase
    /// and is canceled once a finish is underway.
    fn sync_timer(&mut self) {
        let should_run = self.snapshot.difficulty.is_timed_challenge()
            && matches!(
                self.phase,
                AnswerPhase::Idle | AnswerPhase::AwaitingGrade | AnswerPhase::Revealed { .. }
            );
        match (should_run, self.timer.is_some()) {
            (true, false) => self.timer = Some(Ticker::start(TICK_PERIOD)),
            (false, true) => self.timer = None,
            _ => {}
        }
    }
}
