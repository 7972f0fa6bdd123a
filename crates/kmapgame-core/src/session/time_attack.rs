//! Chained-question session under a fixed countdown.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Ticker;
use crate::model::{AttackLeaderboardEntry, AttackStart, AttackTier, GradeOutcome, Question};
use crate::traits::{AttackAttempt, FinishAttackRequest, ScoringClient};

/// Countdown length of a run, in seconds.
pub const ATTACK_TIME_LIMIT_SECS: u32 = 30;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Terminal snapshot of a time-attack run.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackOutcome {
    /// True when the run ended on countdown expiry rather than a rejected
    /// answer.
    pub valid: bool,
    pub leaderboard: Vec<AttackLeaderboardEntry>,
}

/// Discrete stage of a time-attack session.
#[derive(Debug, Clone, PartialEq)]
pub enum AttackPhase {
    /// Accepting one submission at a time under the countdown.
    Active,
    /// The run has terminated; the finish call has not been dispatched yet.
    Ended { valid: bool },
    /// The finish call is in flight, or failed and awaits a manual retry.
    Finishing { valid: bool },
    /// Terminal: the run is recorded.
    Finished { outcome: AttackOutcome },
}

/// Drives the chained submit → grade → advance loop under a shared
/// countdown, terminating on the first rejected answer or on expiry.
///
/// `questions_solved` is adopted from service responses, never counted
/// locally. Entering `Ended` is only reachable once, from `Active`, so the
/// finish call is dispatched exactly once per termination (retries after a
/// transport failure are explicit and manual).
pub struct TimeAttackSession<C: ?Sized> {
    id: Uuid,
    client: Arc<C>,
    username: String,
    tier: AttackTier,
    question: Question,
    input: String,
    questions_solved: u32,
    time_remaining: u32,
    phase: AttackPhase,
    timer: Option<Ticker>,
    error: Option<String>,
    last_outcome: Option<GradeOutcome>,
}

impl<C: ScoringClient + ?Sized> TimeAttackSession<C> {
    /// Create a session from the run's opening state. The countdown starts
    /// immediately.
    pub fn new(client: Arc<C>, start: AttackStart) -> Self {
        let session = Self {
            id: Uuid::new_v4(),
            client,
            username: start.username,
            tier: start.tier,
            question: start.question,
            input: String::new(),
            questions_solved: 0,
            time_remaining: ATTACK_TIME_LIMIT_SECS,
            phase: AttackPhase::Active,
            timer: Some(Ticker::start(TICK_PERIOD)),
            error: None,
            last_outcome: None,
        };
        debug!(
            session = %session.id,
            user = %session.username,
            tier = %session.tier,
            "time-attack session created"
        );
        session
    }

    pub fn phase(&self) -> &AttackPhase {
        &self.phase
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn tier(&self) -> AttackTier {
        self.tier
    }

    pub fn question(&self) -> &Question {
        &self.question
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn questions_solved(&self) -> u32 {
        self.questions_solved
    }

    pub fn time_remaining(&self) -> u32 {
        self.time_remaining
    }

    /// Inline user-visible error, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Verdict of the most recent graded submission, for the result banner.
    pub fn last_outcome(&self) -> Option<GradeOutcome> {
        self.last_outcome
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, AttackPhase::Finished { .. })
    }

    /// 1-based position of this player in the recorded leaderboard.
    ///
    /// `None` until the run is recorded, for invalid runs, and when the
    /// identity is absent from the returned board (rendered as unranked).
    pub fn rank(&self) -> Option<usize> {
        match &self.phase {
            AttackPhase::Finished { outcome } if outcome.valid => outcome
                .leaderboard
                .iter()
                .position(|entry| entry.username == self.username)
                .map(|idx| idx + 1),
            _ => None,
        }
    }

    /// Replace the pending answer text. Editing clears any inline error.
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.error = None;
    }

    /// The live countdown ticker while the run is active.
    pub fn timer_mut(&mut self) -> Option<&mut Ticker> {
        self.timer.as_mut()
    }

    /// Apply one countdown second; reaching zero ends the run as a valid
    /// timeout. A grading call can never be in flight here because ticks
    /// are only applied between events, so a response that raced the clock
    /// has already been honored.
    pub async fn on_tick(&mut self) {
        if !matches!(self.phase, AttackPhase::Active) {
            return;
        }
        self.time_remaining = self.time_remaining.saturating_sub(1);
        if self.time_remaining == 0 {
            debug!(session = %self.id, solved = self.questions_solved, "countdown expired");
            self.end_run(true).await;
        }
    }

    /// Submit the pending answer for grading.
    ///
    /// Valid only in `Active`; ignored in any other phase. An empty answer
    /// is rejected locally without a network call. A correct answer chains
    /// to the next question; any other verdict ends the run as invalid. A
    /// transport failure keeps the run alive with the submit retryable.
    pub async fn submit(&mut self) {
        if !matches!(self.phase, AttackPhase::Active) {
            debug!(session = %self.id, "submit ignored outside Active");
            return;
        }
        if self.input.is_empty() {
            self.error = Some("Input something!".to_string());
            return;
        }
        self.error = None;
        let attempt = AttackAttempt {
            username: self.username.clone(),
            tier: self.tier,
            questions_solved: self.questions_solved,
            time_remaining: self.time_remaining,
            question: self.question.clone(),
            answer: self.input.clone(),
        };
        match self.client.grade_time_attack(&attempt).await {
            Ok(reply) if reply.outcome.is_correct() => {
                if let Some(solved) = reply.questions_solved {
                    self.questions_solved = solved;
                }
                if let Some(next) = reply.next_question {
                    self.question = next;
                }
                self.input.clear();
                self.last_outcome = Some(GradeOutcome::Correct);
            }
            Ok(reply) => {
                self.last_outcome = Some(reply.outcome);
                self.end_run(false).await;
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "time-attack grading failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Dispatch (or manually retry) the finish call.
    ///
    /// Runs automatically on entering `Ended`; public so a run stuck in
    /// `Finishing` after a transport failure can be retried. Ignored in any
    /// other phase.
    pub async fn finish(&mut self) {
        let valid = match self.phase {
            AttackPhase::Ended { valid } | AttackPhase::Finishing { valid } => valid,
            _ => {
                debug!(session = %self.id, "finish ignored");
                return;
            }
        };
        self.phase = AttackPhase::Finishing { valid };
        let request = FinishAttackRequest {
            username: self.username.clone(),
            tier: self.tier,
            questions_solved: self.questions_solved,
            is_valid: valid,
        };
        match self.client.finish_time_attack(&request).await {
            Ok(leaderboard) => {
                self.error = None;
                self.phase = AttackPhase::Finished {
                    outcome: AttackOutcome { valid, leaderboard },
                };
            }
            Err(err) => {
                warn!(session = %self.id, error = %err, "finish-time-attack failed");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Terminate the run and record it. Only reachable from `Active`.
    async fn end_run(&mut self, valid: bool) {
        self.phase = AttackPhase::Ended { valid };
        self.timer = None;
        self.finish().await;
    }
}
