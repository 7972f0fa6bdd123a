//! The scoring-authority boundary.
//!
//! The remote service owns grading and leaderboard computation; the session
//! state machines consume it through this trait. One method per service
//! operation, implemented over HTTP by `kmapgame-client` and by scripted
//! mocks in tests.

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::{
    AttackLeaderboardEntry, AttackTier, Difficulty, GradeOutcome, PlayerSnapshot, Question,
    TimedLeaderboardEntry,
};

/// Client for the remote scoring authority.
#[async_trait]
pub trait ScoringClient: Send + Sync {
    /// Grade the player's answer against the current question.
    ///
    /// A `Malformed` outcome must not mutate score, counters, or question
    /// on the caller's side.
    async fn grade_answer(
        &self,
        snapshot: &PlayerSnapshot,
        answer: &str,
    ) -> Result<GradeReply, ClientError>;

    /// Acknowledge the last grading result and fetch the replacement
    /// snapshot (score and question updated server-side).
    async fn next_question(
        &self,
        snapshot: &PlayerSnapshot,
        acknowledged: GradeOutcome,
    ) -> Result<PlayerSnapshot, ClientError>;

    /// Grade one chained time-attack answer.
    async fn grade_time_attack(&self, attempt: &AttackAttempt)
        -> Result<AttackReply, ClientError>;

    /// Record a completed daily timed challenge. Called only after a
    /// correct reveal.
    async fn finish_timed(&self, request: &FinishTimedRequest)
        -> Result<TimedStanding, ClientError>;

    /// Record a terminated time-attack run, valid or not.
    async fn finish_time_attack(
        &self,
        request: &FinishAttackRequest,
    ) -> Result<Vec<AttackLeaderboardEntry>, ClientError>;
}

/// Grading verdict for a practice/timed submission.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeReply {
    pub outcome: GradeOutcome,
    /// The accepted minimal expressions, for the reveal banner.
    pub correct_answers: Vec<String>,
}

/// One chained time-attack submission.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackAttempt {
    pub username: String,
    pub tier: AttackTier,
    pub questions_solved: u32,
    pub time_remaining: u32,
    pub question: Question,
    pub answer: String,
}

/// Grading verdict for a time-attack submission. The solved counter and the
/// next question are present only on a correct answer.
#[derive(Debug, Clone, PartialEq)]
pub struct AttackReply {
    pub outcome: GradeOutcome,
    pub questions_solved: Option<u32>,
    pub next_question: Option<Question>,
}

/// Payload for recording a finished timed challenge.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishTimedRequest {
    pub username: String,
    pub score: u32,
    pub difficulty: Difficulty,
    pub elapsed_seconds: u64,
}

/// The service's verdict on a finished timed challenge.
#[derive(Debug, Clone, PartialEq)]
pub struct TimedStanding {
    /// Recorded completion time; on a repeat finish the service returns the
    /// original run's time.
    pub elapsed_seconds: u64,
    pub rank: u32,
    pub leaderboard: Vec<TimedLeaderboardEntry>,
}

/// Payload for recording a terminated time-attack run.
#[derive(Debug, Clone, PartialEq)]
pub struct FinishAttackRequest {
    pub username: String,
    pub tier: AttackTier,
    pub questions_solved: u32,
    /// False when the run ended on a rejected answer rather than expiry.
    pub is_valid: bool,
}
