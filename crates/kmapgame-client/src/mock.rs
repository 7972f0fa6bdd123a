//! Scripted scoring client for testing sessions without a real service.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use kmapgame_core::error::ClientError;
use kmapgame_core::model::{AttackLeaderboardEntry, GradeOutcome, PlayerSnapshot};
use kmapgame_core::traits::{
    AttackAttempt, AttackReply, FinishAttackRequest, FinishTimedRequest, GradeReply,
    ScoringClient, TimedStanding,
};

/// A `ScoringClient` whose replies are scripted per operation and popped in
/// order. An unscripted call panics so a test cannot silently issue more
/// traffic than expected.
#[derive(Default)]
pub struct MockScoringClient {
    grades: Mutex<VecDeque<Result<GradeReply, ClientError>>>,
    snapshots: Mutex<VecDeque<Result<PlayerSnapshot, ClientError>>>,
    attack_grades: Mutex<VecDeque<Result<AttackReply, ClientError>>>,
    timed_standings: Mutex<VecDeque<Result<TimedStanding, ClientError>>>,
    attack_boards: Mutex<VecDeque<Result<Vec<AttackLeaderboardEntry>, ClientError>>>,

    grade_calls: AtomicU32,
    ack_calls: AtomicU32,
    attack_calls: AtomicU32,
    finish_timed_calls: AtomicU32,
    finish_attack_calls: AtomicU32,

    last_attack_attempt: Mutex<Option<AttackAttempt>>,
    last_finish_timed: Mutex<Option<FinishTimedRequest>>,
    last_finish_attack: Mutex<Option<FinishAttackRequest>>,
}

impl MockScoringClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script_grade(&self, reply: Result<GradeReply, ClientError>) {
        self.grades.lock().unwrap().push_back(reply);
    }

    pub fn script_next_question(&self, reply: Result<PlayerSnapshot, ClientError>) {
        self.snapshots.lock().unwrap().push_back(reply);
    }

    pub fn script_attack_grade(&self, reply: Result<AttackReply, ClientError>) {
        self.attack_grades.lock().unwrap().push_back(reply);
    }

    pub fn script_timed_standing(&self, reply: Result<TimedStanding, ClientError>) {
        self.timed_standings.lock().unwrap().push_back(reply);
    }

    pub fn script_attack_board(
        &self,
        reply: Result<Vec<AttackLeaderboardEntry>, ClientError>,
    ) {
        self.attack_boards.lock().unwrap().push_back(reply);
    }

    pub fn grade_calls(&self) -> u32 {
        self.grade_calls.load(Ordering::Relaxed)
    }

    pub fn ack_calls(&self) -> u32 {
        self.ack_calls.load(Ordering::Relaxed)
    }

    pub fn attack_calls(&self) -> u32 {
        self.attack_calls.load(Ordering::Relaxed)
    }

    pub fn finish_timed_calls(&self) -> u32 {
        self.finish_timed_calls.load(Ordering::Relaxed)
    }

    pub fn finish_attack_calls(&self) -> u32 {
        self.finish_attack_calls.load(Ordering::Relaxed)
    }

    pub fn last_attack_attempt(&self) -> Option<AttackAttempt> {
        self.last_attack_attempt.lock().unwrap().clone()
    }

    pub fn last_finish_timed(&self) -> Option<FinishTimedRequest> {
        self.last_finish_timed.lock().unwrap().clone()
    }

    pub fn last_finish_attack(&self) -> Option<FinishAttackRequest> {
        self.last_finish_attack.lock().unwrap().clone()
    }
}

#[async_trait]
impl ScoringClient for MockScoringClient {
    async fn grade_answer(
        &self,
        _snapshot: &PlayerSnapshot,
        _answer: &str,
    ) -> Result<GradeReply, ClientError> {
        self.grade_calls.fetch_add(1, Ordering::Relaxed);
        self.grades
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted grade_answer call")
    }

    async fn next_question(
        &self,
        _snapshot: &PlayerSnapshot,
        _acknowledged: GradeOutcome,
    ) -> Result<PlayerSnapshot, ClientError> {
        self.ack_calls.fetch_add(1, Ordering::Relaxed);
        self.snapshots
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted next_question call")
    }

    async fn grade_time_attack(
        &self,
        attempt: &AttackAttempt,
    ) -> Result<AttackReply, ClientError> {
        self.attack_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_attack_attempt.lock().unwrap() = Some(attempt.clone());
        self.attack_grades
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted grade_time_attack call")
    }

    async fn finish_timed(
        &self,
        request: &FinishTimedRequest,
    ) -> Result<TimedStanding, ClientError> {
        self.finish_timed_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_finish_timed.lock().unwrap() = Some(request.clone());
        self.timed_standings
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted finish_timed call")
    }

    async fn finish_time_attack(
        &self,
        request: &FinishAttackRequest,
    ) -> Result<Vec<AttackLeaderboardEntry>, ClientError> {
        self.finish_attack_calls.fetch_add(1, Ordering::Relaxed);
        *self.last_finish_attack.lock().unwrap() = Some(request.clone());
        self.attack_boards
            .lock()
            .unwrap()
            .pop_front()
            .expect("unscripted finish_time_attack call")
    }
}
