//! Scripted scoring client for state-machine tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ClientError;
use crate::model::{
    AttackLeaderboardEntry, Difficulty, GradeOutcome, PlayerSnapshot, Question, TermForm,
    TimedLeaderboardEntry,
};
use crate::traits::{
    AttackAttempt, AttackReply, FinishAttackRequest, FinishTimedRequest, GradeReply,
    ScoringClient, TimedStanding,
};

/// Replies are scripted per operation and popped in order; an unscripted
/// call panics so a test cannot silently issue more traffic than expected.
#[derive(Default)]
pub(crate) struct ScriptedClient {
    pub grades: Mutex<VecDeque<Result<GradeReply, ClientError>>>,
    pub snapshots: Mutex<VecDeque<Result<PlayerSnapshot, ClientError>>>,
    pub attack_grades: Mutex<VecDeque<Result<AttackReply, ClientError>>>,
    pub timed_standings: Mutex<VecDeque<Result<TimedStanding, ClientError>>>,
    pub attack_boards: Mutex<VecDeque<Result<Vec<AttackLeaderboardEntry>, ClientError>>>,

    pub grade_calls: AtomicU32,
    pub ack_calls: AtomicU32,
    pub attack_calls: AtomicU32,
    pub finish_timed_calls: AtomicU32,
    pub finish_attack_calls: AtomicU32,

    pub last_finish_timed: Mutex<Option<FinishTimedRequest>>,
    pub last_finish_attack: Mutex<Option<FinishAttackRequest>>,
}

impl ScriptedClient {
    pub fn push_grade(&self, reply: Result<GradeReply, ClientError>) {
        self.grades.lock().unwrap().push_back(reply);
    }

    pub fn push_snapshot(&self, reply: Result<PlayerSnapshot, ClientError>) {
        self.snapshots.lock().unwrap().push_back(reply);
    }

    pub fn push_attack_grade(&self, reply: Result<AttackReply, ClientError>) {
        self.attack_grades.lock().unwrap().push_back(reply);
    }

    pub fn push_timed_standing(&self, reply: Result<TimedStanding, ClientError>) {
        self.timed_standings.lock().unwrap().push_back(reply);
    }

    pub fn push_attack_board(&self, reply: Result<Vec<AttackLeaderboardEntry>, ClientError>) {
        self.attack_boards.lock().unwrap().push_back(reply);
    }
}

#[async_trait]
impl ScoringClient for ScriptedClient {
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
        _attempt: &AttackAttempt,
    ) -> Result<AttackReply, ClientError> {
        self.attack_calls.fetch_add(1, Ordering::Relaxed);
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

pub(crate) fn question(terms: &[u32]) -> Question {
    Question {
        num_vars: 3,
        form: TermForm::Min,
        terms: terms.to_vec(),
        dont_cares: vec![],
        groupings: serde_json::Value::Null,
    }
}

pub(crate) fn snapshot(difficulty: Difficulty) -> PlayerSnapshot {
    PlayerSnapshot {
        username: "adel".into(),
        score: 0,
        difficulty,
        question: question(&[1, 3, 5]),
        time_started: None,
    }
}

pub(crate) fn timed_board() -> Vec<TimedLeaderboardEntry> {
    vec![
        TimedLeaderboardEntry {
            username: "speedrunner".into(),
            completion_time_seconds: 12,
        },
        TimedLeaderboardEntry {
            username: "adel".into(),
            completion_time_seconds: 42,
        },
    ]
}

pub(crate) fn attack_board() -> Vec<AttackLeaderboardEntry> {
    vec![
        AttackLeaderboardEntry {
            username: "champ".into(),
            questions_solved: 9,
        },
        AttackLeaderboardEntry {
            username: "adel".into(),
            questions_solved: 4,
        },
    ]
}
