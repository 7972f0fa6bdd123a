//! HTTP implementation of the scoring-authority contract.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use kmapgame_core::error::ClientError;
use kmapgame_core::model::{
    AttackLeaderboardEntry, AttackStart, AttackTier, Difficulty, GradeOutcome, PlayerSnapshot,
    Question, TermForm, TimedLeaderboardEntry,
};
use kmapgame_core::traits::{
    AttackAttempt, AttackReply, FinishAttackRequest, FinishTimedRequest, GradeReply,
    ScoringClient, TimedStanding,
};

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client for the remote scoring service.
pub struct HttpScoringClient {
    base_url: String,
    timeout_secs: u64,
    client: reqwest::Client,
}

impl HttpScoringClient {
    pub fn new(base_url: &str) -> Self {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to build HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: timeout.as_secs(),
            client,
        }
    }

    /// Register a practice/timed player and fetch the opening question.
    #[instrument(skip(self))]
    pub async fn register(
        &self,
        username: &str,
        difficulty: Difficulty,
    ) -> Result<PlayerSnapshot, ClientError> {
        let body = RegisterBody {
            username,
            difficulty: difficulty.name(),
        };
        self.post("/user", &body).await
    }

    /// Open a time-attack run and fetch its first question.
    #[instrument(skip(self))]
    pub async fn start_time_attack(
        &self,
        username: &str,
        tier: AttackTier,
    ) -> Result<AttackStart, ClientError> {
        let body = AttackRegisterBody {
            username,
            difficulty: tier,
            is_time_attack: true,
        };
        self.post("/start-time-attack", &body).await
    }

    /// Today's daily-challenge standings.
    #[instrument(skip(self))]
    pub async fn daily_leaderboard(
        &self,
        username: Option<&str>,
    ) -> Result<DailyLeaderboard, ClientError> {
        let mut query = Vec::new();
        if let Some(username) = username {
            query.push(("username", username.to_string()));
        }
        self.get("/daily-leaderboard", &query).await
    }

    /// Ranked standings for a time-attack tier.
    #[instrument(skip(self))]
    pub async fn time_attack_leaderboard(
        &self,
        tier: AttackTier,
    ) -> Result<Vec<AttackLeaderboardEntry>, ClientError> {
        let query = [("difficulty", tier.code().to_string())];
        let wire: LeaderboardWire = self.get("/time-attack-leaderboard", &query).await?;
        Ok(wire.leaderboard)
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + Sync,
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::read_json(response).await
    }

    async fn get<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T, ClientError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;
        Self::read_json(response).await
    }

    fn transport_error(&self, err: reqwest::Error) -> ClientError {
        if err.is_timeout() {
            ClientError::Timeout(self.timeout_secs)
        } else {
            ClientError::Network(err.to_string())
        }
    }

    async fn read_json<T: for<'de> Deserialize<'de>>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status().as_u16();
        if status >= 400 {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ClientError::Api { status, message });
        }
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

#[async_trait]
impl ScoringClient for HttpScoringClient {
    #[instrument(skip(self, snapshot, answer), fields(user = %snapshot.username))]
    async fn grade_answer(
        &self,
        snapshot: &PlayerSnapshot,
        answer: &str,
    ) -> Result<GradeReply, ClientError> {
        let body = GameBody {
            kind: 0,
            user: GradeUser { snapshot, answer },
        };
        let wire: GradeWire = self.post("/game", &body).await?;
        Ok(GradeReply {
            outcome: GradeOutcome::from_wire(&wire.result),
            correct_answers: wire.answers,
        })
    }

    #[instrument(skip(self, snapshot), fields(user = %snapshot.username))]
    async fn next_question(
        &self,
        snapshot: &PlayerSnapshot,
        acknowledged: GradeOutcome,
    ) -> Result<PlayerSnapshot, ClientError> {
        let body = GameBody {
            kind: 1,
            user: AckUser {
                snapshot,
                result: acknowledged.code(),
            },
        };
        let wire: AckWire = self.post("/game", &body).await?;
        Ok(wire.user)
    }

    #[instrument(skip(self, attempt), fields(user = %attempt.username))]
    async fn grade_time_attack(
        &self,
        attempt: &AttackAttempt,
    ) -> Result<AttackReply, ClientError> {
        let body = AttackAttemptBody {
            username: &attempt.username,
            difficulty: attempt.tier,
            questions_solved: attempt.questions_solved,
            time_remaining: attempt.time_remaining,
            question: &attempt.question,
            answer: &attempt.answer,
        };
        let wire: AttackReplyWire = self.post("/check-time-attack", &body).await?;
        let outcome = GradeOutcome::from_wire(&wire.result);
        Ok(AttackReply {
            outcome,
            questions_solved: wire.questions_solved,
            next_question: wire.into_next_question(),
        })
    }

    #[instrument(skip(self, request), fields(user = %request.username))]
    async fn finish_timed(
        &self,
        request: &FinishTimedRequest,
    ) -> Result<TimedStanding, ClientError> {
        let body = FinishTimedBody {
            username: &request.username,
            score: request.score,
            difficulty: request.difficulty,
            elapsed_seconds: request.elapsed_seconds,
        };
        let wire: TimedStandingWire = self.post("/finish-timed", &body).await?;
        Ok(TimedStanding {
            elapsed_seconds: wire.elapsed_seconds,
            rank: wire.rank,
            leaderboard: wire.leaderboard,
        })
    }

    #[instrument(skip(self, request), fields(user = %request.username))]
    async fn finish_time_attack(
        &self,
        request: &FinishAttackRequest,
    ) -> Result<Vec<AttackLeaderboardEntry>, ClientError> {
        let body = FinishAttackBody {
            username: &request.username,
            difficulty: request.tier,
            questions_solved: request.questions_solved,
            is_valid: request.is_valid,
        };
        let wire: LeaderboardWire = self.post("/finish-time-attack", &body).await?;
        Ok(wire.leaderboard)
    }
}

/// Daily-challenge standings from `GET /daily-leaderboard`.
#[derive(Debug, Clone, Deserialize)]
pub struct DailyLeaderboard {
    pub date: String,
    #[serde(default)]
    pub leaderboard: Vec<TimedLeaderboardEntry>,
    #[serde(default)]
    pub total_participants: u32,
    #[serde(default)]
    pub user_rank: Option<u32>,
}

// --- wire shapes ---

#[derive(Deserialize)]
struct ApiErrorBody {
    error: String,
}

#[derive(Serialize)]
struct GameBody<U> {
    #[serde(rename = "type")]
    kind: u8,
    user: U,
}

#[derive(Serialize)]
struct GradeUser<'a> {
    #[serde(flatten)]
    snapshot: &'a PlayerSnapshot,
    answer: &'a str,
}

#[derive(Serialize)]
struct AckUser<'a> {
    #[serde(flatten)]
    snapshot: &'a PlayerSnapshot,
    result: i64,
}

#[derive(Deserialize)]
struct GradeWire {
    result: serde_json::Value,
    #[serde(default)]
    answers: Vec<String>,
}

#[derive(Deserialize)]
struct AckWire {
    user: PlayerSnapshot,
}

#[derive(Serialize)]
struct RegisterBody<'a> {
    username: &'a str,
    difficulty: &'a str,
}

#[derive(Serialize)]
struct AttackRegisterBody<'a> {
    username: &'a str,
    difficulty: AttackTier,
    is_time_attack: bool,
}

#[derive(Serialize)]
struct AttackAttemptBody<'a> {
    username: &'a str,
    difficulty: AttackTier,
    questions_solved: u32,
    time_remaining: u32,
    #[serde(flatten)]
    question: &'a Question,
    answer: &'a str,
}

/// The next question's fields are present only on a correct answer, so each
/// is optional and the question is assembled after the fact.
#[derive(Deserialize)]
struct AttackReplyWire {
    result: serde_json::Value,
    #[serde(default)]
    questions_solved: Option<u32>,
    #[serde(default)]
    q_num_var: Option<u8>,
    #[serde(default)]
    q_form: Option<TermForm>,
    #[serde(default)]
    q_terms: Option<Vec<u32>>,
    #[serde(default)]
    q_dont_cares: Option<Vec<u32>>,
    #[serde(default)]
    q_groupings: Option<serde_json::Value>,
}

impl AttackReplyWire {
    fn into_next_question(self) -> Option<Question> {
        Some(Question {
            num_vars: self.q_num_var?,
            form: self.q_form?,
            terms: self.q_terms?,
            dont_cares: self.q_dont_cares?,
            groupings: self.q_groupings.unwrap_or(serde_json::Value::Null),
        })
    }
}

#[derive(Serialize)]
struct FinishTimedBody<'a> {
    username: &'a str,
    score: u32,
    difficulty: Difficulty,
    elapsed_seconds: u64,
}

#[derive(Deserialize)]
struct TimedStandingWire {
    elapsed_seconds: u64,
    rank: u32,
    #[serde(default)]
    leaderboard: Vec<TimedLeaderboardEntry>,
}

#[derive(Serialize)]
struct FinishAttackBody<'a> {
    username: &'a str,
    difficulty: AttackTier,
    questions_solved: u32,
    is_valid: bool,
}

#[derive(Deserialize)]
struct LeaderboardWire {
    #[serde(default)]
    leaderboard: Vec<AttackLeaderboardEntry>,
}
