//! Core data model types for kmapgame.
//!
//! These are the fundamental types the whole system uses to represent
//! questions, difficulty tiers, grading outcomes, and leaderboard entries.
//! Wire names (`q_num_var`, integer difficulty codes, …) follow the scoring
//! service exactly.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Whether the expected answer is a sum-of-products over minterms or a
/// product-of-sums over maxterms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermForm {
    Min,
    Max,
}

impl TermForm {
    /// The expression style a player is asked for.
    pub fn expression_style(self) -> &'static str {
        match self {
            TermForm::Min => "SOP",
            TermForm::Max => "POS",
        }
    }
}

/// One K-map minimization question, opaque to the session logic.
///
/// `groupings` is a solver artifact the service expects echoed back
/// verbatim; the client never interprets it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "q_num_var")]
    pub num_vars: u8,
    #[serde(rename = "q_form")]
    pub form: TermForm,
    #[serde(rename = "q_terms")]
    pub terms: Vec<u32>,
    #[serde(rename = "q_dont_cares")]
    pub dont_cares: Vec<u32>,
    #[serde(rename = "q_groupings", default)]
    pub groupings: serde_json::Value,
}

/// Difficulty tier for the practice/timed question family.
///
/// Registration sends the lowercase name; all game traffic carries the
/// integer code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    /// The daily timed challenge: one fixed question, stopwatch scoring.
    TimedChallenge,
    /// Question difficulty escalates with the player's score.
    Progressive,
}

impl Difficulty {
    /// Wire code used by the scoring service.
    pub fn code(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::TimedChallenge => 4,
            Difficulty::Progressive => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            4 => Some(Difficulty::TimedChallenge),
            5 => Some(Difficulty::Progressive),
            _ => None,
        }
    }

    /// Registration name understood by `POST /user`.
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::TimedChallenge => "timed",
            Difficulty::Progressive => "progressive",
        }
    }

    /// Only the timed challenge exposes a finish transition and a stopwatch.
    pub fn is_timed_challenge(self) -> bool {
        matches!(self, Difficulty::TimedChallenge)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "timed" => Ok(Difficulty::TimedChallenge),
            "progressive" => Ok(Difficulty::Progressive),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

impl Serialize for Difficulty {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Difficulty {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        Difficulty::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown difficulty code: {code}")))
    }
}

/// Difficulty tier for time-attack runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttackTier {
    Easy,
    Medium,
    Hard,
}

impl AttackTier {
    pub fn code(self) -> u8 {
        match self {
            AttackTier::Easy => 1,
            AttackTier::Medium => 2,
            AttackTier::Hard => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(AttackTier::Easy),
            2 => Some(AttackTier::Medium),
            3 => Some(AttackTier::Hard),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AttackTier::Easy => "easy",
            AttackTier::Medium => "medium",
            AttackTier::Hard => "hard",
        }
    }
}

impl fmt::Display for AttackTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AttackTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(AttackTier::Easy),
            "medium" => Ok(AttackTier::Medium),
            "hard" => Ok(AttackTier::Hard),
            other => Err(format!("unknown time-attack tier: {other}")),
        }
    }
}

impl Serialize for AttackTier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for AttackTier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = u8::deserialize(deserializer)?;
        AttackTier::from_code(code)
            .ok_or_else(|| D::Error::custom(format!("unknown time-attack tier code: {code}")))
    }
}

/// Grading verdict from the scoring service.
///
/// The wire carries `1` for correct and `0` for incorrect; anything else
/// (including a non-numeric value) means the answer text failed server-side
/// parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GradeOutcome {
    Correct,
    Incorrect,
    Malformed,
}

impl GradeOutcome {
    pub fn from_wire(value: &serde_json::Value) -> Self {
        match value.as_i64() {
            Some(1) => GradeOutcome::Correct,
            Some(0) => GradeOutcome::Incorrect,
            _ => GradeOutcome::Malformed,
        }
    }

    /// Wire code for acknowledgments.
    pub fn code(self) -> i64 {
        match self {
            GradeOutcome::Correct => 1,
            GradeOutcome::Incorrect => 0,
            GradeOutcome::Malformed => -1,
        }
    }

    pub fn is_correct(self) -> bool {
        matches!(self, GradeOutcome::Correct)
    }
}

/// The player state exchanged with the scoring service in practice/timed
/// play. The service owns score progression; the client adopts whatever
/// snapshot comes back on an acknowledge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub username: String,
    #[serde(default)]
    pub score: u32,
    pub difficulty: Difficulty,
    #[serde(flatten)]
    pub question: Question,
    /// Supplied by the service for the timed tier and echoed verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_started: Option<DateTime<Utc>>,
}

/// Opening state of a time-attack run, from `POST /start-time-attack`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackStart {
    pub username: String,
    #[serde(rename = "difficulty")]
    pub tier: AttackTier,
    #[serde(flatten)]
    pub question: Question,
}

/// One row of the daily-challenge leaderboard, fastest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedLeaderboardEntry {
    pub username: String,
    pub completion_time_seconds: u64,
}

/// One row of a time-attack leaderboard, most solved first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackLeaderboardEntry {
    pub username: String,
    pub questions_solved: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question() -> Question {
        Question {
            num_vars: 3,
            form: TermForm::Min,
            terms: vec![1, 3, 5],
            dont_cares: vec![7],
            groupings: serde_json::Value::Null,
        }
    }

    #[test]
    fn difficulty_display_and_parse() {
        assert_eq!(Difficulty::TimedChallenge.to_string(), "timed");
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!(
            "Progressive".parse::<Difficulty>().unwrap(),
            Difficulty::Progressive
        );
        assert!("nightmare".parse::<Difficulty>().is_err());
    }

    #[test]
    fn difficulty_codes_round_trip() {
        for code in 1..=5 {
            let tier = Difficulty::from_code(code).unwrap();
            assert_eq!(tier.code(), code);
        }
        assert!(Difficulty::from_code(0).is_none());
        assert!(Difficulty::from_code(6).is_none());
        assert!(Difficulty::TimedChallenge.is_timed_challenge());
        assert!(!Difficulty::Hard.is_timed_challenge());
    }

    #[test]
    fn attack_tier_parse_and_codes() {
        assert_eq!("hard".parse::<AttackTier>().unwrap(), AttackTier::Hard);
        assert!("timed".parse::<AttackTier>().is_err());
        assert_eq!(AttackTier::Medium.code(), 2);
        assert_eq!(AttackTier::from_code(3), Some(AttackTier::Hard));
        assert_eq!(AttackTier::from_code(4), None);
    }

    #[test]
    fn grade_outcome_from_wire() {
        assert_eq!(
            GradeOutcome::from_wire(&serde_json::json!(1)),
            GradeOutcome::Correct
        );
        assert_eq!(
            GradeOutcome::from_wire(&serde_json::json!(0)),
            GradeOutcome::Incorrect
        );
        assert_eq!(
            GradeOutcome::from_wire(&serde_json::json!(-1)),
            GradeOutcome::Malformed
        );
        assert_eq!(
            GradeOutcome::from_wire(&serde_json::json!("unparseable")),
            GradeOutcome::Malformed
        );
    }

    #[test]
    fn snapshot_uses_wire_field_names() {
        let snapshot = PlayerSnapshot {
            username: "adel".into(),
            score: 3,
            difficulty: Difficulty::Medium,
            question: question(),
            time_started: None,
        };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["difficulty"], 2);
        assert_eq!(json["q_num_var"], 3);
        assert_eq!(json["q_form"], "min");
        assert_eq!(json["q_terms"], serde_json::json!([1, 3, 5]));
        assert_eq!(json["q_dont_cares"], serde_json::json!([7]));
        assert!(json.get("time_started").is_none());
    }

    #[test]
    fn snapshot_deserializes_from_service_payload() {
        let payload = serde_json::json!({
            "username": "adel",
            "score": 0,
            "difficulty": 4,
            "q_num_var": 5,
            "q_form": "max",
            "q_terms": [0, 2, 8],
            "q_dont_cares": [],
            "q_groupings": [[0, 2]],
            "time_started": "2026-08-07T10:00:00Z",
            "time_completed": null
        });
        let snapshot: PlayerSnapshot = serde_json::from_value(payload).unwrap();
        assert_eq!(snapshot.difficulty, Difficulty::TimedChallenge);
        assert_eq!(snapshot.question.form, TermForm::Max);
        assert!(snapshot.time_started.is_some());
    }

    #[test]
    fn attack_start_deserializes_numeric_tier() {
        let payload = serde_json::json!({
            "username": "adel",
            "difficulty": 2,
            "q_num_var": 4,
            "q_form": "min",
            "q_terms": [1, 2],
            "q_dont_cares": []
        });
        let start: AttackStart = serde_json::from_value(payload).unwrap();
        assert_eq!(start.tier, AttackTier::Medium);
        assert_eq!(start.question.num_vars, 4);
        assert_eq!(start.question.groupings, serde_json::Value::Null);
    }
}
