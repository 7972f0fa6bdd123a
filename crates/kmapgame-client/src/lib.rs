//! kmapgame-client — the network boundary to the scoring authority.
//!
//! Implements the core `ScoringClient` trait over HTTP, plus the
//! registration and read-only leaderboard calls that sit outside the
//! session contract, configuration loading, and a scripted mock for tests.

pub mod config;
pub mod http;
pub mod mock;

pub use config::{load_config, load_config_from, GameConfig};
pub use http::{DailyLeaderboard, HttpScoringClient};
pub use mock::MockScoringClient;
