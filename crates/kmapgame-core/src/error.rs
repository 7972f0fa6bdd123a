//! Transport error types for the scoring-client boundary.
//!
//! Defined in `kmapgame-core` so the session state machines can classify
//! failures without string matching. Every variant is retryable: a failed
//! call leaves the transition that triggered it re-invokable, and no local
//! counter is ever touched on the error path.

use thiserror::Error;

/// Errors that can occur when talking to the scoring service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The service returned an error response.
    #[error("scoring service error (HTTP {status}): {message}")]
    Api { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("malformed server response: {0}")]
    InvalidResponse(String),
}
