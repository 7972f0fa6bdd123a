//! Game session state machines.
//!
//! Each session owns its mutable state and timer exclusively and talks to
//! the scoring authority through the [`ScoringClient`](crate::traits::ScoringClient)
//! trait. All user-visible failures surface as inline error text on the
//! session, never as panics or propagated errors; the presenter re-renders
//! from accessors after every transition.
//!
//! At most one grading call is outstanding per session: the async methods
//! take `&mut self`, and phase gating rejects a second submit before the
//! first resolves. Timer ticks are only applied between events, so a
//! response that races the clock is always honored before expiry is
//! evaluated.

mod answer;
mod time_attack;

pub use answer::{AnswerPhase, AnswerSession, GradeReveal, TimedOutcome};
pub use time_attack::{AttackOutcome, AttackPhase, TimeAttackSession, ATTACK_TIME_LIMIT_SECS};

#[cfg(test)]
pub(crate) mod testing;
