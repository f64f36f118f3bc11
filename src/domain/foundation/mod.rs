//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the NavSense domain.

mod errors;
mod ids;
mod score;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::SessionId;
pub use score::{Score, ScoreBand};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
