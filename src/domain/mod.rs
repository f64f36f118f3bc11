//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, scores, timestamps, errors)
//! - `analysis` - Target URLs, analysis results and their strict validation
//! - `lead` - Lead form validation and captured leads
//! - `session` - Analysis session state machine and its views

pub mod analysis;
pub mod foundation;
pub mod lead;
pub mod session;
