//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text-generation backends (Gemini, mock)
//! - `document` - Report rendering and export
//! - `http` - axum REST API
//! - `lead` - Lead recording
//! - `storage` - Session storage

pub mod ai;
pub mod document;
pub mod http;
pub mod lead;
pub mod storage;
