//! Analysis module - the simulated site analysis and its ingestion.
//!
//! - `TargetUrl` - validated website address submitted by a visitor
//! - `AnalysisResult` - normalized, immutable outcome of one analysis
//! - `validator` - fence stripping and strict schema validation of backend text
//! - `prompt` - the fixed instructional prompt sent to the generator
//! - `AnalysisError` - why an analysis produced no result

mod error;
mod prompt;
mod result;
mod target_url;
pub mod validator;

pub use error::{AnalysisError, NOT_CONFIGURED_MESSAGE};
pub use prompt::{analysis_prompt, ANALYSIS_TEMPERATURE};
pub use result::{AnalysisResult, FINDINGS_PER_LIST};
pub use target_url::{TargetUrl, TargetUrlError, EMPTY_URL_MESSAGE, INVALID_URL_MESSAGE};
pub use validator::ParseError;
