//! Lead Recorder Port - Receives every captured lead.

use async_trait::async_trait;

use crate::domain::lead::LeadData;

/// Errors that can occur while recording a lead.
#[derive(Debug, thiserror::Error)]
pub enum LeadRecorderError {
    #[error("Failed to record lead: {0}")]
    Storage(String),
}

/// Port for handing captured leads to whoever follows up on them.
///
/// Called exactly once per successful lead submission.
#[async_trait]
pub trait LeadRecorder: Send + Sync {
    async fn record(&self, lead: &LeadData) -> Result<(), LeadRecorderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_recorder_is_object_safe() {
        fn check<T: LeadRecorder + ?Sized>() {}
        check::<dyn LeadRecorder>();
    }
}
