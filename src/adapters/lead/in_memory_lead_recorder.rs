//! In-Memory Lead Recorder Adapter
//!
//! Logs every captured lead and keeps it in memory so operators (and tests)
//! can read them back.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::lead::LeadData;
use crate::ports::{LeadRecorder, LeadRecorderError};

#[derive(Debug, Clone, Default)]
pub struct InMemoryLeadRecorder {
    leads: Arc<RwLock<Vec<LeadData>>>,
}

impl InMemoryLeadRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All leads recorded so far, oldest first.
    pub async fn leads(&self) -> Vec<LeadData> {
        self.leads.read().await.clone()
    }
}

#[async_trait]
impl LeadRecorder for InMemoryLeadRecorder {
    async fn record(&self, lead: &LeadData) -> Result<(), LeadRecorderError> {
        tracing::info!(
            association = %lead.association(),
            analyzed_url = %lead.analyzed_url(),
            captured_at = %lead.timestamp().to_rfc3339(),
            "Lead captured"
        );
        self.leads.write().await.push(lead.clone());
        Ok(())
    }
}
