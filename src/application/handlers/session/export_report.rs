//! ExportReportHandler - Produces the downloadable full report.

use std::sync::Arc;

use super::load_session;
use crate::application::ApplicationError;
use crate::domain::foundation::SessionId;
use crate::ports::{ExportFormat, ExportedDocument, ReportExporter, SessionStore};

#[derive(Debug, Clone)]
pub struct ExportReportCommand {
    pub session_id: SessionId,
    pub format: ExportFormat,
}

/// Handler for report export.
pub struct ExportReportHandler {
    store: Arc<dyn SessionStore>,
    exporter: Arc<dyn ReportExporter>,
}

impl ExportReportHandler {
    pub fn new(store: Arc<dyn SessionStore>, exporter: Arc<dyn ReportExporter>) -> Self {
        Self { store, exporter }
    }

    /// # Errors
    ///
    /// - `ReportDataNotFound` unless both the result and the lead exist
    /// - `ExportFailed` if rendering or conversion fails
    pub async fn handle(
        &self,
        cmd: ExportReportCommand,
    ) -> Result<ExportedDocument, ApplicationError> {
        let handle = load_session(self.store.as_ref(), cmd.session_id).await?;

        let (result, lead) = {
            let session = handle.lock().await;
            let (result, lead) = session.report_data()?;
            (result.clone(), lead.clone())
        };

        let document = self.exporter.export(&result, &lead, cmd.format).await?;
        tracing::info!(
            session_id = %cmd.session_id,
            format = %cmd.format,
            bytes = document.content.len(),
            "Report exported"
        );
        Ok(document)
    }
}
