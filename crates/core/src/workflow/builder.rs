use std::sync::Arc;

use prayaas_service::DiagnosisService;

use super::DiagnosisWorkflow;
use crate::client::DiagnosisClient;
use crate::report_store::{DirectoryReportStore, ReportStore};

/// [`DiagnosisWorkflow`] builder.
pub struct DiagnosisWorkflowBuilder {
    pub(crate) client: DiagnosisClient,
    pub(crate) store: Arc<dyn ReportStore>,
}

impl DiagnosisWorkflowBuilder {
    /// Creates a new builder with the specified diagnosis service.
    ///
    /// Reports are saved into the current directory unless another store
    /// is set.
    #[inline]
    pub fn with_diagnosis_service<S: DiagnosisService + 'static>(
        service: S,
    ) -> Self {
        Self {
            client: DiagnosisClient::new(service),
            store: Arc::new(DirectoryReportStore::default()),
        }
    }

    /// Sets where downloaded reports are saved.
    #[inline]
    pub fn with_report_store<R: ReportStore + 'static>(
        mut self,
        store: R,
    ) -> Self {
        self.store = Arc::new(store);
        self
    }

    /// Builds the workflow.
    #[inline]
    pub fn build(self) -> DiagnosisWorkflow {
        DiagnosisWorkflow::from_builder(self)
    }
}
