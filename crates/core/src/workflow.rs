mod builder;

use std::fmt::{self, Debug};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use prayaas_service::{Artifact, Diagnosis, ServiceError};
use tokio::task::spawn_blocking;

use crate::client::{BoxedFuture, DiagnosisClient, ServiceResult};
use crate::report_store::ReportStore;
use crate::sentinel::{
    NO_DIAGNOSIS, REPORT_FILE_NAME, UPLOAD_FAILED, describe_failure,
};
pub use builder::DiagnosisWorkflowBuilder;

/// The outcome of an upload, fed back through
/// [`DiagnosisWorkflow::settle_upload`].
pub type DiagnosisOutcome = Result<Diagnosis, Box<dyn ServiceError>>;

/// The latest analysis outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct DiagnosisResult {
    text: Option<String>,
    is_failure: bool,
}

impl DiagnosisResult {
    #[inline]
    fn diagnosed(text: String) -> Self {
        Self {
            text: Some(text),
            is_failure: false,
        }
    }

    #[inline]
    fn upload_failed() -> Self {
        Self {
            text: Some(UPLOAD_FAILED.to_owned()),
            is_failure: true,
        }
    }

    /// Returns the result text, or `None` if nothing has been uploaded yet.
    #[inline]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns the text to show, with a placeholder standing in for an
    /// absent or empty result.
    #[inline]
    pub fn display_text(&self) -> &str {
        self.text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(NO_DIAGNOSIS)
    }

    /// Returns `true` if the text is the upload failure sentinel.
    #[inline]
    pub fn is_failure(&self) -> bool {
        self.is_failure
    }
}

/// The upload/diagnosis workflow.
///
/// The only cycle is `Idle -> Uploading -> Idle`: [`upload`](Self::upload)
/// marks an artifact as pending and returns a [`PendingDiagnosis`], and
/// [`settle_upload`](Self::settle_upload) overwrites the result with the
/// diagnosis or the failure sentinel. A second upload is refused while one
/// is pending.
///
/// [`download`](Self::download) is independent of that cycle and never
/// touches the workflow state.
pub struct DiagnosisWorkflow {
    client: DiagnosisClient,
    store: Arc<dyn ReportStore>,
    artifact_pending: bool,
    result: DiagnosisResult,
}

impl DiagnosisWorkflow {
    /// Returns `true` while an uploaded artifact waits for its diagnosis.
    #[inline]
    pub fn is_artifact_pending(&self) -> bool {
        self.artifact_pending
    }

    /// Returns the latest analysis outcome.
    #[inline]
    pub fn diagnosis_result(&self) -> &DiagnosisResult {
        &self.result
    }

    /// Uploads `artifact` for analysis.
    ///
    /// Returns `None` without touching any state if another upload is
    /// still pending.
    pub fn upload(&mut self, artifact: Artifact) -> Option<PendingDiagnosis> {
        if self.artifact_pending {
            debug!(
                "an upload is still pending, ignoring `{}`",
                artifact.file_name()
            );
            return None;
        }

        self.artifact_pending = true;
        debug!("uploading `{}`", artifact.file_name());
        let fut = self.client.diagnose(artifact);
        Some(PendingDiagnosis { fut })
    }

    /// Applies the outcome of the pending upload.
    pub fn settle_upload(&mut self, outcome: DiagnosisOutcome) {
        if !self.artifact_pending {
            warn!("got a diagnosis while no upload is pending, dropping it");
            return;
        }

        self.result = match outcome {
            Ok(diagnosis) => DiagnosisResult::diagnosed(diagnosis.result),
            Err(err) => {
                let reason = describe_failure(&*err);
                debug!("upload settled with a failure: {reason}");
                DiagnosisResult::upload_failed()
            }
        };
        self.artifact_pending = false;
    }

    /// Uploads `artifact`, waits for the diagnosis and settles it.
    ///
    /// Returns `false` if the upload was rejected.
    pub async fn upload_and_wait(&mut self, artifact: Artifact) -> bool {
        let Some(pending) = self.upload(artifact) else {
            return false;
        };
        let outcome = pending.await;
        self.settle_upload(outcome);
        true
    }

    /// Fetches the latest report and saves it as
    /// [`REPORT_FILE_NAME`](crate::sentinel::REPORT_FILE_NAME).
    ///
    /// The returned future resolves to the saved path, or `None` if either
    /// the fetch or the save failed. Failures are only logged.
    pub fn download(&self) -> PendingDownload {
        let fetch = self.client.fetch_report();
        let store = Arc::clone(&self.store);
        let fut = Box::pin(async move {
            let report = match fetch.await {
                Ok(report) => report,
                Err(err) => {
                    let reason = describe_failure(&*err);
                    debug!("download settled with a failure: {reason}");
                    return None;
                }
            };

            let saved = spawn_blocking(move || {
                store.save(REPORT_FILE_NAME, &report.content)
            })
            .await;
            match saved {
                Ok(Ok(path)) => {
                    info!("saved the report to {}", path.display());
                    Some(path)
                }
                Ok(Err(err)) => {
                    error!("failed to save the report: {err}");
                    None
                }
                Err(err) => {
                    error!("failed to save the report: {err}");
                    None
                }
            }
        });
        PendingDownload { fut }
    }
}

impl DiagnosisWorkflow {
    fn from_builder(builder: DiagnosisWorkflowBuilder) -> Self {
        let DiagnosisWorkflowBuilder { client, store } = builder;

        Self {
            client,
            store,
            artifact_pending: false,
            result: Default::default(),
        }
    }
}

impl Debug for DiagnosisWorkflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosisWorkflow")
            .field("artifact_pending", &self.artifact_pending)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

/// An in-flight upload.
///
/// Dropping it without settling leaves the workflow in the uploading state.
#[must_use = "the workflow stays busy until the upload is settled"]
pub struct PendingDiagnosis {
    fut: BoxedFuture<ServiceResult<Diagnosis>>,
}

impl Future for PendingDiagnosis {
    type Output = DiagnosisOutcome;

    #[inline]
    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Self::Output> {
        self.fut.as_mut().poll(cx)
    }
}

impl Debug for PendingDiagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDiagnosis").finish_non_exhaustive()
    }
}

/// An in-flight report download. Nothing is fetched until it is polled.
#[must_use = "the report is only fetched when this is awaited"]
pub struct PendingDownload {
    fut: BoxedFuture<Option<PathBuf>>,
}

impl Future for PendingDownload {
    type Output = Option<PathBuf>;

    #[inline]
    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Self::Output> {
        self.fut.as_mut().poll(cx)
    }
}

impl Debug for PendingDownload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingDownload").finish_non_exhaustive()
    }
}
