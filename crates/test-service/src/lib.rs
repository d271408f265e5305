//! Local fake services for testing purpose.

mod preset;

use std::error::Error as StdError;
use std::fmt::{self, Debug, Display, Formatter};
use std::future::pending;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use bytes::Bytes;
use prayaas_service::{
    Artifact, AssistantService, ChatReply, ChatRequest, Diagnosis,
    DiagnosisService, ErrorKind, Report, ServiceError,
};
use tokio::time::sleep;

pub use preset::*;

#[derive(Debug)]
pub struct Error {
    #[allow(dead_code)]
    message: &'static str,
    kind: ErrorKind,
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Debug::fmt(self, f)
    }
}

impl StdError for Error {}

impl ServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

async fn play<T>(
    preset: Option<Preset<T>>,
    delay: Option<Duration>,
) -> Result<T, Error> {
    if let Some(delay) = delay {
        sleep(delay).await;
    }
    match preset {
        Some(Preset::Ok(value)) => Ok(value),
        Some(Preset::Failure(failure)) => Err(Error {
            message: "scripted failure",
            kind: failure.into(),
        }),
        Some(Preset::Hang) => pending().await,
        None => Err(Error {
            message: "no enough steps",
            kind: ErrorKind::Protocol,
        }),
    }
}

#[inline]
fn record<T>(journal: &Mutex<Vec<T>>, item: T) -> usize {
    let mut journal = journal.lock().unwrap_or_else(PoisonError::into_inner);
    journal.push(item);
    journal.len() - 1
}

#[inline]
fn snapshot<T: Clone>(journal: &Mutex<Vec<T>>) -> Vec<T> {
    journal
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// A local fake assistant for testing purpose.
///
/// Replies are picked from the script by call order: the n-th request gets
/// the n-th preset. If there are no enough presets in the script, a protocol
/// error is returned.
///
/// Clones share the request journal, so a test can keep a clone around to
/// inspect what was sent after moving the service into a session.
#[derive(Clone, Default)]
pub struct TestAssistantService {
    script: Vec<PresetReply>,
    delay: Option<Duration>,
    journal: Arc<Mutex<Vec<ChatRequest>>>,
}

impl TestAssistantService {
    #[inline]
    pub fn add_reply<S: Into<String>>(&mut self, reply: S) {
        self.script.push(Preset::Ok(reply.into()));
    }

    #[inline]
    pub fn add_failure(&mut self, failure: PresetFailure) {
        self.script.push(Preset::Failure(failure));
    }

    #[inline]
    pub fn add_preset(&mut self, preset: PresetReply) {
        self.script.push(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the messages received so far, in call order.
    pub fn received_messages(&self) -> Vec<String> {
        snapshot(&self.journal)
            .into_iter()
            .map(|req| req.message)
            .collect()
    }
}

impl AssistantService for TestAssistantService {
    type Error = crate::Error;

    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let call_idx = record(&self.journal, req.clone());
        let preset = self.script.get(call_idx).cloned();
        let delay = self.delay;
        async move {
            let response = play(preset, delay).await?;
            Ok(ChatReply { response })
        }
    }
}

/// A local fake diagnosis service for testing purpose.
///
/// Uploads consume the diagnosis script in call order, the same way
/// [`TestAssistantService`] does. Every report fetch plays the same preset
/// report; without one, fetching fails with a status error.
#[derive(Clone, Default)]
pub struct TestDiagnosisService {
    diagnoses: Vec<PresetDiagnosis>,
    report: Option<PresetReport>,
    delay: Option<Duration>,
    uploads: Arc<Mutex<Vec<Artifact>>>,
    report_fetches: Arc<AtomicUsize>,
}

impl TestDiagnosisService {
    #[inline]
    pub fn add_diagnosis<S: Into<String>>(&mut self, result: S) {
        self.diagnoses.push(Preset::Ok(result.into()));
    }

    #[inline]
    pub fn add_failure(&mut self, failure: PresetFailure) {
        self.diagnoses.push(Preset::Failure(failure));
    }

    #[inline]
    pub fn add_preset(&mut self, preset: PresetDiagnosis) {
        self.diagnoses.push(preset);
    }

    #[inline]
    pub fn set_report(&mut self, preset: PresetReport) {
        self.report = Some(preset);
    }

    #[inline]
    pub fn set_delay(&mut self, duration: Duration) {
        self.delay = Some(duration);
    }

    /// Returns the file names of uploaded artifacts, in call order.
    pub fn uploaded_file_names(&self) -> Vec<String> {
        snapshot(&self.uploads)
            .iter()
            .map(|artifact| artifact.file_name().to_owned())
            .collect()
    }

    /// Returns how many times the report has been requested.
    pub fn report_fetches(&self) -> usize {
        self.report_fetches.load(Ordering::Relaxed)
    }
}

impl DiagnosisService for TestDiagnosisService {
    type Error = crate::Error;

    fn diagnose(
        &self,
        artifact: &Artifact,
    ) -> impl Future<Output = Result<Diagnosis, Self::Error>> + Send + 'static
    {
        let call_idx = record(&self.uploads, artifact.clone());
        let preset = self.diagnoses.get(call_idx).cloned();
        let delay = self.delay;
        async move {
            let result = play(preset, delay).await?;
            Ok(Diagnosis { result })
        }
    }

    fn fetch_report(
        &self,
    ) -> impl Future<Output = Result<Report, Self::Error>> + Send + 'static
    {
        self.report_fetches.fetch_add(1, Ordering::Relaxed);
        let preset = self
            .report
            .clone()
            .unwrap_or(Preset::Failure(PresetFailure::Status));
        let delay = self.delay;
        async move {
            let content = play(Some(preset), delay).await?;
            Ok(Report {
                content: Bytes::from(content),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn test_send_chat() {
        let mut service = TestAssistantService::default();
        service.add_reply("Hello, world!");
        service.add_failure(PresetFailure::Transport);

        let reply = service
            .send_chat(&ChatRequest::new("Hi"))
            .await
            .unwrap();
        assert_eq!(reply.response, "Hello, world!");

        let err = service
            .send_chat(&ChatRequest::new("Again"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);

        // Script exhausted.
        let err = service
            .send_chat(&ChatRequest::new("Once more"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Protocol);

        assert_eq!(service.received_messages(), ["Hi", "Again", "Once more"]);
    }

    #[tokio::test]
    async fn test_hang_never_settles() {
        let mut service = TestAssistantService::default();
        service.add_preset(Preset::Hang);

        let fut = service.send_chat(&ChatRequest::new("Hi"));
        assert!(timeout(Duration::from_millis(20), fut).await.is_err());
    }

    #[tokio::test]
    async fn test_diagnose_and_report() {
        let mut service = TestDiagnosisService::default();
        service.add_diagnosis("Diagnosis: mild anemia");
        service.set_report(Preset::Ok(b"PK\x03\x04".to_vec()));

        let artifact =
            Artifact::new("report.txt", "Hb 9.8 g/dL".as_bytes()).unwrap();
        let diagnosis = service.diagnose(&artifact).await.unwrap();
        assert_eq!(diagnosis.result, "Diagnosis: mild anemia");
        assert_eq!(service.uploaded_file_names(), ["report.txt"]);

        let report = service.fetch_report().await.unwrap();
        assert_eq!(report.content.as_ref(), b"PK\x03\x04");
        assert_eq!(service.report_fetches(), 1);
    }

    #[tokio::test]
    async fn test_report_without_preset_fails() {
        let service = TestDiagnosisService::default();
        let err = service.fetch_report().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Status);
    }
}
