use std::error::Error;

use crate::artifact::Artifact;
use crate::chat::{ChatReply, ChatRequest};
use crate::diagnosis::{Diagnosis, Report};
use crate::error::ErrorKind;

/// The error type for a service.
pub trait ServiceError: Error + Send + Sync + 'static {
    /// Returns the kind of this error.
    fn kind(&self) -> ErrorKind;
}

/// A remote assistant that answers chat messages.
///
/// Once the service is created, it should behave like a stateless object.
/// Each call maps to exactly one request; implementations must not retry.
pub trait AssistantService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: ServiceError;

    /// Sends a chat message and waits for the reply.
    ///
    /// The returned future must not borrow from `self` or `req`, so the
    /// caller can keep it around while mutating its own state.
    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static;
}

/// A remote service that analyzes uploaded artifacts and renders the
/// latest analysis as a document.
pub trait DiagnosisService: Send + Sync {
    /// The error type that may be returned by the service.
    type Error: ServiceError;

    /// Uploads an artifact and waits for its diagnosis.
    fn diagnose(
        &self,
        artifact: &Artifact,
    ) -> impl Future<Output = Result<Diagnosis, Self::Error>> + Send + 'static;

    /// Fetches the most recently generated report.
    fn fetch_report(
        &self,
    ) -> impl Future<Output = Result<Report, Self::Error>> + Send + 'static;
}
