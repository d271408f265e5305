use std::pin::Pin;
use std::sync::Arc;

use prayaas_service::{
    Artifact, AssistantService, ChatReply, ChatRequest, Diagnosis,
    DiagnosisService, Report, ServiceError,
};
use tracing::Instrument;

use crate::sentinel::describe_failure;

pub(crate) type BoxedFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;
pub(crate) type ServiceResult<T> = Result<T, Box<dyn ServiceError>>;

type ChatHandlerFn = Arc<
    dyn Fn(ChatRequest) -> BoxedFuture<ServiceResult<ChatReply>> + Send + Sync,
>;
type DiagnoseHandlerFn = Arc<
    dyn Fn(Artifact) -> BoxedFuture<ServiceResult<Diagnosis>> + Send + Sync,
>;
type ReportHandlerFn =
    Arc<dyn Fn() -> BoxedFuture<ServiceResult<Report>> + Send + Sync>;

fn erase<T, E: ServiceError>(
    result: Result<T, E>,
    what: &str,
) -> ServiceResult<T> {
    result.map_err(|err| {
        error!("{what} failed: {}", describe_failure(&err));
        Box::new(err) as Box<dyn ServiceError>
    })
}

/// A wrapper around an assistant service that provides a type-erased
/// interface for the session.
#[derive(Clone)]
pub struct AssistantClient {
    handler_fn: ChatHandlerFn,
}

impl AssistantClient {
    #[inline]
    pub fn new<S: AssistantService + 'static>(service: S) -> Self {
        // Erase `S` so the session doesn't need a generic parameter.
        let handler_fn: ChatHandlerFn = Arc::new(move |req| {
            let fut = service.send_chat(&req);
            Box::pin(
                async move {
                    trace!("sending a chat request: {:?}", req);
                    let reply = erase(fut.await, "chat request")?;
                    trace!("got a reply: {} chars", reply.response.len());
                    Ok(reply)
                }
                .instrument(trace_span!("assistant req")),
            )
        });
        Self { handler_fn }
    }

    /// Sends exactly one chat request.
    #[inline]
    pub fn send_chat(
        &self,
        req: ChatRequest,
    ) -> BoxedFuture<ServiceResult<ChatReply>> {
        (self.handler_fn)(req)
    }
}

/// A wrapper around a diagnosis service that provides a type-erased
/// interface for the workflow.
#[derive(Clone)]
pub struct DiagnosisClient {
    diagnose_fn: DiagnoseHandlerFn,
    report_fn: ReportHandlerFn,
}

impl DiagnosisClient {
    #[inline]
    pub fn new<S: DiagnosisService + 'static>(service: S) -> Self {
        let service = Arc::new(service);

        let diagnose_fn: DiagnoseHandlerFn = {
            let service = Arc::clone(&service);
            Arc::new(move |artifact| {
                let fut = service.diagnose(&artifact);
                Box::pin(
                    async move {
                        trace!(
                            "uploading `{}` ({} bytes)",
                            artifact.file_name(),
                            artifact.content().len()
                        );
                        erase(fut.await, "upload")
                    }
                    .instrument(trace_span!("diagnosis upload req")),
                )
            })
        };

        let report_fn: ReportHandlerFn = Arc::new(move || {
            let fut = service.fetch_report();
            Box::pin(
                async move {
                    let report = erase(fut.await, "download")?;
                    trace!("got a report: {} bytes", report.content.len());
                    Ok(report)
                }
                .instrument(trace_span!("diagnosis download req")),
            )
        });

        Self {
            diagnose_fn,
            report_fn,
        }
    }

    /// Uploads exactly one artifact.
    #[inline]
    pub fn diagnose(
        &self,
        artifact: Artifact,
    ) -> BoxedFuture<ServiceResult<Diagnosis>> {
        (self.diagnose_fn)(artifact)
    }

    /// Requests the latest report exactly once.
    #[inline]
    pub fn fetch_report(&self) -> BoxedFuture<ServiceResult<Report>> {
        (self.report_fn)()
    }
}
