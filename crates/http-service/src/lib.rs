//! HTTP implementations of the assistant and diagnosis services.

#[macro_use]
extern crate tracing;

mod config;
mod proto;

use std::error::Error as StdError;
use std::fmt::{self, Display};
use std::sync::Arc;

use bytes::Bytes;
use mime::Mime;
use prayaas_service::{
    Artifact, AssistantService, ChatReply, ChatRequest, Diagnosis,
    DiagnosisService, ErrorKind, Report, ServiceError,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, header};
use serde::de::DeserializeOwned;

pub use config::{HttpServiceConfig, HttpServiceConfigBuilder};

/// Error type for the HTTP services.
#[derive(Debug)]
pub struct Error {
    message: String,
    kind: ErrorKind,
}

impl Error {
    fn new(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            message: message.into(),
            kind,
        }
    }

    fn transport(err: reqwest::Error) -> Self {
        Self::new(format!("{err}"), ErrorKind::Transport)
    }

    /// Returns the error message.
    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl StdError for Error {}

impl ServiceError for Error {
    #[inline]
    fn kind(&self) -> ErrorKind {
        self.kind
    }
}

/// Rejects non-success responses, keeping whatever explanation the server
/// put in the body.
async fn ensure_success(resp: Response) -> Result<Response, Error> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let detail = resp
        .bytes()
        .await
        .ok()
        .and_then(|body| serde_json::from_slice::<proto::ErrorBody>(&body).ok())
        .and_then(|body| body.describe());
    let message = match detail {
        Some(detail) => format!("Server responded with {status}: {detail}"),
        None => format!("Server responded with {status}"),
    };
    Err(Error::new(message, ErrorKind::Status))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, Error> {
    let body = resp.bytes().await.map_err(Error::transport)?;
    trace!("got a response body: {} bytes", body.len());
    serde_json::from_slice(&body).map_err(|err| {
        Error::new(format!("Malformed response: {err}"), ErrorKind::Protocol)
    })
}

/// Assistant service reachable over HTTP.
#[derive(Clone, Debug)]
pub struct HttpAssistantService {
    client: Client,
    config: Arc<HttpServiceConfig>,
}

impl HttpAssistantService {
    /// Creates a new `HttpAssistantService` with the given configuration.
    #[inline]
    pub fn new(config: HttpServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a new `HttpAssistantService` sharing an existing client.
    #[inline]
    pub fn with_client(client: Client, config: HttpServiceConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl AssistantService for HttpAssistantService {
    type Error = Error;

    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let resp_fut = self
            .client
            .post(self.config.chat_url())
            .header(header::ACCEPT, "application/json")
            .json(&proto::create_chat_body(req))
            .send();

        async move {
            let resp = resp_fut.await.map_err(Error::transport)?;
            let resp = ensure_success(resp).await?;
            let body: proto::ChatResponseBody = read_json(resp).await?;
            Ok(ChatReply {
                response: body.response,
            })
        }
    }
}

/// Diagnosis service reachable over HTTP.
#[derive(Clone, Debug)]
pub struct HttpDiagnosisService {
    client: Client,
    config: Arc<HttpServiceConfig>,
}

impl HttpDiagnosisService {
    /// Creates a new `HttpDiagnosisService` with the given configuration.
    #[inline]
    pub fn new(config: HttpServiceConfig) -> Self {
        Self::with_client(Client::new(), config)
    }

    /// Creates a new `HttpDiagnosisService` sharing an existing client.
    #[inline]
    pub fn with_client(client: Client, config: HttpServiceConfig) -> Self {
        Self {
            client,
            config: Arc::new(config),
        }
    }
}

impl DiagnosisService for HttpDiagnosisService {
    type Error = Error;

    fn diagnose(
        &self,
        artifact: &Artifact,
    ) -> impl Future<Output = Result<Diagnosis, Self::Error>> + Send + 'static
    {
        let part = Part::bytes(artifact.content().to_vec())
            .file_name(artifact.file_name().to_owned())
            .mime_str(artifact.mime().as_ref());
        let resp_fut = part.map(|part| {
            let form = Form::new().part(proto::FILE_FIELD, part);
            self.client
                .post(self.config.diagnose_url())
                .header(header::ACCEPT, "application/json")
                .multipart(form)
                .send()
        });

        async move {
            let resp_fut = resp_fut.map_err(|err| {
                Error::new(format!("Invalid upload: {err}"), ErrorKind::Protocol)
            })?;
            let resp = resp_fut.await.map_err(Error::transport)?;
            let resp = ensure_success(resp).await?;
            let body: proto::DiagnoseResponseBody = read_json(resp).await?;
            Ok(proto::into_diagnosis(body))
        }
    }

    fn fetch_report(
        &self,
    ) -> impl Future<Output = Result<Report, Self::Error>> + Send + 'static
    {
        let resp_fut = self.client.get(self.config.download_url()).send();

        async move {
            let resp = resp_fut.await.map_err(Error::transport)?;
            let resp = ensure_success(resp).await?;

            // A JSON body here is an error payload, never a document.
            let content_type = resp
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<Mime>().ok());
            let is_json = content_type
                .as_ref()
                .is_some_and(|m| m.subtype() == mime::JSON);
            if is_json {
                return Err(Error::new(
                    format!("Unexpected content type: {content_type:?}"),
                    ErrorKind::Protocol,
                ));
            }

            let content: Bytes = resp.bytes().await.map_err(Error::transport)?;
            trace!("got a report: {} bytes", content.len());
            Ok(Report { content })
        }
    }
}
