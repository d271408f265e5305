use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::future::ready;
use std::time::Duration;

use prayaas_service::{
    Artifact, AssistantService, ChatReply, ChatRequest, Diagnosis,
    DiagnosisService, ErrorKind, Report, ServiceError,
};
use tokio::time::sleep;

#[derive(Debug)]
struct FakeServiceError(ErrorKind);

impl Display for FakeServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl Error for FakeServiceError {}

impl ServiceError for FakeServiceError {
    fn kind(&self) -> ErrorKind {
        self.0
    }
}

struct EchoService;

impl AssistantService for EchoService {
    type Error = FakeServiceError;

    fn send_chat(
        &self,
        req: &ChatRequest,
    ) -> impl Future<Output = Result<ChatReply, Self::Error>> + Send + 'static
    {
        let message = req.message.clone();
        async move {
            sleep(Duration::from_millis(1)).await;
            if message.is_empty() {
                return Err(FakeServiceError(ErrorKind::Protocol));
            }
            Ok(ChatReply {
                response: format!("You said {message}"),
            })
        }
    }
}

impl DiagnosisService for EchoService {
    type Error = FakeServiceError;

    fn diagnose(
        &self,
        artifact: &Artifact,
    ) -> impl Future<Output = Result<Diagnosis, Self::Error>> + Send + 'static
    {
        ready(Ok(Diagnosis {
            result: format!("Read {} bytes", artifact.content().len()),
        }))
    }

    fn fetch_report(
        &self,
    ) -> impl Future<Output = Result<Report, Self::Error>> + Send + 'static
    {
        ready(Err(FakeServiceError(ErrorKind::Status)))
    }
}

#[tokio::test]
async fn test_futures_outlive_borrows() {
    let service = EchoService;
    let fut = {
        let req = ChatRequest::new("hello");
        service.send_chat(&req)
    };
    let reply = fut.await.unwrap();
    assert_eq!(reply.response, "You said hello");

    let err = service.send_chat(&ChatRequest::new("")).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Protocol);
}

#[tokio::test]
async fn test_diagnosis_contract() {
    let service = EchoService;
    let fut = {
        let artifact = Artifact::new("report.txt", "12345".as_bytes()).unwrap();
        service.diagnose(&artifact)
    };
    assert_eq!(fut.await.unwrap().result, "Read 5 bytes");

    let err = service.fetch_report().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Status);
}

#[test]
fn test_wire_shapes() {
    let body = serde_json::to_value(ChatRequest::new("hello")).unwrap();
    assert_eq!(body, serde_json::json!({ "message": "hello" }));

    let reply: ChatReply =
        serde_json::from_str(r#"{"response":"hi there"}"#).unwrap();
    assert_eq!(reply.response, "hi there");

    let diagnosis: Diagnosis =
        serde_json::from_str(r#"{"result":"Diagnosis: mild anemia"}"#)
            .unwrap();
    assert_eq!(diagnosis.result, "Diagnosis: mild anemia");
}
