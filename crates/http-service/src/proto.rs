use prayaas_service::{ChatRequest, Diagnosis};
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ------------------------------
// Types received from the server
// ------------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct ChatResponseBody {
    pub response: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct DiagnoseResponseBody {
    pub result: String,
}

/// Error payloads come in two flavors: `{"error": "..."}` from handlers
/// that build the response themselves, and `{"detail": ...}` from the
/// framework's own validation.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn describe(&self) -> Option<String> {
        if let Some(error) = &self.error {
            return Some(error.clone());
        }
        match &self.detail {
            Some(Value::String(detail)) => Some(detail.clone()),
            Some(detail) => Some(detail.to_string()),
            None => None,
        }
    }
}

// ------------------------
// Types sent to the server
// ------------------------

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ChatRequestBody<'a> {
    message: &'a str,
}

// -----------
// Conversions
// -----------

pub const FILE_FIELD: &str = "file";

#[inline]
pub fn create_chat_body(req: &ChatRequest) -> ChatRequestBody<'_> {
    ChatRequestBody {
        message: &req.message,
    }
}

#[inline]
pub fn into_diagnosis(body: DiagnoseResponseBody) -> Diagnosis {
    Diagnosis {
        result: body.result,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_chat_body() {
        let req = ChatRequest::new("I have had a headache for two days");
        let body = serde_json::to_value(create_chat_body(&req)).unwrap();
        assert_eq!(
            body,
            json!({ "message": "I have had a headache for two days" })
        );
    }

    #[test]
    fn test_parse_bodies() {
        let chat: ChatResponseBody = serde_json::from_value(json!({
            "response": "  **Rest** and hydrate.\n"
        }))
        .unwrap();
        assert_eq!(chat.response, "  **Rest** and hydrate.\n");

        let diagnose: DiagnoseResponseBody = serde_json::from_value(json!({
            "result": "Diagnosis: mild anemia"
        }))
        .unwrap();
        assert_eq!(
            into_diagnosis(diagnose).result,
            "Diagnosis: mild anemia"
        );

        let missing = serde_json::from_value::<ChatResponseBody>(json!({}));
        assert!(missing.is_err());
    }

    #[test]
    fn test_describe_error_body() {
        let body: ErrorBody =
            serde_json::from_value(json!({ "error": "File not found" }))
                .unwrap();
        assert_eq!(body.describe().as_deref(), Some("File not found"));

        let body: ErrorBody = serde_json::from_value(json!({
            "detail": [{ "loc": ["body", "file"], "msg": "field required" }]
        }))
        .unwrap();
        assert!(body.describe().unwrap().contains("field required"));

        let body: ErrorBody = serde_json::from_value(json!({})).unwrap();
        assert_eq!(body.describe(), None);
    }
}
