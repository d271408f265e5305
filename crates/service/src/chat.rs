use serde::{Deserialize, Serialize};

/// A chat message to be sent to the assistant.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The text the user submitted.
    pub message: String,
}

impl ChatRequest {
    /// Creates a request carrying `message`.
    #[inline]
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// The assistant's answer to a [`ChatRequest`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatReply {
    /// The reply text, taken verbatim from the service.
    pub response: String,
}
