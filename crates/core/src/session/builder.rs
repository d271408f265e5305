use prayaas_service::AssistantService;

use super::{ConversationSession, TranscriptCallback};
use crate::client::AssistantClient;
use crate::conversation::Message;

/// [`ConversationSession`] builder.
pub struct ConversationSessionBuilder {
    pub(crate) client: AssistantClient,
    pub(crate) on_transcript: Option<TranscriptCallback>,
}

impl ConversationSessionBuilder {
    /// Creates a new builder with the specified assistant service.
    #[inline]
    pub fn with_assistant_service<S: AssistantService + 'static>(
        service: S,
    ) -> Self {
        Self {
            client: AssistantClient::new(service),
            on_transcript: None,
        }
    }

    /// Attaches a callback to be invoked with the newest message after
    /// every transcript change.
    #[inline]
    pub fn on_transcript(
        mut self,
        on_transcript: impl Fn(&Message) + Send + Sync + 'static,
    ) -> Self {
        self.on_transcript = Some(Box::new(on_transcript));
        self
    }

    /// Builds the session.
    #[inline]
    pub fn build(self) -> ConversationSession {
        ConversationSession::from_builder(self)
    }
}
