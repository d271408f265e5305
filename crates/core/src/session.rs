mod builder;

use std::fmt::{self, Debug};
use std::pin::Pin;
use std::task::{Context, Poll};

use prayaas_service::{ChatReply, ChatRequest, ServiceError};

use crate::client::{AssistantClient, BoxedFuture, ServiceResult};
use crate::conversation::Message;
use crate::sentinel::describe_failure;
pub use builder::ConversationSessionBuilder;

type TranscriptCallback = Box<dyn Fn(&Message) + Send + Sync>;

/// The outcome of a chat request, fed back through
/// [`ConversationSession::settle`].
pub type ReplyOutcome = Result<ChatReply, Box<dyn ServiceError>>;

/// A conversation with the remote assistant.
///
/// The session owns the transcript and allows at most one request in
/// flight. Submitting writes the user's message to the transcript right
/// away and returns a [`PendingReply`]; once that resolves, hand its output
/// to [`settle`](Self::settle) to append the assistant's entry. Failures
/// never escape: they become a synthetic error entry instead.
///
/// Replies are not correlated with requests. Ordering holds only because a
/// new submission is refused until the previous one has settled.
pub struct ConversationSession {
    client: AssistantClient,
    transcript: Vec<Message>,
    pending_input: String,
    awaiting_reply: bool,

    on_transcript: Option<TranscriptCallback>,
}

impl ConversationSession {
    /// Returns all messages in insertion order.
    #[inline]
    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    /// Returns `true` while a submitted message waits for its reply.
    #[inline]
    pub fn is_awaiting_reply(&self) -> bool {
        self.awaiting_reply
    }

    /// Returns the text the user is currently composing.
    #[inline]
    pub fn pending_input(&self) -> &str {
        &self.pending_input
    }

    /// Replaces the text the user is currently composing.
    #[inline]
    pub fn set_pending_input<S: Into<String>>(&mut self, input: S) {
        self.pending_input = input.into();
    }

    /// Submits `text` to the assistant.
    ///
    /// Returns `None` without touching any state if `text` is blank or a
    /// reply is still pending. Otherwise the user message is appended, the
    /// session becomes busy, the pending input is cleared and exactly one
    /// request is dispatched.
    pub fn submit(&mut self, text: &str) -> Option<PendingReply> {
        if self.awaiting_reply {
            debug!("a reply is still pending, ignoring the submission");
            return None;
        }
        if text.trim().is_empty() {
            return None;
        }

        self.push_message(Message::user(text));
        self.awaiting_reply = true;
        self.pending_input.clear();

        debug!("submitting a message: {} chars", text.len());
        let fut = self.client.send_chat(ChatRequest::new(text));
        Some(PendingReply { fut })
    }

    /// Submits the text the user is currently composing.
    ///
    /// See [`submit`](Self::submit).
    #[inline]
    pub fn submit_pending_input(&mut self) -> Option<PendingReply> {
        let input = self.pending_input.clone();
        self.submit(&input)
    }

    /// Applies the outcome of the pending request.
    ///
    /// A reply is appended verbatim. A failure appends the backend error
    /// entry. Either way the session is ready for the next submission.
    pub fn settle(&mut self, outcome: ReplyOutcome) {
        if !self.awaiting_reply {
            warn!("got a reply while none is pending, dropping it");
            return;
        }

        let message = match outcome {
            Ok(reply) => Message::assistant(reply.response),
            Err(err) => {
                let reason = describe_failure(&*err);
                debug!("no reply from the assistant: {reason}");
                Message::backend_error()
            }
        };
        self.push_message(message);
        self.awaiting_reply = false;
    }

    /// Submits `text`, waits for the reply and settles it.
    ///
    /// Returns `false` if the submission was rejected.
    pub async fn submit_and_wait(&mut self, text: &str) -> bool {
        let Some(pending) = self.submit(text) else {
            return false;
        };
        let outcome = pending.await;
        self.settle(outcome);
        true
    }

    fn push_message(&mut self, message: Message) {
        self.transcript.push(message);
        if let (Some(on_transcript), Some(newest)) =
            (&self.on_transcript, self.transcript.last())
        {
            on_transcript(newest);
        }
    }
}

impl ConversationSession {
    fn from_builder(builder: ConversationSessionBuilder) -> Self {
        let ConversationSessionBuilder {
            client,
            on_transcript,
        } = builder;

        Self {
            client,
            transcript: Default::default(),
            pending_input: Default::default(),
            awaiting_reply: false,
            on_transcript,
        }
    }
}

impl Debug for ConversationSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversationSession")
            .field("transcript", &self.transcript)
            .field("pending_input", &self.pending_input)
            .field("awaiting_reply", &self.awaiting_reply)
            .finish_non_exhaustive()
    }
}

/// An in-flight chat request.
///
/// It doesn't borrow the session, so the host can keep mutating other state
/// while waiting. Dropping it without settling leaves the session busy.
#[must_use = "the session stays busy until the reply is settled"]
pub struct PendingReply {
    fut: BoxedFuture<ServiceResult<ChatReply>>,
}

impl Future for PendingReply {
    type Output = ReplyOutcome;

    #[inline]
    fn poll(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Self::Output> {
        self.fut.as_mut().poll(cx)
    }
}

impl Debug for PendingReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PendingReply").finish_non_exhaustive()
    }
}
