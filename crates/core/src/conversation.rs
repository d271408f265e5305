//! Conversation-related types.

use crate::sentinel::BACKEND_ERROR;

/// Who wrote a message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sender {
    /// The person typing into the session.
    User,
    /// The remote assistant.
    Assistant,
}

/// An entry in the transcript.
///
/// Messages are immutable once created.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Message {
    sender: Sender,
    text: String,
    is_error: bool,
}

impl Message {
    /// Creates a message written by the user.
    #[inline]
    pub fn user<S: Into<String>>(text: S) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
            is_error: false,
        }
    }

    /// Creates a reply written by the assistant.
    #[inline]
    pub fn assistant<S: Into<String>>(text: S) -> Self {
        Self {
            sender: Sender::Assistant,
            text: text.into(),
            is_error: false,
        }
    }

    /// Creates the synthetic assistant entry that stands in for a reply
    /// when the request failed.
    #[inline]
    pub fn backend_error() -> Self {
        Self {
            sender: Sender::Assistant,
            text: BACKEND_ERROR.to_owned(),
            is_error: true,
        }
    }

    /// Returns the sender of this message.
    #[inline]
    pub fn sender(&self) -> Sender {
        self.sender
    }

    /// Returns the text of this message.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns `true` if this is a synthetic error entry.
    ///
    /// A real reply that happens to carry the same text as the error
    /// sentinel is still not an error.
    #[inline]
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_distinguishable() {
        let fake = Message::assistant(BACKEND_ERROR);
        let real = Message::backend_error();
        assert_eq!(fake.text(), real.text());
        assert_eq!(fake.sender(), real.sender());
        assert!(!fake.is_error());
        assert!(real.is_error());
        assert_ne!(fake, real);
    }
}
