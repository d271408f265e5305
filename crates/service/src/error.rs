use std::fmt::{self, Display};

/// The kind of error that occurred while talking to a service.
///
/// The client treats every kind the same way (the failure is absorbed and
/// replaced by a sentinel), the distinction only exists for diagnostics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The request could not be sent, or no response was received.
    Transport,
    /// A response was received with a non-success status.
    Status,
    /// The response body was malformed or missed an expected field.
    Protocol,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Transport => write!(f, "Transport failure"),
            ErrorKind::Status => write!(f, "Unexpected status"),
            ErrorKind::Protocol => write!(f, "Malformed response"),
        }
    }
}
