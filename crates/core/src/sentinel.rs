//! Fixed values shown in place of results, and helpers to describe the
//! failures they stand in for.

use prayaas_service::ServiceError;

/// Transcript text appended when a chat request fails.
pub const BACKEND_ERROR: &str = "⚠️ Backend error.";

/// Diagnosis text shown when an upload fails.
pub const UPLOAD_FAILED: &str = "Upload failed. Check server or file format.";

/// Diagnosis text shown before any upload has settled.
pub const NO_DIAGNOSIS: &str = "No diagnosis available.";

/// File name the downloaded report is saved under.
pub const REPORT_FILE_NAME: &str = "final_diagnosis.docx";

/// Formats a service failure for the logs.
#[inline]
pub fn describe_failure(err: &dyn ServiceError) -> String {
    format!("{}: {}", err.kind(), err)
}

#[cfg(test)]
mod tests {
    use std::error::Error;
    use std::fmt::{self, Display};

    use prayaas_service::ErrorKind;

    use super::*;

    #[derive(Debug)]
    struct Unreachable;

    impl Display for Unreachable {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "connection refused")
        }
    }

    impl Error for Unreachable {}

    impl ServiceError for Unreachable {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Transport
        }
    }

    #[test]
    fn test_describe_failure() {
        assert_eq!(
            describe_failure(&Unreachable),
            "Transport failure: connection refused"
        );
    }
}
