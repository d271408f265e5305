use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// The analysis result for an uploaded artifact.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Diagnosis {
    /// The diagnosis text, taken verbatim from the service.
    pub result: String,
}

/// A rendered report document fetched from the diagnosis service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Report {
    /// Raw bytes of the document.
    pub content: Bytes,
}
