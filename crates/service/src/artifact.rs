use std::borrow::Cow;
use std::error::Error;
use std::fmt::{self, Display};
use std::path::Path;

use bytes::Bytes;
use mime::Mime;

/// File extension accepted by the diagnosis service.
pub const ARTIFACT_EXTENSION: &str = "txt";

/// The kind of artifact validation error.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactErrorKind {
    /// The file is not a plain text report.
    UnsupportedFormat,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// The file could not be read.
    Unreadable,
}

impl Display for ArtifactErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtifactErrorKind::UnsupportedFormat => {
                write!(f, "Unsupported file format")
            }
            ArtifactErrorKind::InvalidEncoding => {
                write!(f, "File is not valid UTF-8 text")
            }
            ArtifactErrorKind::Unreadable => write!(f, "File is unreadable"),
        }
    }
}

/// Describes why a file cannot be used as an [`Artifact`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ArtifactError {
    kind: ArtifactErrorKind,
    reason: Option<String>,
}

impl ArtifactError {
    #[inline]
    fn new(kind: ArtifactErrorKind) -> Self {
        Self { kind, reason: None }
    }

    #[inline]
    fn with_reason<S: Into<String>>(self, reason: S) -> Self {
        Self {
            kind: self.kind,
            reason: Some(reason.into()),
        }
    }

    /// Returns the kind of this error.
    #[inline]
    pub fn kind(&self) -> ArtifactErrorKind {
        self.kind
    }

    /// Returns the reason for the error.
    #[inline]
    pub fn reason(&self) -> Cow<'_, str> {
        match self.reason.as_deref() {
            Some(reason) => Cow::Borrowed(reason),
            None => Cow::Owned(format!("{}", self.kind)),
        }
    }
}

impl Display for ArtifactError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            Some(reason) => write!(f, "{}: {}", self.kind, reason),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl Error for ArtifactError {}

/// A text report selected by the user for analysis.
///
/// An `Artifact` can only be built from a `.txt` file whose content is valid
/// UTF-8, so anything holding one can forward it to the diagnosis service
/// without further checks.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Artifact {
    file_name: String,
    content: Bytes,
}

impl Artifact {
    /// Creates an artifact from a file name and its raw content.
    pub fn new<S, B>(file_name: S, content: B) -> Result<Self, ArtifactError>
    where
        S: Into<String>,
        B: Into<Bytes>,
    {
        let file_name = file_name.into();
        let has_text_extension = Path::new(&file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(ARTIFACT_EXTENSION));
        if !has_text_extension {
            return Err(ArtifactError::new(
                ArtifactErrorKind::UnsupportedFormat,
            )
            .with_reason(format!("`{file_name}` is not a .txt file")));
        }

        let content = content.into();
        if let Err(err) = std::str::from_utf8(&content) {
            return Err(ArtifactError::new(ArtifactErrorKind::InvalidEncoding)
                .with_reason(format!("`{file_name}`: {err}")));
        }

        Ok(Self { file_name, content })
    }

    /// Reads and validates an artifact from the local file system.
    pub async fn read_from<P: AsRef<Path>>(
        path: P,
    ) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            return Err(ArtifactError::new(ArtifactErrorKind::Unreadable)
                .with_reason(format!("`{}` has no file name", path.display())));
        };
        let content = tokio::fs::read(path).await.map_err(|err| {
            ArtifactError::new(ArtifactErrorKind::Unreadable)
                .with_reason(format!("`{}`: {err}", path.display()))
        })?;
        Self::new(file_name, content)
    }

    /// Returns the file name of this artifact, without any directory.
    #[inline]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Returns the raw content of this artifact.
    #[inline]
    pub fn content(&self) -> &Bytes {
        &self.content
    }

    /// Returns the content as text.
    #[inline]
    pub fn text(&self) -> &str {
        // Validated in `new`.
        std::str::from_utf8(&self.content).unwrap_or_default()
    }

    /// Returns the media type this artifact is uploaded with.
    #[inline]
    pub fn mime(&self) -> Mime {
        mime::TEXT_PLAIN_UTF_8
    }
}
