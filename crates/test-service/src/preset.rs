use prayaas_service::ErrorKind;
use serde::{Deserialize, Serialize};

/// How a scripted call should fail.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetFailure {
    /// The service is unreachable.
    Transport,
    /// The service answers with a non-success status.
    Status,
    /// The service answers with a malformed body.
    Protocol,
}

impl From<PresetFailure> for ErrorKind {
    #[inline]
    fn from(failure: PresetFailure) -> Self {
        match failure {
            PresetFailure::Transport => ErrorKind::Transport,
            PresetFailure::Status => ErrorKind::Status,
            PresetFailure::Protocol => ErrorKind::Protocol,
        }
    }
}

/// The scripted outcome of one call.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Preset<T> {
    /// The call succeeds with the given value.
    #[serde(rename = "ok")]
    Ok(T),
    /// The call fails.
    #[serde(rename = "failure")]
    Failure(PresetFailure),
    /// The call never settles.
    #[serde(rename = "hang")]
    Hang,
}

/// A scripted assistant reply.
pub type PresetReply = Preset<String>;

/// A scripted diagnosis result.
pub type PresetDiagnosis = Preset<String>;

/// A scripted report document.
pub type PresetReport = Preset<Vec<u8>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_deserialize() {
        let script: Vec<PresetReply> = vec![
            Preset::Ok("hi there".to_owned()),
            Preset::Failure(PresetFailure::Transport),
            Preset::Hang,
        ];

        let serialized = serde_json::to_string(&script).unwrap();
        let deserialized: Vec<PresetReply> =
            serde_json::from_str(&serialized).unwrap();

        assert_eq!(script, deserialized);
    }

    #[test]
    fn test_failure_kinds() {
        assert_eq!(ErrorKind::from(PresetFailure::Status), ErrorKind::Status);
        let failure: PresetFailure =
            serde_json::from_str(r#""protocol""#).unwrap();
        assert_eq!(failure, PresetFailure::Protocol);
    }
}
