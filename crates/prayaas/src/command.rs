use std::path::PathBuf;

/// A line typed at the prompt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Plain text for the assistant.
    Chat(String),
    Upload(PathBuf),
    Download,
    Diagnosis,
    Help,
    Quit,
    /// A slash command we don't know, or one missing its argument.
    Invalid(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim_end_matches(['\r', '\n']);
        let Some(rest) = line.trim_start().strip_prefix('/') else {
            return Command::Chat(line.to_owned());
        };

        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match (name, arg) {
            ("upload", "") => {
                Command::Invalid("usage: /upload <path to .txt report>".into())
            }
            ("upload", path) => Command::Upload(PathBuf::from(path)),
            ("download", _) => Command::Download,
            ("diagnosis", _) => Command::Diagnosis,
            ("help", _) => Command::Help,
            ("quit" | "exit", _) => Command::Quit,
            _ => Command::Invalid(format!("unknown command: /{name}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_chat() {
        assert_eq!(
            Command::parse("I feel dizzy\n"),
            Command::Chat("I feel dizzy".to_owned())
        );
        // Blank lines still go to the session, which ignores them.
        assert_eq!(Command::parse("   \n"), Command::Chat("   ".to_owned()));
    }

    #[test]
    fn test_slash_commands() {
        assert_eq!(
            Command::parse("/upload  ~/reports/blood test.txt \n"),
            Command::Upload(PathBuf::from("~/reports/blood test.txt"))
        );
        assert_eq!(Command::parse("/download"), Command::Download);
        assert_eq!(Command::parse(" /diagnosis"), Command::Diagnosis);
        assert_eq!(Command::parse("/exit"), Command::Quit);
        assert_eq!(Command::parse("/help\r\n"), Command::Help);
    }

    #[test]
    fn test_invalid_commands() {
        assert!(matches!(Command::parse("/upload"), Command::Invalid(_)));
        assert_eq!(
            Command::parse("/reset now"),
            Command::Invalid("unknown command: /reset".to_owned())
        );
    }
}
