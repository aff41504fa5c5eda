//! Slash command parsing for the chat application.
//!
//! Input that starts with `/` controls the session instead of being sent to
//! the server.

use crate::types::SessionId;

/// A parsed chat command.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Join a session.  The text is interpreted the same way as the join box,
    /// so anything that is not a positive integer starts a new session.
    Join(String),

    /// Start a new session.
    Reset,

    /// List the sessions known to the server.
    Sessions,

    /// Show the server's history for a session.
    /// `None` means the current session.
    History(Option<SessionId>),

    /// Show the current session and transcript size.
    Status,

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a command,
/// or `None` if it should be sent as a message.
///
/// # Examples
///
/// ```
/// # use chapka::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/join 5").is_some());
/// assert!(parse_command("Hello there").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "join" => ChatCommand::Join(argument.unwrap_or_default().to_string()),
        "reset" | "new" => ChatCommand::Reset,
        "sessions" => ChatCommand::Sessions,
        "history" => match argument {
            None => ChatCommand::History(None),
            Some(arg) => match arg.parse::<u64>() {
                Ok(id) if id > 0 => ChatCommand::History(Some(SessionId::new(id))),
                _ => ChatCommand::Invalid("/history expects a positive session id".to_string()),
            },
        },
        "status" | "stats" => ChatCommand::Status,
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /join <id>             Continue an existing session (no id starts a new one)
  /reset                 Start a new session
  /sessions              List sessions known to the server
  /history [id]          Show the server's history for a session
  /status                Show the current session
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_join() {
        assert_eq!(
            parse_command("/join 5"),
            Some(ChatCommand::Join("5".to_string()))
        );
        assert_eq!(
            parse_command("/JOIN   abc  "),
            Some(ChatCommand::Join("abc".to_string()))
        );
        assert_eq!(parse_command("/join"), Some(ChatCommand::Join(String::new())));
    }

    #[test]
    fn parse_reset() {
        assert_eq!(parse_command("/reset"), Some(ChatCommand::Reset));
        assert_eq!(parse_command("/new"), Some(ChatCommand::Reset));
    }

    #[test]
    fn parse_history() {
        assert_eq!(parse_command("/history"), Some(ChatCommand::History(None)));
        assert_eq!(
            parse_command("/history 12"),
            Some(ChatCommand::History(Some(SessionId::new(12))))
        );
        assert!(matches!(
            parse_command("/history 0"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("positive")
        ));
        assert!(matches!(
            parse_command("/history abc"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn parse_listing_and_status() {
        assert_eq!(parse_command("/sessions"), Some(ChatCommand::Sessions));
        assert_eq!(parse_command("/status"), Some(ChatCommand::Status));
        assert_eq!(parse_command("/help"), Some(ChatCommand::Help));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/model llama"),
            Some(ChatCommand::Invalid("Unknown command: /model".to_string()))
        );
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello there"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/join"));
        assert!(help.contains("/reset"));
        assert!(help.contains("/quit"));
    }
}
