//! Command router - studio command vocabulary behind the command source

use tracing::debug;

/// A recognized studio command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudioCommand {
    /// Start streaming everywhere
    StartStream,
    /// Stop streaming everywhere
    StopStream,
    /// Fetch and show stream status
    Status,
    /// Collect an analytics round
    Analytics,
    /// Run a moderation round
    Moderate,
    /// Generate and publish a highlight reel
    Highlights,
    /// End the session
    Quit,
}

/// Maps raw command strings to studio commands.
///
/// Matching is case-insensitive and whitespace-tolerant; anything outside
/// the vocabulary is rejected rather than guessed at.
#[derive(Debug, Default)]
pub struct CommandRouter;

impl CommandRouter {
    pub fn new() -> Self {
        Self
    }

    /// Parse one raw command line
    pub fn parse(&self, input: &str) -> Option<StudioCommand> {
        let normalized = input.trim().to_lowercase();
        let command = match normalized.as_str() {
            "start stream" | "go live" => StudioCommand::StartStream,
            "stop stream" | "end stream" => StudioCommand::StopStream,
            "status" | "stream status" => StudioCommand::Status,
            "analytics" | "show analytics" => StudioCommand::Analytics,
            "moderate" | "run moderation" => StudioCommand::Moderate,
            "highlights" | "highlight reel" => StudioCommand::Highlights,
            "quit" | "exit" => StudioCommand::Quit,
            _ => {
                debug!(input = %normalized, "Unrecognized command");
                return None;
            }
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_vocabulary() {
        let router = CommandRouter::new();
        assert_eq!(router.parse("start stream"), Some(StudioCommand::StartStream));
        assert_eq!(router.parse("end stream"), Some(StudioCommand::StopStream));
        assert_eq!(router.parse("status"), Some(StudioCommand::Status));
        assert_eq!(router.parse("analytics"), Some(StudioCommand::Analytics));
        assert_eq!(router.parse("moderate"), Some(StudioCommand::Moderate));
        assert_eq!(router.parse("highlight reel"), Some(StudioCommand::Highlights));
        assert_eq!(router.parse("quit"), Some(StudioCommand::Quit));
    }

    #[test]
    fn test_matching_is_forgiving_about_case_and_whitespace() {
        let router = CommandRouter::new();
        assert_eq!(router.parse("  Start Stream  "), Some(StudioCommand::StartStream));
        assert_eq!(router.parse("EXIT"), Some(StudioCommand::Quit));
    }

    #[test]
    fn test_unknown_commands_are_rejected() {
        let router = CommandRouter::new();
        assert_eq!(router.parse("make me a sandwich"), None);
        assert_eq!(router.parse(""), None);
    }
}
