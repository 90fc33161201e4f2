//! Slash command parsing for the chat loop.

use console::style;

#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    Help,
    Clear,
    Exit,
    /// Start over with a fresh greeting.
    New,
    /// Show the transcript so far.
    History,
    /// Switch answer language.
    Language(String),
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    let mut parts = trimmed.splitn(2, ' ');
    let cmd = parts.next().unwrap_or_default().to_lowercase();
    let arg = parts.next().map(str::trim).filter(|s| !s.is_empty());

    match cmd.as_str() {
        "/help" | "/h" | "/?" => Some(ChatCommand::Help),
        "/clear" | "/cls" => Some(ChatCommand::Clear),
        "/exit" | "/quit" | "/q" => Some(ChatCommand::Exit),
        "/new" => Some(ChatCommand::New),
        "/history" => Some(ChatCommand::History),
        "/lang" | "/language" => match arg {
            Some(tag) => Some(ChatCommand::Language(tag.to_string())),
            None => Some(ChatCommand::Unknown("/lang requires a tag (en, ja)".to_string())),
        },
        other => Some(ChatCommand::Unknown(other.to_string())),
    }
}

/// A bare number picks the matching example prompt, counting from 1.
pub fn pick_suggestion(input: &str, suggestions: &[String]) -> Option<String> {
    let n: usize = input.trim().parse().ok()?;
    suggestions.get(n.checked_sub(1)?).cloned()
}

pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!("  {}       {}", style("/help").cyan(), "Show this help message");
    println!("  {}      {}", style("/clear").cyan(), "Clear the screen");
    println!("  {}        {}", style("/new").cyan(), "Start over");
    println!("  {}    {}", style("/history").cyan(), "Show the conversation");
    println!("  {} {}", style("/lang <tag>").cyan(), "Answer in another language");
    println!("  {}       {}", style("/exit").cyan(), "End the chat");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_commands() {
        assert_eq!(parse("/help"), Some(ChatCommand::Help));
        assert_eq!(parse("/Q"), Some(ChatCommand::Exit));
        assert_eq!(parse(" /history "), Some(ChatCommand::History));
        assert_eq!(parse("/new"), Some(ChatCommand::New));
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(parse("/lang ja"), Some(ChatCommand::Language("ja".to_string())));
        assert!(matches!(parse("/lang"), Some(ChatCommand::Unknown(_))));
    }

    #[test]
    fn test_parse_not_command() {
        assert_eq!(parse("Any soup today?"), None);
    }

    #[test]
    fn test_pick_suggestion() {
        let suggestions = vec!["First?".to_string(), "Second?".to_string()];
        assert_eq!(pick_suggestion("2", &suggestions), Some("Second?".to_string()));
        assert_eq!(pick_suggestion("0", &suggestions), None);
        assert_eq!(pick_suggestion("3", &suggestions), None);
        assert_eq!(pick_suggestion("soup", &suggestions), None);
        assert_eq!(pick_suggestion("1", &[]), None);
    }
}
