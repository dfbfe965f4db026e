//! Command parser for the : command system

use crate::router::Tab;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Navigation
    Tab(Tab),

    // Collection queries
    Search(Option<String>),
    Category(Option<String>),
    Refresh,

    // Session
    Logout,

    // App
    Help,
    Quit,

    // Unknown command
    Unknown(String),
}

/// Parse a command string (without the leading :)
pub fn parse_command(input: &str) -> Command {
    let input = input.trim();
    let mut parts = input.splitn(2, ' ');
    let cmd = parts.next().unwrap_or("");
    let args = parts
        .next()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    if let Some(tab) = Tab::from_name(cmd) {
        return Command::Tab(tab);
    }

    match cmd.to_lowercase().as_str() {
        "search" | "find" | "/" => Command::Search(args),
        "category" | "cat" => Command::Category(args),
        "refresh" | "reload" | "r" => Command::Refresh,
        "logout" => Command::Logout,
        "help" | "h" | "?" => Command::Help,
        "quit" | "q" | "exit" => Command::Quit,
        _ => Command::Unknown(input.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(parse_command("products"), Command::Tab(Tab::Products));
        assert_eq!(parse_command("txs"), Command::Tab(Tab::Transactions));
        assert_eq!(parse_command("  Users "), Command::Tab(Tab::Users));
    }

    #[test]
    fn test_parse_query_commands() {
        assert_eq!(parse_command("search"), Command::Search(None));
        assert_eq!(parse_command("search   "), Command::Search(None));
        assert_eq!(
            parse_command("search red widget"),
            Command::Search(Some("red widget".to_string()))
        );
        assert_eq!(
            parse_command("cat Tools"),
            Command::Category(Some("Tools".to_string()))
        );
        assert_eq!(parse_command("refresh"), Command::Refresh);
    }

    #[test]
    fn test_parse_app_commands() {
        assert_eq!(parse_command("logout"), Command::Logout);
        assert_eq!(parse_command("help"), Command::Help);
        assert_eq!(parse_command("q"), Command::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert_eq!(
            parse_command("notacommand"),
            Command::Unknown("notacommand".to_string())
        );
    }
}
