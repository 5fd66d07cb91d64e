//! Terminal command parsing.

use super::UiAction;
use crate::models::SearchMode;

/// Help shown by the `help` command
pub const HELP_TEXT: &str = "\
Commands:
  search [title|author|isbn] <query>   search the catalog (alias: s, default mode: title)
  filter <on|off>                      show only e-books (alias: f)
  sort                                 order the list by rating, highest first (alias: r)
  open <n>                             show details for book n (alias: o)
  back                                 return to the list (alias: b)
  help                                 show this help (alias: h, ?)
  quit                                 exit (alias: q, exit)";

/// A parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(UiAction),
    Help,
    Quit,
}

/// Errors for lines that are not valid commands
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("Unknown command: {0} (type 'help' for a list)")]
    Unknown(String),

    #[error("Expected 'on' or 'off', got: {0}")]
    InvalidToggle(String),

    #[error("Expected a book number starting at 1, got: {0}")]
    InvalidPosition(String),

    #[error("Empty input")]
    Empty,
}

/// Parse one line of user input.
///
/// A `search` with no text parses fine; blank queries are rejected later,
/// without a network call.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::Empty),
        "search" | "s" => Ok(Command::Action(parse_search(rest))),
        "filter" | "f" => match rest.to_ascii_lowercase().as_str() {
            "on" | "true" | "yes" | "1" => Ok(Command::Action(UiAction::ToggleEbookFilter(true))),
            "off" | "false" | "no" | "0" => {
                Ok(Command::Action(UiAction::ToggleEbookFilter(false)))
            }
            _ => Err(CommandError::InvalidToggle(rest.to_string())),
        },
        "sort" | "r" => Ok(Command::Action(UiAction::SortByRating)),
        "open" | "o" => match rest.parse::<usize>() {
            Ok(n) if n >= 1 => Ok(Command::Action(UiAction::SelectItem(n - 1))),
            _ => Err(CommandError::InvalidPosition(rest.to_string())),
        },
        "back" | "b" => Ok(Command::Action(UiAction::BackToList)),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

fn parse_search(rest: &str) -> UiAction {
    let (first, tail) = match rest.split_once(char::is_whitespace) {
        Some((first, tail)) => (first, tail),
        None => (rest, ""),
    };

    match first.parse::<SearchMode>() {
        Ok(mode) => UiAction::SubmitSearch {
            query: tail.trim().to_string(),
            mode,
        },
        Err(_) => UiAction::SubmitSearch {
            query: rest.to_string(),
            mode: SearchMode::Title,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search(query: &str, mode: SearchMode) -> Command {
        Command::Action(UiAction::SubmitSearch {
            query: query.to_string(),
            mode,
        })
    }

    #[test]
    fn test_parse_search_modes() {
        assert_eq!(
            parse_command("search author Ursula K. Le Guin").unwrap(),
            search("Ursula K. Le Guin", SearchMode::Author)
        );
        assert_eq!(
            parse_command("s isbn 9780441013593").unwrap(),
            search("9780441013593", SearchMode::Isbn)
        );
        assert_eq!(
            parse_command("search The Left Hand of Darkness").unwrap(),
            search("The Left Hand of Darkness", SearchMode::Title)
        );
    }

    #[test]
    fn test_parse_search_without_text() {
        assert_eq!(parse_command("search").unwrap(), search("", SearchMode::Title));
        assert_eq!(
            parse_command("search title   ").unwrap(),
            search("", SearchMode::Title)
        );
    }

    #[test]
    fn test_parse_filter() {
        assert_eq!(
            parse_command("filter on").unwrap(),
            Command::Action(UiAction::ToggleEbookFilter(true))
        );
        assert_eq!(
            parse_command("F OFF").unwrap(),
            Command::Action(UiAction::ToggleEbookFilter(false))
        );
        assert!(matches!(
            parse_command("filter maybe"),
            Err(CommandError::InvalidToggle(_))
        ));
    }

    #[test]
    fn test_parse_open_is_one_based() {
        assert_eq!(
            parse_command("open 1").unwrap(),
            Command::Action(UiAction::SelectItem(0))
        );
        assert!(matches!(
            parse_command("open 0"),
            Err(CommandError::InvalidPosition(_))
        ));
        assert!(matches!(
            parse_command("o x"),
            Err(CommandError::InvalidPosition(_))
        ));
    }

    #[test]
    fn test_parse_misc() {
        assert_eq!(
            parse_command("sort").unwrap(),
            Command::Action(UiAction::SortByRating)
        );
        assert_eq!(
            parse_command(" back ").unwrap(),
            Command::Action(UiAction::BackToList)
        );
        assert_eq!(parse_command("?").unwrap(), Command::Help);
        assert_eq!(parse_command("exit").unwrap(), Command::Quit);
        assert_eq!(parse_command("   "), Err(CommandError::Empty));
        assert!(matches!(
            parse_command("delete 3"),
            Err(CommandError::Unknown(w)) if w == "delete"
        ));
    }
}
