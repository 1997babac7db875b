//! Console commands standing in for the page's input events.
//!
//! A line starting with `/` is a command; any other line is the new content of the
//! symbol input. `//` escapes a literal leading slash.
use dashboard_common::{DashboardError, Result};

/// One user action read from stdin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Input change with the full new value.
    Input(String),
    /// Pick a suggestion, 0-based.
    Pick(usize),
    /// Search icon click.
    Search,
    /// Load a price directly.
    Price(String),
    /// Redraw now.
    Show,
    /// Stop and exit.
    Quit,
}

pub fn parse_command(line: &str) -> Result<Command> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(escaped) = line.strip_prefix("//") {
        return Ok(Command::Input(format!("/{}", escaped)));
    }
    let Some(command) = line.strip_prefix('/') else {
        return Ok(Command::Input(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let argument = parts.next();

    match (name, argument) {
        ("pick", Some(n)) => match n.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Command::Pick(n - 1)),
            _ => Err(DashboardError::Format(format!(
                "/pick expects a position starting at 1, got '{}'",
                n
            ))),
        },
        ("pick", None) => Err(DashboardError::Format("/pick expects a position".into())),
        ("go", _) => Ok(Command::Search),
        ("price", Some(symbol)) => Ok(Command::Price(symbol.to_string())),
        ("price", None) => Err(DashboardError::Format("/price expects a symbol".into())),
        ("show", _) => Ok(Command::Show),
        ("quit" | "exit", _) => Ok(Command::Quit),
        _ => Err(DashboardError::Format(format!("Unknown command '/{}'", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_input() {
        assert_eq!(parse_command("AAPL\n").unwrap(), Command::Input("AAPL".into()));
        assert_eq!(parse_command("").unwrap(), Command::Input(String::new()));
        assert_eq!(parse_command("  eur ").unwrap(), Command::Input("  eur ".into()));
    }

    #[test]
    fn commands() {
        assert_eq!(parse_command("/pick 2").unwrap(), Command::Pick(1));
        assert_eq!(parse_command("/go").unwrap(), Command::Search);
        assert_eq!(parse_command("/price DE30").unwrap(), Command::Price("DE30".into()));
        assert_eq!(parse_command("/show").unwrap(), Command::Show);
        assert_eq!(parse_command("/quit\r\n").unwrap(), Command::Quit);
    }

    #[test]
    fn escaped_slash_is_input() {
        assert_eq!(parse_command("//ES").unwrap(), Command::Input("/ES".into()));
    }

    #[test]
    fn invalid_commands_are_errors() {
        assert!(parse_command("/pick 0").is_err());
        assert!(parse_command("/pick two").is_err());
        assert!(parse_command("/price").is_err());
        assert!(parse_command("/dance").is_err());
    }
}
