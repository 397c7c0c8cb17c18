//! Input line parsing.

use thiserror::Error;

use chart_viewer_assistant::{ModelMode, UnknownModelMode};
use chart_viewer_core::Route;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0} (type `help`)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("Not a message number: {0}")]
    InvalidNumber(String),

    #[error(transparent)]
    Mode(#[from] UnknownModelMode),
}

/// Where `go` should take the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// 1-based position in the dropdown menu.
    Menu(usize),
    Path(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Identifier typed on the login screen, already trimmed.
    Login(String),
    Show,
    Menu,
    Go(Target),
    Home,
    Logout,
    Ask(String),
    Mode(ModelMode),
    /// 1-based message number whose reasoning to toggle.
    Think(usize),
    Chat,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  show              redraw the current screen
  menu              list the dropdown menu
  go <n|path>       open menu item n, or a path such as /labs
  home              patient information
  logout            clear the patient and return to login
  ask <question>    ask the assistant (patient information screen)
  mode <name>       fast, reasoning or goldilocks
  think <n>         show or hide the reasoning of message n
  chat              show the conversation
  quit              exit";

/// Parse one input line for the current screen.
///
/// Blank lines yield `None`. On the login screen anything that is not
/// `help` or `quit` is taken as a patient identifier.
pub fn parse(line: &str, route: Route) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    if route == Route::Login {
        return Ok(Some(match word {
            "quit" | "exit" if rest.is_empty() => Command::Quit,
            "help" if rest.is_empty() => Command::Help,
            _ => Command::Login(line.to_string()),
        }));
    }

    let command = match word {
        "show" => Command::Show,
        "menu" => Command::Menu,
        "home" => Command::Home,
        "logout" => Command::Logout,
        "chat" => Command::Chat,
        "help" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "go" => Command::Go(parse_target(rest)?),
        "ask" => Command::Ask(rest.to_string()),
        "mode" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument("mode"));
            }
            Command::Mode(rest.parse()?)
        }
        "think" => Command::Think(parse_number(rest, "think")?),
        other if other.starts_with('/') => Command::Go(Target::Path(other.to_string())),
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn parse_target(arg: &str) -> Result<Target, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument("go"));
    }
    if arg.starts_with('/') {
        return Ok(Target::Path(arg.to_string()));
    }
    parse_number(arg, "go").map(Target::Menu)
}

fn parse_number(arg: &str, command: &'static str) -> Result<usize, CommandError> {
    if arg.is_empty() {
        return Err(CommandError::MissingArgument(command));
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidNumber(arg.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_screen_takes_identifier() {
        assert_eq!(
            parse("  P100 \n", Route::Login),
            Ok(Some(Command::Login("P100".into())))
        );
        assert_eq!(parse("quit", Route::Login), Ok(Some(Command::Quit)));
        assert_eq!(parse("   ", Route::Login), Ok(None));
        // Only exact keywords are commands on the login screen.
        assert_eq!(
            parse("menu", Route::Login),
            Ok(Some(Command::Login("menu".into())))
        );
    }

    #[test]
    fn test_patient_screen_commands() {
        let route = Route::PatientData;
        assert_eq!(parse("go 2", route), Ok(Some(Command::Go(Target::Menu(2)))));
        assert_eq!(
            parse("go /labs", route),
            Ok(Some(Command::Go(Target::Path("/labs".into()))))
        );
        assert_eq!(
            parse("/orders", route),
            Ok(Some(Command::Go(Target::Path("/orders".into()))))
        );
        assert_eq!(
            parse("ask  what meds? ", route),
            Ok(Some(Command::Ask("what meds?".into())))
        );
        assert_eq!(
            parse("mode goldilocks", route),
            Ok(Some(Command::Mode(ModelMode::Goldilocks)))
        );
        assert_eq!(parse("think 3", route), Ok(Some(Command::Think(3))));
    }

    #[test]
    fn test_errors() {
        let route = Route::Labs;
        assert_eq!(parse("dance", route), Err(CommandError::Unknown("dance".into())));
        assert_eq!(parse("go", route), Err(CommandError::MissingArgument("go")));
        assert_eq!(
            parse("think x", route),
            Err(CommandError::InvalidNumber("x".into()))
        );
        assert!(matches!(parse("mode slow", route), Err(CommandError::Mode(_))));
    }
}
