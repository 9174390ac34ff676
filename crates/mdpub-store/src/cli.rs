//! Line commands read by the `mdpub` binary
//!
//! A line starting with `{` is a wire action. Lines starting with `:` are
//! commands:
//!
//! - `:state [slice]` prints the state tree or one slice as JSON
//! - `:ls <path>` runs the listing thunk (a last segment with a `.` is a file)
//! - `:log [keyword]` prints console log entries, optionally filtered
//! - `:stats` prints devtools timing stats
//! - `:flush` writes pending persisted state
//! - `:help`, `:quit`

use thiserror::Error;

use crate::actions::{Action, ActionParseError};
use crate::state::{LogFilter, SliceName};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dispatch(Action),
    State(Option<SliceName>),
    List { pathname: String, is_directory: bool },
    Log(Option<String>),
    Stats,
    Flush,
    Help,
    Quit,
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unknown command ':{0}', try :help")]
    UnknownCommand(String),

    #[error(":{0} needs an argument")]
    MissingArgument(&'static str),

    #[error("unknown slice '{0}'")]
    UnknownSlice(String),

    #[error(transparent)]
    Action(#[from] ActionParseError),
}

pub const HELP: &str = "\
{\"type\": \"<slice>/<verb>\", \"payload\": {...}}  dispatch an action
:state [slice]   print the state tree or one slice
:ls <path>       list a directory, or the directory of a file
:log [keyword]   print console log entries
:stats           print devtools stats
:flush           write pending persisted state
:quit            flush and exit";

/// Parse one input line; blank lines yield `None`
pub fn parse_command(line: &str) -> Result<Option<Command>, CliError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    if line.starts_with('{') {
        return Ok(Some(Command::Dispatch(Action::from_json(line)?)));
    }

    let Some(rest) = line.strip_prefix(':') else {
        return Err(CliError::UnknownCommand(line.to_string()));
    };
    let (name, argument) = match rest.split_once(char::is_whitespace) {
        Some((name, argument)) => (name, Some(argument.trim()).filter(|a| !a.is_empty())),
        None => (rest, None),
    };

    let command = match name {
        "state" => Command::State(
            argument
                .map(|slice| {
                    slice
                        .parse::<SliceName>()
                        .map_err(|_| CliError::UnknownSlice(slice.to_string()))
                })
                .transpose()?,
        ),
        "ls" => {
            let pathname = argument.ok_or(CliError::MissingArgument("ls"))?;
            Command::List {
                pathname: pathname.to_string(),
                is_directory: !looks_like_file(pathname),
            }
        }
        "log" => Command::Log(argument.map(str::to_string)),
        "stats" => Command::Stats,
        "flush" => Command::Flush,
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        other => return Err(CliError::UnknownCommand(other.to_string())),
    };
    Ok(Some(command))
}

fn looks_like_file(pathname: &str) -> bool {
    if pathname.ends_with('/') {
        return false;
    }
    let segment = pathname.rsplit('/').next().unwrap_or(pathname);
    segment.contains('.') && segment != "." && segment != ".."
}

/// Filter for `:log`: the committed filter, with `keyword` added to its
/// include list when given
pub fn log_filter(committed: &LogFilter, keyword: Option<String>) -> LogFilter {
    let mut filter = committed.clone();
    filter.include.extend(keyword);
    filter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::UiAction;

    #[test]
    fn test_blank_line_is_ignored() {
        assert!(parse_command("   ").unwrap().is_none());
    }

    #[test]
    fn test_wire_action() {
        let command = parse_command(r#"{"type":"ui/toggleSidebar"}"#).unwrap();
        assert_eq!(
            command,
            Some(Command::Dispatch(Action::Ui(UiAction::ToggleSidebar)))
        );
    }

    #[test]
    fn test_state_command() {
        assert_eq!(
            parse_command(":state").unwrap(),
            Some(Command::State(None))
        );
        assert_eq!(
            parse_command(":state  publish ").unwrap(),
            Some(Command::State(Some(SliceName::Publish)))
        );
        assert!(matches!(
            parse_command(":state sidebar"),
            Err(CliError::UnknownSlice(_))
        ));
    }

    #[test]
    fn test_ls_detects_files() {
        assert_eq!(
            parse_command(":ls /a/b/file.md").unwrap(),
            Some(Command::List {
                pathname: "/a/b/file.md".to_string(),
                is_directory: false,
            })
        );
        assert_eq!(
            parse_command(":ls /docs").unwrap(),
            Some(Command::List {
                pathname: "/docs".to_string(),
                is_directory: true,
            })
        );
        assert_eq!(
            parse_command(":ls /v1.2/").unwrap(),
            Some(Command::List {
                pathname: "/v1.2/".to_string(),
                is_directory: true,
            })
        );
        assert!(matches!(
            parse_command(":ls"),
            Err(CliError::MissingArgument("ls"))
        ));
    }

    #[test]
    fn test_log_quit_and_unknown() {
        assert_eq!(
            parse_command(":log publish").unwrap(),
            Some(Command::Log(Some("publish".to_string())))
        );
        assert_eq!(parse_command(":q").unwrap(), Some(Command::Quit));
        assert!(matches!(
            parse_command(":explode"),
            Err(CliError::UnknownCommand(_))
        ));
        assert!(matches!(
            parse_command("hello"),
            Err(CliError::UnknownCommand(_))
        ));
    }

    #[test]
    fn test_invalid_action_is_reported() {
        assert!(matches!(
            parse_command(r#"{"type":"ui/setTheme","payload":{"theme":"neon"}}"#),
            Err(CliError::Action(_))
        ));
    }

    #[test]
    fn test_log_filter_keeps_committed_include() {
        let committed = LogFilter {
            include: vec!["publish".to_string()],
            exclude: vec!["retry".to_string()],
            ..LogFilter::default()
        };

        let filter = log_filter(&committed, None);
        assert_eq!(filter, committed);

        let filter = log_filter(&committed, Some("upload".to_string()));
        assert_eq!(filter.include, vec!["publish", "upload"]);
        assert_eq!(filter.exclude, vec!["retry"]);
    }
}
