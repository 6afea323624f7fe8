//! Line commands read from stdin.
//!
//! One command per line, case-insensitive, surrounding whitespace ignored.
//! `buy` takes the upgrade id as its only argument.

use core::fmt;

/// A player or operator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Perform the primary action once.
    Tap,
    /// Open the upgrade menu.
    Menu,
    /// Buy one level of the named upgrade.
    Buy(String),
    /// Print the progression state.
    Status,
    /// Resume the frame loop.
    Start,
    /// Pause the frame loop.
    Stop,
    /// Save now.
    Save,
    /// Delete the save and start over.
    Reset,
    /// List commands.
    Help,
    /// Save and exit.
    Quit,
}

/// A line that is not a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The line was blank.
    #[error("empty command")]
    Empty,

    /// The first word is not a known command.
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),

    /// A command was given the wrong number of arguments.
    #[error("usage: {usage}")]
    Usage {
        /// Expected form of the command.
        usage: &'static str,
    },
}

/// Usage lines printed by `help`.
pub const HELP: &[(&str, &str)] = &[
    ("tap", "perform the primary action (alias: t)"),
    ("menu", "show upgrades (alias: m)"),
    ("buy <id>", "buy one level of an upgrade (alias: b)"),
    ("status", "show progress (alias: s)"),
    ("start | stop", "resume or pause the frame loop"),
    ("save", "save now"),
    ("reset", "delete the save and start over"),
    ("quit", "save and exit (alias: q)"),
];

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] for blank lines, unknown words, or a wrong
    /// argument count.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };
        let head = head.to_ascii_lowercase();
        let arg = words.next();
        let extra = words.next().is_some();

        let simple = |command: Self, usage: &'static str| {
            if arg.is_some() {
                Err(ParseError::Usage { usage })
            } else {
                Ok(command)
            }
        };

        match head.as_str() {
            "tap" | "t" => simple(Self::Tap, "tap"),
            "menu" | "m" | "upgrades" => simple(Self::Menu, "menu"),
            "buy" | "b" => match arg {
                Some(id) if !extra => Ok(Self::Buy(id.to_owned())),
                _ => Err(ParseError::Usage { usage: "buy <id>" }),
            },
            "status" | "s" => simple(Self::Status, "status"),
            "start" => simple(Self::Start, "start"),
            "stop" => simple(Self::Stop, "stop"),
            "save" => simple(Self::Save, "save"),
            "reset" => simple(Self::Reset, "reset"),
            "help" | "h" | "?" => simple(Self::Help, "help"),
            "quit" | "q" | "exit" => simple(Self::Quit, "quit"),
            _ => Err(ParseError::Unknown(head)),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tap => write!(f, "tap"),
            Self::Menu => write!(f, "menu"),
            Self::Buy(id) => write!(f, "buy {id}"),
            Self::Status => write!(f, "status"),
            Self::Start => write!(f, "start"),
            Self::Stop => write!(f, "stop"),
            Self::Save => write!(f, "save"),
            Self::Reset => write!(f, "reset"),
            Self::Help => write!(f, "help"),
            Self::Quit => write!(f, "quit"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_commands_and_aliases() {
        assert_eq!(Command::parse("tap"), Ok(Command::Tap));
        assert_eq!(Command::parse("  T  "), Ok(Command::Tap));
        assert_eq!(Command::parse("menu"), Ok(Command::Menu));
        assert_eq!(Command::parse("status"), Ok(Command::Status));
        assert_eq!(Command::parse("q"), Ok(Command::Quit));
        assert_eq!(Command::parse("STOP"), Ok(Command::Stop));
    }

    #[test]
    fn buy_keeps_id_case() {
        assert_eq!(
            Command::parse("buy scale_infra"),
            Ok(Command::Buy("scale_infra".to_owned()))
        );
        assert_eq!(
            Command::parse("B Boost_CPU"),
            Ok(Command::Buy("Boost_CPU".to_owned()))
        );
    }

    #[test]
    fn buy_requires_exactly_one_id() {
        assert_eq!(
            Command::parse("buy"),
            Err(ParseError::Usage { usage: "buy <id>" })
        );
        assert_eq!(
            Command::parse("buy a b"),
            Err(ParseError::Usage { usage: "buy <id>" })
        );
    }

    #[test]
    fn rejects_blank_unknown_and_extra_args() {
        assert_eq!(Command::parse("   "), Err(ParseError::Empty));
        assert_eq!(
            Command::parse("dance"),
            Err(ParseError::Unknown("dance".to_owned()))
        );
        assert_eq!(
            Command::parse("tap now"),
            Err(ParseError::Usage { usage: "tap" })
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        let command = Command::Buy("add_threads".to_owned());
        assert_eq!(Command::parse(&command.to_string()), Ok(command));
    }
}
