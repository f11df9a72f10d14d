//! Parsing of interactive commands.

use learnlens_viewer::ProficiencyLevel;
use thiserror::Error;

/// Help text printed by the `help` command.
pub const HELP: &str = "\
Commands:
  generate [LEVEL] TOPIC...  Generate a learning path (LEVEL: beginner, intermediate, expert)
  open N                     Open module N (1-based)
  next                       Open the next module
  answer N|LETTER            Answer the quiz (e.g. `answer 2` or `answer b`)
  restart                    Discard the path and start over
  show                       Print the current screen again
  json                       Print the current screen as JSON
  help                       Show this help
  quit                       Exit";

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Generate a path for `topic`, at `level` or the configured default.
    Generate {
        /// Level given on the command line, if any.
        level: Option<ProficiencyLevel>,
        /// Topic words joined by single spaces.
        topic: String,
    },
    /// Open the module at this 0-based index.
    Open(usize),
    /// Advance to the next module.
    Next,
    /// Answer with the option at this 0-based index.
    Answer(usize),
    /// Start over.
    Restart,
    /// Re-render the current view.
    Show,
    /// Print the current view as JSON.
    Json,
    /// Print help.
    Help,
    /// Exit.
    Quit,
}

/// Why a line could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The first word names no command.
    #[error("Unknown command '{0}'. Type `help` for the list of commands.")]
    Unknown(String),

    /// A required argument is missing.
    #[error("Usage: {0}")]
    MissingArgument(&'static str),

    /// An argument could not be understood.
    #[error("Invalid {what} '{value}'. Usage: {usage}")]
    InvalidArgument {
        /// What was expected.
        what: &'static str,
        /// What was given.
        value: String,
        /// Usage line of the command.
        usage: &'static str,
    },
}

const GENERATE_USAGE: &str = "generate [LEVEL] TOPIC...";
const OPEN_USAGE: &str = "open N";
const ANSWER_USAGE: &str = "answer N|LETTER";

impl Command {
    /// Parses one input line. Blank lines yield `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns a [`CommandError`] describing what is wrong with the line.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match name.to_ascii_lowercase().as_str() {
            "generate" | "gen" | "g" => Self::parse_generate(&args)?,
            "open" | "o" => Self::Open(parse_position(args.first(), "module number", OPEN_USAGE)?),
            "next" | "n" => Self::Next,
            "answer" | "a" => Self::Answer(parse_answer(args.first())?),
            "restart" => Self::Restart,
            "show" | "s" => Self::Show,
            "json" => Self::Json,
            "help" | "h" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(Some(command))
    }

    fn parse_generate(args: &[&str]) -> Result<Self, CommandError> {
        let (level, topic) = match args {
            [] => return Err(CommandError::MissingArgument(GENERATE_USAGE)),
            [first, rest @ ..] if !rest.is_empty() => match first.parse::<ProficiencyLevel>() {
                Ok(level) => (Some(level), rest),
                Err(_) => (None, args),
            },
            _ => (None, args),
        };
        Ok(Self::Generate {
            level,
            topic: topic.join(" "),
        })
    }
}

/// Parses a 1-based position into a 0-based index.
fn parse_position(
    arg: Option<&&str>,
    what: &'static str,
    usage: &'static str,
) -> Result<usize, CommandError> {
    let arg = arg.ok_or(CommandError::MissingArgument(usage))?;
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .ok_or_else(|| CommandError::InvalidArgument {
            what,
            value: (*arg).to_string(),
            usage,
        })
}

/// Parses `2` or `b` into option index 1.
fn parse_answer(arg: Option<&&str>) -> Result<usize, CommandError> {
    let Some(value) = arg else {
        return Err(CommandError::MissingArgument(ANSWER_USAGE));
    };
    let mut chars = value.chars();
    if let (Some(letter), None) = (chars.next(), chars.next()) {
        if letter.is_ascii_alphabetic() {
            let offset = letter.to_ascii_lowercase() as u32 - 'a' as u32;
            return Ok(offset as usize);
        }
    }
    parse_position(arg, "answer", ANSWER_USAGE)
}
