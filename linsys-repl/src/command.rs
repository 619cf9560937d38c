use ariadne::Fmt;
use levenshtein::levenshtein;
use linsys_attrs::ErrorKind;
use linsys_error::{Error, ErrorKind, EXPR};
use std::ops::Range;

/// The names of every command, with their usage.
pub const COMMANDS: [(&str, &str, &str); 16] = [
    ("load", "load <equation>; <equation>", "start an exercise with the given system"),
    ("random", "random", "start an exercise with a random system"),
    ("show", "show", "show the current exercise"),
    ("add", "add <row> <row>", "add the second row to the first"),
    ("sub", "sub <row> <row>", "subtract the second row from the first"),
    ("mul", "mul <row> <factor>", "multiply a row by a factor"),
    ("div", "div <row> <factor>", "divide a row by a factor"),
    ("isolate", "isolate <line> <variable>", "isolate a variable in a line"),
    ("subst", "subst <from> <into>", "substitute the variable isolated in a line into another line"),
    ("equalize", "equalize <line> <line>", "equate two lines that isolate the same variable"),
    ("combine", "combine <line>", "combine the like terms of a line"),
    ("scale", "scale <line> <factor>", "multiply both sides of a line by a factor"),
    ("hint", "hint", "suggest a next step"),
    ("undo", "undo", "undo the last step"),
    ("redo", "redo", "redo the last undone step"),
    ("help", "help", "show this list"),
];

/// The command is not one of the known commands.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("unknown command `{}`", name),
    labels = ["this command"],
    help = if suggestions.is_empty() {
        format!("type {} to see the list of commands", "help".fg(EXPR))
    } else {
        let list = suggestions.iter()
            .map(|s| format!("`{}`", s.fg(EXPR)))
            .collect::<Vec<_>>()
            .join(", ");
        format!("did you mean {}?", list)
    },
)]
pub struct UnknownCommand {
    /// The name that was typed.
    pub name: String,

    /// Known commands with a similar name.
    pub suggestions: Vec<&'static str>,
}

/// A command is missing one of its arguments.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("missing {}", argument),
    labels = ["expected here"],
    help = format!("usage: {}", usage.fg(EXPR)),
)]
pub struct MissingArgument {
    /// A description of the missing argument.
    pub argument: &'static str,

    /// The usage of the command.
    pub usage: &'static str,
}

/// A command was given more arguments than it takes.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "too many arguments",
    labels = ["this argument is not used"],
    help = format!("usage: {}", usage.fg(EXPR)),
)]
pub struct UnexpectedArgument {
    /// The usage of the command.
    pub usage: &'static str,
}

/// A row or line number is not a positive integer.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a row or line number", text),
    labels = ["this number"],
    help = "rows and lines are numbered from 1",
)]
pub struct InvalidIndex {
    /// The text that was typed.
    pub text: String,
}

/// A piece of the input line, with its location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg {
    /// The text of the argument.
    pub text: String,

    /// The region of the input line that the argument was read from.
    pub span: Range<usize>,
}

impl Arg {
    fn new(text: &str, span: Range<usize>) -> Self {
        Self { text: text.to_string(), span }
    }
}

/// A zero-based row or line index, typed by the user as a one-based number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    /// The zero-based index.
    pub value: usize,

    /// The region of the input line that the index was read from.
    pub span: Range<usize>,
}

impl TryFrom<&Arg> for Index {
    type Error = Error;

    fn try_from(arg: &Arg) -> Result<Self, Self::Error> {
        match arg.text.parse::<usize>() {
            Ok(n) if n > 0 => Ok(Self { value: n - 1, span: arg.span.clone() }),
            _ => Err(Error::new(vec![arg.span.clone()], InvalidIndex { text: arg.text.clone() })),
        }
    }
}

/// A command typed by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(Arg),
    Random,
    Show,
    Add(Index, Index),
    Sub(Index, Index),
    Mul(Index, Arg),
    Div(Index, Arg),
    Isolate(Index, Arg),
    Subst(Index, Index),
    Equalize(Index, Index),
    Combine(Index),
    Scale(Index, Arg),
    Hint,
    Undo,
    Redo,
    Help,
}

/// Splits a line into its whitespace-separated words.
fn split_words(line: &str) -> Vec<Arg> {
    let mut words = Vec::new();
    let mut start = None;
    for (i, c) in line.char_indices() {
        match (c.is_whitespace(), start) {
            (true, Some(s)) => {
                words.push(Arg::new(&line[s..i], s..i));
                start = None;
            },
            (false, None) => start = Some(i),
            _ => {},
        }
    }
    if let Some(s) = start {
        words.push(Arg::new(&line[s..], s..line.len()));
    }
    words
}

/// Returns the known commands whose name is close to the given one.
pub fn suggestions(name: &str) -> Vec<&'static str> {
    COMMANDS.iter()
        .map(|(command, _, _)| *command)
        .filter(|command| levenshtein(command, name) <= 2)
        .collect()
}

/// Reads the arguments of one command.
struct Args<'a> {
    line: &'a str,
    words: Vec<Arg>,
    next: usize,
    usage: &'static str,
}

impl Args<'_> {
    fn missing(&self, argument: &'static str) -> Error {
        let end = self.line.trim_end().len();
        Error::new(vec![end..end + 1], MissingArgument { argument, usage: self.usage })
    }

    fn word(&mut self, argument: &'static str) -> Result<Arg, Error> {
        let word = self.words.get(self.next).cloned().ok_or_else(|| self.missing(argument))?;
        self.next += 1;
        Ok(word)
    }

    fn index(&mut self, argument: &'static str) -> Result<Index, Error> {
        Index::try_from(&self.word(argument)?)
    }

    /// Reads the rest of the line as a single argument.
    fn rest(&mut self, argument: &'static str) -> Result<Arg, Error> {
        let start = self.words.get(self.next).ok_or_else(|| self.missing(argument))?.span.start;
        self.next = self.words.len();
        let text = self.line[start..].trim_end();
        Ok(Arg::new(text, start..start + text.len()))
    }

    fn finish<T>(self, command: T) -> Result<T, Error> {
        match self.words.get(self.next) {
            Some(extra) => Err(Error::new(vec![extra.span.clone()], UnexpectedArgument { usage: self.usage })),
            None => Ok(command),
        }
    }
}

impl Command {
    /// Parses a line of input. Returns [`None`] for an empty line.
    pub fn parse(line: &str) -> Result<Option<Self>, Error> {
        let words = split_words(line);
        let Some(name) = words.first().cloned() else {
            return Ok(None);
        };
        let Some((_, usage, _)) = COMMANDS.iter().find(|(command, _, _)| *command == name.text) else {
            return Err(Error::new(vec![name.span], UnknownCommand {
                suggestions: suggestions(&name.text),
                name: name.text,
            }));
        };

        let mut args = Args { line, words, next: 1, usage: *usage };
        let command = match name.text.as_str() {
            "load" => Self::Load(args.rest("system")?),
            "random" => Self::Random,
            "show" => Self::Show,
            "add" => Self::Add(args.index("row")?, args.index("row")?),
            "sub" => Self::Sub(args.index("row")?, args.index("row")?),
            "mul" => Self::Mul(args.index("row")?, args.rest("factor")?),
            "div" => Self::Div(args.index("row")?, args.rest("factor")?),
            "isolate" => Self::Isolate(args.index("line")?, args.word("variable")?),
            "subst" => Self::Subst(args.index("line")?, args.index("line")?),
            "equalize" => Self::Equalize(args.index("line")?, args.index("line")?),
            "combine" => Self::Combine(args.index("line")?),
            "scale" => Self::Scale(args.index("line")?, args.rest("factor")?),
            "hint" => Self::Hint,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            _ => Self::Help,
        };
        args.finish(command).map(Some)
    }

    /// Returns the name the command is typed with.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Load(_) => "load",
            Self::Random => "random",
            Self::Show => "show",
            Self::Add(..) => "add",
            Self::Sub(..) => "sub",
            Self::Mul(..) => "mul",
            Self::Div(..) => "div",
            Self::Isolate(..) => "isolate",
            Self::Subst(..) => "subst",
            Self::Equalize(..) => "equalize",
            Self::Combine(_) => "combine",
            Self::Scale(..) => "scale",
            Self::Hint => "hint",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Help => "help",
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn parse_commands() {
        assert_eq!(Command::parse("  ").unwrap(), None);
        assert_eq!(Command::parse("undo").unwrap(), Some(Command::Undo));
        assert_eq!(Command::parse("add 1 2").unwrap(), Some(Command::Add(
            Index { value: 0, span: 4..5 },
            Index { value: 1, span: 6..7 },
        )));
    }

    #[test]
    fn rest_of_line() {
        assert_eq!(Command::parse("mul 2 -3 / 2 ").unwrap(), Some(Command::Mul(
            Index { value: 1, span: 4..5 },
            Arg { text: "-3 / 2".to_string(), span: 6..12 },
        )));
        assert_eq!(Command::parse("load 2x + 3y = 12; x - y = 1").unwrap(), Some(Command::Load(
            Arg { text: "2x + 3y = 12; x - y = 1".to_string(), span: 5..28 },
        )));
    }

    #[test]
    fn unknown_command() {
        let err = Command::parse("ad 1 2").unwrap_err();
        let kind = err.downcast_ref::<UnknownCommand>().unwrap();
        assert!(kind.suggestions.contains(&"add"));
        assert_eq!(err.spans, vec![0..2]);
    }

    #[test]
    fn bad_arguments() {
        let err = Command::parse("add 1").unwrap_err();
        assert!(err.is::<MissingArgument>());
        assert_eq!(err.spans, vec![5..6]);

        let err = Command::parse("add 0 1").unwrap_err();
        assert!(err.is::<InvalidIndex>());

        let err = Command::parse("undo 2").unwrap_err();
        assert!(err.is::<UnexpectedArgument>());
        assert_eq!(err.spans, vec![5..6]);
    }
}
