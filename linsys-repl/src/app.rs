use crate::{
    command::{Arg, Command, Index, COMMANDS},
    error::{shift, ReplError},
    sink::LogSink,
};
use ariadne::Fmt;
use linsys_attrs::ErrorKind;
use linsys_compute::{
    classify::{classify_system, is_elimination_method_applicable},
    ctxt::Ctxt,
    error::kind::{DivisionByZero, EquationOutOfBounds, RowOutOfBounds, VariableNotPresent, ZeroFactor},
    eval::eval_factor,
    fraction::Fraction,
    generate::{generate_system, VARIABLES},
    model::Equation,
    session::{EliminationSession, NotebookSession, RowOperation, State},
};
use linsys_error::{Error, ErrorKind, EXPR};
use linsys_parser::parser::{ast::SystemExpr, Parser};
use log::debug;
use std::{fmt::Write, ops::Range};

/// There is no exercise to work on.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "there is no exercise yet",
    labels = ["this command needs an exercise"],
    help = format!("start one with {} or {}", "load".fg(EXPR), "random".fg(EXPR)),
)]
pub struct NoExercise;

/// The command belongs to the other method.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` cannot be used in the {} method", command, method),
    labels = ["this command"],
    help = format!("restart with `--method {}` to use it", other),
)]
pub struct WrongMethod {
    /// The name of the command.
    pub command: &'static str,

    /// The method of the exercise.
    pub method: &'static str,

    /// The method the command belongs to.
    pub other: &'static str,
}

/// A system must have exactly two equations.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected 2 equations, found {}", count),
    labels = ["this system"],
    help = "separate the two equations with a `;`",
)]
pub struct EquationCount {
    pub count: usize,
}

/// A system must be written in exactly two variables.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("expected 2 variables, found {}", found.len()),
    labels = ["this system"],
    help = if found.is_empty() {
        "the equations do not contain any variable".to_string()
    } else {
        format!("the equations contain {}", found.join(", "))
    },
)]
pub struct VariableCount {
    pub found: Vec<String>,
}

/// No variable appears in both equations of the system, so there is nothing to eliminate.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "the elimination method does not apply to this system",
    labels = ["this system"],
    help = format!(
        "neither `{}` nor `{}` appears in both equations; restart with `--method {}`",
        first,
        second,
        "notebook".fg(EXPR),
    ),
)]
pub struct EliminationNotApplicable {
    pub first: String,
    pub second: String,
}

/// The method used to solve the exercises of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Method {
    /// Combine rows until each variable is solved for.
    #[default]
    Elimination,

    /// Isolate, substitute and equalize, one line at a time.
    Notebook,
}

impl Method {
    fn name(self) -> &'static str {
        match self {
            Self::Elimination => "elimination",
            Self::Notebook => "notebook",
        }
    }

    fn other(self) -> Self {
        match self {
            Self::Elimination => Self::Notebook,
            Self::Notebook => Self::Elimination,
        }
    }
}

/// The exercise being worked on.
#[derive(Debug)]
enum Exercise {
    Elimination(EliminationSession<LogSink>),
    Notebook(NotebookSession<LogSink>),
}

/// The regions of the input line that an error from the algebra can point at.
struct Locations<'a> {
    /// The row or line indices given to the command.
    indices: &'a [&'a Index],

    /// The factor or variable given to the command.
    operand: Option<&'a Arg>,

    /// The whole command.
    line: Range<usize>,
}

impl Locations<'_> {
    /// Attaches spans to an error that does not have any.
    fn attach(&self, err: Error) -> Error {
        let index = err.downcast_ref::<RowOutOfBounds>().map(|kind| kind.index)
            .or_else(|| err.downcast_ref::<EquationOutOfBounds>().map(|kind| kind.index));
        let mut spans: Vec<Range<usize>> = match index {
            Some(index) => self.indices.iter()
                .filter(|i| i.value == index)
                .map(|i| i.span.clone())
                .collect(),
            None if err.is::<DivisionByZero>() || err.is::<ZeroFactor>() || err.is::<VariableNotPresent>() => {
                self.operand.iter().map(|arg| arg.span.clone()).collect()
            },
            None => Vec::new(),
        };
        if spans.is_empty() {
            spans.push(self.line.clone());
        }
        err.or_spans(|| spans)
    }
}

/// Evaluates a factor typed as an argument.
fn factor(arg: &Arg) -> Result<Fraction, Error> {
    eval_factor(&arg.text).map_err(|err| shift(err, arg.span.start))
}

/// Returns the variables of the system, in the order they first appear.
fn variables<'a>(first: &'a Equation, second: &'a Equation) -> Vec<&'a str> {
    let mut variables = first.variables();
    for variable in second.variables() {
        if !variables.contains(&variable) {
            variables.push(variable);
        }
    }
    variables
}

/// The state of a run of the REPL.
#[derive(Debug)]
pub struct App {
    method: Method,
    ctxt: Ctxt,
    exercise: Option<Exercise>,
}

impl App {
    /// Creates a run with no exercise.
    pub fn new(method: Method, ctxt: Ctxt) -> Self {
        Self { method, ctxt, exercise: None }
    }

    /// Parses and executes one line of input, returning the text to print.
    pub fn execute(&mut self, line: &str) -> Result<String, ReplError> {
        let Some(command) = Command::parse(line)? else {
            return Ok(String::new());
        };
        debug!("executing {:?}", command);

        let whole = 0..line.trim_end().len();
        match command {
            Command::Load(arg) => self.load(&arg),
            Command::Random => {
                let [first, second] = generate_system(&mut rand::thread_rng(), &self.ctxt)
                    .map_err(|err| err.or_spans(|| vec![whole.clone()]))?;
                self.start(first, second, VARIABLES)
                    .map_err(|err| err.or_spans(|| vec![whole]))?;
                Ok(self.show())
            },
            Command::Show => {
                self.current(&whole)?;
                Ok(self.show())
            },
            Command::Help => Ok(help()),
            command => match self.step(command, whole)? {
                Some(hint) => Ok(hint),
                None => Ok(self.show_last()),
            },
        }
    }

    /// Parses a system and starts an exercise with it.
    fn load(&mut self, arg: &Arg) -> Result<String, ReplError> {
        let offset = arg.span.start;
        let system = Parser::new(&arg.text)
            .try_parse_full::<SystemExpr>()
            .map_err(|err| shift(err, offset))?;
        if system.equations.len() != 2 {
            return Err(Error::new(vec![arg.span.clone()], EquationCount {
                count: system.equations.len(),
            }).into());
        }

        let mut equations = Vec::new();
        let mut errors = Vec::new();
        for expr in &system.equations {
            match Equation::from_expr(expr) {
                Ok(equation) => equations.push(equation),
                Err(err) => errors.push(shift(err.or_spans(|| vec![expr.span.clone()]), offset)),
            }
        }
        let [first, second]: [Equation; 2] = match equations.try_into() {
            Ok(equations) if errors.is_empty() => equations,
            _ => return Err(errors.into()),
        };

        let found = variables(&first, &second);
        let vars = match found.as_slice() {
            [a, b] => (a.to_string(), b.to_string()),
            _ => return Err(Error::new(vec![arg.span.clone()], VariableCount {
                found: found.iter().map(|v| v.to_string()).collect(),
            }).into()),
        };

        self.start(first, second, (&vars.0, &vars.1))
            .map_err(|err| err.or_spans(|| vec![arg.span.clone()]))?;
        Ok(self.show())
    }

    /// Starts an exercise in the method of this run.
    fn start(&mut self, first: Equation, second: Equation, vars: (&str, &str)) -> Result<(), Error> {
        let exercise = match self.method {
            Method::Elimination => {
                if !is_elimination_method_applicable(&first, &second, vars.0, vars.1) {
                    return Err(Error::spanless(EliminationNotApplicable {
                        first: vars.0.to_string(),
                        second: vars.1.to_string(),
                    }));
                }
                Exercise::Elimination(
                    EliminationSession::new(&first, &second, vars, self.ctxt, LogSink::default())?,
                )
            },
            Method::Notebook => Exercise::Notebook(
                NotebookSession::new(first, second, vars, self.ctxt, LogSink::default())?,
            ),
        };
        self.exercise = Some(exercise);
        Ok(())
    }

    /// Returns the current exercise.
    fn current(&mut self, whole: &Range<usize>) -> Result<&mut Exercise, Error> {
        self.exercise.as_mut()
            .ok_or_else(|| Error::new(vec![whole.clone()], NoExercise))
    }

    /// Applies a step to the current exercise. Returns the text of a hint, if one was asked for.
    fn step(&mut self, command: Command, whole: Range<usize>) -> Result<Option<String>, Error> {
        let method = self.method;
        let name_span = whole.start..command_name_end(&command, &whole);
        let wrong_method = |name: &'static str| Error::new(vec![name_span.clone()], WrongMethod {
            command: name,
            method: method.name(),
            other: method.other().name(),
        });

        let exercise = self.current(&whole)?;
        match (exercise, command) {
            (Exercise::Elimination(session), Command::Add(a, b)) => {
                let at = Locations { indices: &[&a, &b], operand: None, line: whole };
                session.apply(RowOperation::Add(a.value, b.value)).map_err(|err| at.attach(err))?;
            },
            (Exercise::Elimination(session), Command::Sub(a, b)) => {
                let at = Locations { indices: &[&a, &b], operand: None, line: whole };
                session.apply(RowOperation::Subtract(a.value, b.value)).map_err(|err| at.attach(err))?;
            },
            (Exercise::Elimination(session), Command::Mul(row, arg)) => {
                let at = Locations { indices: &[&row], operand: Some(&arg), line: whole };
                session.apply(RowOperation::Multiply(row.value, factor(&arg)?)).map_err(|err| at.attach(err))?;
            },
            (Exercise::Elimination(session), Command::Div(row, arg)) => {
                let at = Locations { indices: &[&row], operand: Some(&arg), line: whole };
                session.apply(RowOperation::Divide(row.value, factor(&arg)?)).map_err(|err| at.attach(err))?;
            },
            (Exercise::Notebook(session), Command::Mul(line, arg) | Command::Scale(line, arg)) => {
                let at = Locations { indices: &[&line], operand: Some(&arg), line: whole };
                session.scale(line.value, &factor(&arg)?).map_err(|err| at.attach(err))?;
            },
            (Exercise::Notebook(session), Command::Div(line, arg)) => {
                let at = Locations { indices: &[&line], operand: Some(&arg), line: whole };
                session.divide(line.value, &factor(&arg)?).map_err(|err| at.attach(err))?;
            },
            (Exercise::Notebook(session), Command::Isolate(line, variable)) => {
                let at = Locations { indices: &[&line], operand: Some(&variable), line: whole };
                session.isolate(line.value, &variable.text).map_err(|err| at.attach(err))?;
            },
            (Exercise::Notebook(session), Command::Subst(from, into)) => {
                let at = Locations { indices: &[&from, &into], operand: None, line: whole };
                session.substitute(from.value, into.value).map_err(|err| at.attach(err))?;
            },
            (Exercise::Notebook(session), Command::Equalize(first, second)) => {
                let at = Locations { indices: &[&first, &second], operand: None, line: whole };
                session.equalize(first.value, second.value).map_err(|err| at.attach(err))?;
            },
            (Exercise::Notebook(session), Command::Combine(line)) => {
                let at = Locations { indices: &[&line], operand: None, line: whole };
                session.combine(line.value).map_err(|err| at.attach(err))?;
            },
            (Exercise::Elimination(session), Command::Undo) => session.undo().map_err(|err| err.or_spans(|| vec![whole]))?,
            (Exercise::Elimination(session), Command::Redo) => session.redo().map_err(|err| err.or_spans(|| vec![whole]))?,
            (Exercise::Notebook(session), Command::Undo) => session.undo().map_err(|err| err.or_spans(|| vec![whole]))?,
            (Exercise::Notebook(session), Command::Redo) => session.redo().map_err(|err| err.or_spans(|| vec![whole]))?,
            (Exercise::Elimination(session), Command::Hint) => {
                return Ok(Some(session.hint()
                    .map_or_else(|| "no hint".to_string(), |operation| format!("hint: {}", operation))));
            },
            (Exercise::Notebook(session), Command::Hint) => {
                return Ok(Some(session.hint()
                    .map_or_else(|| "no hint".to_string(), |hint| format!("hint: {}", hint))));
            },
            (_, command) => return Err(wrong_method(command.name())),
        }
        Ok(None)
    }

    /// Describes the current exercise.
    pub fn show(&self) -> String {
        let mut out = String::new();
        match &self.exercise {
            None => out.push_str("no exercise"),
            Some(Exercise::Elimination(session)) => {
                for index in 0..session.rows().len() {
                    writeln!(out, "{}", elimination_line(session, index)).ok();
                }
                match session.state() {
                    State::FirstSolution { row, solution } => {
                        let variable = solution.variable.name(session.vars());
                        write!(out, "row {} solves {} = {}", row + 1, variable, solution.value).ok();
                    },
                    state => {
                        write!(out, "{}", state.describe()).ok();
                    },
                }
                if let Some((x, y)) = session.solved() {
                    let (a, b) = session.vars();
                    write!(out, "\nsolved: {} = {}, {} = {}", a, x, b, y).ok();
                }
                write_counts(&mut out, session.sink());
            },
            Some(Exercise::Notebook(session)) => {
                for index in 0..session.lines().len() {
                    writeln!(out, "{}", notebook_line(session, index)).ok();
                }
                let [first, second] = [&session.lines()[0], &session.lines()[1]];
                write!(out, "system: {:?}", classify_system(first, second, session.vars())).ok();
                for (variable, value) in session.solutions() {
                    write!(out, "\nsolved: {} = {}", variable, value).ok();
                }
                write_counts(&mut out, session.sink());
            },
        }
        out
    }

    /// Describes the newest row or line of the current exercise.
    fn show_last(&self) -> String {
        match &self.exercise {
            None => String::new(),
            Some(Exercise::Elimination(session)) => {
                let mut out = elimination_line(session, session.rows().len() - 1);
                if let Some((x, y)) = session.solved() {
                    let (a, b) = session.vars();
                    write!(out, "\nsolved: {} = {}, {} = {}", a, x, b, y).ok();
                } else if let State::FirstSolution { solution, .. } = session.state() {
                    let variable = solution.variable.name(session.vars());
                    write!(out, "\nfound {} = {}", variable, solution.value).ok();
                }
                out
            },
            Some(Exercise::Notebook(session)) => notebook_line(session, session.lines().len() - 1),
        }
    }
}

/// Returns the end of the command name in the line.
fn command_name_end(command: &Command, whole: &Range<usize>) -> usize {
    (whole.start + command.name().len()).min(whole.end)
}

fn elimination_line(session: &EliminationSession<LogSink>, index: usize) -> String {
    let row = &session.rows()[index];
    match session.equation(index) {
        Ok(equation) => format!("{:>3}  {:<28}{}", index + 1, equation.to_string(), row),
        Err(_) => format!("{:>3}  {}", index + 1, row),
    }
}

fn notebook_line(session: &NotebookSession<LogSink>, index: usize) -> String {
    let line = &session.lines()[index];
    match session.classify(index) {
        Ok(isolated) => format!("{:>3}  {:<28}{:?}", index + 1, line.to_string(), isolated),
        Err(_) => format!("{:>3}  {}", index + 1, line),
    }
}

fn write_counts(out: &mut String, sink: &LogSink) {
    write!(out, "\n{} steps, {} errors, {} hints", sink.actions, sink.errors, sink.hints).ok();
}

/// Lists the commands.
fn help() -> String {
    let width = COMMANDS.iter().map(|(_, usage, _)| usage.len()).max().unwrap_or_default();
    COMMANDS.iter()
        .map(|(_, usage, description)| format!("{:<width$}  {}", usage, description, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}
