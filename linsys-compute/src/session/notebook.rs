use crate::{
    classify::{classify_isolation, IsolatedIn},
    ctxt::Ctxt,
    error::{kind::EquationOutOfBounds, Error},
    fraction::Fraction,
    model::Equation,
    session::{
        history::History,
        telemetry::{Action, TelemetrySink},
    },
    transform::{
        combine_like_terms,
        compute_transformed_equation,
        divide_equation_by_factor,
        equalize,
        multiply_equation_by_factor,
        substitute,
    },
};
use linsys_parser::parser::token::op::RelationKind;
use log::{info, warn};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A suggested step of a notebook. Line indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NotebookHint {
    /// Isolate a variable in a line.
    Isolate { line: usize, variable: String },

    /// Substitute the variable isolated in one line into another line.
    Substitute { from: usize, into: usize },

    /// Equate two lines that isolate the same variable.
    Equalize { first: usize, second: usize },
}

impl fmt::Display for NotebookHint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Isolate { line, variable } => write!(f, "isolate {} in line {}", variable, line + 1),
            Self::Substitute { from, into } => write!(f, "substitute line {} into line {}", from + 1, into + 1),
            Self::Equalize { first, second } => write!(f, "equate lines {} and {}", first + 1, second + 1),
        }
    }
}

/// An exercise in the substitution and equalization methods.
///
/// The notebook is a list of lines, starting with the two equations of the system. Every step
/// appends a new line derived from earlier ones; no line is ever modified. Steps can be undone and
/// redone. A step whose result has a coefficient out of range for the [`Ctxt`] is rejected.
#[derive(Debug, Clone)]
pub struct NotebookSession<S = ()> {
    vars: (String, String),
    history: History<Equation>,
    ctxt: Ctxt,
    sink: S,
}

impl<S: TelemetrySink> NotebookSession<S> {
    /// Starts a notebook with the two equations of a system.
    pub fn new(first: Equation, second: Equation, vars: (&str, &str), ctxt: Ctxt, sink: S) -> Result<Self, Error> {
        for equation in [&first, &second] {
            ctxt.check_all(equation.coefficients())?;
        }
        Ok(Self {
            vars: (vars.0.to_string(), vars.1.to_string()),
            history: History::new([first, second]),
            ctxt,
            sink,
        })
    }

    /// Returns the visible lines.
    pub fn lines(&self) -> &[Equation] {
        self.history.visible()
    }

    /// Returns the visible line at the given index.
    pub fn line(&self, index: usize) -> Result<&Equation, Error> {
        self.history.get(index)
            .ok_or_else(|| Error::spanless(EquationOutOfBounds { index, len: self.history.len() }))
    }

    /// Returns the names of the two variables.
    pub fn vars(&self) -> (&str, &str) {
        (&self.vars.0, &self.vars.1)
    }

    /// Returns the context used for range checks.
    pub fn ctxt(&self) -> &Ctxt {
        &self.ctxt
    }

    /// Returns the telemetry sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Consumes the session, returning its telemetry sink.
    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Classifies a line by the variable on its left side.
    pub fn classify(&self, index: usize) -> Result<IsolatedIn, Error> {
        Ok(classify_isolation(self.line(index)?, self.vars()))
    }

    /// Returns the value of every variable that some line solves for, that is, every line of the
    /// shape `v = c`. If several lines solve for the same variable, the newest one wins.
    pub fn solutions(&self) -> Vec<(String, Fraction)> {
        let mut solutions: Vec<(String, Fraction)> = Vec::new();
        for (variable, value) in self.lines().iter().rev().filter_map(Equation::solution) {
            if !solutions.iter().any(|(v, _)| v == variable) {
                solutions.push((variable.to_string(), value));
            }
        }
        solutions.reverse();
        solutions
    }

    /// Appends the result of a step, or records its error.
    fn commit(&mut self, action: Action, result: Result<Equation, Error>) -> Result<&Equation, Error> {
        let result = result.and_then(|equation| {
            self.ctxt.check_all(equation.coefficients())?;
            Ok(equation)
        });
        match result {
            Ok(equation) => {
                info!("{:?}: line {} is `{}`", action, self.history.len() + 1, equation);
                self.history.push(equation);
                self.sink.record_action(action);
                Ok(&self.history.visible()[self.history.len() - 1])
            },
            Err(err) => {
                warn!("rejected {:?}: {:?}", action, err.kind);
                self.sink.record_error();
                Err(err)
            },
        }
    }

    /// Looks up a line, recording an error if it does not exist.
    fn get(&mut self, index: usize) -> Result<Equation, Error> {
        match self.line(index) {
            Ok(line) => Ok(line.clone()),
            Err(err) => {
                self.sink.record_error();
                Err(err)
            },
        }
    }

    /// Isolates a variable in a line.
    pub fn isolate(&mut self, line: usize, variable: &str) -> Result<&Equation, Error> {
        let equation = self.get(line)?;
        self.commit(Action::Isolate, compute_transformed_equation(&equation, variable))
    }

    /// Substitutes the variable isolated in line `from` into line `into`.
    pub fn substitute(&mut self, from: usize, into: usize) -> Result<&Equation, Error> {
        let isolated = self.get(from)?;
        let target = self.get(into)?;
        self.commit(Action::Substitute, substitute(&target, &isolated))
    }

    /// Equates two lines that isolate the same variable.
    pub fn equalize(&mut self, first: usize, second: usize) -> Result<&Equation, Error> {
        let first = self.get(first)?;
        let second = self.get(second)?;
        self.commit(Action::Equalize, equalize(&first, &second))
    }

    /// Combines the like terms of a line.
    pub fn combine(&mut self, line: usize) -> Result<&Equation, Error> {
        let equation = self.get(line)?;
        self.commit(Action::Combine, Ok(combine_like_terms(&equation)))
    }

    /// Multiplies both sides of a line by a factor.
    pub fn scale(&mut self, line: usize, factor: &Fraction) -> Result<&Equation, Error> {
        let equation = self.get(line)?;
        self.commit(Action::Scale, multiply_equation_by_factor(&equation, factor))
    }

    /// Divides both sides of a line by a factor.
    pub fn divide(&mut self, line: usize, factor: &Fraction) -> Result<&Equation, Error> {
        let equation = self.get(line)?;
        self.commit(Action::Divide, divide_equation_by_factor(&equation, factor))
    }

    /// Hides the last line.
    pub fn undo(&mut self) -> Result<(), Error> {
        self.step(Action::Undo, History::undo)
    }

    /// Shows the last hidden line again.
    pub fn redo(&mut self) -> Result<(), Error> {
        self.step(Action::Redo, History::redo)
    }

    fn step(&mut self, action: Action, f: fn(&mut History<Equation>) -> Result<(), Error>) -> Result<(), Error> {
        let result = f(&mut self.history);
        match &result {
            Ok(()) => self.sink.record_action(action),
            Err(_) => self.sink.record_error(),
        }
        result
    }

    /// Suggests a useful next step, or [`None`] if no step helps.
    ///
    /// Substituting a line that isolates a variable into another line is preferred, then equating
    /// two lines that isolate the same variable, then isolating a variable with coefficient `1` or
    /// `-1`, then isolating any variable. Newer lines are preferred, and steps that would fail or
    /// give back a visible line or a line without variables are never suggested.
    pub fn hint(&mut self) -> Option<NotebookHint> {
        self.sink.record_hint();
        let hint = self.find_hint();
        info!("hint: {:?}", hint);
        hint
    }

    fn find_hint(&self) -> Option<NotebookHint> {
        let lines = self.lines();
        let useful = |result: Result<Equation, Error>| match result {
            Ok(equation) => !equation.variables().is_empty()
                && self.ctxt.check_all(equation.coefficients()).is_ok()
                && !lines.contains(&equation),
            Err(_) => false,
        };
        let newest_first = move || (0..lines.len()).rev();
        let pairs = move || newest_first()
            .flat_map(move |i| newest_first().filter(move |&j| j != i).map(move |j| (i, j)));
        let isolated_variable = |i: usize| lines[i].isolation().map(|(variable, _)| variable);
        let isolates_equality = |i: usize| {
            lines[i].relation() == RelationKind::Equal && lines[i].isolation().is_some()
        };

        let substitution = pairs()
            .filter(|&(from, into)| isolates_equality(from) && isolated_variable(into) != isolated_variable(from))
            .find(|&(from, into)| useful(substitute(&lines[into], &lines[from])))
            .map(|(from, into)| NotebookHint::Substitute { from, into });
        if substitution.is_some() {
            return substitution;
        }

        let equalization = pairs()
            .filter(|&(first, second)| first > second && isolates_equality(first) && isolates_equality(second))
            .filter(|&(first, _)| lines[first].solution().is_none())
            .find(|&(first, second)| useful(equalize(&lines[first], &lines[second])))
            .map(|(first, second)| NotebookHint::Equalize { first, second });
        if equalization.is_some() {
            return equalization;
        }

        let vars = [self.vars.0.as_str(), self.vars.1.as_str()];
        let candidates = move || newest_first()
            .filter(move |&line| lines[line].isolation().is_none())
            .flat_map(move |line| vars.map(|variable| (line, variable)));
        let unit = |&(line, variable): &(usize, &str)| lines[line].side_of(variable)
            .and_then(|(side, _)| lines[line].term(side, variable))
            .and_then(|term| term.coefficient.as_numeric())
            .map_or(false, |value| value.abs().is_one());

        candidates()
            .filter(unit)
            .chain(candidates())
            .find(|&(line, variable)| useful(compute_transformed_equation(&lines[line], variable)))
            .map(|(line, variable)| NotebookHint::Isolate { line, variable: variable.to_string() })
    }
}
