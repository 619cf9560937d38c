use crate::{
    ctxt::Ctxt,
    error::{
        kind::{InvalidTransition, MissingFactor, RowAlreadySelected, RowOutOfBounds},
        Error,
    },
    fraction::Fraction,
    model::Equation,
    row::{Row, Solution, Variable},
    session::{
        history::History,
        telemetry::{Action, TelemetrySink},
    },
};
use log::{info, warn};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The kind of a row operation, chosen before its operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OperationKind {
    Addition,
    Subtraction,
    Multiplication,
    Division,
}

impl OperationKind {
    /// Returns the number of rows the operation takes.
    pub fn arity(self) -> usize {
        match self {
            Self::Addition | Self::Subtraction => 2,
            Self::Multiplication | Self::Division => 1,
        }
    }

    /// Returns true if the operation needs a factor.
    pub fn needs_factor(self) -> bool {
        self.arity() == 1
    }
}

/// An elementary row operation with its operands. Row indices are zero-based.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RowOperation {
    /// Add the second row to the first.
    Add(usize, usize),

    /// Subtract the second row from the first.
    Subtract(usize, usize),

    /// Multiply a row by a factor.
    Multiply(usize, Fraction),

    /// Divide a row by a factor.
    Divide(usize, Fraction),
}

impl RowOperation {
    /// Returns the kind of the operation.
    pub fn kind(&self) -> OperationKind {
        match self {
            Self::Add(..) => OperationKind::Addition,
            Self::Subtract(..) => OperationKind::Subtraction,
            Self::Multiply(..) => OperationKind::Multiplication,
            Self::Divide(..) => OperationKind::Division,
        }
    }

    fn action(&self) -> Action {
        match self {
            Self::Add(..) => Action::Add,
            Self::Subtract(..) => Action::Subtract,
            Self::Multiply(..) => Action::Multiply,
            Self::Divide(..) => Action::Divide,
        }
    }

    /// Computes the row produced by the operation.
    pub fn apply(&self, rows: &[Row], ctxt: &Ctxt) -> Result<Row, Error> {
        let row = |index: usize| rows.get(index)
            .ok_or_else(|| Error::spanless(RowOutOfBounds { index, len: rows.len() }));
        match self {
            Self::Add(a, b) => row(*a)?.add(row(*b)?, ctxt),
            Self::Subtract(a, b) => row(*a)?.subtract(row(*b)?, ctxt),
            Self::Multiply(a, factor) => row(*a)?.multiply(factor, ctxt),
            Self::Divide(a, factor) => row(*a)?.divide(factor, ctxt),
        }
    }
}

impl fmt::Display for RowOperation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Add(a, b) => write!(f, "add row {} to row {}", b + 1, a + 1),
            Self::Subtract(a, b) => write!(f, "subtract row {} from row {}", b + 1, a + 1),
            Self::Multiply(a, factor) => write!(f, "multiply row {} by {}", a + 1, factor),
            Self::Divide(a, factor) => write!(f, "divide row {} by {}", a + 1, factor),
        }
    }
}

/// The state of an elimination exercise.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum State {
    /// Waiting for the student to choose an operation.
    #[default]
    Initial,

    /// The student chose an operation and is selecting its rows.
    Selecting {
        operation: OperationKind,
        rows: Vec<usize>,
    },

    /// A visible row solves for one of the variables.
    FirstSolution {
        row: usize,
        solution: Solution,
    },
}

impl State {
    /// Describes the state, for error messages.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Initial => "waiting for an operation",
            Self::Selecting { operation, rows } if rows.len() == operation.arity() => "waiting for confirmation",
            Self::Selecting { .. } => "selecting rows",
            Self::FirstSolution { .. } => "showing a solution",
        }
    }
}

/// An exercise in the elimination method.
///
/// The session owns the history of rows, starting with the two rows of the system, and the state
/// machine that drives the exercise. Operations can be applied at once with [`Self::apply`], or
/// step by step, the way a student builds them: [`Self::begin`] an operation, [`Self::select_row`]
/// its rows, then [`Self::confirm`] it.
///
/// After every change to the rows, the visible rows are scanned for a row of the shape
/// `1·v + 0·w = c`; if one is found, the state becomes [`State::FirstSolution`]. A failed step
/// leaves the rows untouched and returns the state to [`State::Initial`].
#[derive(Debug, Clone)]
pub struct EliminationSession<S = ()> {
    vars: (String, String),
    history: History<Row>,
    state: State,
    ctxt: Ctxt,
    sink: S,
}

impl<S: TelemetrySink> EliminationSession<S> {
    /// Starts an exercise from two equations in the given variables.
    pub fn new(first: &Equation, second: &Equation, vars: (&str, &str), ctxt: Ctxt, sink: S) -> Result<Self, Error> {
        let rows = Row::initialize_rows(first, second, vars)?;
        for row in &rows {
            ctxt.check_all(row.components())?;
        }
        Ok(Self::from_rows(rows, vars, ctxt, sink))
    }

    /// Starts an exercise from two rows.
    pub fn from_rows(rows: [Row; 2], vars: (&str, &str), ctxt: Ctxt, sink: S) -> Self {
        let mut session = Self {
            vars: (vars.0.to_string(), vars.1.to_string()),
            history: History::new(rows),
            state: State::Initial,
            ctxt,
            sink,
        };
        session.rescan();
        session
    }

    /// Returns the visible rows.
    pub fn rows(&self) -> &[Row] {
        self.history.visible()
    }

    /// Returns the names of the two variables.
    pub fn vars(&self) -> (&str, &str) {
        (&self.vars.0, &self.vars.1)
    }

    /// Returns the current state.
    pub fn state(&self) -> &State {
        &self.state
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

    /// Returns true if there are steps to undo.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns true if there are steps to redo.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Writes the visible row at the given index as an equation.
    pub fn equation(&self, index: usize) -> Result<Equation, Error> {
        self.row(index)?.to_equation(self.vars())
    }

    /// Returns the values of both variables, if the visible rows solve for both of them.
    pub fn solved(&self) -> Option<(Fraction, Fraction)> {
        let value = |variable: Variable| self.rows().iter()
            .filter_map(Row::solution)
            .find(|solution| solution.variable == variable)
            .map(|solution| solution.value);
        Some((value(Variable::First)?, value(Variable::Second)?))
    }

    fn row(&self, index: usize) -> Result<&Row, Error> {
        self.history.get(index)
            .ok_or_else(|| Error::spanless(RowOutOfBounds { index, len: self.history.len() }))
    }

    fn invalid_transition(&self, action: &'static str) -> Error {
        Error::spanless(InvalidTransition { action, state: self.state.describe() })
    }

    /// Records a rejected step and returns to the initial state.
    fn fail(&mut self, err: Error) -> Error {
        warn!("rejected step: {:?}", err.kind);
        self.sink.record_error();
        self.state = State::Initial;
        self.rescan();
        err
    }

    /// Looks for a row that solves for a variable, newest first.
    fn rescan(&mut self) {
        let found = self.rows().iter()
            .enumerate()
            .rev()
            .find_map(|(row, r)| r.solution().map(|solution| (row, solution)));
        if let Some((row, solution)) = found {
            info!("row {} solves for {}", row + 1, solution.variable.name(self.vars()));
            self.state = State::FirstSolution { row, solution };
        }
    }

    fn commit(&mut self, operation: RowOperation) -> Result<&Row, Error> {
        match operation.apply(self.history.visible(), &self.ctxt) {
            Ok(row) => {
                info!("{}: {}", operation, row);
                self.history.push(row);
                self.sink.record_action(operation.action());
                self.state = State::Initial;
                self.rescan();
                Ok(&self.history.visible()[self.history.len() - 1])
            },
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Applies an operation at once. This is only possible when no operation is being built.
    pub fn apply(&mut self, operation: RowOperation) -> Result<&Row, Error> {
        if matches!(self.state, State::Selecting { .. }) {
            let err = self.invalid_transition("apply an operation");
            return Err(self.fail(err));
        }
        self.commit(operation)
    }

    /// Starts building an operation of the given kind.
    pub fn begin(&mut self, operation: OperationKind) -> Result<(), Error> {
        if matches!(self.state, State::Selecting { .. }) {
            let err = self.invalid_transition("start another operation");
            return Err(self.fail(err));
        }
        self.state = State::Selecting { operation, rows: Vec::with_capacity(operation.arity()) };
        Ok(())
    }

    /// Selects a row for the operation being built.
    pub fn select_row(&mut self, index: usize) -> Result<(), Error> {
        let len = self.history.len();
        let state = self.state.describe();
        let result = match &mut self.state {
            State::Selecting { operation, rows } if rows.len() < operation.arity() => {
                if index >= len {
                    Err(Error::spanless(RowOutOfBounds { index, len }))
                } else if rows.contains(&index) {
                    Err(Error::spanless(RowAlreadySelected { index }))
                } else {
                    rows.push(index);
                    Ok(())
                }
            },
            _ => Err(Error::spanless(InvalidTransition { action: "select a row", state })),
        };
        result.map_err(|err| self.fail(err))
    }

    /// Applies the operation being built. Multiplications and divisions need a factor, which is
    /// ignored by additions and subtractions.
    pub fn confirm(&mut self, factor: Option<Fraction>) -> Result<&Row, Error> {
        let operation = match (&self.state, factor) {
            (State::Selecting { operation, rows }, factor) if rows.len() == operation.arity() => {
                match (operation, factor) {
                    (OperationKind::Addition, _) => Ok(RowOperation::Add(rows[0], rows[1])),
                    (OperationKind::Subtraction, _) => Ok(RowOperation::Subtract(rows[0], rows[1])),
                    (OperationKind::Multiplication, Some(factor)) => Ok(RowOperation::Multiply(rows[0], factor)),
                    (OperationKind::Division, Some(factor)) => Ok(RowOperation::Divide(rows[0], factor)),
                    (_, None) => Err(Error::spanless(MissingFactor)),
                }
            },
            _ => Err(self.invalid_transition("confirm the operation")),
        };
        match operation {
            Ok(operation) => self.commit(operation),
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Abandons the operation being built.
    pub fn cancel(&mut self) {
        self.state = State::Initial;
        self.rescan();
    }

    /// Hides the last row.
    pub fn undo(&mut self) -> Result<(), Error> {
        self.step(Action::Undo, History::undo)
    }

    /// Shows the last hidden row again.
    pub fn redo(&mut self) -> Result<(), Error> {
        self.step(Action::Redo, History::redo)
    }

    fn step(&mut self, action: Action, f: fn(&mut History<Row>) -> Result<(), Error>) -> Result<(), Error> {
        match f(&mut self.history) {
            Ok(()) => {
                self.sink.record_action(action);
                self.state = State::Initial;
                self.rescan();
                Ok(())
            },
            Err(err) => Err(self.fail(err)),
        }
    }

    /// Suggests a useful next operation, or [`None`] if no operation helps.
    ///
    /// In order of preference:
    ///
    /// 1. A row with one zero coefficient is divided by its other coefficient, which solves it.
    /// 2. Two rows with a coefficient of equal magnitude are added or subtracted to eliminate it.
    /// 3. A row is multiplied by an integer, to match a coefficient of another row.
    /// 4. A row is multiplied by the coefficient of another row.
    ///
    /// Newer rows are preferred, and operations that would fail or give back a visible row are
    /// never suggested.
    pub fn hint(&mut self) -> Option<RowOperation> {
        self.sink.record_hint();
        let hint = self.find_hint();
        info!("hint: {:?}", hint);
        hint
    }

    fn find_hint(&self) -> Option<RowOperation> {
        let rows = self.rows();
        let useful = |operation: &RowOperation| match operation.apply(rows, &self.ctxt) {
            Ok(row) => !row.is_identity() && !rows.contains(&row),
            Err(_) => false,
        };
        let newest_first = move || (0..rows.len()).rev();
        let pairs = move || newest_first()
            .flat_map(move |i| newest_first().filter(move |&j| j != i).map(move |j| (i, j)))
            .flat_map(|(i, j)| [Variable::First, Variable::Second].map(|v| (i, j, v)))
            .filter(move |&(i, j, v)| !rows[i].coefficient(v).is_zero() && !rows[j].coefficient(v).is_zero());

        let divide = newest_first()
            .filter(|&i| rows[i].solution().is_none())
            .filter_map(|i| {
                let other = rows[i].vanished()?.other();
                Some(RowOperation::Divide(i, rows[i].coefficient(other).clone()))
            })
            .find(|operation| useful(operation));
        if divide.is_some() {
            return divide;
        }

        let eliminate = pairs()
            .filter(|&(i, j, v)| rows[i].coefficient(v).abs() == rows[j].coefficient(v).abs())
            .map(|(i, j, v)| if rows[i].coefficient(v) == rows[j].coefficient(v) {
                RowOperation::Subtract(i, j)
            } else {
                RowOperation::Add(i, j)
            })
            .find(|operation| useful(operation));
        if eliminate.is_some() {
            return eliminate;
        }

        let scale = pairs()
            .filter_map(|(i, j, v)| {
                let ratio = rows[j].coefficient(v).checked_div(rows[i].coefficient(v)).ok()?;
                (ratio.is_integer() && !ratio.abs().is_one()).then_some(RowOperation::Multiply(i, ratio))
            })
            .find(|operation| useful(operation));
        if scale.is_some() {
            return scale;
        }

        pairs()
            .map(|(i, j, v)| RowOperation::Multiply(i, rows[j].coefficient(v).abs()))
            .find(|operation| useful(operation))
    }
}

#[cfg(test)]
mod tests {
    use crate::error::kind::{DivisionByZero, NothingToRedo, NothingToUndo, OperationOutOfRange};
    use crate::session::telemetry::TelemetryEvent;
    use pretty_assertions::assert_eq;
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    fn example() -> EliminationSession<Vec<TelemetryEvent>> {
        let _ = env_logger::builder().is_test(true).try_init();
        let first = "2x + 3y = 12".parse().unwrap();
        let second = "x - y = 1".parse().unwrap();
        EliminationSession::new(&first, &second, ("x", "y"), Ctxt::default(), Vec::new()).unwrap()
    }

    #[test]
    fn apply_operations() {
        let mut session = example();
        assert_eq!(session.apply(RowOperation::Add(0, 1)).unwrap(), &Row::new(3, 2, 13));
        assert_eq!(session.apply(RowOperation::Divide(0, Fraction::from(2))).unwrap(), &Row::new(1, frac(3, 2), 6));
        assert_eq!(session.rows().len(), 4);
        assert_eq!(session.state(), &State::Initial);
    }

    #[test]
    fn divide_by_zero_leaves_history() {
        let mut session = example();
        let err = session.apply(RowOperation::Divide(0, Fraction::zero())).unwrap_err();
        assert!(err.is::<DivisionByZero>());
        assert_eq!(session.rows().len(), 2);
        assert_eq!(session.sink(), &vec![TelemetryEvent::Error]);
    }

    #[test]
    fn out_of_range_leaves_history() {
        let mut session = example();
        let err = session.apply(RowOperation::Multiply(0, Fraction::from(100))).unwrap_err();
        assert!(err.is::<OperationOutOfRange>());
        assert_eq!(session.rows(), &[Row::new(2, 3, 12), Row::new(1, -1, 1)]);
    }

    #[test]
    fn step_wise_operation() {
        let mut session = example();
        session.begin(OperationKind::Addition).unwrap();
        session.select_row(0).unwrap();
        assert_eq!(session.state().describe(), "selecting rows");

        let err = session.select_row(0).unwrap_err();
        assert!(err.is::<RowAlreadySelected>());
        assert_eq!(session.state(), &State::Initial);

        session.begin(OperationKind::Addition).unwrap();
        session.select_row(0).unwrap();
        session.select_row(1).unwrap();
        assert!(session.select_row(1).unwrap_err().is::<InvalidTransition>());

        session.begin(OperationKind::Subtraction).unwrap();
        session.select_row(0).unwrap();
        session.select_row(1).unwrap();
        assert_eq!(session.confirm(None).unwrap(), &Row::new(1, 4, 11));
    }

    #[test]
    fn multiplication_needs_factor() {
        let mut session = example();
        session.begin(OperationKind::Multiplication).unwrap();
        session.select_row(1).unwrap();

        let err = session.apply(RowOperation::Add(0, 1)).unwrap_err();
        assert!(err.is::<InvalidTransition>());

        session.begin(OperationKind::Multiplication).unwrap();
        session.select_row(1).unwrap();
        assert!(session.confirm(None).unwrap_err().is::<MissingFactor>());

        session.begin(OperationKind::Multiplication).unwrap();
        session.select_row(1).unwrap();
        assert_eq!(session.confirm(Some(Fraction::from(3))).unwrap(), &Row::new(3, -3, 3));
    }

    #[test]
    fn select_out_of_bounds() {
        let mut session = example();
        session.begin(OperationKind::Division).unwrap();
        let err = session.select_row(5).unwrap_err();
        assert_eq!(err.downcast_ref::<RowOutOfBounds>(), Some(&RowOutOfBounds { index: 5, len: 2 }));
    }

    #[test]
    fn confirm_without_operation() {
        let mut session = example();
        assert!(session.confirm(None).unwrap_err().is::<InvalidTransition>());
        assert!(session.select_row(0).unwrap_err().is::<InvalidTransition>());
    }

    #[test]
    fn first_solution() {
        let mut session = example();
        session.apply(RowOperation::Multiply(1, Fraction::from(3))).unwrap();
        session.apply(RowOperation::Add(0, 2)).unwrap();
        assert_eq!(session.rows()[3], Row::new(5, 0, 15));
        session.apply(RowOperation::Divide(3, Fraction::from(5))).unwrap();
        assert_eq!(session.state(), &State::FirstSolution {
            row: 4,
            solution: Solution { variable: Variable::First, value: Fraction::from(3) },
        });

        session.undo().unwrap();
        assert_eq!(session.state(), &State::Initial);
        session.redo().unwrap();
        assert!(matches!(session.state(), State::FirstSolution { row: 4, .. }));
    }

    #[test]
    fn solved() {
        let mut session = EliminationSession::from_rows(
            [Row::new(1, 0, 3), Row::new(1, 1, 5)],
            ("x", "y"),
            Ctxt::default(),
            (),
        );
        assert_eq!(session.solved(), None);
        session.apply(RowOperation::Subtract(1, 0)).unwrap();
        assert_eq!(session.solved(), Some((Fraction::from(3), Fraction::from(2))));
    }

    #[test]
    fn undo_redo() {
        let mut session = example();
        assert!(session.undo().unwrap_err().is::<NothingToUndo>());
        session.apply(RowOperation::Add(0, 1)).unwrap();
        session.undo().unwrap();
        assert_eq!(session.rows().len(), 2);
        session.redo().unwrap();
        assert_eq!(session.rows().len(), 3);
        assert!(session.redo().unwrap_err().is::<NothingToRedo>());
        assert_eq!(session.sink(), &vec![
            TelemetryEvent::Error,
            TelemetryEvent::Action(Action::Add),
            TelemetryEvent::Action(Action::Undo),
            TelemetryEvent::Action(Action::Redo),
            TelemetryEvent::Error,
        ]);
    }

    #[test]
    fn equations_of_rows() {
        let mut session = example();
        session.apply(RowOperation::Add(0, 1)).unwrap();
        assert_eq!(session.equation(2).unwrap().to_string(), "3x + 2y = 13");
        assert!(session.equation(3).unwrap_err().is::<RowOutOfBounds>());
    }

    #[test]
    fn hint_prefers_division() {
        let mut session = EliminationSession::from_rows(
            [Row::new(2, 3, 12), Row::new(0, -5, -10)],
            ("x", "y"),
            Ctxt::default(),
            Vec::new(),
        );
        assert_eq!(session.hint(), Some(RowOperation::Divide(1, Fraction::from(-5))));
        assert_eq!(session.sink(), &vec![TelemetryEvent::Hint]);
    }

    #[test]
    fn hint_eliminates_equal_magnitudes() {
        let mut session = EliminationSession::from_rows(
            [Row::new(2, 3, 12), Row::new(2, -1, 4)],
            ("x", "y"),
            Ctxt::default(),
            (),
        );
        assert_eq!(session.hint(), Some(RowOperation::Subtract(1, 0)));

        let mut session = EliminationSession::from_rows(
            [Row::new(2, 3, 12), Row::new(5, -3, 1)],
            ("x", "y"),
            Ctxt::default(),
            (),
        );
        assert_eq!(session.hint(), Some(RowOperation::Add(1, 0)));
    }

    #[test]
    fn hint_scales() {
        let mut session = example();
        assert_eq!(session.hint(), Some(RowOperation::Multiply(1, Fraction::from(2))));

        let mut session = EliminationSession::from_rows(
            [Row::new(2, 3, 12), Row::new(3, 5, 1)],
            ("x", "y"),
            Ctxt::default(),
            (),
        );
        assert_eq!(session.hint(), Some(RowOperation::Multiply(1, Fraction::from(2))));
    }

    #[test]
    fn no_hint_for_dependent_rows() {
        let mut session = EliminationSession::from_rows(
            [Row::new(1, 1, 2), Row::new(1, 1, 2)],
            ("x", "y"),
            Ctxt::default(),
            (),
        );
        assert_eq!(session.hint(), None);
    }
}
