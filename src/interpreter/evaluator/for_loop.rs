use std::io::Write;

use crate::{ast::{Expr, Statement},
            interpreter::evaluator::core::{ExecResult, Flow, Interpreter}};

impl<W: Write> Interpreter<W> {
    /// Executes a `for` loop.
    ///
    /// The initializer runs once, in a scope opened for the loop and shared by
    /// every iteration, so loop variables keep their value from one iteration
    /// to the next and disappear when the loop ends. Each iteration checks
    /// the condition, runs the body, then runs the increment.
    ///
    /// A `continue` in the body still runs the increment; a `break` skips it
    /// and ends the loop.
    ///
    /// # Parameters
    /// - `initializer`: Statements run once before the first check.
    /// - `condition`: Checked before every iteration.
    /// - `increment`: Evaluated after every iteration, if present.
    /// - `body`: The loop body, absent for `for (...);`.
    ///
    /// # Returns
    /// [`Flow::Normal`] once the loop ends.
    pub(super) fn execute_for(&mut self,
                              initializer: &[Statement],
                              condition: &Expr,
                              increment: Option<&Expr>,
                              body: Option<&Statement>)
                              -> ExecResult {
        let mut scope = self.scoped();

        for statement in initializer {
            scope.execute(statement)?;
        }

        while scope.eval(condition)?.is_truthy() {
            if let Some(body) = body
               && scope.execute(body)? == Flow::Break
            {
                break;
            }
            if let Some(increment) = increment {
                scope.eval(increment)?;
            }
        }
        Ok(Flow::Normal)
    }
}
