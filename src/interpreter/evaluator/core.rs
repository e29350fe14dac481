use std::{io::Write,
          ops::{Deref, DerefMut}};

use log::{error, trace};

use crate::{ast::{AssignTiming, Expr, Statement},
            error::RuntimeError,
            interpreter::{environment::{Environment, ScopeId},
                          evaluator::binary::apply_binary,
                          value::core::Value}};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// How a statement finished.
///
/// `break` and `continue` travel outwards as values instead of errors; the
/// nearest enclosing loop consumes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Carry on with the next statement.
    Normal,
    /// Leave the innermost loop.
    Break,
    /// Start the next iteration of the innermost loop.
    Continue,
}

/// Result of executing a statement.
pub type ExecResult = EvalResult<Flow>;

/// Executes parsed programs.
///
/// The interpreter owns the scope chain and the channel `console` writes to.
/// Bindings persist across calls to [`Interpreter::run`].
///
/// ## Usage
///
/// ```
/// use pencil::{interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::parse},
///              util::source_map::SourceMap};
///
/// let source = SourceMap::new("let @x = 5; console @x + 1;");
/// let program = parse(&tokenize(&source).tokens, &source).statements;
///
/// let mut interpreter = Interpreter::new(Vec::new());
/// interpreter.run(&program).unwrap();
///
/// assert_eq!(interpreter.into_output(), b"6\n");
/// ```
#[derive(Debug)]
pub struct Interpreter<W: Write> {
    pub(super) environment: Environment,
    pub(super) output:      W,
}

impl<W: Write> Interpreter<W> {
    /// Creates an interpreter with an empty root scope that prints to
    /// `output`.
    #[must_use]
    pub fn new(output: W) -> Self {
        Self { environment: Environment::new(),
               output }
    }

    /// The scope chain, as left by the last statement executed.
    #[must_use]
    pub const fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Consumes the interpreter and hands back its output channel.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Executes `statements` in order.
    ///
    /// Execution stops at the first runtime error; statements after it never
    /// run.
    ///
    /// # Errors
    /// - The first [`RuntimeError`] raised by any statement.
    /// - [`RuntimeError::EscapedBreak`] or [`RuntimeError::EscapedContinue`]
    ///   if a loop-control signal reaches the top level. The parser rejects
    ///   such programs, so this only happens for hand-built trees.
    pub fn run(&mut self, statements: &[Statement]) -> EvalResult<()> {
        for statement in statements {
            trace!("executing {statement:?}");
            match self.execute(statement)? {
                Flow::Normal => {},
                Flow::Break => {
                    error!("break signal escaped every enclosing loop");
                    return Err(RuntimeError::EscapedBreak);
                },
                Flow::Continue => {
                    error!("continue signal escaped every enclosing loop");
                    return Err(RuntimeError::EscapedContinue);
                },
            }
        }
        Ok(())
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation. Operands are
    /// evaluated left to right; `and`, `or` and the trinary conditional skip
    /// the operands they do not need.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The value of the expression.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value } => Ok(Value::from(value)),
            Expr::Variable { name, .. } => self.environment.get(name),
            Expr::Grouping { inner } => self.eval(inner),
            Expr::Assign { name,
                           value,
                           timing,
                           .. } => self.eval_assign(name, value, *timing),
            Expr::Logical { left, op, right, .. } => self.eval_logical(left, *op, right),
            Expr::Trinary { condition,
                            left,
                            right, } => self.eval_trinary(condition, left, right),
            Expr::Binary { left, op, right, .. } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                apply_binary(*op, &left, &right)
            },
            Expr::Unary { op, operand, .. } => self.eval_unary(*op, operand),
            Expr::StringInterpolation { template } => self.interpolate(template).map(Value::from),
        }
    }

    /// Evaluates the value, then writes it to `name`.
    ///
    /// With [`AssignTiming::Before`] the previous value is read after the new
    /// one is computed but before it is stored, and is what the expression
    /// yields.
    fn eval_assign(&mut self, name: &str, value: &Expr, timing: AssignTiming) -> EvalResult<Value> {
        let value = self.eval(value)?;
        let previous = match timing {
            AssignTiming::Before => Some(self.environment.get(name)?),
            AssignTiming::After => None,
        };

        self.environment.assign(name, value.clone())?;
        Ok(previous.unwrap_or(value))
    }

    /// Opens a child scope that closes again when the guard is dropped.
    ///
    /// The guard dereferences to the interpreter, so statements run through
    /// it land in the new scope. Dropping it restores the previous scope on
    /// every exit path, including `?` returns.
    pub(super) fn scoped(&mut self) -> ScopeGuard<'_, W> {
        let previous = self.environment.enter();
        ScopeGuard { interpreter: self,
                     previous }
    }
}

/// Keeps a child scope open for as long as it lives.
pub struct ScopeGuard<'i, W: Write> {
    interpreter: &'i mut Interpreter<W>,
    previous:    ScopeId,
}

impl<W: Write> Deref for ScopeGuard<'_, W> {
    type Target = Interpreter<W>;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl<W: Write> DerefMut for ScopeGuard<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl<W: Write> Drop for ScopeGuard<'_, W> {
    fn drop(&mut self) {
        self.interpreter.environment.restore(self.previous);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Mutability, interpreter::lexer::token::Span};

    fn console(expr: Expr) -> Statement {
        Statement::Console { expr }
    }

    fn run(statements: &[Statement]) -> (String, EvalResult<()>) {
        let mut interpreter = Interpreter::new(Vec::new());
        let result = interpreter.run(statements);
        (String::from_utf8(interpreter.into_output()).unwrap(), result)
    }

    #[test]
    fn escaped_break_is_reported_distinctly() {
        let (output, result) = run(&[console(Expr::literal(1.0)),
                                     Statement::Break { span: Span::default() },
                                     console(Expr::literal(2.0))]);
        assert_eq!(output, "1\n");
        assert_eq!(result, Err(RuntimeError::EscapedBreak));
        assert_eq!(RuntimeError::EscapedBreak.to_string(), "BRK >Illegal break statement");
    }

    #[test]
    fn escaped_continue_inside_block_is_reported() {
        let (_, result) =
            run(&[Statement::Block { statements: vec![Statement::Continue { span:
                                                                                Span::default() }] }]);
        assert_eq!(result, Err(RuntimeError::EscapedContinue));
    }

    #[test]
    fn postfix_assignment_yields_previous_value() {
        let declare = Statement::VariableDeclaration { name:        "@n".into(),
                                                       span:        Span::default(),
                                                       initializer: Some(Expr::literal(4.0)),
                                                       mutability:  Mutability::Let, };
        let assign = Expr::Assign { name:   "@n".into(),
                                    span:   Span::default(),
                                    value:  Box::new(Expr::literal(9.0)),
                                    timing: AssignTiming::Before, };
        let read = Expr::Variable { name: "@n".into(),
                                    span: Span::default(), };
        let (output, result) = run(&[declare, console(assign), console(read)]);
        assert_eq!(result, Ok(()));
        assert_eq!(output, "4\n9\n");
    }

    #[test]
    fn scope_guard_restores_on_error() {
        let mut interpreter = Interpreter::new(Vec::new());
        let root = interpreter.environment().current();
        let block = Statement::Block { statements:
                                           vec![Statement::Expression { expr:
                                                                            Expr::Variable { name: "@missing".into(),
                                                                                             span: Span::default(), } }] };
        assert!(interpreter.run(&[block]).is_err());
        assert_eq!(interpreter.environment().current(), root);
    }
}
