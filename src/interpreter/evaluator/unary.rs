use std::io::Write;

use crate::{ast::{Expr, UnaryOperator},
            error::RuntimeError,
            interpreter::{evaluator::core::{EvalResult, Interpreter},
                          value::core::Value}};

impl<W: Write> Interpreter<W> {
    /// Evaluates a prefix operation.
    ///
    /// `++` and `--` write the updated number back to the variable and yield
    /// the new value. The other operators only read their operand and are
    /// handed to [`apply_unary`].
    ///
    /// # Parameters
    /// - `op`: Prefix operator.
    /// - `operand`: The operand expression, a variable for `++`/`--`.
    ///
    /// # Returns
    /// The computed value.
    pub(super) fn eval_unary(&mut self, op: UnaryOperator, operand: &Expr) -> EvalResult<Value> {
        let step = match op {
            UnaryOperator::Increment => 1.0,
            UnaryOperator::Decrement => -1.0,
            _ => {
                let value = self.eval(operand)?;
                return apply_unary(op, &value);
            },
        };

        // the parser only builds updates around variables
        let Expr::Variable { name, .. } = operand else {
            return Err(RuntimeError::ExpectedNumericVariable);
        };
        let Value::Number(current) = self.environment.get(name)? else {
            return Err(RuntimeError::ExpectedNumericVariable);
        };
        let updated = Value::Number(current + step);
        self.environment.assign(name, updated.clone())?;
        Ok(updated)
    }
}

/// Applies a prefix operator that does not write to a variable.
///
/// Supported operators:
/// - `Plus`: numbers and booleans, returned unchanged.
/// - `Negate`: numbers and booleans, `true` counting as 1.
/// - `Not`: negates the truthiness of any value.
/// - `Typeof`: the type name as a string.
///
/// # Parameters
/// - `op`: Prefix operator.
/// - `value`: The evaluated operand.
///
/// # Returns
/// The computed `Value` wrapped in `EvalResult`.
///
/// # Example
/// ```
/// use pencil::{ast::UnaryOperator,
///              interpreter::{evaluator::unary::apply_unary, value::core::Value}};
///
/// let v = apply_unary(UnaryOperator::Negate, &Value::Bool(true)).unwrap();
/// assert_eq!(v, Value::Number(-1.0));
///
/// let v = apply_unary(UnaryOperator::Typeof, &Value::Null).unwrap();
/// assert_eq!(v, Value::from("null"));
/// ```
pub fn apply_unary(op: UnaryOperator, value: &Value) -> EvalResult<Value> {
    match op {
        UnaryOperator::Plus => match value {
            Value::Number(_) | Value::Bool(_) => Ok(value.clone()),
            _ => Err(RuntimeError::ExpectedNumberOrBoolean),
        },
        UnaryOperator::Negate => value.as_numeric()
                                      .map(|n| Value::Number(-n))
                                      .ok_or(RuntimeError::ExpectedNumberOrBoolean),
        UnaryOperator::Not => Ok(Value::Bool(!value.is_truthy())),
        UnaryOperator::Typeof => Ok(Value::from(value.type_name())),
        UnaryOperator::Increment | UnaryOperator::Decrement => {
            Err(RuntimeError::ExpectedNumericVariable)
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::{Mutability, Statement},
                interpreter::lexer::token::Span};

    fn variable(name: &str) -> Expr {
        Expr::Variable { name: name.into(),
                         span: Span::default() }
    }

    fn interpreter_with(name: &str, value: Value) -> Interpreter<Vec<u8>> {
        let mut interpreter = Interpreter::new(Vec::new());
        let declare = Statement::VariableDeclaration { name:        name.into(),
                                                       span:        Span::default(),
                                                       initializer: None,
                                                       mutability:  Mutability::Let, };
        interpreter.run(&[declare]).unwrap();
        interpreter.environment.assign(name, value).unwrap();
        interpreter
    }

    #[test]
    fn plus_and_negation_accept_booleans() {
        assert_eq!(apply_unary(UnaryOperator::Negate, &Value::Number(2.0)),
                   Ok(Value::Number(-2.0)));
        assert_eq!(apply_unary(UnaryOperator::Plus, &Value::Bool(false)),
                   Ok(Value::Bool(false)));
        assert_eq!(apply_unary(UnaryOperator::Negate, &Value::from("2")),
                   Err(RuntimeError::ExpectedNumberOrBoolean));
        assert_eq!(apply_unary(UnaryOperator::Plus, &Value::Null),
                   Err(RuntimeError::ExpectedNumberOrBoolean));
    }

    #[test]
    fn not_uses_truthiness() {
        assert_eq!(apply_unary(UnaryOperator::Not, &Value::from("false")),
                   Ok(Value::Bool(true)));
        assert_eq!(apply_unary(UnaryOperator::Not, &Value::Number(3.0)),
                   Ok(Value::Bool(false)));
    }

    #[test]
    fn typeof_names_every_type() {
        for (value, name) in [(Value::Null, "null"),
                              (Value::Number(1.0), "number"),
                              (Value::Bool(true), "boolean"),
                              (Value::from(""), "string")]
        {
            assert_eq!(apply_unary(UnaryOperator::Typeof, &value), Ok(Value::from(name)));
        }
    }

    #[test]
    fn prefix_increment_writes_back() {
        let mut interpreter = interpreter_with("@n", Value::Number(1.0));
        let result = interpreter.eval_unary(UnaryOperator::Increment, &variable("@n"));
        assert_eq!(result, Ok(Value::Number(2.0)));
        assert_eq!(interpreter.environment.get("@n"), Ok(Value::Number(2.0)));

        let result = interpreter.eval_unary(UnaryOperator::Decrement, &variable("@n"));
        assert_eq!(result, Ok(Value::Number(1.0)));
    }

    #[test]
    fn prefix_increment_needs_a_number() {
        let mut interpreter = interpreter_with("@s", Value::from("1"));
        assert_eq!(interpreter.eval_unary(UnaryOperator::Increment, &variable("@s")),
                   Err(RuntimeError::ExpectedNumericVariable));
        assert_eq!(interpreter.eval_unary(UnaryOperator::Increment, &variable("@missing")),
                   Err(RuntimeError::UndefinedVariable { name: "@missing".into() }));
    }
}
