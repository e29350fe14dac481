use std::{cmp::Ordering, io::Write};

use crate::{ast::{BinaryOperator, Expr, LogicalOperator},
            error::RuntimeError,
            interpreter::{evaluator::core::{EvalResult, Interpreter},
                          value::core::Value}};

impl<W: Write> Interpreter<W> {
    /// Evaluates `and` / `or`.
    ///
    /// The left operand decides alone when it can: `or` returns a truthy left
    /// operand and `and` returns a falsy one, both without evaluating the
    /// right. Otherwise the right operand is the result. Operands are
    /// returned as they are, not converted to booleans.
    pub(super) fn eval_logical(&mut self,
                               left: &Expr,
                               op: LogicalOperator,
                               right: &Expr)
                               -> EvalResult<Value> {
        let left = self.eval(left)?;
        let decided = match op {
            LogicalOperator::Or => left.is_truthy(),
            LogicalOperator::And => !left.is_truthy(),
        };
        if decided { Ok(left) } else { self.eval(right) }
    }

    /// Evaluates `condition ? left : right`, only evaluating the chosen
    /// branch.
    pub(super) fn eval_trinary(&mut self,
                               condition: &Expr,
                               left: &Expr,
                               right: &Expr)
                               -> EvalResult<Value> {
        if self.eval(condition)?.is_truthy() {
            self.eval(left)
        } else {
            self.eval(right)
        }
    }
}

/// Applies a binary operator to two evaluated operands.
///
/// - `+` adds two numbers, or appends a number or string to a string. A
///   number on the left of a string is rejected.
/// - `-`, `*` and `/` need two numbers; `/` rejects a zero divisor.
/// - `==` and `!=` compare type and value, so values of different types are
///   never equal.
/// - `<`, `<=`, `>` and `>=` need two numbers, two booleans or two strings.
///
/// # Parameters
/// - `op`: The operator.
/// - `left`, `right`: The operands, already evaluated.
///
/// # Returns
/// The computed value.
///
/// # Example
/// ```
/// use pencil::{ast::BinaryOperator,
///              interpreter::{evaluator::binary::apply_binary, value::core::Value}};
///
/// let joined = apply_binary(BinaryOperator::Add, &Value::from("n = "), &Value::Number(3.0));
/// assert_eq!(joined, Ok(Value::from("n = 3")));
/// ```
pub fn apply_binary(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<Value> {
    match op {
        BinaryOperator::Add => match (left, right) {
            (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
            (Value::Str(a), Value::Number(_) | Value::Str(_)) => {
                Ok(Value::from(format!("{a}{right}")))
            },
            _ => Err(RuntimeError::InvalidAddition),
        },
        BinaryOperator::Sub => arithmetic(left, right, RuntimeError::InvalidSubtraction, |a, b| a - b),
        BinaryOperator::Mul => {
            arithmetic(left, right, RuntimeError::InvalidMultiplication, |a, b| a * b)
        },
        BinaryOperator::Div => {
            if let (Value::Number(_), Value::Number(divisor)) = (left, right)
               && *divisor == 0.0
            {
                return Err(RuntimeError::DivisionByZero);
            }
            arithmetic(left, right, RuntimeError::InvalidDivision, |a, b| a / b)
        },
        BinaryOperator::Equal => Ok(Value::Bool(left == right)),
        BinaryOperator::NotEqual => Ok(Value::Bool(left != right)),
        BinaryOperator::Greater
        | BinaryOperator::GreaterEqual
        | BinaryOperator::Less
        | BinaryOperator::LessEqual => compare(op, left, right).map(Value::Bool),
    }
}

/// Applies `apply` to two numbers, or fails with `error`.
fn arithmetic(left: &Value,
              right: &Value,
              error: RuntimeError,
              apply: impl FnOnce(f64, f64) -> f64)
              -> EvalResult<Value> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(apply(*a, *b))),
        _ => Err(error),
    }
}

/// Orders two values of the same comparable type.
///
/// Comparisons involving `NaN` are false, as every comparison with an
/// unordered number is.
fn compare(op: BinaryOperator, left: &Value, right: &Value) -> EvalResult<bool> {
    let ordering = match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Bool(a), Value::Bool(b)) => Some(a.cmp(b)),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => return Err(RuntimeError::ImplicitCast),
    };

    Ok(ordering.is_some_and(|ordering| match op {
                   BinaryOperator::Greater => ordering == Ordering::Greater,
                   BinaryOperator::GreaterEqual => ordering != Ordering::Less,
                   BinaryOperator::Less => ordering == Ordering::Less,
                   _ => ordering != Ordering::Greater,
               }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Value {
        Value::Number(n)
    }

    #[test]
    fn addition_and_concatenation() {
        assert_eq!(apply_binary(BinaryOperator::Add, &num(2.0), &num(3.5)), Ok(num(5.5)));
        assert_eq!(apply_binary(BinaryOperator::Add, &Value::from("a"), &Value::from("b")),
                   Ok(Value::from("ab")));
        assert_eq!(apply_binary(BinaryOperator::Add, &Value::from("x"), &num(2.0)),
                   Ok(Value::from("x2")));
    }

    #[test]
    fn addition_rejects_number_then_string_and_other_mixes() {
        for (left, right) in [(num(1.0), Value::from("a")),
                              (Value::from("a"), Value::Bool(true)),
                              (Value::Null, num(1.0)),
                              (Value::Bool(true), num(1.0))]
        {
            assert_eq!(apply_binary(BinaryOperator::Add, &left, &right),
                       Err(RuntimeError::InvalidAddition));
        }
    }

    #[test]
    fn arithmetic_needs_numbers() {
        assert_eq!(apply_binary(BinaryOperator::Sub, &num(5.0), &num(7.0)), Ok(num(-2.0)));
        assert_eq!(apply_binary(BinaryOperator::Mul, &num(1.5), &num(4.0)), Ok(num(6.0)));
        assert_eq!(apply_binary(BinaryOperator::Sub, &Value::Bool(true), &num(1.0)),
                   Err(RuntimeError::InvalidSubtraction));
        assert_eq!(apply_binary(BinaryOperator::Mul, &Value::from("2"), &num(1.0)),
                   Err(RuntimeError::InvalidMultiplication));
        assert_eq!(apply_binary(BinaryOperator::Div, &Value::Null, &num(0.0)),
                   Err(RuntimeError::InvalidDivision));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert_eq!(apply_binary(BinaryOperator::Div, &num(5.0), &num(0.0)),
                   Err(RuntimeError::DivisionByZero));
        assert_eq!(apply_binary(BinaryOperator::Div, &num(5.0), &num(-0.0)),
                   Err(RuntimeError::DivisionByZero));
        assert_eq!(apply_binary(BinaryOperator::Div, &num(5.0), &num(2.0)), Ok(num(2.5)));
    }

    #[test]
    fn equality_is_strict() {
        assert_eq!(apply_binary(BinaryOperator::Equal, &num(1.0), &Value::Bool(true)),
                   Ok(Value::Bool(false)));
        assert_eq!(apply_binary(BinaryOperator::NotEqual, &Value::from("1"), &num(1.0)),
                   Ok(Value::Bool(true)));
        assert_eq!(apply_binary(BinaryOperator::Equal, &Value::Null, &Value::Null),
                   Ok(Value::Bool(true)));
    }

    #[test]
    fn ordering_within_one_type() {
        assert_eq!(apply_binary(BinaryOperator::Less, &num(1.0), &num(2.0)),
                   Ok(Value::Bool(true)));
        assert_eq!(apply_binary(BinaryOperator::GreaterEqual, &Value::from("b"), &Value::from("a")),
                   Ok(Value::Bool(true)));
        assert_eq!(apply_binary(BinaryOperator::Greater, &Value::Bool(true), &Value::Bool(false)),
                   Ok(Value::Bool(true)));
        assert_eq!(apply_binary(BinaryOperator::LessEqual, &num(f64::NAN), &num(1.0)),
                   Ok(Value::Bool(false)));
    }

    #[test]
    fn ordering_across_types_is_rejected() {
        assert_eq!(apply_binary(BinaryOperator::Less, &num(1.0), &Value::from("2")),
                   Err(RuntimeError::ImplicitCast));
        assert_eq!(apply_binary(BinaryOperator::Greater, &Value::Null, &Value::Null),
                   Err(RuntimeError::ImplicitCast));
    }
}
