use std::{fmt, rc::Rc};

use crate::ast::LiteralValue;

/// Represents a runtime value in the interpreter.
///
/// Values are immutable; strings share their text so that reading a variable
/// never copies it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// The absence of a value, also the value of an uninitialized `let`.
    #[default]
    Null,
    /// A double precision number.
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// An immutable string.
    Str(Rc<str>),
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(Rc::from(v))
    }
}

impl From<&LiteralValue> for Value {
    fn from(lit: &LiteralValue) -> Self {
        match lit {
            LiteralValue::Str(s) => Self::from(s.as_str()),
            LiteralValue::Number(n) => Self::Number(*n),
            LiteralValue::Bool(b) => Self::Bool(*b),
            LiteralValue::Null => Self::Null,
        }
    }
}

impl Value {
    /// Converts the value to a boolean for conditions.
    ///
    /// `null`, `0`, the empty string and the exact string `"false"` are
    /// falsy. Booleans are themselves. Everything else is truthy, including
    /// the string `"true"` and `NaN`.
    ///
    /// # Example
    /// ```
    /// use pencil::interpreter::value::core::Value;
    ///
    /// assert!(!Value::from("false").is_truthy());
    /// assert!(Value::from("False").is_truthy());
    /// assert!(!Value::Number(0.0).is_truthy());
    /// assert!(Value::Number(-2.5).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0,
            Self::Str(s) => !s.is_empty() && &**s != "false",
        }
    }

    /// The name `typeof` reports for this value.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Number(_) => "number",
            Self::Bool(_) => "boolean",
            Self::Str(_) => "string",
        }
    }

    /// Reads a number or a boolean as a number, `true` being 1.
    ///
    /// # Returns
    /// `None` for strings and `null`.
    #[must_use]
    pub fn as_numeric(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => write!(f, "{s}"),
            Self::Number(n) if n.is_infinite() => {
                write!(f, "{}Infinity", if n.is_sign_negative() { "-" } else { "" })
            },
            // -0 prints as 0
            Self::Number(n) if *n == 0.0 => write!(f, "0"),
            Self::Number(n) if n.abs() >= 1e21 || n.abs() < 1e-6 => write_exponent(f, *n),
            Self::Number(n) => write!(f, "{n}"),
        }
    }
}

/// Writes `n` as `1.5e+21` or `1e-7`, with the shortest digits that read back
/// as `n`.
fn write_exponent(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
    let text = format!("{n:e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{mantissa}e+{exponent}")
        },
        _ => f.write_str(&text),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthiness_table() {
        let cases = [(Value::Number(0.0), false),
                     (Value::from(""), false),
                     (Value::from("false"), false),
                     (Value::Null, false),
                     (Value::Number(5.0), true),
                     (Value::from("true"), true),
                     (Value::Bool(false), false),
                     (Value::Bool(true), true),
                     (Value::from("0"), true),
                     (Value::Number(f64::NAN), true)];
        for (value, expected) in cases {
            assert_eq!(value.is_truthy(), expected, "truthiness of {value:?}");
        }
    }

    #[test]
    fn numbers_print_without_a_trailing_fraction() {
        assert_eq!(Value::Number(6.0).to_string(), "6");
        assert_eq!(Value::Number(-0.0).to_string(), "0");
        assert_eq!(Value::Number(2.5).to_string(), "2.5");
        assert_eq!(Value::Number(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn extreme_magnitudes_print_in_exponent_form() {
        assert_eq!(Value::Number(1.2345e25).to_string(), "1.2345e+25");
        assert_eq!(Value::Number(1e21).to_string(), "1e+21");
        assert_eq!(Value::Number(-2.5e30).to_string(), "-2.5e+30");
        assert_eq!(Value::Number(1e-7).to_string(), "1e-7");
        assert_eq!(Value::Number(1.5e-10).to_string(), "1.5e-10");
    }

    #[test]
    fn moderate_magnitudes_print_in_full() {
        assert_eq!(Value::Number(1e20).to_string(), "100000000000000000000");
        assert_eq!(Value::Number(0.000_001).to_string(), "0.000001");
        assert_eq!(Value::Number(0.25).to_string(), "0.25");
    }

    #[test]
    fn other_values_print_plainly() {
        assert_eq!(Value::Null.to_string(), "null");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::from("a \"b\"").to_string(), "a \"b\"");
    }

    #[test]
    fn equality_never_crosses_types() {
        assert_ne!(Value::Number(1.0), Value::Bool(true));
        assert_ne!(Value::from("1"), Value::Number(1.0));
        assert_eq!(Value::from("ab"), Value::from(String::from("ab")));
    }

    #[test]
    fn booleans_read_as_numbers() {
        assert_eq!(Value::Bool(true).as_numeric(), Some(1.0));
        assert_eq!(Value::Bool(false).as_numeric(), Some(0.0));
        assert_eq!(Value::from("1").as_numeric(), None);
    }
}
