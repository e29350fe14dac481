use std::io::Write;

use crate::interpreter::{evaluator::core::{EvalResult, Interpreter},
                         lexer::token::is_name_char,
                         value::core::Value};

impl<W: Write> Interpreter<W> {
    /// Expands the `@name` references in a backtick string.
    ///
    /// A reference is an `@` followed by one or more name characters. A
    /// reference bound in the current scope chain is replaced by the escaped
    /// rendering of its value; an unbound one stays in the text as written.
    ///
    /// # Parameters
    /// - `template`: The raw text between the backticks.
    ///
    /// # Returns
    /// The expanded string.
    pub(super) fn interpolate(&self, template: &str) -> EvalResult<String> {
        let mut expanded = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(at) = rest.find('@') {
            expanded.push_str(&rest[..at]);
            let after = &rest[at + 1..];
            let length = after.find(|c: char| !is_name_char(c)).unwrap_or(after.len());
            let reference = &rest[at..=at + length];

            if length > 0 && self.environment.has(reference) {
                expanded.push_str(&escape_value(&self.environment.get(reference)?));
            } else {
                expanded.push_str(reference);
            }
            rest = &rest[at + 1 + length..];
        }
        expanded.push_str(rest);
        Ok(expanded)
    }
}

/// Renders a value for substitution into an interpolated string.
///
/// Strings have control characters, quotes and backslashes escaped the way a
/// SQL string literal expects them. Other values use their plain rendering.
///
/// # Example
/// ```
/// use pencil::interpreter::{evaluator::interpolation::escape_value, value::core::Value};
///
/// assert_eq!(escape_value(&Value::from("it's\n")), "it''s\\n");
/// assert_eq!(escape_value(&Value::Number(3.0)), "3");
/// ```
#[must_use]
pub fn escape_value(value: &Value) -> String {
    let Value::Str(text) = value else {
        return value.to_string();
    };

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\0' => escaped.push_str("\\0"),
            '\n' => escaped.push_str("\\n"),
            '\r' => escaped.push_str("\\r"),
            '\u{8}' => escaped.push_str("\\b"),
            '\t' => escaped.push_str("\\t"),
            '\u{1a}' => escaped.push_str("\\Z"),
            '\'' => escaped.push_str("''"),
            '"' => escaped.push_str("\"\""),
            '\\' => escaped.push_str("\\\\"),
            c => escaped.push(c),
        }
    }
    escaped
}
