use thiserror::Error;

use crate::util::source_map::Position;

/// Represents all syntax errors the parser can report.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A required token was missing. The payload is the full message, for
    /// example `Expect ';' after expression.`.
    #[error("{0}")]
    Expected(&'static str),
    /// An expression was required but the token cannot start one.
    #[error("Expect expression.")]
    ExpectExpression,
    /// The left side of `=` or a compound assignment is not a variable.
    #[error("Invalid assignment target.")]
    InvalidAssignmentTarget,
    /// Prefix `++`/`--` applied to something other than a variable.
    #[error("Invalid left-hand side in prefix operation.")]
    InvalidPrefixOperand,
    /// Postfix `++`/`--` applied to something other than a variable.
    #[error("Invalid left-hand side expression in postfix operation.")]
    InvalidPostfixOperand,
    /// `break` outside of any loop body.
    #[error("Illegal break statement.")]
    IllegalBreak,
    /// `continue` outside of any loop body.
    #[error("Illegal continue statement.")]
    IllegalContinue,
    /// A single-quoted template literal used as a value.
    #[error("Single-quoted template strings are not supported.")]
    UnsupportedTemplateString,
}

/// A syntax error together with the position it is reported at.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("At [{position}] >{kind}")]
pub struct ParseError {
    /// The kind of failure.
    pub kind:     ParseErrorKind,
    /// Where the error is reported, usually the last token consumed.
    pub position: Position,
}
