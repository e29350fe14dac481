use thiserror::Error;

use crate::util::source_map::Position;

/// What went wrong while scanning a single lexeme.
///
/// This doubles as the error type of the generated `logos` scanner, so the
/// default variant is what an unmatched character produces.
#[derive(Debug, Error, Clone, PartialEq, Eq, Default)]
pub enum LexicalErrorKind {
    /// A character that starts no token.
    #[default]
    #[error("Unexpected character!")]
    UnexpectedCharacter,
    /// A quoted literal ran into a newline or the end of input.
    #[error("Unterminated string. Expected {delimiter}")]
    UnterminatedString {
        /// The quote character that was never closed.
        delimiter: char,
    },
    /// An `@` followed by a digit or punctuation.
    #[error("Variables names can't start with numbers nor with special characters!")]
    InvalidIdentifierStart,
    /// An `@` with nothing after it.
    #[error("Unexpected variable name.")]
    EmptyIdentifier,
    /// A bare word that is not a keyword and does not follow a `.`.
    #[error("Unknown keyword!")]
    UnknownKeyword,
    /// `0x` without any hexadecimal digit after it.
    #[error("Invalid hexadecimal literal.")]
    InvalidHexLiteral,
}

/// A lexical error together with where it starts.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("At [{position}] >{kind}")]
pub struct LexicalError {
    /// The kind of failure.
    pub kind:     LexicalErrorKind,
    /// Position of the first character of the offending lexeme.
    pub position: Position,
}
