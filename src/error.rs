/// Lexical errors.
///
/// Defines the errors the lexer collects while scanning: unterminated
/// strings, malformed `@` identifiers, unknown bare words and stray
/// characters. Lexical errors never stop the scan; they are gathered and
/// reported together once tokenization finishes.
pub mod lexical_error;
/// Parsing errors.
///
/// Defines all error types that can occur while building statements from
/// tokens. The parser recovers after each one, so a single pass may report
/// several independent syntax errors.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised during evaluation. Unlike the
/// earlier stages, the first runtime error aborts the rest of the program.
pub mod runtime_error;

pub use lexical_error::{LexicalError, LexicalErrorKind};
pub use parse_error::{ParseError, ParseErrorKind};
pub use runtime_error::RuntimeError;
