/// Token vocabulary.
///
/// Declares [`token::TokenKind`], the closed set of lexemes the scanner
/// recognizes, together with the [`token::Token`] record handed to the
/// parser and the span type used for every location in the crate.
pub mod token;

/// Numeral scanning.
///
/// Converts hexadecimal, octal and decimal numerals into doubles.
pub mod number;

/// Quoted literal scanning.
///
/// Finds the end of double-quoted, backtick and single-quoted literals and
/// resolves backslash escapes in plain strings.
pub mod string;

/// The resilient scanning loop.
///
/// Drives the generated scanner over the whole input, turning every failure
/// into a collected [`crate::error::LexicalError`] instead of stopping.
pub mod core;

pub use core::{LexOutput, tokenize};
