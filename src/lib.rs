//! # pencil
//!
//! pencil is an interpreter for Pencil, a small imperative scripting language
//! with `@`-prefixed variables, block scoping, `while`/`for` loops and
//! backtick string interpolation.
//!
//! Source text flows through three stages. The lexer and the parser collect
//! every error they find before giving up; the evaluator stops at the first
//! runtime error.
//!
//! ```
//! let report = pencil::get_result("let @x = 5; console @x + 1;");
//!
//! assert_eq!(report.output, "6\n");
//! assert_eq!(report.outcome, pencil::Outcome::Completed);
//! ```

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::io::{self, Write};

use crate::{interpreter::{evaluator::core::Interpreter, lexer::tokenize, parser::parse},
            util::source_map::SourceMap};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` and `Statement` enums and the operator
/// types they use. The AST is built by the parser and walked by the
/// evaluator.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Keeps the source spans needed for error reporting.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Defines one error type per stage.
/// - Renders every error in the `At [line:column] >message` form users see.
pub mod error;
/// Lexer, parser, scope chain and evaluator.
pub mod interpreter;
/// General utilities shared by several stages.
pub mod util;

/// How a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Every statement executed.
    Completed,
    /// The lexer reported this many errors; nothing was parsed.
    LexicalErrors(usize),
    /// The parser reported this many errors; nothing was executed.
    SyntaxErrors(usize),
    /// A runtime error stopped the program.
    RuntimeFailure,
}

impl Outcome {
    /// Returns `true` if the program ran to the end.
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Completed)
    }
}

/// Lexes, parses and runs a program.
///
/// The pipeline stops after the first stage that reports anything. All
/// lexical or syntax errors of that stage are written to `diagnostics`, one
/// per line, prefixed with `Lexical Error: ` or `Syntactical Error: `. A
/// runtime error is written as is.
///
/// # Parameters
/// - `source`: Program text.
/// - `output`: Receives what `console` prints.
/// - `diagnostics`: Receives error messages.
///
/// # Returns
/// How the run ended.
///
/// # Errors
/// Only if writing to `diagnostics` fails. Failures writing to `output`
/// are runtime errors of the program.
pub fn run(source: &str,
           output: &mut impl Write,
           diagnostics: &mut impl Write)
           -> io::Result<Outcome> {
    let map = SourceMap::new(source);

    let lexed = tokenize(&map);
    if !lexed.errors.is_empty() {
        for error in &lexed.errors {
            writeln!(diagnostics, "Lexical Error: {error}")?;
        }
        return Ok(Outcome::LexicalErrors(lexed.errors.len()));
    }

    let parsed = parse(&lexed.tokens, &map);
    if !parsed.errors.is_empty() {
        for error in &parsed.errors {
            writeln!(diagnostics, "Syntactical Error: {error}")?;
        }
        return Ok(Outcome::SyntaxErrors(parsed.errors.len()));
    }

    let mut interpreter = Interpreter::new(output);
    match interpreter.run(&parsed.statements) {
        Ok(()) => Ok(Outcome::Completed),
        Err(error) => {
            writeln!(diagnostics, "{error}")?;
            Ok(Outcome::RuntimeFailure)
        },
    }
}

/// Everything a run produced, captured in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    /// Program output.
    pub output:      String,
    /// Error messages, one per line.
    pub diagnostics: String,
    /// How the run ended.
    pub outcome:     Outcome,
}

/// Runs a program and returns its output and diagnostics.
///
/// # Examples
/// ```
/// use pencil::{Outcome, get_result};
///
/// let report = get_result("const @y = 10; @y = 20;");
/// assert_eq!(report.output, "");
/// assert_eq!(report.diagnostics, "\"@y\" is a constant!.\n");
/// assert_eq!(report.outcome, Outcome::RuntimeFailure);
///
/// let report = get_result("console 1 +;");
/// assert_eq!(report.outcome, Outcome::SyntaxErrors(1));
/// ```
#[must_use]
pub fn get_result(source: &str) -> Report {
    let mut output = Vec::new();
    let mut diagnostics = Vec::new();
    // writes into a Vec cannot fail
    let outcome = run(source, &mut output, &mut diagnostics).unwrap_or(Outcome::RuntimeFailure);

    Report { output: String::from_utf8_lossy(&output).into_owned(),
             diagnostics: String::from_utf8_lossy(&diagnostics).into_owned(),
             outcome }
}
