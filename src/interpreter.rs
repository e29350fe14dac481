/// The scope chain.
///
/// Bindings live in an arena of scopes addressed by index. Blocks and `for`
/// loops push a child scope and restore the previous one when they finish.
///
/// # Responsibilities
/// - Declares variables and constants, rejecting redeclaration in one scope.
/// - Resolves reads and writes from the innermost scope outwards.
/// - Refuses writes to constants.
pub mod environment;
/// The evaluator module executes AST nodes and computes results.
///
/// The evaluator walks the statements the parser produced, evaluates their
/// expressions against the scope chain and writes `console` output. The first
/// runtime error stops the program.
///
/// # Responsibilities
/// - Evaluates expressions, checking operand types at runtime.
/// - Executes statements, carrying `break` and `continue` out to their loop.
/// - Expands `@name` references in backtick strings.
pub mod evaluator;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to punctuation, an operator, a literal, a keyword or an `@`
/// identifier. Malformed input is reported and skipped, so one pass finds
/// every lexical error.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with a source span.
/// - Decodes numerals and resolves escapes in double-quoted strings.
/// - Collects lexical errors without stopping.
pub mod lexer;
/// The parser module builds the abstract syntax tree (AST) from tokens.
///
/// The parser is a recursive-descent parser with one function per precedence
/// level. After a syntax error it discards tokens up to the next statement
/// boundary and carries on.
///
/// # Responsibilities
/// - Converts tokens into statements and expressions.
/// - Rejects `break` and `continue` outside loops.
/// - Reports every independent syntax error with its position.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// # Responsibilities
/// - Defines the `Value` enum: `null`, numbers, booleans and strings.
/// - Implements truthiness, `typeof` names and the text `console` prints.
pub mod value;
