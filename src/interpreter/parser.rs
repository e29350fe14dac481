/// Cursor, entry point and error recovery.
///
/// Owns the token cursor, the loop-nesting counter used to validate `break`
/// and `continue`, and the panic-mode synchronization that lets one pass
/// report several syntax errors.
pub mod core;

/// Statement parsing.
///
/// Declarations, blocks, `console`, `if`, `while`, `for`, `break`,
/// `continue` and expression statements.
pub mod statement;

/// Binary precedence levels.
///
/// Everything from `or` down to multiplication, including the trinary
/// conditional.
pub mod binary;

/// Prefix, postfix and primary expressions.
pub mod unary;

pub use core::{ParseOutput, parse};
