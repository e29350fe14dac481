/// Core evaluation logic and interpreter state.
///
/// Contains the [`core::Interpreter`], expression dispatch, the control flow
/// signal returned by statements and the guard that closes scopes on every
/// exit path.
pub mod core;

/// Statement execution.
///
/// Declarations, `console`, blocks, `if` and `while`.
pub mod statement;

/// Evaluation of `for` loops.
///
/// Runs the initializer once in a scope that lives as long as the loop and
/// runs the increment after every iteration, including ones cut short by
/// `continue`.
pub mod for_loop;

/// Binary operator evaluation logic.
///
/// Arithmetic, string concatenation, equality and ordering, plus the
/// short-circuiting `and`/`or` and the trinary conditional.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Numeric identity and negation, logical NOT, `typeof` and the prefix
/// update operators.
pub mod unary;

/// Backtick string interpolation.
pub mod interpolation;
