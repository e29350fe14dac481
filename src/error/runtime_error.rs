use thiserror::Error;

/// Represents all errors that can occur during evaluation.
///
/// Operator type errors keep the historical `At [:]` prefix with an empty
/// location, scope errors carry no location at all.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// Read of a name no enclosing scope defines.
    #[error("Undefined variable \"{name}\".")]
    UndefinedVariable {
        /// The variable name, including its `@` sigil.
        name: String,
    },
    /// Assignment to a name no enclosing scope defines.
    #[error("\"{name}\" is undefined.")]
    UndefinedAssignment {
        /// The variable name, including its `@` sigil.
        name: String,
    },
    /// Declaration of a name the current scope already holds.
    #[error("\"{name}\" already defined.")]
    Redeclared {
        /// The variable name, including its `@` sigil.
        name: String,
    },
    /// Assignment to a `const` binding.
    #[error("\"{name}\" is a constant!.")]
    ConstantAssignment {
        /// The constant name, including its `@` sigil.
        name: String,
    },
    /// `+` with operands that are neither two numbers nor a string on the left.
    #[error("At [:] >Operands must be in a valid type to add them.")]
    InvalidAddition,
    /// `-` with a non-numeric operand.
    #[error("At [:] >Operands must be numbers to subtract them.")]
    InvalidSubtraction,
    /// `*` with a non-numeric operand.
    #[error("At [:] >Operands must be numbers to multiply them.")]
    InvalidMultiplication,
    /// `/` with a non-numeric operand.
    #[error("At [:] >Operands must be numbers to divide them.")]
    InvalidDivision,
    /// `/` with a zero divisor.
    #[error("At [:] >You can't divide by zero!")]
    DivisionByZero,
    /// Ordering comparison between values of different or unordered types.
    #[error("At [:] >Pencil doesn't allow implicit casting on equality operators.")]
    ImplicitCast,
    /// Unary `+`/`-` on something other than a number or boolean.
    #[error("At [:] >Expected a number or boolean.")]
    ExpectedNumberOrBoolean,
    /// Prefix `++`/`--` on a variable that does not hold a number.
    #[error("At [:] >Variable must contain a number.")]
    ExpectedNumericVariable,
    /// A `break` signal reached the top level.
    #[error("BRK >Illegal break statement")]
    EscapedBreak,
    /// A `continue` signal reached the top level.
    #[error("CNT >Illegal continue statement")]
    EscapedContinue,
    /// The output channel refused a `console` line.
    #[error("Failed to write program output: {0}")]
    Output(String),
}
