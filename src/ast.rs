use std::fmt;

use crate::interpreter::lexer::token::Span;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers every constant that can appear directly in source
/// code. Tokens carry one as their literal payload as well, with
/// [`LiteralValue::Null`] standing in for "no literal" on punctuation and
/// keywords.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LiteralValue {
    /// A double-quoted string with escapes already resolved.
    Str(String),
    /// Every numeral form is stored as a double.
    Number(f64),
    /// `true` or `false`.
    Bool(bool),
    /// `null`, or the absence of a literal.
    #[default]
    Null,
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// When an assignment expression yields its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignTiming {
    /// Yield the value the variable held before the write. Postfix `++`/`--`
    /// desugar to this.
    Before,
    /// Yield the freshly written value.
    After,
}

/// Whether a declaration creates a reassignable binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutability {
    /// `let`
    Let,
    /// `const`
    Const,
}

/// An abstract syntax tree (AST) node representing an expression.
///
/// Every node exclusively owns its children. Nodes that can fail at runtime
/// or that name a variable keep the [`Span`] of the token they came from.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Writes `value` into the variable `name`.
    Assign {
        /// Target variable, including its `@` sigil.
        name:   String,
        /// Span of the target token.
        span:   Span,
        /// The value to store.
        value:  Box<Self>,
        /// Which value the expression yields.
        timing: AssignTiming,
    },
    /// Short-circuiting `and` / `or`.
    Logical {
        /// Left operand, always evaluated.
        left:  Box<Self>,
        /// The operator.
        op:    LogicalOperator,
        /// Right operand, evaluated only when the left does not decide.
        right: Box<Self>,
        /// Span of the operator token.
        span:  Span,
    },
    /// `condition ? left : right`
    Trinary {
        /// The condition.
        condition: Box<Self>,
        /// Result when the condition is truthy.
        left:      Box<Self>,
        /// Result when the condition is falsy.
        right:     Box<Self>,
    },
    /// An eagerly evaluated binary operation.
    Binary {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Span of the operator token.
        span:  Span,
    },
    /// A prefix operation.
    Unary {
        /// The operator.
        op:      UnaryOperator,
        /// The operand. For `++`/`--` this is always an [`Expr::Variable`].
        operand: Box<Self>,
        /// Span of the operator token.
        span:    Span,
    },
    /// Reads a variable.
    Variable {
        /// Variable name, including its `@` sigil.
        name: String,
        /// Span of the identifier token.
        span: Span,
    },
    /// A constant.
    Literal {
        /// The constant value.
        value: LiteralValue,
    },
    /// A backtick string whose `@name` references are substituted at runtime.
    StringInterpolation {
        /// The raw text between the backticks.
        template: String,
    },
    /// A parenthesized expression.
    Grouping {
        /// The wrapped expression.
        inner: Box<Self>,
    },
}

impl Expr {
    /// Shorthand for a literal node.
    #[must_use]
    pub fn literal(value: impl Into<LiteralValue>) -> Self {
        Self::Literal { value: value.into() }
    }
}

/// Represents a statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// An expression evaluated for its side effects.
    Expression {
        /// The expression.
        expr: Expr,
    },
    /// `console expr;` writes the value to the output channel.
    Console {
        /// The expression to print.
        expr: Expr,
    },
    /// A single `let` or `const` binding.
    VariableDeclaration {
        /// Variable name, including its `@` sigil.
        name:        String,
        /// Span of the identifier token.
        span:        Span,
        /// Initial value; absent means `null`.
        initializer: Option<Expr>,
        /// `let` or `const`.
        mutability:  Mutability,
    },
    /// `{ ... }` with its own scope.
    Block {
        /// Statements in source order. Empty statements are dropped.
        statements: Vec<Self>,
    },
    /// `if (condition) then else otherwise`
    IfThen {
        /// The condition.
        condition:   Expr,
        /// Runs when the condition is truthy; absent for an empty statement.
        then_branch: Option<Box<Self>>,
        /// Runs otherwise, if present.
        else_branch: Option<Box<Self>>,
    },
    /// `while (condition) body`
    While {
        /// Re-evaluated before every iteration.
        condition: Expr,
        /// Absent for `while (...);`.
        body:      Option<Box<Self>>,
    },
    /// `for (initializer; condition; increment) body`
    For {
        /// Runs once inside the loop's own scope.
        initializer: Vec<Self>,
        /// Re-evaluated before every iteration; `true` when omitted.
        condition:   Expr,
        /// Runs after every iteration, including ones left by `continue`.
        increment:   Option<Expr>,
        /// Absent for `for (...);`.
        body:        Option<Box<Self>>,
    },
    /// Leaves the innermost loop.
    Break {
        /// Span of the keyword.
        span: Span,
    },
    /// Skips to the next iteration of the innermost loop.
    Continue {
        /// Span of the keyword.
        span: Span,
    },
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Greater than (`>`)
    Greater,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Less than (`<`)
    Less,
    /// Less than or equal (`<=`)
    LessEqual,
}

/// Represents a short-circuiting operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LogicalOperator {
    /// `and`
    And,
    /// `or`
    Or,
}

/// Represents a prefix operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Numeric identity (`+x`).
    Plus,
    /// Arithmetic negation (`-x`).
    Negate,
    /// Logical NOT (`!x`).
    Not,
    /// Dynamic type name (`typeof x`).
    Typeof,
    /// Prefix increment (`++@x`).
    Increment,
    /// Prefix decrement (`--@x`).
    Decrement,
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinaryOperator::{Add, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mul,
                             NotEqual, Sub};
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Equal => "==",
            NotEqual => "!=",
            Greater => ">",
            GreaterEqual => ">=",
            Less => "<",
            LessEqual => "<=",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for LogicalOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => write!(f, "and"),
            Self::Or => write!(f, "or"),
        }
    }
}
