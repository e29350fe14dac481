use crate::{ast::{BinaryOperator, Expr, LogicalOperator},
            interpreter::{lexer::token::TokenKind,
                          parser::{core::{ParseResult, TokenCursor},
                                   unary::parse_unary}}};

/// Parses a chain of `or` operations.
///
/// The rule is: `logical_or := logical_and ("or" logical_and)*`
///
/// # Parameters
/// - `cursor`: Token cursor.
///
/// # Returns
/// A left-associative tree of [`Expr::Logical`] nodes.
pub fn parse_logical_or(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let mut left = parse_logical_and(cursor)?;
    while let Some(operator) = cursor.advance_if(&[TokenKind::Or]) {
        let right = parse_logical_and(cursor)?;
        left = Expr::Logical { left:  Box::new(left),
                               op:    LogicalOperator::Or,
                               right: Box::new(right),
                               span:  operator.span, };
    }
    Ok(left)
}

/// Parses a chain of `and` operations.
///
/// The rule is: `logical_and := trinary ("and" trinary)*`
pub fn parse_logical_and(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let mut left = parse_trinary(cursor)?;
    while let Some(operator) = cursor.advance_if(&[TokenKind::And]) {
        let right = parse_trinary(cursor)?;
        left = Expr::Logical { left:  Box::new(left),
                               op:    LogicalOperator::And,
                               right: Box::new(right),
                               span:  operator.span, };
    }
    Ok(left)
}

/// Parses the conditional operator.
///
/// Both branches may themselves be conditionals, so `a ? b : c ? d : e`
/// nests to the right.
///
/// The rule is: `trinary := equality ("?" trinary ":" trinary)?`
pub fn parse_trinary(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let condition = parse_equality(cursor)?;
    if cursor.advance_if(&[TokenKind::QuestionMark]).is_none() {
        return Ok(condition);
    }

    let left = parse_trinary(cursor)?;
    cursor.expect(TokenKind::Colon, "Expected ':'.")?;
    let right = parse_trinary(cursor)?;

    Ok(Expr::Trinary { condition: Box::new(condition),
                       left:      Box::new(left),
                       right:     Box::new(right), })
}

/// Parses `==` and `!=`.
///
/// The rule is: `equality := comparison (("==" | "!=") comparison)*`
pub fn parse_equality(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_binary_level(cursor,
                       &[TokenKind::EqualEqual, TokenKind::BangEqual],
                       parse_comparison)
}

/// Parses the ordering comparisons `>`, `>=`, `<` and `<=`.
///
/// The rule is: `comparison := additive ((">" | ">=" | "<" | "<=") additive)*`
pub fn parse_comparison(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_binary_level(cursor,
                       &[TokenKind::Greater,
                         TokenKind::GreaterEqual,
                         TokenKind::Less,
                         TokenKind::LessEqual],
                       parse_additive)
}

/// Parses addition and subtraction.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_binary_level(cursor, &[TokenKind::Plus, TokenKind::Minus], parse_multiplicative)
}

/// Parses multiplication and division.
///
/// The rule is: `multiplicative := unary (("*" | "/") unary)*`
pub fn parse_multiplicative(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_binary_level(cursor, &[TokenKind::Star, TokenKind::Slash], parse_unary)
}

/// Parses one left-associative precedence level.
///
/// # Parameters
/// - `cursor`: Token cursor.
/// - `operators`: The tokens that belong to this level.
/// - `operand`: Parser for the next tighter level.
///
/// # Returns
/// The operands folded into [`Expr::Binary`] nodes from left to right.
fn parse_binary_level(cursor: &mut TokenCursor<'_>,
                      operators: &[TokenKind],
                      operand: fn(&mut TokenCursor<'_>) -> ParseResult<Expr>)
                      -> ParseResult<Expr> {
    let mut left = operand(cursor)?;
    while let Some(token) = cursor.advance_if(operators)
          && let Some(op) = token_to_binary_operator(token.kind)
    {
        let right = operand(cursor)?;
        left = Expr::Binary { left: Box::new(left),
                              op,
                              right: Box::new(right),
                              span: token.span };
    }
    Ok(left)
}

/// Maps an operator token to its [`BinaryOperator`].
///
/// # Returns
/// `None` for tokens that are not binary operators.
#[must_use]
pub const fn token_to_binary_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::Plus => Some(BinaryOperator::Add),
        TokenKind::Minus => Some(BinaryOperator::Sub),
        TokenKind::Star => Some(BinaryOperator::Mul),
        TokenKind::Slash => Some(BinaryOperator::Div),
        TokenKind::EqualEqual => Some(BinaryOperator::Equal),
        TokenKind::BangEqual => Some(BinaryOperator::NotEqual),
        TokenKind::Greater => Some(BinaryOperator::Greater),
        TokenKind::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        TokenKind::Less => Some(BinaryOperator::Less),
        TokenKind::LessEqual => Some(BinaryOperator::LessEqual),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ast::Statement,
                interpreter::{lexer::tokenize, parser::parse},
                util::source_map::SourceMap};

    fn expression(source: &str) -> Expr {
        let map = SourceMap::new(source);
        let output = parse(&tokenize(&map).tokens, &map);
        assert!(output.errors.is_empty(), "syntax errors: {:?}", output.errors);
        match output.statements.into_iter().next() {
            Some(Statement::Expression { expr }) => expr,
            other => panic!("expected an expression statement, got {other:?}"),
        }
    }

    /// Renders the tree with explicit parentheses.
    fn shape(expr: &Expr) -> String {
        match expr {
            Expr::Binary { left, op, right, .. } => {
                format!("({} {op} {})", shape(left), shape(right))
            },
            Expr::Logical { left, op, right, .. } => {
                format!("({} {op} {})", shape(left), shape(right))
            },
            Expr::Trinary { condition,
                            left,
                            right, } => {
                format!("({} ? {} : {})", shape(condition), shape(left), shape(right))
            },
            Expr::Variable { name, .. } => name.clone(),
            Expr::Literal { value } => format!("{value:?}"),
            other => format!("{other:?}"),
        }
    }

    #[test]
    fn multiplication_binds_tighter_than_addition() {
        assert_eq!(shape(&expression("@a + @b * @c - @d;")),
                   "((@a + (@b * @c)) - @d)");
    }

    #[test]
    fn comparison_binds_tighter_than_equality() {
        assert_eq!(shape(&expression("@a < @b == @c >= @d;")),
                   "((@a < @b) == (@c >= @d))");
    }

    #[test]
    fn logical_operators_chain_left_to_right() {
        assert_eq!(shape(&expression("@a or @b or @c and @d;")),
                   "((@a or @b) or (@c and @d))");
    }

    #[test]
    fn trinary_sits_between_and_and_equality() {
        assert_eq!(shape(&expression("@a and @b == @c ? @d : @e ? @f : @g;")),
                   "(@a and ((@b == @c) ? @d : (@e ? @f : @g)))");
    }

    #[test]
    fn missing_colon_is_reported() {
        let map = SourceMap::new("@a ? 1;");
        let output = parse(&tokenize(&map).tokens, &map);
        assert_eq!(output.errors[0].to_string(), "At [1:6] >Expected ':'.");
    }
}
