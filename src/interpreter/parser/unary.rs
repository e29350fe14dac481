use crate::{ast::{AssignTiming, BinaryOperator, Expr, LiteralValue, UnaryOperator},
            error::ParseErrorKind,
            interpreter::{lexer::token::TokenKind,
                          parser::core::{ParseResult, TokenCursor, parse_expression}}};

/// Parses prefix operators.
///
/// Prefix operators nest, so `- - @a` and `!typeof @a` are valid. Prefix
/// `++` and `--` need a variable operand; whether that variable holds a
/// number is only known at runtime.
///
/// The rule is: `unary := ("+" | "-" | "!" | "typeof" | "++" | "--") unary |
/// postfix`
///
/// # Parameters
/// - `cursor`: Token cursor.
///
/// # Returns
/// An [`Expr::Unary`] node, or whatever the postfix level produced.
///
/// # Errors
/// - `InvalidPrefixOperand` if `++`/`--` is applied to anything other than a
///   variable.
pub fn parse_unary(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let Some(operator) = cursor.advance_if(&[TokenKind::Plus,
                                             TokenKind::Minus,
                                             TokenKind::Bang,
                                             TokenKind::Typeof,
                                             TokenKind::PlusPlus,
                                             TokenKind::MinusMinus])
    else {
        return parse_postfix(cursor);
    };

    let op = match operator.kind {
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Minus => UnaryOperator::Negate,
        TokenKind::Bang => UnaryOperator::Not,
        TokenKind::Typeof => UnaryOperator::Typeof,
        TokenKind::PlusPlus => UnaryOperator::Increment,
        _ => UnaryOperator::Decrement,
    };
    let operand = parse_unary(cursor)?;

    if matches!(op, UnaryOperator::Increment | UnaryOperator::Decrement)
       && !matches!(operand, Expr::Variable { .. })
    {
        return Err(cursor.error_at(operator, ParseErrorKind::InvalidPrefixOperand));
    }

    Ok(Expr::Unary { op,
                     operand: Box::new(operand),
                     span: operator.span })
}

/// Parses a postfix `++` or `--`.
///
/// `@a++` becomes an assignment of `@a + 1` to `@a` that yields the value
/// `@a` held before, and `@a--` the same with subtraction.
///
/// The rule is: `postfix := primary ("++" | "--")?`
fn parse_postfix(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let expr = parse_primary(cursor)?;
    let Some(operator) = cursor.advance_if(&[TokenKind::PlusPlus, TokenKind::MinusMinus]) else {
        return Ok(expr);
    };

    let Expr::Variable { name, span } = expr else {
        return Err(cursor.error_at(operator, ParseErrorKind::InvalidPostfixOperand));
    };
    let op = if operator.kind == TokenKind::PlusPlus {
        BinaryOperator::Add
    } else {
        BinaryOperator::Sub
    };
    let value = Expr::Binary { left: Box::new(Expr::Variable { name: name.clone(),
                                                               span }),
                               op,
                               right: Box::new(Expr::literal(1.0)),
                               span: operator.span };

    Ok(Expr::Assign { name,
                      span,
                      value: Box::new(value),
                      timing: AssignTiming::Before })
}

/// Parses a primary expression.
///
/// Supports:
/// - `null`, `true`, `false`, numbers and double-quoted strings.
/// - backtick strings, interpolated at runtime.
/// - `@name` variable references.
/// - parenthesized expressions.
///
/// # Errors
/// - `UnsupportedTemplateString` for a single-quoted literal.
/// - `Expected` if a group is not closed.
/// - `ExpectExpression` for any other token, or at the end of input.
fn parse_primary(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let Some(token) = cursor.peek() else {
        return Err(cursor.error_at_current(ParseErrorKind::ExpectExpression));
    };

    let expr = match token.kind {
        TokenKind::Null => Expr::literal(LiteralValue::Null),
        TokenKind::True | TokenKind::False | TokenKind::Number | TokenKind::String => {
            Expr::Literal { value: token.literal.clone() }
        },
        TokenKind::InterpolatedString => Expr::StringInterpolation { template: token.text()
                                                                                    .to_owned() },
        TokenKind::Identifier => Expr::Variable { name: token.text().to_owned(),
                                                  span: token.span, },
        TokenKind::LeftParen => {
            cursor.advance();
            let inner = parse_expression(cursor)?;
            cursor.expect(TokenKind::RightParen, "Expect ')' after expression.")?;
            return Ok(Expr::Grouping { inner: Box::new(inner) });
        },
        TokenKind::TemplateString => {
            return Err(cursor.error_at(token, ParseErrorKind::UnsupportedTemplateString));
        },
        _ => return Err(cursor.error_at(token, ParseErrorKind::ExpectExpression)),
    };

    cursor.advance();
    Ok(expr)
}
