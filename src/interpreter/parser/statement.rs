use crate::{ast::{Expr, Mutability, Statement},
            error::ParseErrorKind,
            interpreter::{lexer::token::TokenKind,
                          parser::core::{ParseResult, TokenCursor, parse_expression}}};

/// Parses one declaration and appends what it produced to `statements`.
///
/// This is where panic-mode recovery happens. A failing rule leaves its
/// error on the cursor, then the cursor synchronizes to the next statement
/// boundary and nothing is appended.
///
/// Grammar: `declaration := variable_declaration | statement`
pub fn parse_declaration(cursor: &mut TokenCursor<'_>, statements: &mut Vec<Statement>) {
    let parsed = if cursor.advance_if(&[TokenKind::Let, TokenKind::Const]).is_some() {
        parse_variable_declaration(cursor)
    } else {
        parse_statement(cursor).map(|statement| statement.into_iter().collect())
    };

    match parsed {
        Ok(parsed) => statements.extend(parsed),
        Err(error) => {
            cursor.errors.push(error);
            cursor.synchronize();
        },
    }
}

/// Parses the bindings after a `let` or `const` keyword.
///
/// Both forms accept a comma separated list and produce one declaration per
/// name. Every `const` binding needs an initializer; a `let` binding without
/// one starts out `null`.
///
/// Grammar:
/// ```text
/// variable_declaration := ("let" | "const") binding ("," binding)* ";"
/// binding              := IDENTIFIER ("=" expression)?
/// ```
///
/// # Parameters
/// - `cursor`: Positioned right after the keyword.
///
/// # Returns
/// One [`Statement::VariableDeclaration`] per binding, in order.
fn parse_variable_declaration(cursor: &mut TokenCursor<'_>) -> ParseResult<Vec<Statement>> {
    let mutability = match cursor.previous().map(|keyword| keyword.kind) {
        Some(TokenKind::Const) => Mutability::Const,
        _ => Mutability::Let,
    };
    let mut declarations = Vec::new();

    loop {
        let initializer;
        let identifier;
        if mutability == Mutability::Const {
            identifier = cursor.expect(TokenKind::Identifier, "Expect constant name.")?;
            cursor.expect(TokenKind::Equal, "Missing initializer in const declaration.")?;
            initializer = Some(parse_expression(cursor)?);
        } else {
            identifier = cursor.expect(TokenKind::Identifier, "Expect variable name.")?;
            initializer = match cursor.advance_if(&[TokenKind::Equal]) {
                Some(_) => Some(parse_expression(cursor)?),
                None => None,
            };
        }

        declarations.push(Statement::VariableDeclaration { name: identifier.text().to_owned(),
                                                           span: identifier.span,
                                                           initializer,
                                                           mutability });
        if cursor.advance_if(&[TokenKind::Comma]).is_none() {
            break;
        }
    }

    cursor.expect(TokenKind::Semicolon, "Expect ';' after variable declaration.")?;
    Ok(declarations)
}

/// Parses a single statement.
///
/// A statement may be one of:
/// - an empty statement (`;`), returned as `None`.
/// - a block.
/// - a `console` statement.
/// - an `if`, `while` or `for` statement.
/// - a `break` or `continue` inside a loop body.
/// - an expression followed by `;`.
///
/// # Returns
/// The statement, or `None` for an empty one.
pub fn parse_statement(cursor: &mut TokenCursor<'_>) -> ParseResult<Option<Statement>> {
    let Some(keyword) = cursor.advance_if(&[TokenKind::Semicolon,
                                            TokenKind::LeftBrace,
                                            TokenKind::Console,
                                            TokenKind::If,
                                            TokenKind::While,
                                            TokenKind::For,
                                            TokenKind::Break,
                                            TokenKind::Continue])
    else {
        let expr = parse_expression_statement(cursor)?;
        return Ok(Some(Statement::Expression { expr }));
    };

    let statement = match keyword.kind {
        TokenKind::Semicolon => return Ok(None),
        TokenKind::LeftBrace => Statement::Block { statements: parse_block(cursor)? },
        TokenKind::Console => Statement::Console { expr: parse_expression_statement(cursor)? },
        TokenKind::If => parse_if(cursor)?,
        TokenKind::While => parse_while(cursor)?,
        TokenKind::For => parse_for(cursor)?,
        TokenKind::Break => {
            if cursor.loop_depth == 0 {
                return Err(cursor.error_at(keyword, ParseErrorKind::IllegalBreak));
            }
            cursor.expect(TokenKind::Semicolon, "Expected ';' after break.")?;
            Statement::Break { span: keyword.span }
        },
        _ => {
            if cursor.loop_depth == 0 {
                return Err(cursor.error_at(keyword, ParseErrorKind::IllegalContinue));
            }
            cursor.expect(TokenKind::Semicolon, "Expected ';' after continue.")?;
            Statement::Continue { span: keyword.span }
        },
    };
    Ok(Some(statement))
}

/// Parses the statements of a block up to its closing `}`.
///
/// Each inner declaration recovers on its own, so an error inside a block
/// does not discard the statements around it.
fn parse_block(cursor: &mut TokenCursor<'_>) -> ParseResult<Vec<Statement>> {
    let mut statements = Vec::new();
    while !cursor.check(TokenKind::RightBrace) && !cursor.is_at_end() {
        parse_declaration(cursor, &mut statements);
    }
    cursor.expect(TokenKind::RightBrace, "Expect '}' after block.")?;
    Ok(statements)
}

fn parse_expression_statement(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let expr = parse_expression(cursor)?;
    cursor.expect(TokenKind::Semicolon, "Expect ';' after expression.")?;
    Ok(expr)
}

/// Grammar: `if := "if" "(" expression ")" statement ("else" statement)?`
fn parse_if(cursor: &mut TokenCursor<'_>) -> ParseResult<Statement> {
    cursor.expect(TokenKind::LeftParen, "Expect '(' after 'if'.")?;
    let condition = parse_expression(cursor)?;
    cursor.expect(TokenKind::RightParen, "Expect ')' after if condition.")?;

    let then_branch = parse_statement(cursor)?.map(Box::new);
    let else_branch = match cursor.advance_if(&[TokenKind::Else]) {
        Some(_) => parse_statement(cursor)?.map(Box::new),
        None => None,
    };

    Ok(Statement::IfThen { condition,
                           then_branch,
                           else_branch })
}

/// Grammar: `while := "while" "(" expression ")" statement`
fn parse_while(cursor: &mut TokenCursor<'_>) -> ParseResult<Statement> {
    cursor.expect(TokenKind::LeftParen, "Expect '(' after 'while'.")?;
    let condition = parse_expression(cursor)?;
    cursor.expect(TokenKind::RightParen, "Expect ')' after while condition.")?;

    let body = parse_loop_body(cursor)?;
    Ok(Statement::While { condition, body })
}

/// Parses a `for` loop.
///
/// The initializer is empty, a `let` declaration list, or an expression
/// statement. A missing condition loops forever and the increment may be
/// left out.
///
/// Grammar:
/// ```text
/// for := "for" "(" (";" | variable_declaration | expression ";")
///        expression? ";" expression? ")" statement
/// ```
fn parse_for(cursor: &mut TokenCursor<'_>) -> ParseResult<Statement> {
    cursor.expect(TokenKind::LeftParen, "Expect '(' after 'for'.")?;

    let initializer = if cursor.advance_if(&[TokenKind::Semicolon]).is_some() {
        Vec::new()
    } else if cursor.advance_if(&[TokenKind::Let]).is_some() {
        parse_variable_declaration(cursor)?
    } else {
        vec![Statement::Expression { expr: parse_expression_statement(cursor)? }]
    };

    let condition = if cursor.check(TokenKind::Semicolon) {
        Expr::literal(true)
    } else {
        parse_expression(cursor)?
    };
    cursor.expect(TokenKind::Semicolon, "Expect ';' after loop condition.")?;

    let increment = if cursor.check(TokenKind::RightParen) {
        None
    } else {
        Some(parse_expression(cursor)?)
    };
    cursor.expect(TokenKind::RightParen, "Expect ')' after for clauses.")?;

    let body = parse_loop_body(cursor)?;
    Ok(Statement::For { initializer,
                        condition,
                        increment,
                        body })
}

/// Parses a loop body with `break` and `continue` allowed inside it.
fn parse_loop_body(cursor: &mut TokenCursor<'_>) -> ParseResult<Option<Box<Statement>>> {
    cursor.loop_depth += 1;
    let body = parse_statement(cursor);
    cursor.loop_depth -= 1;
    Ok(body?.map(Box::new))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use crate::{ast::{AssignTiming, BinaryOperator, LiteralValue},
                interpreter::{lexer::tokenize,
                              parser::{ParseOutput, parse}},
                util::source_map::SourceMap};

    use super::*;

    fn parse_source(source: &str) -> ParseOutput {
        let map = SourceMap::new(source);
        let lexed = tokenize(&map);
        assert!(lexed.errors.is_empty(), "lexical errors: {:?}", lexed.errors);
        parse(&lexed.tokens, &map)
    }

    fn messages(output: &ParseOutput) -> Vec<String> {
        output.errors.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn let_list_declares_each_name() {
        let output = parse_source("let @a = 1, @b, @c = 3;");
        let declared: Vec<_> = output.statements
                                     .iter()
                                     .map(|statement| match statement {
                                         Statement::VariableDeclaration { name,
                                                                          initializer,
                                                                          mutability: Mutability::Let,
                                                                          .. } => {
                                             (name.as_str(), initializer.is_some())
                                         },
                                         other => panic!("unexpected {other:?}"),
                                     })
                                     .collect();
        assert_eq!(declared, [("@a", true), ("@b", false), ("@c", true)]);
    }

    #[test]
    fn const_requires_an_initializer() {
        let output = parse_source("const @a = 1, @b;");
        assert_eq!(messages(&output),
                   ["At [1:15] >Missing initializer in const declaration."]);
    }

    #[test]
    fn break_and_continue_outside_loops_are_rejected() {
        let output = parse_source("break;\ncontinue;\nwhile (true) { break; }");
        assert_eq!(messages(&output),
                   ["At [1:1] >Illegal break statement.",
                    "At [2:1] >Illegal continue statement."]);
        assert_eq!(output.statements.len(), 1);
    }

    #[test]
    fn loop_depth_is_restored_after_a_broken_body() {
        let output = parse_source("while (true) @a = ;\nbreak;");
        assert_eq!(messages(&output),
                   ["At [1:19] >Expect expression.", "At [2:1] >Illegal break statement."]);
    }

    #[test]
    fn break_nested_in_if_inside_loop_is_legal() {
        let output = parse_source("for (;;) if (@x) break; else continue;");
        assert!(output.errors.is_empty(), "{:?}", messages(&output));
    }

    #[test]
    fn for_clauses_are_optional() {
        let output = parse_source("for (;;) ;");
        assert_eq!(output.statements,
                   [Statement::For { initializer: Vec::new(),
                                     condition:   Expr::literal(true),
                                     increment:   None,
                                     body:        None, }]);
    }

    #[test]
    fn for_with_declaration_and_postfix_increment() {
        let output = parse_source("for (let @i = 0; @i < 3; @i++) console @i;");
        let [Statement::For { initializer,
                              increment: Some(Expr::Assign { timing, value, .. }),
                              body: Some(body),
                              .. }] = output.statements.as_slice()
        else {
            panic!("unexpected statements: {:?}", output.statements);
        };
        assert_eq!(initializer.len(), 1);
        assert_eq!(*timing, AssignTiming::Before);
        assert!(matches!(value.as_ref(), Expr::Binary { op: BinaryOperator::Add, .. }));
        assert!(matches!(body.as_ref(), Statement::Console { .. }));
    }

    #[test]
    fn for_with_expression_initializer() {
        let output = parse_source("for (@i = 0; @i < 3;) @i += 1;");
        let [Statement::For { initializer, increment: None, .. }] = output.statements.as_slice()
        else {
            panic!("unexpected statements: {:?}", output.statements);
        };
        assert!(matches!(initializer.as_slice(),
                         [Statement::Expression { expr: Expr::Assign { .. } }]));
    }

    #[test]
    fn dangling_else_binds_to_nearest_if() {
        let output = parse_source("if (@a) if (@b) console 1; else console 2;");
        let [Statement::IfThen { then_branch: Some(inner),
                                 else_branch: None,
                                 .. }] = output.statements.as_slice()
        else {
            panic!("unexpected statements: {:?}", output.statements);
        };
        assert!(matches!(inner.as_ref(), Statement::IfThen { else_branch: Some(_), .. }));
    }

    #[test]
    fn errors_inside_blocks_keep_surrounding_statements() {
        let output = parse_source(indoc! {r#"
            {
                console "before";
                console ;
                console "after";
            }
        "#});
        assert_eq!(messages(&output), ["At [3:13] >Expect expression."]);
        let [Statement::Block { statements }] = output.statements.as_slice() else {
            panic!("unexpected statements: {:?}", output.statements);
        };
        assert_eq!(statements,
                   &[Statement::Console { expr: Expr::Literal { value:
                                                                   LiteralValue::from("before") } },
                     Statement::Console { expr: Expr::Literal { value:
                                                                   LiteralValue::from("after") } }]);
    }

    #[test]
    fn missing_closing_brace_is_reported() {
        let output = parse_source("{ console 1;");
        assert_eq!(messages(&output), ["At [1:12] >Expect '}' after block."]);
    }

    #[test]
    fn declarations_are_not_statements() {
        let output = parse_source("if (true) let @a = 1;");
        assert_eq!(messages(&output), ["At [1:11] >Expect expression."]);
    }
}
