use log::debug;

use crate::{ast::{AssignTiming, BinaryOperator, Expr, Statement},
            error::{ParseError, ParseErrorKind},
            interpreter::{lexer::token::{Token, TokenKind},
                          parser::{binary::parse_logical_or, statement::parse_declaration}},
            util::source_map::SourceMap};

pub type ParseResult<T> = Result<T, ParseError>;

/// Everything the parser produced in one pass.
#[derive(Debug, Default)]
pub struct ParseOutput {
    /// Statements that parsed cleanly, in source order.
    pub statements: Vec<Statement>,
    /// Every syntax error, in the order it was found.
    pub errors:     Vec<ParseError>,
}

/// A position in the token stream plus the state grammar rules share.
#[derive(Debug)]
pub struct TokenCursor<'a> {
    tokens:         &'a [Token],
    current:        usize,
    source:         &'a SourceMap<'a>,
    /// Number of loop bodies currently being parsed.
    pub loop_depth: usize,
    /// Syntax errors recorded so far.
    pub errors:     Vec<ParseError>,
}

impl<'a> TokenCursor<'a> {
    /// Places a cursor before the first token.
    #[must_use]
    pub fn new(tokens: &'a [Token], source: &'a SourceMap<'a>) -> Self {
        Self { tokens,
               current: 0,
               source,
               loop_depth: 0,
               errors: Vec::new() }
    }

    /// Returns `true` once every token has been consumed.
    #[must_use]
    pub const fn is_at_end(&self) -> bool {
        self.current >= self.tokens.len()
    }

    /// The next unconsumed token.
    #[must_use]
    pub fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.current)
    }

    /// The most recently consumed token.
    #[must_use]
    pub fn previous(&self) -> Option<&'a Token> {
        self.current.checked_sub(1).and_then(|index| self.tokens.get(index))
    }

    /// Consumes and returns the next token, if any.
    pub fn advance(&mut self) -> Option<&'a Token> {
        let token = self.peek()?;
        self.current += 1;
        Some(token)
    }

    /// Returns `true` if the next token is of `kind`.
    #[must_use]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek().is_some_and(|token| token.kind == kind)
    }

    /// Consumes the next token if it is any of `kinds`.
    pub fn advance_if(&mut self, kinds: &[TokenKind]) -> Option<&'a Token> {
        if self.peek().is_some_and(|token| kinds.contains(&token.kind)) {
            return self.advance();
        }
        None
    }

    /// Consumes a token of `kind`, or fails with `message` reported at the
    /// last consumed token.
    pub fn expect(&mut self, kind: TokenKind, message: &'static str) -> ParseResult<&'a Token> {
        match self.advance_if(&[kind]) {
            Some(token) => Ok(token),
            None => Err(self.error_at_previous(ParseErrorKind::Expected(message))),
        }
    }

    /// Builds an error located at `token`.
    #[must_use]
    pub fn error_at(&self, token: &Token, kind: ParseErrorKind) -> ParseError {
        ParseError { kind,
                     position: self.source.locate(token.span.start) }
    }

    /// Builds an error located at the last consumed token, or at the first
    /// token when nothing has been consumed yet.
    #[must_use]
    pub fn error_at_previous(&self, kind: ParseErrorKind) -> ParseError {
        match self.previous().or_else(|| self.peek()) {
            Some(token) => self.error_at(token, kind),
            None => ParseError { kind,
                                 position: self.source.locate(0) },
        }
    }

    /// Builds an error located at the next token, or at the last consumed
    /// one at the end of input.
    #[must_use]
    pub fn error_at_current(&self, kind: ParseErrorKind) -> ParseError {
        match self.peek() {
            Some(token) => self.error_at(token, kind),
            None => self.error_at_previous(kind),
        }
    }

    /// Discards tokens until a likely statement boundary.
    ///
    /// Stops right after a `;`, or before a token that starts a declaration
    /// or statement.
    pub fn synchronize(&mut self) {
        self.advance();
        while let Some(token) = self.peek() {
            if self.previous().is_some_and(|previous| previous.kind == TokenKind::Semicolon) {
                return;
            }
            if matches!(token.kind,
                        TokenKind::Fun
                        | TokenKind::Let
                        | TokenKind::Const
                        | TokenKind::If
                        | TokenKind::While
                        | TokenKind::Return)
            {
                return;
            }
            self.advance();
        }
    }
}

/// Parses a whole program.
///
/// A syntax error abandons only the declaration it occurred in: the error is
/// recorded, the cursor synchronizes and parsing continues, so every
/// independent error in the program is reported in one pass.
///
/// Grammar: `program := declaration*`
///
/// # Parameters
/// - `tokens`: The output of the lexer.
/// - `source`: Used to turn token offsets into error positions.
///
/// # Returns
/// The statements that parsed and the errors found.
///
/// # Example
/// ```
/// use pencil::{interpreter::{lexer::tokenize, parser::parse},
///              util::source_map::SourceMap};
///
/// let source = SourceMap::new("let @a = 1; console @a;");
/// let output = parse(&tokenize(&source).tokens, &source);
///
/// assert!(output.errors.is_empty());
/// assert_eq!(output.statements.len(), 2);
/// ```
#[must_use]
pub fn parse(tokens: &[Token], source: &SourceMap<'_>) -> ParseOutput {
    let mut cursor = TokenCursor::new(tokens, source);
    let mut statements = Vec::new();

    while !cursor.is_at_end() {
        parse_declaration(&mut cursor, &mut statements);
    }
    let output = ParseOutput { statements,
                               errors: cursor.errors };

    debug!("parsed {} statements, {} syntax errors",
           output.statements.len(),
           output.errors.len());
    output
}

/// Parses a full expression.
///
/// Grammar: `expression := assignment`
pub fn parse_expression(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    parse_assignment(cursor)
}

/// Parses an assignment or compound assignment.
///
/// Assignment is right-associative and its target must be a bare variable.
/// `@a += x` desugars to `@a = @a + x`, and likewise for `-=`, `*=` and `/=`.
///
/// Grammar: `assignment := logical_or (("=" | "+=" | "-=" | "*=" | "/=")
/// assignment)?`
fn parse_assignment(cursor: &mut TokenCursor<'_>) -> ParseResult<Expr> {
    let target = parse_logical_or(cursor)?;

    let Some(operator) = cursor.advance_if(&[TokenKind::Equal,
                                             TokenKind::PlusEqual,
                                             TokenKind::MinusEqual,
                                             TokenKind::StarEqual,
                                             TokenKind::SlashEqual])
    else {
        return Ok(target);
    };
    let value = parse_assignment(cursor)?;

    let Expr::Variable { name, span } = target else {
        return Err(cursor.error_at(operator, ParseErrorKind::InvalidAssignmentTarget));
    };

    let value = match compound_operator(operator.kind) {
        Some(op) => Expr::Binary { left: Box::new(Expr::Variable { name: name.clone(),
                                                                   span }),
                                   op,
                                   right: Box::new(value),
                                   span: operator.span },
        None => value,
    };

    Ok(Expr::Assign { name,
                      span,
                      value: Box::new(value),
                      timing: AssignTiming::After })
}

/// Maps a compound assignment token to the operator it applies.
fn compound_operator(kind: TokenKind) -> Option<BinaryOperator> {
    match kind {
        TokenKind::PlusEqual => Some(BinaryOperator::Add),
        TokenKind::MinusEqual => Some(BinaryOperator::Sub),
        TokenKind::StarEqual => Some(BinaryOperator::Mul),
        TokenKind::SlashEqual => Some(BinaryOperator::Div),
        _ => None,
    }
}
