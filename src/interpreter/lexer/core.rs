use std::mem;

use log::debug;
use logos::Logos;

use crate::{ast::LiteralValue,
            error::{LexicalError, LexicalErrorKind},
            util::source_map::SourceMap};

use super::token::{Span, Token, TokenKind, WHITESPACE};

/// Everything the lexer found in one pass.
#[derive(Debug, Default)]
pub struct LexOutput {
    /// Tokens in source order.
    pub tokens: Vec<Token>,
    /// Every lexical error, in source order.
    pub errors: Vec<LexicalError>,
}

/// Tokenizes a whole source text.
///
/// Scanning never stops at a bad lexeme. Each failure is recorded with its
/// position and the scanner carries on, so one pass reports every lexical
/// error in the file:
/// - an unexpected character skips ahead to the next whitespace;
/// - an unknown bare word skips just that word;
/// - an unterminated string resumes after the newline that ended it.
///
/// # Parameters
/// - `source`: The text to scan, wrapped in the map used to locate errors.
///
/// # Returns
/// The tokens and errors found, both in source order.
///
/// # Example
/// ```
/// use pencil::{interpreter::lexer::{token::TokenKind, tokenize},
///              util::source_map::SourceMap};
///
/// let output = tokenize(&SourceMap::new("console @x;"));
/// let kinds: Vec<_> = output.tokens.iter().map(|token| token.kind).collect();
///
/// assert!(output.errors.is_empty());
/// assert_eq!(kinds, [TokenKind::Console, TokenKind::Identifier, TokenKind::Semicolon]);
/// ```
#[must_use]
pub fn tokenize(source: &SourceMap<'_>) -> LexOutput {
    let mut lexer = TokenKind::lexer(source.source());
    let mut output = LexOutput::default();

    while let Some(result) = lexer.next() {
        let span = Span::from(lexer.span());
        let literal = mem::take(&mut lexer.extras.literal);

        let kind = match result {
            Ok(TokenKind::Word) => resolve_word(&output.tokens, lexer.slice()),
            Ok(kind) => Ok((kind, literal)),
            Err(LexicalErrorKind::UnexpectedCharacter) => {
                let rest = lexer.remainder();
                lexer.bump(rest.find(WHITESPACE).unwrap_or(rest.len()));
                Err(LexicalErrorKind::UnexpectedCharacter)
            },
            Err(kind) => Err(kind),
        };

        match kind {
            Ok((kind, literal)) => output.tokens.push(Token { kind, literal, span }),
            Err(kind) => output.errors.push(LexicalError { kind,
                                                           position: source.locate(span.start) }),
        }
    }

    debug!("lexed {} tokens, {} lexical errors",
           output.tokens.len(),
           output.errors.len());
    output
}

/// Decides what a bare, non-keyword word is.
///
/// Right after a `.` it names a member and becomes an identifier; anywhere
/// else it is an unknown keyword.
fn resolve_word(tokens: &[Token], word: &str) -> Result<(TokenKind, LiteralValue), LexicalErrorKind> {
    match tokens.last() {
        Some(previous) if previous.kind == TokenKind::Dot => {
            Ok((TokenKind::Identifier, LiteralValue::from(word)))
        },
        _ => Err(LexicalErrorKind::UnknownKeyword),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::source_map::Position;

    fn lex(source: &str) -> LexOutput {
        tokenize(&SourceMap::new(source))
    }

    fn kinds(output: &LexOutput) -> Vec<TokenKind> {
        output.tokens.iter().map(|token| token.kind).collect()
    }

    #[test]
    fn declaration_statement() {
        let output = lex("let @x = 5;");
        assert!(output.errors.is_empty());
        assert_eq!(kinds(&output),
                   [TokenKind::Let,
                    TokenKind::Identifier,
                    TokenKind::Equal,
                    TokenKind::Number,
                    TokenKind::Semicolon]);
        assert_eq!(output.tokens[1].literal, LiteralValue::from("@x"));
        assert_eq!(output.tokens[3].literal, LiteralValue::Number(5.0));
    }

    #[test]
    fn spans_are_half_open_byte_ranges() {
        let output = lex("  @ab <= 1");
        let spans: Vec<_> = output.tokens.iter().map(|token| (token.span.start, token.span.end)).collect();
        assert_eq!(spans, [(2, 5), (6, 8), (9, 10)]);
    }

    #[test]
    fn booleans_carry_their_value() {
        let output = lex("true false null");
        let literals: Vec<_> = output.tokens.iter().map(|token| token.literal.clone()).collect();
        assert_eq!(literals,
                   [LiteralValue::Bool(true), LiteralValue::Bool(false), LiteralValue::Null]);
    }

    #[test]
    fn unexpected_character_skips_to_whitespace() {
        let output = lex("1 $abc+2 3");
        assert_eq!(kinds(&output), [TokenKind::Number, TokenKind::Number]);
        assert_eq!(output.errors,
                   [LexicalError { kind:     LexicalErrorKind::UnexpectedCharacter,
                                   position: Position { line: 1, column: 3 }, }]);
    }

    #[test]
    fn unknown_word_skips_only_the_word() {
        let output = lex("console hello;");
        assert_eq!(kinds(&output), [TokenKind::Console, TokenKind::Semicolon]);
        assert_eq!(output.errors[0].to_string(), "At [1:9] >Unknown keyword!");
    }

    #[test]
    fn word_after_dot_is_a_member_identifier() {
        let output = lex("@obj.field");
        assert!(output.errors.is_empty());
        assert_eq!(kinds(&output),
                   [TokenKind::Identifier, TokenKind::Dot, TokenKind::Identifier]);
        assert_eq!(output.tokens[2].literal, LiteralValue::from("field"));
    }

    #[test]
    fn every_error_is_collected() {
        let output = lex("let @1 = \"open\n@ok = 0x;\n~");
        let messages: Vec<_> = output.errors.iter().map(ToString::to_string).collect();
        assert_eq!(messages,
                   ["At [1:5] >Variables names can't start with numbers nor with special \
                     characters!",
                    "At [1:10] >Unterminated string. Expected \"",
                    "At [2:7] >Invalid hexadecimal literal.",
                    "At [3:1] >Unexpected character!"]);
        assert_eq!(kinds(&output),
                   [TokenKind::Let,
                    TokenKind::Equal,
                    TokenKind::Identifier,
                    TokenKind::Equal,
                    TokenKind::Semicolon]);
    }

    #[test]
    fn empty_source_has_no_tokens() {
        let output = lex("");
        assert!(output.tokens.is_empty());
        assert!(output.errors.is_empty());
    }
}
