use std::ops::Range;

use logos::{Lexer, Logos, Skip};

use crate::{ast::LiteralValue, error::LexicalErrorKind};

use super::{number, string};

/// Characters that end an `@` name, in addition to whitespace.
pub(crate) const NAME_TERMINATORS: &str = "`~!@#$%^&*()|+-=?;:'\",.<>{}[]\\/";

/// The whitespace code points the scanner skips between tokens.
pub(crate) const WHITESPACE: [char; 12] = [' ', '\u{a0}', '\u{205f}', '\u{3000}', '\u{1680}',
                                           '\u{180e}', '\u{200a}', '\u{202f}', '\u{2000}', '\r',
                                           '\t', '\n'];

/// Returns `true` if `c` may appear inside an `@` name.
pub(crate) fn is_name_char(c: char) -> bool {
    !c.is_whitespace() && !NAME_TERMINATORS.contains(c)
}

/// A half-open byte range `start..end` into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end:   usize,
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self { start: range.start,
               end:   range.end, }
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of lexeme this is.
    pub kind:    TokenKind,
    /// The literal payload: the value of numbers, strings and booleans, the
    /// full name of identifiers, [`LiteralValue::Null`] for everything else.
    pub literal: LiteralValue,
    /// Where the lexeme sits in the source.
    pub span:    Span,
}

impl Token {
    /// Returns the identifier name or string body this token carries, or an
    /// empty string for tokens without text.
    #[must_use]
    pub fn text(&self) -> &str {
        match &self.literal {
            LiteralValue::Str(text) => text,
            _ => "",
        }
    }
}

/// State shared between the scanner callbacks and the driver.
#[derive(Debug, Default)]
pub struct LexerExtras {
    /// Literal payload of the lexeme just scanned. The driver takes it after
    /// every token, so it never leaks into the next one.
    pub literal: LiteralValue,
}

/// Represents every lexeme of the language.
///
/// The enum is the generated scanner as well: [`TokenKind::Word`] and
/// [`TokenKind::Comment`] only exist while scanning and never reach the
/// parser.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
#[logos(extras = LexerExtras)]
#[logos(error = LexicalErrorKind)]
#[logos(skip "[ \t\r\n\u{a0}\u{1680}\u{180e}\u{2000}\u{200a}\u{202f}\u{205f}\u{3000}]+")]
pub enum TokenKind {
    /// `(`
    #[token("(")]
    LeftParen,
    /// `)`
    #[token(")")]
    RightParen,
    /// `{`
    #[token("{")]
    LeftBrace,
    /// `}`
    #[token("}")]
    RightBrace,
    /// `[`
    #[token("[")]
    LeftBracket,
    /// `]`
    #[token("]")]
    RightBracket,
    /// `<{`
    #[token("<{")]
    ObjectOpening,
    /// `}>`
    #[token("}>")]
    ObjectClosing,
    /// `,`
    #[token(",")]
    Comma,
    /// `.`
    #[token(".")]
    Dot,
    /// `;`
    #[token(";")]
    Semicolon,
    /// `:`
    #[token(":")]
    Colon,
    /// `?`
    #[token("?")]
    QuestionMark,
    /// `-`
    #[token("-")]
    Minus,
    /// `-=`
    #[token("-=")]
    MinusEqual,
    /// `--`
    #[token("--")]
    MinusMinus,
    /// `+`
    #[token("+")]
    Plus,
    /// `+=`
    #[token("+=")]
    PlusEqual,
    /// `++`
    #[token("++")]
    PlusPlus,
    /// `*`
    #[token("*")]
    Star,
    /// `*=`
    #[token("*=")]
    StarEqual,
    /// `**`
    #[token("**")]
    StarStar,
    /// `**=`
    #[token("**=")]
    StarStarEqual,
    /// `/`
    #[token("/")]
    Slash,
    /// `/=`
    #[token("/=")]
    SlashEqual,
    /// `%`
    #[token("%")]
    Percent,
    /// `%=`
    #[token("%=")]
    PercentEqual,
    /// `!`
    #[token("!")]
    Bang,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `=`
    #[token("=")]
    Equal,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>`
    #[token(">")]
    Greater,
    /// `>=`
    #[token(">=")]
    GreaterEqual,

    /// Numeric literals: `42`, `3.25`, `0x1F` or the octal `017`.
    ///
    /// A leading `0` makes the numeral octal unless an `8` or `9` follows
    /// the octal digits, so `017.5` is `15`, `.`, `5` while `0178.5` is
    /// decimal.
    #[regex(r"0x[0-9a-fA-F]*", number::hexadecimal)]
    #[regex(r"0[0-7]*", number::octal)]
    #[regex(r"[1-9][0-9]*(\.[0-9]+)?", number::decimal)]
    #[regex(r"0[0-7]*[89][0-9]*(\.[0-9]+)?", number::decimal)]
    Number,
    /// `"double quoted"`, with escapes resolved.
    #[token("\"", string::plain)]
    String,
    /// `` `backtick quoted` ``, interpolated at runtime.
    #[token("`", string::interpolated)]
    InterpolatedString,
    /// `'single quoted'`; lexed but not part of the grammar.
    #[token("'", string::template)]
    TemplateString,
    /// `@name`
    #[token("@", identifier)]
    Identifier,

    /// `console`
    #[token("console")]
    Console,
    /// `let`
    #[token("let")]
    Let,
    /// `const`
    #[token("const")]
    Const,
    /// `fun`
    #[token("fun")]
    Fun,
    /// `return`
    #[token("return")]
    Return,
    /// `if`
    #[token("if")]
    If,
    /// `else`
    #[token("else")]
    Else,
    /// `while`
    #[token("while")]
    While,
    /// `for`
    #[token("for")]
    For,
    /// `break`
    #[token("break")]
    Break,
    /// `continue`
    #[token("continue")]
    Continue,
    /// `true`
    #[token("true", boolean)]
    True,
    /// `false`
    #[token("false", boolean)]
    False,
    /// `null`
    #[token("null")]
    Null,
    /// `typeof`
    #[token("typeof")]
    Typeof,
    /// `or`
    #[token("or")]
    Or,
    /// `and`
    #[token("and")]
    And,

    /// A bare word that is not a keyword. Resolved by the driver.
    #[regex(r"[A-Za-z][A-Za-z0-9_]*")]
    Word,
    /// `# line` and `#{ nested }#` comments.
    #[token("#", comment)]
    Comment,
}

/// Stores the value of `true` or `false`.
fn boolean(lex: &mut Lexer<'_, TokenKind>) {
    lex.extras.literal = LiteralValue::Bool(lex.slice() == "true");
}

/// Scans the name after an `@`.
///
/// A name runs until whitespace or one of [`NAME_TERMINATORS`]. A digit
/// right after the sigil rejects the whole word; punctuation right after it
/// leaves the sigil on its own.
fn identifier(lex: &mut Lexer<'_, TokenKind>) -> Result<(), LexicalErrorKind> {
    let rest = lex.remainder();
    let length = rest.find(|c| !is_name_char(c)).unwrap_or(rest.len());

    match rest.chars().next() {
        Some(first) if first.is_ascii_digit() || NAME_TERMINATORS.contains(first) => {
            lex.bump(length);
            Err(LexicalErrorKind::InvalidIdentifierStart)
        },
        _ if length == 0 => Err(LexicalErrorKind::EmptyIdentifier),
        _ => {
            lex.bump(length);
            lex.extras.literal = LiteralValue::Str(lex.slice().to_owned());
            Ok(())
        },
    }
}

/// Skips a comment that starts at the current `#`.
///
/// `#{` opens a block comment that may nest and ends at the matching `}#`;
/// an unclosed one runs to the end of the input. Anything else is a line
/// comment.
fn comment(lex: &mut Lexer<'_, TokenKind>) -> Skip {
    let rest = lex.remainder();

    if !rest.starts_with('{') {
        lex.bump(rest.find('\n').unwrap_or(rest.len()));
        return Skip;
    }

    let mut depth = 1_usize;
    let mut index = 1;
    while index < rest.len() && depth > 0 {
        let tail = &rest[index..];
        if tail.starts_with("#{") {
            depth += 1;
            index += 2;
        } else if tail.starts_with("}#") {
            depth -= 1;
            index += 2;
        } else {
            index += tail.chars().next().map_or(1, char::len_utf8);
        }
    }
    lex.bump(index.min(rest.len()));
    Skip
}
