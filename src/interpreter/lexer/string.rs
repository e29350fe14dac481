use logos::Lexer;

use crate::{ast::LiteralValue, error::LexicalErrorKind};

use super::token::TokenKind;

/// Scans a `"` string and resolves its escapes.
pub(super) fn plain(lex: &mut Lexer<'_, TokenKind>) -> Result<(), LexicalErrorKind> {
    let body = quoted(lex, '"')?;
    lex.extras.literal = LiteralValue::Str(unescape(body));
    Ok(())
}

/// Scans a `` ` `` string. The body is kept raw for runtime interpolation.
pub(super) fn interpolated(lex: &mut Lexer<'_, TokenKind>) -> Result<(), LexicalErrorKind> {
    let body = quoted(lex, '`')?;
    lex.extras.literal = LiteralValue::from(body);
    Ok(())
}

/// Scans a `'` string. The body is kept raw.
pub(super) fn template(lex: &mut Lexer<'_, TokenKind>) -> Result<(), LexicalErrorKind> {
    let body = quoted(lex, '\'')?;
    lex.extras.literal = LiteralValue::from(body);
    Ok(())
}

/// Advances past the body and closing `delimiter` of a quoted literal.
///
/// The literal ends at the first `delimiter` whose preceding character is not
/// a backslash. A newline or the end of input ends it unterminated; the
/// scanner then resumes after that newline.
///
/// # Returns
/// The text between the delimiters, or
/// [`LexicalErrorKind::UnterminatedString`].
fn quoted<'s>(lex: &mut Lexer<'s, TokenKind>, delimiter: char) -> Result<&'s str, LexicalErrorKind> {
    let rest = lex.remainder();
    let mut previous = delimiter;

    for (index, c) in rest.char_indices() {
        if c == '\n' {
            lex.bump(index + 1);
            return Err(LexicalErrorKind::UnterminatedString { delimiter });
        }
        if c == delimiter && previous != '\\' {
            lex.bump(index + c.len_utf8());
            return Ok(&rest[..index]);
        }
        previous = c;
    }

    lex.bump(rest.len());
    Err(LexicalErrorKind::UnterminatedString { delimiter })
}

/// Resolves backslash escapes in a string body.
///
/// `\n` and `\t` become control characters, `\uXXXX` with four hex digits
/// becomes that code point, and any other escaped character stands for
/// itself. A trailing lone backslash is kept.
///
/// # Example
/// ```
/// use pencil::interpreter::lexer::string::unescape;
///
/// assert_eq!(unescape(r"a\tb"), "a\tb");
/// assert_eq!(unescape(r"A\q\\"), "Aq\\");
/// ```
#[must_use]
pub fn unescape(body: &str) -> String {
    let mut unescaped = String::with_capacity(body.len());
    let mut chars = body.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            unescaped.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('t') => unescaped.push('\t'),
            Some('u') => {
                let digits = chars.as_str().get(..4).filter(|digits| {
                                                     digits.chars().all(|d| d.is_ascii_hexdigit())
                                                 });
                match digits.and_then(|digits| u32::from_str_radix(digits, 16).ok()) {
                    Some(code) => {
                        unescaped.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
                        chars.nth(3);
                    },
                    None => unescaped.push('u'),
                }
            },
            Some(other) => unescaped.push(other),
            None => unescaped.push('\\'),
        }
    }
    unescaped
}
