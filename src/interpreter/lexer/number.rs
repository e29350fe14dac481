use logos::Lexer;

use crate::{ast::LiteralValue, error::LexicalErrorKind};

use super::token::TokenKind;

/// Folds a run of digits in `radix` into a double.
///
/// Accumulating in floating point keeps arbitrarily long literals finite
/// until they genuinely overflow, matching how decimal literals behave.
///
/// # Parameters
/// - `digits`: The digits, without any prefix.
/// - `radix`: The base, either 8 or 16.
///
/// # Returns
/// The value of the digit run. Characters that are not digits in `radix` are
/// ignored; the scanner's patterns never produce any.
///
/// # Example
/// ```
/// use pencil::interpreter::lexer::number::fold_digits;
///
/// assert_eq!(fold_digits("17", 8), 15.0);
/// assert_eq!(fold_digits("ff", 16), 255.0);
/// ```
#[must_use]
pub fn fold_digits(digits: &str, radix: u32) -> f64 {
    digits.chars()
          .filter_map(|c| c.to_digit(radix))
          .fold(0.0, |value, digit| value * f64::from(radix) + f64::from(digit))
}

/// Scans `0x` followed by hexadecimal digits.
pub(super) fn hexadecimal(lex: &mut Lexer<'_, TokenKind>) -> Result<(), LexicalErrorKind> {
    let digits = &lex.slice()[2..];
    if digits.is_empty() {
        return Err(LexicalErrorKind::InvalidHexLiteral);
    }
    lex.extras.literal = LiteralValue::Number(fold_digits(digits, 16));
    Ok(())
}

/// Scans a leading `0` followed by octal digits.
///
/// A numeral such as `0178` never reaches this callback: an `8` or `9` after
/// the octal digits turns the whole numeral decimal. A fraction does not, so
/// `017.5` stops here at `017`.
pub(super) fn octal(lex: &mut Lexer<'_, TokenKind>) {
    lex.extras.literal = LiteralValue::Number(fold_digits(&lex.slice()[1..], 8));
}

/// Scans a decimal numeral with an optional fractional part.
pub(super) fn decimal(lex: &mut Lexer<'_, TokenKind>) -> Result<(), LexicalErrorKind> {
    let value = lex.slice()
                   .parse()
                   .map_err(|_| LexicalErrorKind::UnexpectedCharacter)?;
    lex.extras.literal = LiteralValue::Number(value);
    Ok(())
}
