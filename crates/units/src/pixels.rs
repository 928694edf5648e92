//! Pixel values as reported by a style engine's computed style.
//!
//! Precondition: every value handed to [`parse_px`] is a resolved value with
//! a `px` suffix (or a bare number). Anything else is treated as `0`.

use cssparser::{Parser, ParserInput, Token};
use log::trace;

/// Parse a computed pixel value such as `"4px"` into `4.0`.
///
/// Fails closed: empty strings, keywords, other units and malformed input
/// all yield `0.0`.
pub fn parse_px(text: &str) -> f32 {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let value = match parser.next() {
        Ok(Token::Dimension { value, unit, .. }) if unit.eq_ignore_ascii_case("px") => *value,
        Ok(Token::Number { value, .. }) => *value,
        _ => {
            trace!("parse_px: treating {text:?} as 0");
            return 0.0;
        }
    };
    if parser.expect_exhausted().is_err() || !value.is_finite() {
        trace!("parse_px: treating {text:?} as 0");
        return 0.0;
    }
    value
}

/// Serialize a pixel value the way computed styles spell it (`152px`, `152.5px`).
pub fn format_px(value: f32) -> String {
    // Avoid "-0px".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value}px")
}
