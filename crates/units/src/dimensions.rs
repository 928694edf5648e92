//! `<length>` values: px, em, rem, plus unitless zero.

use crate::ParseError;
use cssparser::{Parser, ParserInput, Token};

/// Supported subset of CSS `<length>` units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
}

/// A CSS `<length>` value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f32,
    pub unit: LengthUnit,
}

impl Length {
    /// A length in CSS pixels.
    #[inline]
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self {
            value,
            unit: LengthUnit::Pixels,
        }
    }
}

/// Resolve a `Length` to CSS pixels.
///
/// - Pixels: returns the raw value.
/// - Ems: scales by the element's own font size.
/// - `RootEms`: scales by the root element's font size.
pub fn compute_length_px(length: Length, font_size_px: f32, root_font_size_px: f32) -> f32 {
    match length.unit {
        LengthUnit::Pixels => length.value,
        LengthUnit::Ems => length.value * font_size_px,
        LengthUnit::RootEms => length.value * root_font_size_px,
    }
}

/// Parse a CSS `<length>` from the parser's next token.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the next token is not a supported `<length>`.
pub fn parse_length(input: &mut Parser) -> Result<Length, ParseError> {
    let Ok(token) = input.next() else {
        return Err(ParseError::UnexpectedToken);
    };
    match token.clone() {
        Token::Dimension { value, unit, .. } => {
            let unit_kind = match unit.as_ref().to_ascii_lowercase().as_str() {
                "px" => LengthUnit::Pixels,
                "em" => LengthUnit::Ems,
                "rem" => LengthUnit::RootEms,
                _ => return Err(ParseError::UnexpectedToken),
            };
            Ok(Length {
                value,
                unit: unit_kind,
            })
        }
        Token::Number { value, .. } if value == 0.0 => Ok(Length::px(0.0)),
        _ => Err(ParseError::UnexpectedToken),
    }
}

/// Parse a whole string as a single `<length>`.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for anything that is not a supported
/// `<length>`, and `ParseError::TrailingInput` when tokens follow the length.
pub fn parse_length_str(text: &str) -> Result<Length, ParseError> {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    let length = parse_length(&mut parser)?;
    parser
        .expect_exhausted()
        .map_err(|_| ParseError::TrailingInput)?;
    Ok(length)
}
