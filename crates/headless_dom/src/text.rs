//! Text measurement and line breaking for form controls.
//!
//! Glyph advances come from an average-advance model instead of real font
//! data: every character is `ratio × font-size` wide (plus letter spacing),
//! which keeps measurements deterministic across machines.

use unicode_linebreak::{BreakOpportunity, linebreaks};

/// Average advance, in ems, for proportional families.
const PROPORTIONAL_ADVANCE: f32 = 0.5;
/// Average advance, in ems, for monospace families.
const MONOSPACE_ADVANCE: f32 = 0.6;
/// Widening applied to weights of 600 and above.
const BOLD_FACTOR: f32 = 1.1;
/// Slack for float accumulation when testing whether a run fits.
const FIT_EPSILON: f32 = 0.01;

/// Horizontal metrics of one font configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontModel {
    /// Advance of one ordinary character, letter spacing included.
    pub advance: f32,
    /// Advance of a tab character.
    pub tab_advance: f32,
}

impl FontModel {
    pub fn new(font_family: &str, font_size: f32, font_weight: u16, letter_spacing: f32, tab_size: f32) -> Self {
        let family = font_family.to_ascii_lowercase();
        let ratio = if family.contains("mono") || family.contains("courier") {
            MONOSPACE_ADVANCE
        } else {
            PROPORTIONAL_ADVANCE
        };
        let weight_factor = if font_weight >= 600 { BOLD_FACTOR } else { 1.0 };
        let advance = (font_size * ratio * weight_factor + letter_spacing).max(0.0);
        Self {
            advance,
            tab_advance: advance * tab_size.max(0.0),
        }
    }

    fn char_advance(&self, character: char) -> f32 {
        match character {
            '\t' => self.tab_advance,
            '\u{200B}' => 0.0,
            _ => self.advance,
        }
    }

    /// Width of a run of text on one line.
    pub fn measure(&self, text: &str) -> f32 {
        text.chars().map(|character| self.char_advance(character)).sum()
    }
}

/// Apply `text-transform` to `text`.
pub fn transform_text(text: &str, transform: &str) -> String {
    match transform {
        "uppercase" => text.to_uppercase(),
        "lowercase" => text.to_lowercase(),
        "capitalize" => {
            let mut out = String::with_capacity(text.len());
            let mut at_word_start = true;
            for character in text.chars() {
                if at_word_start && character.is_alphabetic() {
                    out.extend(character.to_uppercase());
                    at_word_start = false;
                } else {
                    out.push(character);
                    at_word_start = character.is_whitespace();
                }
            }
            out
        }
        _ => text.to_owned(),
    }
}

/// Number of lines `text` occupies when wrapped at `available_width`.
///
/// Whitespace is preserved and wraps (`pre-wrap`): every `\n` starts a new
/// line, trailing spaces hang, and words wider than the line break between
/// characters. The first line of each paragraph is offset by `text_indent`.
/// An empty text still occupies one line.
pub fn line_count(text: &str, available_width: f32, text_indent: f32, font: &FontModel) -> usize {
    let normalized = text.replace("\r\n", "\n");
    normalized
        .split('\n')
        .map(|paragraph| paragraph_line_count(paragraph, available_width, text_indent, font))
        .sum()
}

/// Greedy UAX #14 line breaking for a single paragraph.
fn paragraph_line_count(paragraph: &str, available_width: f32, text_indent: f32, font: &FontModel) -> usize {
    if paragraph.is_empty() {
        return 1;
    }
    let available_width = available_width.max(0.0);
    let mut lines = 1usize;
    let mut used = text_indent;
    let mut line_empty = true;
    let mut start = 0usize;

    for (end, opportunity) in linebreaks(paragraph) {
        if !matches!(opportunity, BreakOpportunity::Mandatory | BreakOpportunity::Allowed) {
            continue;
        }
        let segment = &paragraph[start..end];
        start = end;
        // Trailing whitespace hangs past the line end.
        let visible_width = font.measure(segment.trim_end());
        let full_width = font.measure(segment);

        if !line_empty && used + visible_width > available_width + FIT_EPSILON {
            lines += 1;
            used = 0.0;
            line_empty = true;
        }

        if used + visible_width <= available_width + FIT_EPSILON {
            used += full_width;
            line_empty = false;
            continue;
        }

        // Even a fresh line cannot hold this word: break it between characters.
        for character in segment.chars() {
            let advance = font.char_advance(character);
            if !line_empty && !character.is_whitespace() && used + advance > available_width + FIT_EPSILON {
                lines += 1;
                used = 0.0;
            }
            used += advance;
            line_empty = false;
        }
    }
    lines
}
