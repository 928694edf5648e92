//! Computed style resolution for the headless document.
//!
//! The cascade here is deliberately small: user-agent defaults per tag,
//! overridden by the element's inline declarations. There is no inheritance
//! and no stylesheet matching. Lengths are resolved to pixels, keywords are
//! kept as written.

use crate::inline_style::InlineStyle;
use autosize::StyleDeclaration;
use autosize_units::{compute_length_px, format_px, parse_length_str, parse_px};
use std::collections::HashMap;

/// Width a textarea gets when its `width` is `auto`.
pub const DEFAULT_TEXTAREA_WIDTH: f32 = 184.0;

/// Properties the headless document resolves, with their textarea defaults.
const TEXTAREA_DEFAULTS: [(&str, &str); 30] = [
    ("border-bottom-width", "1px"),
    ("border-left-width", "1px"),
    ("border-right-width", "1px"),
    ("border-top-width", "1px"),
    ("box-sizing", "content-box"),
    ("font-family", "monospace"),
    ("font-size", "16px"),
    ("font-style", "normal"),
    ("font-weight", "400"),
    ("letter-spacing", "normal"),
    ("line-height", "normal"),
    ("padding-bottom", "2px"),
    ("padding-left", "2px"),
    ("padding-right", "2px"),
    ("padding-top", "2px"),
    ("tab-size", "8"),
    ("text-indent", "0px"),
    ("text-rendering", "auto"),
    ("text-transform", "none"),
    ("width", "auto"),
    ("height", "auto"),
    ("min-height", "0px"),
    ("max-height", "none"),
    ("overflow", "auto"),
    ("visibility", "visible"),
    ("position", "static"),
    ("z-index", "auto"),
    ("top", "auto"),
    ("right", "auto"),
    ("display", "inline-block"),
];

/// Overrides of [`TEXTAREA_DEFAULTS`] for every other element.
const GENERIC_OVERRIDES: [(&str, &str); 10] = [
    ("border-bottom-width", "0px"),
    ("border-left-width", "0px"),
    ("border-right-width", "0px"),
    ("border-top-width", "0px"),
    ("font-family", "serif"),
    ("padding-bottom", "0px"),
    ("padding-left", "0px"),
    ("padding-right", "0px"),
    ("padding-top", "0px"),
    ("display", "block"),
];

const LENGTH_PROPERTIES: [&str; 15] = [
    "border-bottom-width",
    "border-left-width",
    "border-right-width",
    "border-top-width",
    "padding-bottom",
    "padding-left",
    "padding-right",
    "padding-top",
    "text-indent",
    "width",
    "height",
    "min-height",
    "max-height",
    "top",
    "right",
];

/// A resolved style snapshot. Unknown properties read as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComputedStyle {
    values: HashMap<String, String>,
}

impl StyleDeclaration for ComputedStyle {
    fn property_value(&self, name: &str) -> String {
        self.values.get(name).cloned().unwrap_or_default()
    }
}

impl ComputedStyle {
    /// The style of an element outside the document: every property empty.
    pub fn detached() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Numeric value of a pixel property, `0` otherwise.
    pub fn px(&self, name: &str) -> f32 {
        parse_px(self.get(name))
    }
}

/// Inputs of style resolution that come from the document, not the element.
#[derive(Clone, Copy, Debug)]
pub struct ResolveContext {
    pub root_font_size: f32,
    /// Used for `width: auto` on non-textarea elements.
    pub viewport_width: f32,
    /// Report a border-box element's `width` as its content width.
    pub legacy_width_reporting: bool,
}

/// Resolve the computed style of an element with tag `tag` and inline block
/// `inline`.
pub fn resolve(tag: &str, inline: &InlineStyle, context: ResolveContext) -> ComputedStyle {
    let is_textarea = tag.eq_ignore_ascii_case("textarea");
    let mut specified: HashMap<&str, &str> = TEXTAREA_DEFAULTS.iter().copied().collect();
    if !is_textarea {
        specified.extend(GENERIC_OVERRIDES.iter().copied());
    }
    for (name, _) in TEXTAREA_DEFAULTS {
        if let Some(value) = inline.get(name) {
            specified.insert(name, value);
        }
    }

    let font_size = resolve_font_size(specified.get("font-size").copied(), context.root_font_size);
    let auto_width = if is_textarea {
        DEFAULT_TEXTAREA_WIDTH
    } else {
        context.viewport_width
    };

    let mut values: HashMap<String, String> = HashMap::new();
    for (name, raw) in &specified {
        let value = if LENGTH_PROPERTIES.contains(name) {
            resolve_length(raw, font_size, context.root_font_size)
        } else {
            match *name {
                "font-size" => format_px(font_size),
                "line-height" => resolve_line_height(raw, font_size, context.root_font_size),
                "letter-spacing" if *raw != "normal" => {
                    resolve_length(raw, font_size, context.root_font_size)
                }
                "font-weight" => resolve_font_weight(raw),
                _ => (*raw).to_owned(),
            }
        };
        values.insert((*name).to_owned(), value);
    }
    // `auto` and anything that did not resolve to pixels.
    if values.get("width").is_none_or(|width| !width.ends_with("px")) {
        values.insert("width".to_owned(), format_px(auto_width));
    }

    let mut style = ComputedStyle { values };
    if context.legacy_width_reporting && style.get("box-sizing") == "border-box" {
        let content_width = style.px("width")
            - style.px("padding-left")
            - style.px("padding-right")
            - style.px("border-left-width")
            - style.px("border-right-width");
        style
            .values
            .insert("width".to_owned(), format_px(content_width.max(0.0)));
    }
    style
}

fn resolve_font_size(raw: Option<&str>, root_font_size: f32) -> f32 {
    raw.and_then(|raw| parse_length_str(raw).ok())
        .map_or(root_font_size, |length| {
            compute_length_px(length, root_font_size, root_font_size)
        })
}

/// Lengths become `Npx`; keywords and unsupported units stay as written.
fn resolve_length(raw: &str, font_size: f32, root_font_size: f32) -> String {
    parse_length_str(raw).map_or_else(
        |_| raw.to_owned(),
        |length| format_px(compute_length_px(length, font_size, root_font_size)),
    )
}

fn resolve_line_height(raw: &str, font_size: f32, root_font_size: f32) -> String {
    if raw == "normal" {
        return raw.to_owned();
    }
    if let Ok(number) = raw.trim().parse::<f32>() {
        return number.to_string();
    }
    resolve_length(raw, font_size, root_font_size)
}

fn resolve_font_weight(raw: &str) -> String {
    match raw {
        "normal" => "400".to_owned(),
        "bold" => "700".to_owned(),
        other => other.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTEXT: ResolveContext = ResolveContext {
        root_font_size: 16.0,
        viewport_width: 800.0,
        legacy_width_reporting: false,
    };

    /// # Panics
    /// Panics if textarea defaults are not reported.
    #[test]
    fn textarea_defaults() {
        let style = resolve("textarea", &InlineStyle::default(), CONTEXT);
        assert_eq!(style.get("box-sizing"), "content-box");
        assert_eq!(style.get("width"), "184px");
        assert_eq!(style.get("padding-top"), "2px");
        assert_eq!(style.get("line-height"), "normal");
        assert_eq!(style.get("font-weight"), "400");
        assert_eq!(style.get("writing-mode"), "");
    }

    /// # Panics
    /// Panics if relative lengths are not resolved against the font size.
    #[test]
    fn resolves_relative_lengths() {
        let inline = InlineStyle::parse("font-size: 20px; padding-top: 0.5em; line-height: 1.5; text-indent: 1rem");
        let style = resolve("textarea", &inline, CONTEXT);
        assert_eq!(style.get("padding-top"), "10px");
        assert_eq!(style.get("line-height"), "1.5");
        assert_eq!(style.get("text-indent"), "16px");
        assert_eq!(style.get("font-size"), "20px");
    }

    /// # Panics
    /// Panics if the legacy engine does not report content width.
    #[test]
    fn legacy_width_reporting_strips_padding_and_border() {
        let inline = InlineStyle::parse("box-sizing: border-box; width: 200px; padding-left: 10px; padding-right: 10px");
        let legacy = ResolveContext {
            legacy_width_reporting: true,
            ..CONTEXT
        };
        assert_eq!(resolve("textarea", &inline, legacy).get("width"), "178px");
        assert_eq!(resolve("textarea", &inline, CONTEXT).get("width"), "200px");
    }
}
