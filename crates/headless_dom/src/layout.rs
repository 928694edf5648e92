//! Box layout of a single form control.

use crate::computed::ComputedStyle;
use crate::text::{FontModel, line_count, transform_text};
use autosize_units::parse_px;

/// `line-height: normal`, in ems.
const NORMAL_LINE_HEIGHT: f32 = 1.2;

/// The values layout needs, resolved from a [`ComputedStyle`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UsedBox {
    pub border_box: bool,
    /// Specified `width`: the border-box width under `border-box`.
    pub width: f32,
    pub height: Option<f32>,
    pub min_height: f32,
    pub max_height: Option<f32>,
    pub padding_top: f32,
    pub padding_right: f32,
    pub padding_bottom: f32,
    pub padding_left: f32,
    pub border_top: f32,
    pub border_right: f32,
    pub border_bottom: f32,
    pub border_left: f32,
    pub line_height: f32,
    pub text_indent: f32,
}

impl UsedBox {
    /// Resolve from `style`. `width` is passed separately so layout can use
    /// the real width when the style reports a quirky one.
    pub fn from_style(style: &ComputedStyle, width: f32) -> Self {
        let font_size = style.px("font-size");
        Self {
            border_box: style.get("box-sizing") == "border-box",
            width,
            height: optional_px(style.get("height")),
            min_height: style.px("min-height"),
            max_height: optional_px(style.get("max-height")),
            padding_top: style.px("padding-top"),
            padding_right: style.px("padding-right"),
            padding_bottom: style.px("padding-bottom"),
            padding_left: style.px("padding-left"),
            border_top: style.px("border-top-width"),
            border_right: style.px("border-right-width"),
            border_bottom: style.px("border-bottom-width"),
            border_left: style.px("border-left-width"),
            // Line boxes sit on whole pixels.
            line_height: resolve_line_height(style.get("line-height"), font_size).round(),
            text_indent: style.px("text-indent"),
        }
    }

    pub fn vertical_padding(&self) -> f32 {
        self.padding_top + self.padding_bottom
    }

    fn vertical_border(&self) -> f32 {
        self.border_top + self.border_bottom
    }

    /// Width available to text.
    pub fn content_width(&self) -> f32 {
        let width = if self.border_box {
            self.width - self.padding_left - self.padding_right - self.border_left - self.border_right
        } else {
            self.width
        };
        width.max(0.0)
    }

    /// Content-box height for a specified (border-box or content-box) height.
    fn content_height_for(&self, specified: f32) -> f32 {
        if self.border_box {
            (specified - self.vertical_padding() - self.vertical_border()).max(0.0)
        } else {
            specified.max(0.0)
        }
    }

    /// Inner height (content + padding) of the box, given its text height.
    pub fn client_height(&self, text_height: f32) -> f32 {
        let mut content = self
            .height
            .map_or(text_height, |height| self.content_height_for(height));
        if let Some(max_height) = self.max_height {
            content = content.min(self.content_height_for(max_height));
        }
        content = content.max(self.content_height_for(self.min_height));
        content + self.vertical_padding()
    }
}

fn optional_px(raw: &str) -> Option<f32> {
    raw.ends_with("px")
        .then(|| parse_px(raw))
        .or_else(|| (raw == "0").then_some(0.0))
}

fn resolve_line_height(raw: &str, font_size: f32) -> f32 {
    if raw == "normal" || raw.is_empty() {
        return font_size * NORMAL_LINE_HEIGHT;
    }
    if let Ok(factor) = raw.parse::<f32>() {
        return factor * font_size;
    }
    parse_px(raw)
}

/// Font model for the text of an element with `style`.
pub fn font_model(style: &ComputedStyle) -> FontModel {
    let letter_spacing = style.px("letter-spacing");
    let font_weight = style.get("font-weight").parse::<u16>().unwrap_or(400);
    let tab_size = style.get("tab-size").parse::<f32>().unwrap_or(8.0);
    FontModel::new(
        style.get("font-family"),
        style.px("font-size"),
        font_weight,
        letter_spacing,
        tab_size,
    )
}

/// Height of the scrollable content of a textarea showing `text`: the text
/// height plus vertical padding, never less than the inner height.
pub fn scroll_height(style: &ComputedStyle, used: &UsedBox, text: &str) -> f32 {
    let text = transform_text(text, style.get("text-transform"));
    let lines = line_count(&text, used.content_width(), used.text_indent, &font_model(style));
    let text_height = lines as f32 * used.line_height;
    (text_height + used.vertical_padding()).max(used.client_height(text_height))
}
