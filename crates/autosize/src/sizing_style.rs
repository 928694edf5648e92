//! The subset of computed style that influences a textarea's content height.

use crate::environment::StyleDeclaration;
use autosize_units::parse_px;

/// Style properties mirrored from a measured element onto the hidden surface.
///
/// Nothing outside this list is copied, so height-relevant properties that
/// are missing here (e.g. `writing-mode`) are not honored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SizingProperty {
    /// `border-bottom-width`; part of the border size.
    BorderBottomWidth,
    /// `border-left-width`; narrows the content box.
    BorderLeftWidth,
    /// `border-right-width`; narrows the content box.
    BorderRightWidth,
    /// `border-top-width`; part of the border size.
    BorderTopWidth,
    /// `box-sizing`; decides how the natural height is adjusted.
    BoxSizing,
    /// `font-family`.
    FontFamily,
    /// `font-size`.
    FontSize,
    /// `font-style`.
    FontStyle,
    /// `font-weight`.
    FontWeight,
    /// `letter-spacing`.
    LetterSpacing,
    /// `line-height`; sets the row height.
    LineHeight,
    /// `padding-bottom`; part of the padding size.
    PaddingBottom,
    /// `padding-left`.
    PaddingLeft,
    /// `padding-right`.
    PaddingRight,
    /// `padding-top`; part of the padding size.
    PaddingTop,
    /// `tab-size`.
    TabSize,
    /// `text-indent`.
    TextIndent,
    /// `text-rendering`.
    TextRendering,
    /// `text-transform`.
    TextTransform,
    /// `width`; where text wraps.
    Width,
}

impl SizingProperty {
    /// Number of mirrored properties.
    pub const COUNT: usize = 20;

    /// Every sizing property, in mirroring order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::BorderBottomWidth,
        Self::BorderLeftWidth,
        Self::BorderRightWidth,
        Self::BorderTopWidth,
        Self::BoxSizing,
        Self::FontFamily,
        Self::FontSize,
        Self::FontStyle,
        Self::FontWeight,
        Self::LetterSpacing,
        Self::LineHeight,
        Self::PaddingBottom,
        Self::PaddingLeft,
        Self::PaddingRight,
        Self::PaddingTop,
        Self::TabSize,
        Self::TextIndent,
        Self::TextRendering,
        Self::TextTransform,
        Self::Width,
    ];

    /// The CSS property name.
    pub const fn css_name(self) -> &'static str {
        match self {
            Self::BorderBottomWidth => "border-bottom-width",
            Self::BorderLeftWidth => "border-left-width",
            Self::BorderRightWidth => "border-right-width",
            Self::BorderTopWidth => "border-top-width",
            Self::BoxSizing => "box-sizing",
            Self::FontFamily => "font-family",
            Self::FontSize => "font-size",
            Self::FontStyle => "font-style",
            Self::FontWeight => "font-weight",
            Self::LetterSpacing => "letter-spacing",
            Self::LineHeight => "line-height",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::PaddingRight => "padding-right",
            Self::PaddingTop => "padding-top",
            Self::TabSize => "tab-size",
            Self::TextIndent => "text-indent",
            Self::TextRendering => "text-rendering",
            Self::TextTransform => "text-transform",
            Self::Width => "width",
        }
    }

    const fn index(self) -> usize {
        self as usize
    }
}

/// Resolved `box-sizing` mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoxSizing {
    /// `height` excludes padding and border.
    ContentBox,
    /// `height` includes padding and border.
    BorderBox,
    /// Any other serialization; no box-model adjustment is applied.
    Other,
}

impl BoxSizing {
    /// Classify a serialized `box-sizing` value; unknown values (including
    /// empty) are [`BoxSizing::Other`].
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "content-box" => Self::ContentBox,
            "border-box" => Self::BorderBox,
            _ => Self::Other,
        }
    }
}

/// Raw computed values of every [`SizingProperty`], as the style engine
/// serialized them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SizingStyle {
    values: [String; SizingProperty::COUNT],
}

impl SizingStyle {
    /// Capture the sizing properties from a resolved style.
    pub fn from_declaration<S: StyleDeclaration + ?Sized>(style: &S) -> Self {
        Self {
            values: SizingProperty::ALL.map(|property| style.property_value(property.css_name())),
        }
    }

    /// Raw value of `property`; empty when the engine reported none.
    pub fn get(&self, property: SizingProperty) -> &str {
        &self.values[property.index()]
    }

    /// Numeric value of `property` in pixels, `0` when it is not a pixel value.
    pub fn px(&self, property: SizingProperty) -> f32 {
        parse_px(self.get(property))
    }

    pub fn box_sizing(&self) -> BoxSizing {
        BoxSizing::parse(self.get(SizingProperty::BoxSizing))
    }

    /// `(property, raw value)` pairs in mirroring order.
    pub fn iter(&self) -> impl Iterator<Item = (SizingProperty, &str)> + '_ {
        SizingProperty::ALL
            .iter()
            .map(|property| (*property, self.get(*property)))
    }

    /// The single sanctioned edit: the legacy-engine width correction.
    pub(crate) fn set_width(&mut self, value: String) {
        self.values[SizingProperty::Width.index()] = value;
    }
}

/// Cached style metrics for one measured element.
///
/// Valid only while the element's layout-affecting style is unchanged; the
/// owner of the cache slot decides when to drop it.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeStyling {
    sizing_style: SizingStyle,
    padding_size: f32,
    border_size: f32,
}

impl NodeStyling {
    /// Derive the vertical padding and border totals from `sizing_style`.
    pub fn from_sizing_style(sizing_style: SizingStyle) -> Self {
        let padding_size = sizing_style.px(SizingProperty::PaddingBottom)
            + sizing_style.px(SizingProperty::PaddingTop);
        let border_size = sizing_style.px(SizingProperty::BorderBottomWidth)
            + sizing_style.px(SizingProperty::BorderTopWidth);
        Self {
            sizing_style,
            padding_size,
            border_size,
        }
    }

    pub const fn sizing_style(&self) -> &SizingStyle {
        &self.sizing_style
    }

    /// `padding-top + padding-bottom` in pixels.
    pub const fn padding_size(&self) -> f32 {
        self.padding_size
    }

    /// `border-top-width + border-bottom-width` in pixels.
    pub const fn border_size(&self) -> f32 {
        self.border_size
    }

    pub fn box_sizing(&self) -> BoxSizing {
        self.sizing_style.box_sizing()
    }
}
