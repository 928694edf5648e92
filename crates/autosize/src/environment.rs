//! The rendering environment the measurement core runs against.

use std::collections::HashMap;

/// Precedence of an inline style declaration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum StylePriority {
    #[default]
    Normal,
    /// `!important`; wins over normal declarations.
    Important,
}

/// Read access to a resolved style, keyed by CSS property name (`font-size`).
pub trait StyleDeclaration {
    /// The serialized value of `name`, or an empty string when the property
    /// has no value.
    fn property_value(&self, name: &str) -> String;
}

impl StyleDeclaration for HashMap<String, String> {
    fn property_value(&self, name: &str) -> String {
        self.get(name).cloned().unwrap_or_default()
    }
}

/// A document-like host that can resolve styles, own elements and lay out
/// text.
///
/// Implementations are single-threaded: the calculator mutates one hidden
/// element through `&mut self` and reads it back within the same call.
pub trait RenderEnvironment {
    /// Handle to an element in this environment.
    type Element: Clone;
    /// A computed style snapshot.
    type Style: StyleDeclaration;

    /// Whether this environment renders at all. When false, no other method
    /// is called.
    fn is_interactive(&self) -> bool;

    /// The fully resolved (computed) style of `element`, or `None` when the
    /// environment cannot compute styles.
    fn computed_style(&self, element: &Self::Element) -> Option<Self::Style>;

    /// Whether this engine reports the computed `width` of a `border-box`
    /// element as its content width. Consulted once, when the calculator is
    /// built.
    fn reports_content_width_for_border_box(&self) -> bool {
        false
    }

    /// Create a new, detached textarea element.
    fn create_textarea(&mut self) -> Self::Element;

    /// Whether `element` is part of the document tree.
    fn is_attached(&self, element: &Self::Element) -> bool;

    /// Append `element` to the document body. Returns `false` when the
    /// environment refused.
    fn append_to_body(&mut self, element: &Self::Element) -> bool;

    /// Set one inline style property on `element`. An empty value removes
    /// the property.
    fn set_style_property(
        &mut self,
        element: &Self::Element,
        name: &str,
        value: &str,
        priority: StylePriority,
    );

    /// Current text value of a form element.
    fn value(&self, element: &Self::Element) -> String;

    /// Placeholder text of a form element.
    fn placeholder(&self, element: &Self::Element) -> String;

    /// Replace the text value of a form element.
    fn set_value(&mut self, element: &Self::Element, value: &str);

    /// Natural content height of `element`, including padding and excluding
    /// border, rounded to whole CSS pixels as `Element.scrollHeight` is.
    fn scroll_height(&self, element: &Self::Element) -> f32;
}
