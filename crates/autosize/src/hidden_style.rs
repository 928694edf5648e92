//! Styling that keeps the measurement surface invisible and out of flow.

use crate::environment::{RenderEnvironment, StylePriority};

/// Declarations forced onto the hidden surface, all `!important`.
pub const HIDDEN_SURFACE_STYLE: [(&str, &str); 9] = [
    ("min-height", "0"),
    ("max-height", "none"),
    ("height", "0"),
    ("visibility", "hidden"),
    ("overflow", "hidden"),
    ("position", "absolute"),
    ("z-index", "-1000"),
    ("top", "0"),
    ("right", "0"),
];

/// (Re)apply [`HIDDEN_SURFACE_STYLE`] to `surface`.
///
/// Must run after any mirrored style so the hiding declarations win.
pub fn force_hidden_styles<E: RenderEnvironment + ?Sized>(env: &mut E, surface: &E::Element) {
    for (name, value) in HIDDEN_SURFACE_STYLE {
        env.set_style_property(surface, name, value, StylePriority::Important);
    }
}
