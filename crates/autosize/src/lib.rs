//! Height measurement for auto-growing multi-line text inputs.
//!
//! The rendered height of a textarea's content depends on its computed style
//! (font, padding, border, width, box sizing). Rather than re-implementing text
//! layout, this crate mirrors the relevant computed style onto a hidden,
//! offscreen textarea owned by a [`HeightCalculator`], fills it with the
//! target's text and reads back its natural content height.
//!
//! ```text
//! calculate(element, cache, min_rows, max_rows)
//!   ↓
//! 1. bail out unless the environment renders
//! 2. acquire (create/attach) the hidden surface
//! 3. NodeStyling from the cache slot, else StyleProbe
//! 4. mirror allow-listed style, reassert hiding style
//! 5. measure the content, then a single filler line
//!   ↓
//! NodeHeights { height, min_height, max_height, row_height, rows, visible_rows }
//! ```
//!
//! The host environment (a browser document, or the `headless_dom` crate)
//! is reached only through [`RenderEnvironment`].

#![forbid(unsafe_code)]

pub mod environment;
pub mod height_calculator;
pub mod hidden_style;
pub mod quirks;
pub mod sizing_style;
pub mod style_probe;

pub use environment::{RenderEnvironment, StyleDeclaration, StylePriority};
pub use height_calculator::{FILLER_TEXT, HeightCalculator, MeasurementCache, NodeHeights};
pub use hidden_style::{HIDDEN_SURFACE_STYLE, force_hidden_styles};
pub use quirks::EngineQuirks;
pub use sizing_style::{BoxSizing, NodeStyling, SizingProperty, SizingStyle};
pub use style_probe::{compute_metrics, probe};
