//! Measures the height a textarea needs for its content.

use crate::environment::{RenderEnvironment, StylePriority};
use crate::hidden_style::force_hidden_styles;
use crate::quirks::EngineQuirks;
use crate::sizing_style::{BoxSizing, NodeStyling};
use crate::style_probe::compute_metrics;
use log::{debug, warn};
use tracing::info_span;

/// Text measured when the target has neither a value nor a placeholder, and
/// to find the height of a single row.
pub const FILLER_TEXT: &str = "x";

/// Slack for float error in `height / row_height`.
const ROW_EPSILON: f64 = 1e-9;

/// Caller-owned slot for an element's [`NodeStyling`].
///
/// `None` forces a fresh probe on the next calculation. A filled slot is
/// trusted as-is, even if the element's style changed since.
pub type MeasurementCache = Option<NodeStyling>;

/// Result of one height calculation, in CSS pixels.
///
/// Lengths are `f64` so that `row_height * rows` divides back to `rows`
/// exactly.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct NodeHeights {
    /// Height to apply to the element, clamped to the row bounds.
    pub height: f64,
    /// Lower bound from `min_rows`, `-inf` when unbounded.
    pub min_height: f64,
    /// Upper bound from `max_rows`, `+inf` when unbounded.
    pub max_height: f64,
    /// Height of a single line of text.
    pub row_height: f64,
    /// Rows occupied by the content, ignoring the bounds.
    pub rows: u32,
    /// Rows visible at `height`.
    pub visible_rows: u32,
}

/// Owns the hidden measurement surface and runs calculations on it.
///
/// Keep one calculator for the lifetime of the environment and share it
/// between every autosizing element; the surface is created on first use and
/// never destroyed.
pub struct HeightCalculator<E: RenderEnvironment> {
    surface: Option<E::Element>,
    quirks: EngineQuirks,
}

impl<E: RenderEnvironment> HeightCalculator<E> {
    /// Create a calculator with explicit quirks and no surface yet.
    ///
    /// # Arguments
    ///
    /// * `quirks` - Corrections applied to every probed style
    ///
    /// # Returns
    ///
    /// A calculator that creates its hidden surface on first use
    pub const fn new(quirks: EngineQuirks) -> Self {
        Self {
            surface: None,
            quirks,
        }
    }

    /// Build a calculator with quirks detected from `env`.
    pub fn for_environment(env: &E) -> Self {
        Self::new(EngineQuirks::detect(env))
    }

    /// The corrections this calculator applies.
    pub const fn quirks(&self) -> EngineQuirks {
        self.quirks
    }

    /// The hidden surface, once a calculation has created it.
    pub const fn surface(&self) -> Option<&E::Element> {
        self.surface.as_ref()
    }

    /// Compute the heights `element` needs for its current text.
    ///
    /// `cache` is consulted first and filled when empty. Returns `None` when
    /// measuring is not possible right now (non-interactive environment,
    /// detached element); the caller should skip this layout update.
    pub fn calculate(
        &mut self,
        env: &mut E,
        element: &E::Element,
        cache: &mut MeasurementCache,
        min_rows: Option<u32>,
        max_rows: Option<u32>,
    ) -> Option<NodeHeights> {
        if !env.is_interactive() {
            return None;
        }
        let _span = info_span!("autosize.calculate").entered();

        let surface = self.acquire_surface(env)?;

        if cache.is_none() {
            *cache = compute_metrics(env, element, self.quirks);
        }
        let styling = cache.as_ref()?;
        let padding_size = f64::from(styling.padding_size());
        let border_size = f64::from(styling.border_size());
        let box_sizing = styling.box_sizing();

        for (property, value) in styling.sizing_style().iter() {
            env.set_style_property(&surface, property.css_name(), value, StylePriority::Normal);
        }
        force_hidden_styles(env, &surface);

        let text = measured_text(env, element);
        env.set_value(&surface, &text);

        let mut height = f64::from(env.scroll_height(&surface));
        match box_sizing {
            BoxSizing::BorderBox => height += border_size,
            BoxSizing::ContentBox => height -= padding_size,
            BoxSizing::Other => {}
        }

        env.set_value(&surface, FILLER_TEXT);
        let row_height = f64::from(env.scroll_height(&surface)) - padding_size;
        if !is_usable_row_height(row_height) {
            warn!("autosize: degenerate row height {row_height}, reporting zero rows");
        }

        let rows = row_count(height, row_height);

        let box_addend = if box_sizing == BoxSizing::BorderBox {
            padding_size + border_size
        } else {
            0.0
        };
        let mut min_height = f64::NEG_INFINITY;
        let mut max_height = f64::INFINITY;
        if let Some(min_rows) = min_rows {
            min_height = row_height * f64::from(min_rows) + box_addend;
            height = height.max(min_height);
        }
        if let Some(max_rows) = max_rows {
            max_height = row_height * f64::from(max_rows) + box_addend;
            height = height.min(max_height);
        }

        let heights = NodeHeights {
            height,
            min_height,
            max_height,
            row_height,
            rows,
            visible_rows: row_count(height, row_height),
        };
        debug!("autosize: measured {heights:?}");
        Some(heights)
    }

    /// Create the surface on first use and make sure it sits in the document.
    fn acquire_surface(&mut self, env: &mut E) -> Option<E::Element> {
        let surface = match &self.surface {
            Some(surface) => surface.clone(),
            None => {
                let surface = env.create_textarea();
                force_hidden_styles(env, &surface);
                debug!("autosize: created hidden measurement surface");
                self.surface = Some(surface.clone());
                surface
            }
        };
        if !env.is_attached(&surface) && !env.append_to_body(&surface) {
            warn!("autosize: could not attach the measurement surface");
            return None;
        }
        Some(surface)
    }
}

/// The target's value, else its placeholder, else [`FILLER_TEXT`].
fn measured_text<E: RenderEnvironment + ?Sized>(env: &E, element: &E::Element) -> String {
    let value = env.value(element);
    if !value.is_empty() {
        return value;
    }
    let placeholder = env.placeholder(element);
    if !placeholder.is_empty() {
        return placeholder;
    }
    FILLER_TEXT.to_owned()
}

fn is_usable_row_height(row_height: f64) -> bool {
    row_height.is_finite() && row_height > 0.0
}

/// `floor(height / row_height)`, or `0` for a degenerate row height.
///
/// A quotient within [`ROW_EPSILON`] below a whole number counts as that
/// number.
fn row_count(height: f64, row_height: f64) -> u32 {
    if !is_usable_row_height(row_height) {
        return 0;
    }
    let rows = (height / row_height + ROW_EPSILON).floor();
    if rows.is_finite() && rows > 0.0 {
        rows as u32
    } else {
        0
    }
}
