//! Reads sizing style from a live element.

use crate::environment::RenderEnvironment;
use crate::quirks::EngineQuirks;
use crate::sizing_style::{BoxSizing, NodeStyling, SizingProperty, SizingStyle};
use autosize_units::format_px;
use log::{debug, trace};

/// Capture the sizing style of `element`.
///
/// Returns `None` when the environment cannot compute a style, or when the
/// resolved `box-sizing` is empty. The latter means the element is not in a
/// renderable tree yet; callers should retry on a later update.
pub fn probe<E: RenderEnvironment + ?Sized>(env: &E, element: &E::Element) -> Option<SizingStyle> {
    let Some(style) = env.computed_style(element) else {
        debug!("autosize: no computed style available");
        return None;
    };
    let sizing_style = SizingStyle::from_declaration(&style);
    if sizing_style.get(SizingProperty::BoxSizing).is_empty() {
        debug!("autosize: element has no box-sizing, probably detached");
        return None;
    }
    Some(sizing_style)
}

/// Capture the sizing style of `element` and derive its vertical padding and
/// border totals.
pub fn compute_metrics<E: RenderEnvironment + ?Sized>(
    env: &E,
    element: &E::Element,
    quirks: EngineQuirks,
) -> Option<NodeStyling> {
    let mut sizing_style = probe(env, element)?;

    if quirks.content_width_for_border_box && sizing_style.box_sizing() == BoxSizing::BorderBox {
        let width = sizing_style.px(SizingProperty::Width)
            + sizing_style.px(SizingProperty::BorderRightWidth)
            + sizing_style.px(SizingProperty::BorderLeftWidth)
            + sizing_style.px(SizingProperty::PaddingRight)
            + sizing_style.px(SizingProperty::PaddingLeft);
        trace!(
            "autosize: widening content width {:?} to border-box width {width}px",
            sizing_style.get(SizingProperty::Width)
        );
        sizing_style.set_width(format_px(width));
    }

    Some(NodeStyling::from_sizing_style(sizing_style))
}
