//! Engine-specific measurement corrections, resolved once at startup.

use crate::environment::RenderEnvironment;
use log::debug;

/// Known deviations of the host engine's style reporting.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineQuirks {
    /// The engine reports computed `width` as content width even under
    /// `box-sizing: border-box`; captured widths get padding and border added
    /// back.
    pub content_width_for_border_box: bool,
}

impl EngineQuirks {
    /// No corrections.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            content_width_for_border_box: false,
        }
    }

    /// Ask the environment which quirks apply.
    pub fn detect<E: RenderEnvironment + ?Sized>(env: &E) -> Self {
        let quirks = if env.is_interactive() {
            Self {
                content_width_for_border_box: env.reports_content_width_for_border_box(),
            }
        } else {
            Self::none()
        };
        debug!("autosize: detected engine quirks {quirks:?}");
        quirks
    }

    /// Keep or drop the width correction regardless of detection.
    #[must_use]
    pub const fn with_width_correction(self, enabled: bool) -> Self {
        Self {
            content_width_for_border_box: self.content_width_for_border_box && enabled,
        }
    }
}
