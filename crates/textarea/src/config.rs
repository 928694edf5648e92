//! Autosize configuration.
//!
//! Row bounds, measurement caching and engine-quirk handling can be set
//! programmatically or loaded from environment variables.

use crate::component::AutosizeProps;
use autosize::{EngineQuirks, RenderEnvironment};
use std::env;

/// Settings shared by the textareas of one host.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AutosizeConfig {
    /// Lower bound on visible rows.
    pub min_rows: Option<u32>,
    /// Upper bound on visible rows.
    pub max_rows: Option<u32>,
    /// Keep measured styling across renders instead of re-probing.
    pub cache_measurements: bool,
    /// Apply the border-box width correction when the engine needs it.
    pub legacy_width_correction: bool,
}

impl Default for AutosizeConfig {
    fn default() -> Self {
        Self::new(None, None, false, true)
    }
}

impl AutosizeConfig {
    /// Construct a configuration with explicit values.
    #[inline]
    #[must_use]
    pub const fn new(
        min_rows: Option<u32>,
        max_rows: Option<u32>,
        cache_measurements: bool,
        legacy_width_correction: bool,
    ) -> Self {
        Self {
            min_rows,
            max_rows,
            cache_measurements,
            legacy_width_correction,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// - `AUTOSIZE_MIN_ROWS`: minimum visible rows (unset by default)
    /// - `AUTOSIZE_MAX_ROWS`: maximum visible rows (unset by default)
    /// - `AUTOSIZE_CACHE_MEASUREMENTS`: set to "1" to cache measurements
    /// - `AUTOSIZE_LEGACY_WIDTH_CORRECTION`: set to "0" to disable the
    ///   border-box width correction
    #[inline]
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let rows = |name: &str| lookup(name).and_then(|val| val.trim().parse::<u32>().ok());
        let min_rows = rows("AUTOSIZE_MIN_ROWS");
        let max_rows = rows("AUTOSIZE_MAX_ROWS");
        let cache_measurements = lookup("AUTOSIZE_CACHE_MEASUREMENTS").as_deref() == Some("1");
        let legacy_width_correction = lookup("AUTOSIZE_LEGACY_WIDTH_CORRECTION").as_deref() != Some("0");
        Self::new(min_rows, max_rows, cache_measurements, legacy_width_correction)
    }

    /// Uncontrolled component props carrying these settings.
    #[inline]
    #[must_use]
    pub fn props(&self) -> AutosizeProps {
        AutosizeProps {
            min_rows: self.min_rows,
            max_rows: self.max_rows,
            cache_measurements: self.cache_measurements,
            ..AutosizeProps::default()
        }
    }

    /// Quirks detected from `env`, filtered by this configuration.
    #[must_use]
    pub fn quirks_for<E: RenderEnvironment + ?Sized>(&self, env: &E) -> EngineQuirks {
        EngineQuirks::detect(env).with_width_correction(self.legacy_width_correction)
    }
}
