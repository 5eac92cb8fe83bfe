//! Engine settings.
//!
//! [`FormSettings`] holds the handful of knobs the form engine reads at
//! build time: logging, how strictly duplicate field names are treated, and
//! the defaults used when rules are built from declarative configuration.

use serde::{Deserialize, Serialize};

/// Default date format accepted by the date rule (`<input type="date">`).
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default threshold for the minimum-length rule.
pub const DEFAULT_MIN_LENGTH: usize = 10;

/// The complete set of engine settings.
///
/// # Examples
///
/// ```
/// use declform_core::settings::FormSettings;
///
/// let settings = FormSettings::default();
/// assert!(settings.reject_duplicate_names);
/// assert_eq!(settings.default_min_length, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSettings {
    /// Whether debug mode is enabled (pretty logs instead of JSON).
    pub debug: bool,
    /// The tracing filter directive (e.g. "info", "declform_forms=debug").
    pub log_level: String,
    /// Whether building a form with two fields of the same name fails.
    ///
    /// When `false`, the last descriptor with a given name wins and a
    /// warning is logged.
    pub reject_duplicate_names: bool,
    /// `chrono` format string used by the date rule.
    pub date_format: String,
    /// Threshold used by a declarative `min_length` rule with no explicit minimum.
    pub default_min_length: usize,
}

impl Default for FormSettings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            reject_duplicate_names: true,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            default_min_length: DEFAULT_MIN_LENGTH,
        }
    }
}
