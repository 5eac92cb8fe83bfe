//! Settings loading from configuration files.
//!
//! ## Loading Order
//!
//! 1. Start with [`FormSettings::default`].
//! 2. Load from a TOML or JSON file (overriding defaults).
//! 3. Apply environment variable overrides (highest priority).
//!
//! ## Environment Variable Mapping
//!
//! | Env Var | Setting |
//! |---|---|
//! | `DECLFORM_DEBUG` | `debug` |
//! | `DECLFORM_LOG_LEVEL` | `log_level` |
//! | `DECLFORM_REJECT_DUPLICATE_NAMES` | `reject_duplicate_names` |
//! | `DECLFORM_DATE_FORMAT` | `date_format` |
//! | `DECLFORM_DEFAULT_MIN_LENGTH` | `default_min_length` |
//!
//! ## Examples
//!
//! ```rust,no_run
//! use declform_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("declform.toml").unwrap();
//! ```

use std::path::Path;

use crate::error::FormError;
use crate::settings::FormSettings;

/// Loads settings from a TOML string.
///
/// Keys absent from the TOML keep their default values.
pub fn from_toml_str(toml_str: &str) -> Result<FormSettings, FormError> {
    let toml_value: toml::Value = toml::from_str(toml_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse TOML: {e}")))?;

    let json_value = toml_to_json(&toml_value)?;
    merge_over_defaults(json_value, "TOML")
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> Result<FormSettings, FormError> {
    let content = read_config(path.as_ref(), "TOML")?;
    from_toml_str(&content)
}

/// Loads settings from a TOML file and then applies environment variable overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> Result<FormSettings, FormError> {
    let mut settings = from_toml_file(path)?;
    apply_env_overrides(&mut settings);
    Ok(settings)
}

/// Loads settings from a JSON string.
pub fn from_json_str(json_str: &str) -> Result<FormSettings, FormError> {
    let json_value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to parse JSON: {e}")))?;
    merge_over_defaults(json_value, "JSON")
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> Result<FormSettings, FormError> {
    let content = read_config(path.as_ref(), "JSON")?;
    from_json_str(&content)
}

/// Loads settings from just environment variables (starting from defaults).
pub fn from_env() -> FormSettings {
    let mut settings = FormSettings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Applies environment variable overrides to a settings struct.
///
/// Boolean variables accept "true"/"1"/"yes" as true and anything else as
/// false. A `DECLFORM_DEFAULT_MIN_LENGTH` that is not a number is ignored.
pub fn apply_env_overrides(settings: &mut FormSettings) {
    if let Ok(val) = std::env::var("DECLFORM_DEBUG") {
        settings.debug = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("DECLFORM_LOG_LEVEL") {
        settings.log_level = val;
    }

    if let Ok(val) = std::env::var("DECLFORM_REJECT_DUPLICATE_NAMES") {
        settings.reject_duplicate_names = parse_bool(&val);
    }

    if let Ok(val) = std::env::var("DECLFORM_DATE_FORMAT") {
        settings.date_format = val;
    }

    if let Ok(val) = std::env::var("DECLFORM_DEFAULT_MIN_LENGTH") {
        if let Ok(min) = val.trim().parse::<usize>() {
            settings.default_min_length = min;
        }
    }
}

// ============================================================
// Helpers
// ============================================================

fn parse_bool(val: &str) -> bool {
    matches!(val.to_lowercase().as_str(), "true" | "1" | "yes")
}

fn read_config(path: &Path, format: &str) -> Result<String, FormError> {
    std::fs::read_to_string(path).map_err(|e| {
        FormError::ConfigurationError(format!(
            "Failed to read {format} file '{}': {e}",
            path.display()
        ))
    })
}

/// Deserializes `overrides` on top of the serialized default settings.
///
/// Unknown keys are rejected so that a misspelled setting is reported
/// instead of silently keeping its default.
fn merge_over_defaults(
    overrides: serde_json::Value,
    format: &str,
) -> Result<FormSettings, FormError> {
    let mut merged = serde_json::to_value(FormSettings::default()).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to serialize default settings: {e}"))
    })?;

    let serde_json::Value::Object(overrides) = overrides else {
        return Err(FormError::ConfigurationError(format!(
            "{format} settings must be a table of keys"
        )));
    };
    if let Some(defaults) = merged.as_object_mut() {
        for (key, value) in overrides {
            if !defaults.contains_key(&key) {
                return Err(FormError::ConfigurationError(format!(
                    "Unknown setting '{key}' in {format}"
                )));
            }
            overlay(defaults.entry(key).or_insert(serde_json::Value::Null), value);
        }
    }

    serde_json::from_value(merged).map_err(|e| {
        FormError::ConfigurationError(format!("Failed to deserialize settings from {format}: {e}"))
    })
}

/// Converts parsed TOML into JSON through its `Serialize` impl.
fn toml_to_json(value: &toml::Value) -> Result<serde_json::Value, FormError> {
    serde_json::to_value(value)
        .map_err(|e| FormError::ConfigurationError(format!("Failed to convert TOML: {e}")))
}

/// Writes `value` over `slot`, descending into nested objects.
fn overlay(slot: &mut serde_json::Value, value: serde_json::Value) {
    match (slot.as_object_mut(), value) {
        (Some(map), serde_json::Value::Object(value)) => {
            for (key, nested) in value {
                overlay(map.entry(key).or_insert(serde_json::Value::Null), nested);
            }
        }
        (_, value) => *slot = value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    // ── TOML loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_str_basic() {
        let toml = r#"
            debug = false
            log_level = "declform_forms=debug"
            reject_duplicate_names = false
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "declform_forms=debug");
        assert!(!settings.reject_duplicate_names);
        // Defaults preserved
        assert_eq!(settings.date_format, "%Y-%m-%d");
        assert_eq!(settings.default_min_length, 10);
    }

    #[test]
    fn test_from_toml_str_rule_defaults() {
        let toml = r#"
            date_format = "%d/%m/%Y"
            default_min_length = 11
        "#;

        let settings = from_toml_str(toml).unwrap();
        assert_eq!(settings.date_format, "%d/%m/%Y");
        assert_eq!(settings.default_min_length, 11);
    }

    #[test]
    fn test_from_toml_str_empty() {
        let settings = from_toml_str("").unwrap();
        assert_eq!(settings, FormSettings::default());
    }

    #[test]
    fn test_from_toml_str_invalid() {
        let result = from_toml_str("[[invalid toml content");
        assert_eq!(result.unwrap_err().code(), "configurationError");
    }

    #[test]
    fn test_from_toml_str_wrong_type() {
        let result = from_toml_str(r#"default_min_length = "ten""#);
        assert!(result.is_err());
    }

    // ── JSON loading ────────────────────────────────────────────────

    #[test]
    fn test_from_json_str_basic() {
        let json = r#"{"debug": false, "log_level": "warn"}"#;
        let settings = from_json_str(json).unwrap();
        assert!(!settings.debug);
        assert_eq!(settings.log_level, "warn");
        assert!(settings.reject_duplicate_names);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(from_json_str("{not json").is_err());
    }

    // ── File loading ────────────────────────────────────────────────

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "log_level = \"debug\"").unwrap();

        let settings = from_toml_file(file.path()).unwrap();
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"default_min_length": 4}}"#).unwrap();

        let settings = from_json_file(file.path()).unwrap();
        assert_eq!(settings.default_min_length, 4);
    }

    #[test]
    fn test_from_toml_file_missing() {
        let result = from_toml_file("/nonexistent/path/declform.toml");
        assert!(result.is_err());
    }

    // ── Environment variable overrides ──────────────────────────────

    #[test]
    fn test_apply_env_overrides_log_level() {
        let mut settings = FormSettings::default();
        std::env::set_var("DECLFORM_LOG_LEVEL", "trace");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.log_level, "trace");
        std::env::remove_var("DECLFORM_LOG_LEVEL");
    }

    #[test]
    fn test_apply_env_overrides_reject_duplicates() {
        let mut settings = FormSettings::default();
        std::env::set_var("DECLFORM_REJECT_DUPLICATE_NAMES", "no");
        apply_env_overrides(&mut settings);
        assert!(!settings.reject_duplicate_names);
        std::env::remove_var("DECLFORM_REJECT_DUPLICATE_NAMES");
    }

    #[test]
    fn test_apply_env_overrides_invalid_min_length() {
        let mut settings = FormSettings::default();
        std::env::set_var("DECLFORM_DEFAULT_MIN_LENGTH", "not-a-number");
        apply_env_overrides(&mut settings);
        assert_eq!(settings.default_min_length, 10);
        std::env::remove_var("DECLFORM_DEFAULT_MIN_LENGTH");
    }

    #[test]
    fn test_overlay_nested() {
        let mut base = serde_json::json!({"a": {"b": 1, "c": 2}});
        overlay(&mut base, serde_json::json!({"a": {"c": 3}, "d": true}));
        assert_eq!(base, serde_json::json!({"a": {"b": 1, "c": 3}, "d": true}));
    }

    #[test]
    fn test_unknown_setting_rejected() {
        let err = from_toml_str("date_fromat = \"%d/%m/%Y\"").unwrap_err();
        assert!(err.to_string().contains("date_fromat"));

        let err = from_json_str(r#"{"debugg": true}"#).unwrap_err();
        assert_eq!(err.code(), "configurationError");
    }

    #[test]
    fn test_json_must_be_object() {
        assert!(from_json_str("[1, 2]").is_err());
    }
}
