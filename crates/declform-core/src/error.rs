//! Core error types for the declform engine.
//!
//! Only integrity problems are errors: a lookup of a field that does not
//! exist, two descriptors sharing a name, or unreadable configuration.
//! Per-field validation failures are ordinary data and live on the control
//! that produced them, never in [`FormError`].

use thiserror::Error;

/// The error type shared by every declform crate.
///
/// Each variant carries a stable, machine-readable code via
/// [`FormError::code`] so callers can branch on the kind of failure
/// without matching on display strings.
#[derive(Error, Debug)]
pub enum FormError {
    // ── Integrity ────────────────────────────────────────────────────

    /// A field name was looked up that is not part of the form.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// Two descriptors in one form share the same name.
    #[error("Duplicate field name: {0}")]
    DuplicateField(String),

    // ── Configuration ────────────────────────────────────────────────

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    // ── IO ───────────────────────────────────────────────────────────

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl FormError {
    /// Returns the machine-readable code for this error.
    ///
    /// - `UnknownField` -> `unknownField`
    /// - `DuplicateField` -> `duplicateField`
    /// - `ConfigurationError` -> `configurationError`
    /// - `IoError` -> `ioError`
    pub const fn code(&self) -> &'static str {
        match self {
            Self::UnknownField(_) => "unknownField",
            Self::DuplicateField(_) => "duplicateField",
            Self::ConfigurationError(_) => "configurationError",
            Self::IoError(_) => "ioError",
        }
    }
}

/// A convenience type alias for `Result<T, FormError>`.
pub type FormResult<T> = Result<T, FormError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_error_codes() {
        assert_eq!(FormError::UnknownField("x".into()).code(), "unknownField");
        assert_eq!(FormError::DuplicateField("x".into()).code(), "duplicateField");
        assert_eq!(
            FormError::ConfigurationError("x".into()).code(),
            "configurationError"
        );
    }

    #[test]
    fn test_form_error_display() {
        let err = FormError::UnknownField("doesNotExist".into());
        assert_eq!(err.to_string(), "Unknown field: doesNotExist");

        let err = FormError::DuplicateField("email".into());
        assert_eq!(err.to_string(), "Duplicate field name: email");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: FormError = io_err.into();
        assert_eq!(err.code(), "ioError");
        assert!(err.to_string().contains("file missing"));
    }
}
