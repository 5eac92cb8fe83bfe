//! The rule library.
//!
//! A [`Rule`] is a stateless check of a control's current value. It either
//! passes or returns a [`RuleFailure`] with a machine-readable
//! [`RuleKind`] and a message built from the field's label. Rules are
//! constructed once and shared by `Arc` across any number of fields and
//! controls; constructing one has no side effects.
//!
//! All rules attached to a field run on every edit, in attachment order,
//! and every failure is kept: a field can report `required` and `tooShort`
//! at the same time.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use declform_core::settings::{FormSettings, DEFAULT_DATE_FORMAT, DEFAULT_MIN_LENGTH};

use crate::value::FieldValue;

/// The machine-readable kind of a validation failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RuleKind {
    /// The value is empty.
    #[serde(rename = "required")]
    Required,
    /// The value is shorter than a minimum length.
    #[serde(rename = "tooShort")]
    TooShort,
    /// A box that must be checked is not.
    #[serde(rename = "isChecked")]
    IsChecked,
    /// The value is not a usable date.
    #[serde(rename = "isDOB")]
    IsDob,
    /// The value's shape cannot be checked by the rule (e.g. a length rule on a checkbox).
    #[serde(rename = "invalidType")]
    InvalidType,
}

impl RuleKind {
    /// Returns the code surfaced to renderers.
    pub const fn code(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::TooShort => "tooShort",
            Self::IsChecked => "isChecked",
            Self::IsDob => "isDOB",
            Self::InvalidType => "invalidType",
        }
    }
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A single failed rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleFailure {
    /// What kind of check failed.
    pub kind: RuleKind,
    /// A human-readable message that includes the field label.
    pub message: String,
}

impl RuleFailure {
    /// Creates a new failure.
    pub fn new(kind: RuleKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// A validation check applied to a control's value.
///
/// # Examples
///
/// ```
/// use declform_forms::rules::{self, RuleKind};
/// use declform_forms::value::FieldValue;
///
/// let rule = rules::required("First name");
/// let failure = rule.check(&FieldValue::from("")).unwrap_err();
/// assert_eq!(failure.kind, RuleKind::Required);
/// assert_eq!(failure.message, "First name is required");
/// assert!(rule.check(&FieldValue::from("Ann")).is_ok());
/// ```
pub trait Rule: Send + Sync + fmt::Debug {
    /// Checks the value, returning the failure if it does not pass.
    fn check(&self, value: &FieldValue) -> Result<(), RuleFailure>;

    /// Returns the kind of failure this rule reports.
    fn kind(&self) -> RuleKind;
}

/// Fails when the value is empty.
#[derive(Debug, Clone)]
pub struct RequiredRule {
    /// The label used in the message.
    pub label: String,
}

impl Rule for RequiredRule {
    fn check(&self, value: &FieldValue) -> Result<(), RuleFailure> {
        if value.is_empty() {
            return Err(RuleFailure::new(
                RuleKind::Required,
                format!("{} is required", self.label),
            ));
        }
        Ok(())
    }

    fn kind(&self) -> RuleKind {
        RuleKind::Required
    }
}

/// Fails when the value has fewer than `min_length` characters.
#[derive(Debug, Clone)]
pub struct MinLengthRule {
    /// The label used in the message.
    pub label: String,
    /// The minimum accepted length.
    pub min_length: usize,
}

impl Rule for MinLengthRule {
    fn check(&self, value: &FieldValue) -> Result<(), RuleFailure> {
        match value.char_len() {
            Some(len) if len < self.min_length => Err(RuleFailure::new(
                RuleKind::TooShort,
                format!("{} cannot be shorter than {}", self.label, self.min_length),
            )),
            Some(_) => Ok(()),
            None => Err(RuleFailure::new(
                RuleKind::InvalidType,
                format!("{} has an unexpected value", self.label),
            )),
        }
    }

    fn kind(&self) -> RuleKind {
        RuleKind::TooShort
    }
}

/// Fails unless the value is checked (or otherwise truthy).
#[derive(Debug, Clone)]
pub struct MustBeCheckedRule {
    /// The label used in the message.
    pub label: String,
}

impl Rule for MustBeCheckedRule {
    fn check(&self, value: &FieldValue) -> Result<(), RuleFailure> {
        if value.is_truthy() {
            return Ok(());
        }
        Err(RuleFailure::new(
            RuleKind::IsChecked,
            format!("{} is required", self.label),
        ))
    }

    fn kind(&self) -> RuleKind {
        RuleKind::IsChecked
    }
}

/// Fails when the value is empty or does not parse as a date in `format`.
#[derive(Debug, Clone)]
pub struct ValidDateRule {
    /// The label used in the message.
    pub label: String,
    /// A `chrono` format string, `%Y-%m-%d` by default.
    pub format: String,
}

impl Rule for ValidDateRule {
    fn check(&self, value: &FieldValue) -> Result<(), RuleFailure> {
        let parsed = value
            .as_text()
            .filter(|s| !s.is_empty())
            .is_some_and(|s| chrono::NaiveDate::parse_from_str(s, &self.format).is_ok());
        if parsed {
            return Ok(());
        }
        Err(RuleFailure::new(
            RuleKind::IsDob,
            format!("{} cannot be something different...", self.label),
        ))
    }

    fn kind(&self) -> RuleKind {
        RuleKind::IsDob
    }
}

// ============================================================================
// Catalog
// ============================================================================

/// Fails with `required` and `"{label} is required"` when the value is empty.
pub fn required(label: impl Into<String>) -> Arc<dyn Rule> {
    Arc::new(RequiredRule {
        label: label.into(),
    })
}

/// Fails with `tooShort` and `"{label} cannot be shorter than {min}"`.
pub fn min_length(label: impl Into<String>, min: usize) -> Arc<dyn Rule> {
    Arc::new(MinLengthRule {
        label: label.into(),
        min_length: min,
    })
}

/// The minimum-length rule with the default threshold of 10.
pub fn too_short(label: impl Into<String>) -> Arc<dyn Rule> {
    min_length(label, DEFAULT_MIN_LENGTH)
}

/// Fails with `isChecked` and `"{label} is required"` when unchecked.
pub fn must_be_checked(label: impl Into<String>) -> Arc<dyn Rule> {
    Arc::new(MustBeCheckedRule {
        label: label.into(),
    })
}

/// Fails with `isDOB` unless the value is a `YYYY-MM-DD` date.
pub fn is_valid_date(label: impl Into<String>) -> Arc<dyn Rule> {
    is_valid_date_with_format(label, DEFAULT_DATE_FORMAT)
}

/// Fails with `isDOB` unless the value is a date in the given `chrono` format.
pub fn is_valid_date_with_format(
    label: impl Into<String>,
    format: impl Into<String>,
) -> Arc<dyn Rule> {
    Arc::new(ValidDateRule {
        label: label.into(),
        format: format.into(),
    })
}

/// Declarative reference to a catalog rule, for configuration files.
///
/// Each variant may override the label used in messages; by default the
/// field's own label is used.
///
/// ```
/// use declform_forms::rules::RuleSpec;
///
/// let spec: RuleSpec = serde_json::from_str(r#"{"rule": "min_length", "min": 10}"#).unwrap();
/// let rule = spec.build("Phone number");
/// assert!(rule.check(&"12345".into()).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum RuleSpec {
    /// See [`required`].
    Required {
        /// Message label override.
        #[serde(default)]
        label: Option<String>,
    },
    /// See [`min_length`]. Without `min`, the configured default applies.
    MinLength {
        /// Minimum length.
        #[serde(default)]
        min: Option<usize>,
        /// Message label override.
        #[serde(default)]
        label: Option<String>,
    },
    /// See [`must_be_checked`].
    MustBeChecked {
        /// Message label override.
        #[serde(default)]
        label: Option<String>,
    },
    /// See [`is_valid_date_with_format`]. Without `format`, the configured default applies.
    IsValidDate {
        /// A `chrono` format string.
        #[serde(default)]
        format: Option<String>,
        /// Message label override.
        #[serde(default)]
        label: Option<String>,
    },
}

impl RuleSpec {
    /// Builds the rule using default settings.
    pub fn build(&self, field_label: &str) -> Arc<dyn Rule> {
        self.build_with(field_label, &FormSettings::default())
    }

    /// Builds the rule, taking unset thresholds and formats from `settings`.
    pub fn build_with(&self, field_label: &str, settings: &FormSettings) -> Arc<dyn Rule> {
        let label_or = |label: &Option<String>| {
            label.clone().unwrap_or_else(|| field_label.to_string())
        };
        match self {
            Self::Required { label } => required(label_or(label)),
            Self::MinLength { min, label } => {
                min_length(label_or(label), min.unwrap_or(settings.default_min_length))
            }
            Self::MustBeChecked { label } => must_be_checked(label_or(label)),
            Self::IsValidDate { format, label } => is_valid_date_with_format(
                label_or(label),
                format.clone().unwrap_or_else(|| settings.date_format.clone()),
            ),
        }
    }
}
