//! Runtime values held by form controls.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The current value of a single form control.
///
/// Text-like widgets hold [`FieldValue::Text`], checkboxes hold
/// [`FieldValue::Bool`]. [`FieldValue::Absent`] models a value that was
/// never provided (`null` in serialized form) and is treated as empty by
/// every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// No value at all.
    #[default]
    Absent,
    /// A string value.
    Text(String),
    /// A checked/unchecked value.
    Bool(bool),
}

impl FieldValue {
    /// Returns `true` if the value carries no content.
    ///
    /// Absent values, empty strings, and unchecked booleans are empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Text(s) => s.is_empty(),
            Self::Bool(b) => !b,
        }
    }

    /// Returns `true` for non-empty text and for `true`.
    pub fn is_truthy(&self) -> bool {
        !self.is_empty()
    }

    /// Returns the length in characters, or `None` if the value has no length.
    ///
    /// An absent value has length zero; a boolean has no length.
    pub fn char_len(&self) -> Option<usize> {
        match self {
            Self::Absent => Some(0),
            Self::Text(s) => Some(s.chars().count()),
            Self::Bool(_) => None,
        }
    }

    /// Returns the text content, if this is a text value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the boolean content, if this is a boolean value.
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Text(s) => write!(f, "{s}"),
            Self::Bool(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}
