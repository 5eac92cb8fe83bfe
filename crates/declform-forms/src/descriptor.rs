//! Field descriptors: the static configuration of one form field.
//!
//! A [`FieldDescriptor`] captures everything the engine needs to place,
//! validate, and render a field: its name (the join key to its control),
//! label, [`FieldType`], display order, choice options, presentational
//! static content, and the ordered list of rules attached to it.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::rules::Rule;
use crate::value::FieldValue;

/// The kind of input a field represents.
///
/// The type informs rendering and the control's initial value only;
/// validation is driven entirely by the attached rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Free text.
    Text,
    /// An email address.
    Email,
    /// A calendar date.
    Date,
    /// A masked secret.
    Password,
    /// A single on/off box.
    Checkbox,
    /// One value out of a fixed list of options.
    Select,
}

impl FieldType {
    /// Returns the widget family the rendering layer should use.
    pub const fn widget(self) -> WidgetKind {
        match self {
            Self::Text | Self::Email | Self::Date | Self::Password => WidgetKind::Input,
            Self::Checkbox => WidgetKind::Checkbox,
            Self::Select => WidgetKind::Select,
        }
    }

    /// Returns the HTML `type` attribute string for this field type.
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Date => "date",
            Self::Password => "password",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
        }
    }

    /// Returns the value a freshly built control starts with.
    pub const fn empty_value(self) -> FieldValue {
        match self {
            Self::Checkbox => FieldValue::Bool(false),
            _ => FieldValue::Text(String::new()),
        }
    }

    /// Returns `true` for types whose value is picked from `options`.
    pub const fn is_choice(self) -> bool {
        matches!(self, Self::Select)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.input_type())
    }
}

/// The widget families a renderer has to provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    /// A single-line `<input>` (text, email, date, password).
    Input,
    /// `<input type="checkbox">`.
    Checkbox,
    /// `<select>` with one `<option>` per descriptor option.
    Select,
}

/// The kind of a static content block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StaticKind {
    /// A heading above the field group.
    Header,
    /// A paragraph of body text.
    Paragraph,
}

/// A presentational block rendered next to a field group.
///
/// Static content never takes part in validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticBlock {
    /// Header or paragraph.
    #[serde(rename = "type")]
    pub kind: StaticKind,
    /// The text to display.
    #[serde(alias = "innerText")]
    pub text: String,
}

impl StaticBlock {
    /// Creates a header block.
    pub fn header(text: impl Into<String>) -> Self {
        Self {
            kind: StaticKind::Header,
            text: text.into(),
        }
    }

    /// Creates a paragraph block.
    pub fn paragraph(text: impl Into<String>) -> Self {
        Self {
            kind: StaticKind::Paragraph,
            text: text.into(),
        }
    }
}

/// Complete definition of one form field.
///
/// `name` must be unique within a form; the builder rejects duplicates
/// unless it runs in lenient mode.
///
/// # Examples
///
/// ```
/// use declform_forms::descriptor::{FieldDescriptor, FieldType};
/// use declform_forms::rules;
///
/// let field = FieldDescriptor::new("firstName", FieldType::Text)
///     .label("First name")
///     .order(2)
///     .rule(rules::required("First name"));
/// assert_eq!(field.rules.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FieldDescriptor {
    /// The field name, used as the key of its control.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// The input kind.
    pub field_type: FieldType,
    /// Display position; lower comes first, ties keep configuration order.
    pub order: i64,
    /// Selectable values for choice fields, in display order.
    pub options: Vec<String>,
    /// Blocks rendered next to the field group.
    pub static_content: Vec<StaticBlock>,
    /// Rules evaluated, in this order, on every edit.
    pub rules: Vec<Arc<dyn Rule>>,
}

impl FieldDescriptor {
    /// Creates a descriptor with no rules, order `0`, and a label derived from the name.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        let name = name.into();
        let label = name.replace('_', " ");
        Self {
            name,
            label,
            field_type,
            order: 0,
            options: Vec::new(),
            static_content: Vec::new(),
            rules: Vec::new(),
        }
    }

    /// Sets the label.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the display order.
    #[must_use]
    pub const fn order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    /// Appends one option.
    #[must_use]
    pub fn option(mut self, option: impl Into<String>) -> Self {
        self.options.push(option.into());
        self
    }

    /// Replaces the options.
    #[must_use]
    pub fn options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    /// Appends a static content block.
    #[must_use]
    pub fn static_block(mut self, block: StaticBlock) -> Self {
        self.static_content.push(block);
        self
    }

    /// Attaches a rule after any already attached.
    #[must_use]
    pub fn rule(mut self, rule: Arc<dyn Rule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Returns the widget family for this field.
    pub const fn widget(&self) -> WidgetKind {
        self.field_type.widget()
    }
}
