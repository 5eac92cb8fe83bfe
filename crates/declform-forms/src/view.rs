//! Field views: what a renderer needs to draw one field.
//!
//! A [`FieldView`] pairs a descriptor with the current state of its
//! control. Renderers iterate views in display order, pick a widget from
//! [`FieldView::widget`], bind the value, and show [`FieldView::errors`].

use serde::Serialize;

use crate::control::{Control, ControlState};
use crate::descriptor::{FieldDescriptor, FieldType, StaticBlock, WidgetKind};
use crate::value::FieldValue;

/// A snapshot of one field for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    /// The field name (HTML `name` attribute).
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// The configured input kind.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// The widget family to render.
    pub widget: WidgetKind,
    /// HTML `type` attribute.
    pub input_type: &'static str,
    /// Options for choice widgets.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    /// Static blocks shown next to the field group.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub static_content: Vec<StaticBlock>,
    /// Current value.
    pub value: FieldValue,
    /// Pristine or dirty.
    pub state: ControlState,
    /// Whether the user has left the field.
    pub touched: bool,
    /// Messages of the failing rules.
    pub errors: Vec<String>,
}

impl FieldView {
    /// Creates a view from a descriptor and its control.
    pub fn new(field: &FieldDescriptor, control: &Control) -> Self {
        Self {
            name: field.name.clone(),
            label: field.label.clone(),
            field_type: field.field_type,
            widget: field.widget(),
            input_type: field.field_type.input_type(),
            options: field.options.clone(),
            static_content: field.static_content.clone(),
            value: control.value().clone(),
            state: control.state(),
            touched: control.is_touched(),
            errors: control.errors(),
        }
    }

    /// Returns the auto-generated HTML `id` for this field.
    pub fn auto_id(&self) -> String {
        format!("id_{}", self.name)
    }

    /// Returns `true` if this field has any errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns `true` if errors should be shown: the field is invalid and
    /// the user has either edited it or left it.
    pub fn show_errors(&self) -> bool {
        self.has_errors() && (self.touched || self.state == ControlState::Dirty)
    }
}
