//! Declarative field configuration.
//!
//! [`FieldConfig`] is the serde-friendly shape of a [`FieldDescriptor`]:
//! rules are named by [`RuleSpec`] instead of being constructed in code.
//! Callers deserialize it from whatever structured source they use and
//! convert it into descriptors before building a session.

use serde::{Deserialize, Serialize};

use declform_core::settings::FormSettings;

use crate::descriptor::{FieldDescriptor, FieldType, StaticBlock};
use crate::rules::RuleSpec;

/// Configuration for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Field name.
    pub name: String,
    /// Label; defaults to the name with underscores replaced by spaces.
    #[serde(default)]
    pub label: Option<String>,
    /// Input kind.
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Display order; `0` when omitted.
    #[serde(default)]
    pub order: i64,
    /// Choice options.
    #[serde(default)]
    pub options: Vec<String>,
    /// Static blocks; `null` is accepted as "none".
    #[serde(default, alias = "staticContent", deserialize_with = "null_as_empty")]
    pub static_content: Vec<StaticBlock>,
    /// Rules, in evaluation order.
    #[serde(default, alias = "validators")]
    pub rules: Vec<RuleSpec>,
}

impl FieldConfig {
    /// Converts to a descriptor using default settings.
    pub fn into_descriptor(self) -> FieldDescriptor {
        self.into_descriptor_with(&FormSettings::default())
    }

    /// Converts to a descriptor, building rules with `settings`.
    pub fn into_descriptor_with(self, settings: &FormSettings) -> FieldDescriptor {
        let mut field = FieldDescriptor::new(self.name, self.field_type).order(self.order);
        if let Some(label) = self.label {
            field = field.label(label);
        }
        field.rules = self
            .rules
            .iter()
            .map(|spec| spec.build_with(&field.label, settings))
            .collect();
        field.options = self.options;
        field.static_content = self.static_content;
        field
    }
}

/// Configuration for a whole form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormConfig {
    /// The fields, in any order.
    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

impl FormConfig {
    /// Converts every field using default settings.
    pub fn into_descriptors(self) -> Vec<FieldDescriptor> {
        self.into_descriptors_with(&FormSettings::default())
    }

    /// Converts every field, building rules with `settings`.
    pub fn into_descriptors_with(self, settings: &FormSettings) -> Vec<FieldDescriptor> {
        self.fields
            .into_iter()
            .map(|field| field.into_descriptor_with(settings))
            .collect()
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<StaticBlock>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<StaticBlock>>::deserialize(deserializer)?.unwrap_or_default())
}
