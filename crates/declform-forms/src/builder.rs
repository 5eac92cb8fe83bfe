//! Control tree builder.
//!
//! Turns a sequence of descriptors (already in display order) into a
//! [`ControlTree`]: one [`Control`] per descriptor, keyed by field name,
//! starting from the field type's empty value with the descriptor's rules
//! wired in. Building is a pure function of its input; iteration over the
//! tree follows the input sequence.

use std::collections::HashMap;

use declform_core::settings::FormSettings;
use declform_core::{FormError, FormResult};

use crate::control::Control;
use crate::descriptor::FieldDescriptor;

/// The controls of one form, keyed by field name.
#[derive(Debug, Clone, Default)]
pub struct ControlTree {
    controls: HashMap<String, Control>,
    order: Vec<String>,
}

impl ControlTree {
    /// Returns the number of controls.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns `true` if there are no controls.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns `true` if a control with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.controls.contains_key(name)
    }

    /// Looks up a control by field name.
    pub fn get(&self, name: &str) -> Option<&Control> {
        self.controls.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.get_mut(name)
    }

    /// Returns the field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Iterates `(name, control)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Control)> {
        self.order
            .iter()
            .filter_map(|name| self.controls.get(name).map(|c| (name.as_str(), c)))
    }

    pub(crate) fn controls_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.controls.values_mut()
    }

    /// Inserts a control. Returns `true` if it replaced one with the same name.
    fn insert(&mut self, name: String, control: Control) -> bool {
        if self.controls.insert(name.clone(), control).is_some() {
            return true;
        }
        self.order.push(name);
        false
    }
}

/// Builds [`ControlTree`]s from descriptors.
///
/// By default a repeated field name is an integrity error. A lenient
/// builder instead lets the last descriptor with a given name win, keeping
/// the name's first position, and logs a warning.
///
/// # Examples
///
/// ```
/// use declform_forms::builder::ControlTreeBuilder;
/// use declform_forms::descriptor::{FieldDescriptor, FieldType};
///
/// let fields = vec![
///     FieldDescriptor::new("email", FieldType::Email),
///     FieldDescriptor::new("email", FieldType::Email),
/// ];
/// let err = ControlTreeBuilder::strict().build(&fields).unwrap_err();
/// assert_eq!(err.code(), "duplicateField");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlTreeBuilder {
    reject_duplicates: bool,
}

impl Default for ControlTreeBuilder {
    fn default() -> Self {
        Self::strict()
    }
}

impl ControlTreeBuilder {
    /// A builder that fails on duplicate names.
    pub const fn strict() -> Self {
        Self {
            reject_duplicates: true,
        }
    }

    /// A builder where the last duplicate wins.
    pub const fn lenient() -> Self {
        Self {
            reject_duplicates: false,
        }
    }

    /// A builder configured from `reject_duplicate_names`.
    pub const fn from_settings(settings: &FormSettings) -> Self {
        Self {
            reject_duplicates: settings.reject_duplicate_names,
        }
    }

    /// Builds one control per descriptor.
    pub fn build(&self, descriptors: &[FieldDescriptor]) -> FormResult<ControlTree> {
        tracing::debug!("Building control tree for {} field(s)", descriptors.len());

        let mut tree = ControlTree::default();
        for field in descriptors {
            if self.reject_duplicates && tree.contains(&field.name) {
                return Err(FormError::DuplicateField(field.name.clone()));
            }
            let control = Control::new(field.field_type.empty_value(), field.rules.clone());
            if tree.insert(field.name.clone(), control) {
                tracing::warn!(
                    "Field '{}' is declared more than once; the last declaration wins",
                    field.name
                );
            }
        }
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldType;
    use crate::rules::{self, RuleKind};
    use crate::value::FieldValue;

    fn contact_fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("title", FieldType::Select).options(["Mr", "Dr"]),
            FieldDescriptor::new("firstName", FieldType::Text).rule(rules::required("First name")),
            FieldDescriptor::new("vm", FieldType::Checkbox)
                .rule(rules::must_be_checked("Please mark this box")),
        ]
    }

    #[test]
    fn test_build_one_control_per_field() {
        let tree = ControlTreeBuilder::strict().build(&contact_fields()).unwrap();
        assert_eq!(tree.len(), 3);
        assert!(tree.contains("title"));
        assert!(tree.contains("firstName"));
        assert!(tree.contains("vm"));
    }

    #[test]
    fn test_build_preserves_input_order() {
        let tree = ControlTreeBuilder::strict().build(&contact_fields()).unwrap();
        let names: Vec<&str> = tree.names().collect();
        assert_eq!(names, vec!["title", "firstName", "vm"]);
        let iter_names: Vec<&str> = tree.iter().map(|(n, _)| n).collect();
        assert_eq!(iter_names, names);
    }

    #[test]
    fn test_build_initial_values_per_type() {
        let tree = ControlTreeBuilder::strict().build(&contact_fields()).unwrap();
        assert_eq!(tree.get("title").unwrap().value(), &FieldValue::from(""));
        assert_eq!(tree.get("vm").unwrap().value(), &FieldValue::Bool(false));
    }

    #[test]
    fn test_build_wires_rules() {
        let tree = ControlTreeBuilder::strict().build(&contact_fields()).unwrap();
        let first = tree.get("firstName").unwrap();
        assert_eq!(first.rules().len(), 1);
        assert!(first.has_failure(RuleKind::Required));
        assert!(first.is_pristine());
        assert!(tree.get("title").unwrap().is_valid());
    }

    #[test]
    fn test_build_empty() {
        let tree = ControlTreeBuilder::strict().build(&[]).unwrap();
        assert!(tree.is_empty());
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let mut fields = contact_fields();
        fields.push(FieldDescriptor::new("title", FieldType::Text));
        let err = ControlTreeBuilder::strict().build(&fields).unwrap_err();
        assert!(matches!(err, FormError::DuplicateField(ref name) if name == "title"));
    }

    #[test]
    fn test_build_lenient_last_wins() {
        let mut fields = contact_fields();
        fields.push(FieldDescriptor::new("title", FieldType::Checkbox));
        let tree = ControlTreeBuilder::lenient().build(&fields).unwrap();
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.get("title").unwrap().value(), &FieldValue::Bool(false));
        assert_eq!(tree.names().next(), Some("title"));
    }

    #[test]
    fn test_builder_from_settings() {
        let settings = FormSettings {
            reject_duplicate_names: false,
            ..FormSettings::default()
        };
        assert_eq!(
            ControlTreeBuilder::from_settings(&settings),
            ControlTreeBuilder::lenient()
        );
        assert_eq!(ControlTreeBuilder::default(), ControlTreeBuilder::strict());
    }

    #[test]
    fn test_build_is_deterministic() {
        let fields = contact_fields();
        let a = ControlTreeBuilder::strict().build(&fields).unwrap();
        let b = ControlTreeBuilder::strict().build(&fields).unwrap();
        let a_names: Vec<&str> = a.names().collect();
        let b_names: Vec<&str> = b.names().collect();
        assert_eq!(a_names, b_names);
        for (name, control) in a.iter() {
            let other = b.get(name).unwrap();
            assert_eq!(control.value(), other.value());
            assert_eq!(control.failures(), other.failures());
        }
    }
}
