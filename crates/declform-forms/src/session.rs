//! Form sessions.
//!
//! A [`FormSession`] is one live instance of a form. It sorts the
//! descriptors it is given, builds their controls, and then owns both for
//! its whole lifetime. Every edit goes through [`FormSession::set_value`],
//! which re-validates only the edited field. [`FormSession::snapshot`]
//! reads all values in display order without looking at validity; gating a
//! submission on [`FormSession::is_valid`] is left to the caller.

use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

use declform_core::settings::FormSettings;
use declform_core::{FormError, FormResult};

use crate::builder::{ControlTree, ControlTreeBuilder};
use crate::control::Control;
use crate::descriptor::FieldDescriptor;
use crate::ordering;
use crate::rules::RuleFailure;
use crate::value::FieldValue;
use crate::view::FieldView;

/// The live state of one form.
///
/// # Examples
///
/// ```
/// use declform_forms::descriptor::{FieldDescriptor, FieldType};
/// use declform_forms::rules;
/// use declform_forms::session::FormSession;
///
/// let mut form = FormSession::new(vec![
///     FieldDescriptor::new("lastName", FieldType::Text)
///         .order(3)
///         .rule(rules::required("Last name")),
///     FieldDescriptor::new("firstName", FieldType::Text)
///         .order(2)
///         .rule(rules::required("First name")),
/// ])
/// .unwrap();
///
/// assert!(!form.is_valid());
/// form.set_value("firstName", "Ann").unwrap();
/// form.set_value("lastName", "Lee").unwrap();
/// assert!(form.is_valid());
///
/// let snapshot = form.snapshot();
/// let names: Vec<&str> = snapshot.iter().map(|(name, _)| name).collect();
/// assert_eq!(names, vec!["firstName", "lastName"]);
/// ```
#[derive(Debug, Clone)]
pub struct FormSession {
    fields: Vec<FieldDescriptor>,
    controls: ControlTree,
}

impl FormSession {
    /// Sorts the descriptors and builds a session, rejecting duplicate names.
    pub fn new(descriptors: Vec<FieldDescriptor>) -> FormResult<Self> {
        Self::with_builder(descriptors, ControlTreeBuilder::strict())
    }

    /// Sorts the descriptors and builds a session according to `settings`.
    pub fn with_settings(
        descriptors: Vec<FieldDescriptor>,
        settings: &FormSettings,
    ) -> FormResult<Self> {
        Self::with_builder(descriptors, ControlTreeBuilder::from_settings(settings))
    }

    /// Sorts the descriptors and builds a session with the given builder.
    pub fn with_builder(
        descriptors: Vec<FieldDescriptor>,
        builder: ControlTreeBuilder,
    ) -> FormResult<Self> {
        let fields = ordering::sort_descriptors(descriptors);
        let controls = builder.build(&fields)?;
        tracing::debug!("Form session ready with {} control(s)", controls.len());
        Ok(Self { fields, controls })
    }

    /// Returns the descriptors in display order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Returns the control tree.
    pub const fn controls(&self) -> &ControlTree {
        &self.controls
    }

    /// Returns the number of controls.
    pub fn len(&self) -> usize {
        self.controls.len()
    }

    /// Returns `true` if the form has no fields.
    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Looks up the control for a field.
    pub fn get_control(&self, name: &str) -> FormResult<&Control> {
        self.controls
            .get(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    fn control_mut(&mut self, name: &str) -> FormResult<&mut Control> {
        self.controls
            .get_mut(name)
            .ok_or_else(|| FormError::UnknownField(name.to_string()))
    }

    /// Updates one field and re-runs its rules, returning its current failures.
    ///
    /// Other fields are not re-validated.
    pub fn set_value(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> FormResult<&[RuleFailure]> {
        let control = self.control_mut(name)?;
        let failures = control.set_value(value.into());
        tracing::debug!("Field '{name}' updated with {} failing rule(s)", failures.len());
        Ok(failures)
    }

    /// Marks a field as touched (the user focused and left it).
    pub fn mark_touched(&mut self, name: &str) -> FormResult<()> {
        self.control_mut(name)?.mark_touched();
        Ok(())
    }

    /// Returns the failure messages of one field.
    pub fn errors(&self, name: &str) -> FormResult<Vec<String>> {
        Ok(self.get_control(name)?.errors())
    }

    /// Returns `true` if no field has a failing rule.
    pub fn is_valid(&self) -> bool {
        self.controls.iter().all(|(_, control)| control.is_valid())
    }

    /// Returns the names of failing fields in display order.
    pub fn invalid_fields(&self) -> Vec<&str> {
        self.controls
            .iter()
            .filter(|(_, control)| !control.is_valid())
            .map(|(name, _)| name)
            .collect()
    }

    /// Returns every field's current value in display order, valid or not.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entries: self
                .controls
                .iter()
                .map(|(name, control)| (name.to_string(), control.value().clone()))
                .collect(),
        }
    }

    /// Logs and returns the current values, regardless of validity.
    pub fn submit(&self) -> Snapshot {
        let snapshot = self.snapshot();
        tracing::info!(valid = self.is_valid(), "Form submitted: {snapshot}");
        snapshot
    }

    /// Returns every control to its empty, pristine, untouched state.
    pub fn reset(&mut self) {
        for control in self.controls.controls_mut() {
            control.reset();
        }
        tracing::debug!("Form reset");
    }

    /// Returns one view per control, in display order.
    ///
    /// A name declared more than once (lenient builds only) renders with its
    /// last descriptor, matching the control it was built from.
    pub fn views(&self) -> Vec<FieldView> {
        self.controls
            .iter()
            .filter_map(|(name, control)| {
                self.fields
                    .iter()
                    .rev()
                    .find(|field| field.name == name)
                    .map(|field| FieldView::new(field, control))
            })
            .collect()
    }

    /// Returns a template context: `{ "fields": [...], "is_valid": bool }`.
    pub fn as_context(&self) -> serde_json::Value {
        serde_json::json!({
            "fields": self.views(),
            "is_valid": self.is_valid(),
        })
    }
}

/// Point-in-time values of every field, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    entries: Vec<(String, FieldValue)>,
}

impl Snapshot {
    /// Returns the value of one field.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Returns the number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no fields.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates `(name, value)` pairs in display order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Converts to a JSON object whose keys follow display order.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.entries
                .iter()
                .map(|(name, value)| {
                    let json = match value {
                        FieldValue::Absent => serde_json::Value::Null,
                        FieldValue::Text(s) => serde_json::Value::String(s.clone()),
                        FieldValue::Bool(b) => serde_json::Value::Bool(*b),
                    };
                    (name.clone(), json)
                })
                .collect(),
        )
    }
}

impl Serialize for Snapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, value) in &self.entries {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldType;
    use crate::rules::{self, RuleKind};

    fn make_form() -> FormSession {
        FormSession::new(vec![
            FieldDescriptor::new("phoneNumber", FieldType::Text)
                .label("Phone number")
                .order(4)
                .rule(rules::required("Phone number"))
                .rule(rules::too_short("Phone number")),
            FieldDescriptor::new("firstName", FieldType::Text)
                .label("First name")
                .order(2)
                .rule(rules::required("First name")),
            FieldDescriptor::new("companiesGroup", FieldType::Checkbox).order(7),
        ])
        .unwrap()
    }

    #[test]
    fn test_session_sorts_fields() {
        let form = make_form();
        let names: Vec<&str> = form.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["firstName", "phoneNumber", "companiesGroup"]);
        let control_names: Vec<&str> = form.controls().names().collect();
        assert_eq!(control_names, names);
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn test_get_control_unknown() {
        let form = make_form();
        let err = form.get_control("doesNotExist").unwrap_err();
        assert_eq!(err.code(), "unknownField");
    }

    #[test]
    fn test_set_value_unknown() {
        let mut form = make_form();
        assert!(matches!(
            form.set_value("nope", "x"),
            Err(FormError::UnknownField(_))
        ));
        assert!(form.mark_touched("nope").is_err());
        assert!(form.errors("nope").is_err());
    }

    #[test]
    fn test_set_value_revalidates_only_that_field() {
        let mut form = make_form();
        let failures = form.set_value("phoneNumber", "12345").unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].kind, RuleKind::TooShort);

        let first = form.get_control("firstName").unwrap();
        assert!(first.is_pristine());
        assert!(first.has_failure(RuleKind::Required));
    }

    #[test]
    fn test_is_valid_transitions() {
        let mut form = make_form();
        assert!(!form.is_valid());
        assert_eq!(form.invalid_fields(), vec!["firstName", "phoneNumber"]);

        form.set_value("firstName", "Ann").unwrap();
        form.set_value("phoneNumber", "07700900123").unwrap();
        assert!(form.is_valid());
        assert!(form.invalid_fields().is_empty());

        form.set_value("firstName", "").unwrap();
        assert!(!form.is_valid());
    }

    #[test]
    fn test_errors_for_field() {
        let form = make_form();
        assert_eq!(
            form.errors("phoneNumber").unwrap(),
            vec![
                "Phone number is required",
                "Phone number cannot be shorter than 10"
            ]
        );
        assert!(form.errors("companiesGroup").unwrap().is_empty());
    }

    #[test]
    fn test_snapshot_ignores_validity() {
        let mut form = make_form();
        form.set_value("phoneNumber", "123").unwrap();
        assert!(!form.is_valid());

        let snapshot = form.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot.get("phoneNumber"), Some(&FieldValue::from("123")));
        assert_eq!(snapshot.get("firstName"), Some(&FieldValue::from("")));
        assert_eq!(snapshot.get("companiesGroup"), Some(&FieldValue::Bool(false)));
        assert_eq!(snapshot.get("missing"), None);
    }

    #[test]
    fn test_snapshot_serializes_in_display_order() {
        let mut form = make_form();
        form.set_value("companiesGroup", true).unwrap();
        let json = serde_json::to_string(&form.snapshot()).unwrap();
        assert_eq!(
            json,
            r#"{"firstName":"","phoneNumber":"","companiesGroup":true}"#
        );
        assert_eq!(form.snapshot().to_json()["companiesGroup"], true);
    }

    #[test]
    fn test_snapshot_json_keys_follow_display_order() {
        let form = FormSession::new(vec![
            FieldDescriptor::new("alpha", FieldType::Text).order(1),
            FieldDescriptor::new("zeta", FieldType::Text).order(0),
            FieldDescriptor::new("mid", FieldType::Checkbox).order(2),
        ])
        .unwrap();
        let snapshot = form.snapshot();

        let json = snapshot.to_json();
        let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let value = serde_json::to_value(&snapshot).unwrap();
        let keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
        assert_eq!(value, json);
    }

    #[test]
    fn test_submit_returns_snapshot() {
        let mut form = make_form();
        form.set_value("firstName", "Ann").unwrap();
        let submitted = form.submit();
        assert_eq!(submitted, form.snapshot());
        assert_eq!(
            submitted.to_string(),
            r#"{"firstName":"Ann","phoneNumber":"","companiesGroup":false}"#
        );
    }

    #[test]
    fn test_mark_touched() {
        let mut form = make_form();
        form.mark_touched("firstName").unwrap();
        let control = form.get_control("firstName").unwrap();
        assert!(control.is_touched());
        assert!(control.is_pristine());
    }

    #[test]
    fn test_reset() {
        let mut form = make_form();
        form.set_value("firstName", "Ann").unwrap();
        form.set_value("companiesGroup", true).unwrap();
        form.reset();
        let snapshot = form.snapshot();
        assert_eq!(snapshot.get("firstName"), Some(&FieldValue::from("")));
        assert_eq!(snapshot.get("companiesGroup"), Some(&FieldValue::Bool(false)));
        assert!(form.get_control("firstName").unwrap().is_pristine());
        assert!(!form.is_valid());
    }

    #[test]
    fn test_views_follow_display_order() {
        let mut form = make_form();
        form.set_value("phoneNumber", "12345").unwrap();
        let views = form.views();
        assert_eq!(views.len(), 3);
        assert_eq!(views[0].name, "firstName");
        assert_eq!(views[1].errors, vec!["Phone number cannot be shorter than 10"]);
        assert!(views[1].show_errors());
    }

    #[test]
    fn test_as_context() {
        let form = make_form();
        let ctx = form.as_context();
        assert_eq!(ctx["is_valid"], false);
        assert_eq!(ctx["fields"].as_array().unwrap().len(), 3);
        assert_eq!(ctx["fields"][0]["name"], "firstName");
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = FormSession::new(vec![
            FieldDescriptor::new("email", FieldType::Email),
            FieldDescriptor::new("email", FieldType::Email).order(1),
        ]);
        assert_eq!(result.unwrap_err().code(), "duplicateField");
    }

    #[test]
    fn test_with_settings_lenient() {
        let settings = FormSettings {
            reject_duplicate_names: false,
            ..FormSettings::default()
        };
        let form = FormSession::with_settings(
            vec![
                FieldDescriptor::new("email", FieldType::Email),
                FieldDescriptor::new("email", FieldType::Email).rule(rules::required("Email")),
            ],
            &settings,
        )
        .unwrap();
        assert_eq!(form.len(), 1);
        assert!(!form.is_valid());
        assert_eq!(form.views().len(), 1);
        assert_eq!(form.views()[0].errors, vec!["Email is required"]);
    }

    #[test]
    fn test_empty_session_is_valid() {
        let form = FormSession::new(Vec::new()).unwrap();
        assert!(form.is_empty());
        assert!(form.is_valid());
        assert!(form.snapshot().is_empty());
    }

    #[test]
    fn test_session_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<FormSession>();
    }
}
