//! Controls: the mutable runtime state of one field.
//!
//! A [`Control`] holds the field's current value, its presentational
//! flags, the rules attached to it, and the failures those rules produced
//! for the current value. Controls are created by the
//! [`ControlTreeBuilder`](crate::builder::ControlTreeBuilder) and mutated
//! only through the owning [`FormSession`](crate::session::FormSession).

use std::sync::Arc;

use serde::Serialize;

use crate::rules::{Rule, RuleFailure, RuleKind};
use crate::value::FieldValue;

/// Edit state of a control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlState {
    /// Never edited.
    Pristine,
    /// Edited at least once.
    Dirty,
}

/// Runtime state for a single field.
#[derive(Debug, Clone)]
pub struct Control {
    value: FieldValue,
    initial: FieldValue,
    state: ControlState,
    touched: bool,
    rules: Vec<Arc<dyn Rule>>,
    failures: Vec<RuleFailure>,
}

impl Control {
    /// Creates a pristine control and evaluates its rules against `initial`.
    pub fn new(initial: FieldValue, rules: Vec<Arc<dyn Rule>>) -> Self {
        let mut control = Self {
            value: initial.clone(),
            initial,
            state: ControlState::Pristine,
            touched: false,
            rules,
            failures: Vec::new(),
        };
        control.validate();
        control
    }

    /// Returns the current value.
    pub const fn value(&self) -> &FieldValue {
        &self.value
    }

    /// Returns the edit state.
    pub const fn state(&self) -> ControlState {
        self.state
    }

    /// Returns `true` if the control was never edited.
    pub fn is_pristine(&self) -> bool {
        self.state == ControlState::Pristine
    }

    /// Returns `true` if the control was edited at least once.
    pub fn is_dirty(&self) -> bool {
        self.state == ControlState::Dirty
    }

    /// Returns `true` once the user has visited and left the field.
    pub const fn is_touched(&self) -> bool {
        self.touched
    }

    /// Returns the rules attached to this control, in evaluation order.
    pub fn rules(&self) -> &[Arc<dyn Rule>] {
        &self.rules
    }

    /// Returns every rule currently failing, in rule order.
    pub fn failures(&self) -> &[RuleFailure] {
        &self.failures
    }

    /// Returns the failure messages for display.
    pub fn errors(&self) -> Vec<String> {
        self.failures.iter().map(|f| f.message.clone()).collect()
    }

    /// Returns `true` if a rule of the given kind is failing.
    pub fn has_failure(&self, kind: RuleKind) -> bool {
        self.failures.iter().any(|f| f.kind == kind)
    }

    /// Returns `true` if no rule is failing.
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Replaces the value, marks the control dirty, and re-runs every rule.
    pub(crate) fn set_value(&mut self, value: FieldValue) -> &[RuleFailure] {
        self.value = value;
        self.state = ControlState::Dirty;
        self.validate();
        &self.failures
    }

    pub(crate) fn mark_touched(&mut self) {
        self.touched = true;
    }

    /// Restores the initial value and the pristine, untouched state.
    pub(crate) fn reset(&mut self) {
        self.value = self.initial.clone();
        self.state = ControlState::Pristine;
        self.touched = false;
        self.validate();
    }

    // Every rule runs; failures accumulate rather than short-circuit.
    fn validate(&mut self) {
        self.failures = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(&self.value).err())
            .collect();
    }
}
