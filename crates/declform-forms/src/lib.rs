//! # declform-forms
//!
//! Turns a list of field descriptors into an ordered, validated form.
//!
//! The pipeline is: descriptors are stably sorted by their `order` key
//! ([`ordering`]), a control is built per descriptor with its rules wired
//! ([`builder`]), and a [`FormSession`](session::FormSession) owns the
//! result for the lifetime of one form, re-validating a field on every edit
//! and producing value snapshots on submit.

pub mod builder;
pub mod config;
pub mod control;
pub mod descriptor;
pub mod ordering;
pub mod rules;
pub mod session;
pub mod value;
pub mod view;

pub use builder::{ControlTree, ControlTreeBuilder};
pub use control::{Control, ControlState};
pub use descriptor::{FieldDescriptor, FieldType, StaticBlock, StaticKind, WidgetKind};
pub use rules::{Rule, RuleFailure, RuleKind};
pub use session::{FormSession, Snapshot};
pub use value::FieldValue;
pub use view::FieldView;
