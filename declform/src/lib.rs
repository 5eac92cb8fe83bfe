//! # declform
//!
//! A declarative, configuration-driven form engine.
//!
//! This is the meta-crate that re-exports the workspace crates. Depend on
//! `declform` for everything, or on the individual crates for finer-grained
//! control.
//!
//! ```
//! use declform::forms::{rules, FieldDescriptor, FieldType, FormSession};
//!
//! let mut form = FormSession::new(vec![FieldDescriptor::new("vm", FieldType::Checkbox)
//!     .rule(rules::must_be_checked("Please mark this box"))])
//! .unwrap();
//! assert!(!form.is_valid());
//! form.set_value("vm", true).unwrap();
//! assert!(form.is_valid());
//! ```

/// Error types, settings, and logging.
pub use declform_core as core;

/// Descriptors, rules, ordering, control trees, and sessions.
pub use declform_forms as forms;

/// Commonly used types.
pub mod prelude {
    pub use declform_core::{FormError, FormResult, FormSettings};
    pub use declform_forms::rules::{self, Rule, RuleFailure, RuleKind};
    pub use declform_forms::{
        FieldDescriptor, FieldType, FieldValue, FieldView, FormSession, Snapshot, StaticBlock,
        WidgetKind,
    };
}

pub use serde;
pub use serde_json;
pub use tracing;
