//! # declform-core
//!
//! Error types, settings, and logging for the declform form engine.
//! This crate has no dependency on the form model and is shared by every
//! other crate in the workspace.
//!
//! ## Modules
//!
//! - [`error`] - Integrity errors and result aliases
//! - [`settings`] - Engine settings with defaults
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;

pub use error::{FormError, FormResult};
pub use settings::FormSettings;
