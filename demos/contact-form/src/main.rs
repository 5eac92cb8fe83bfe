//! # declform contact form demo
//!
//! Builds the contact-details form, applies edits given on the command
//! line, prints every field in display order with its current errors, and
//! finally submits the form.
//!
//! ## Running
//!
//! ```bash
//! cargo run --package contact-form-demo -- \
//!     --set firstName=Ann --set phoneNumber=12345 --check vm
//! ```

mod form;

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use declform_core::logging::{session_span, setup_logging};
use declform_core::settings_loader;
use declform_forms::descriptor::{FieldType, StaticKind};
use declform_forms::session::FormSession;
use declform_forms::value::FieldValue;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "contact-form", about = "Fill in and submit the contact-details form")]
struct Cli {
    /// TOML settings file; environment overrides apply on top.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Set a field value, as `name=value`.
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,

    /// Check a checkbox field.
    #[arg(long = "check", value_name = "NAME")]
    check: Vec<String>,

    /// Print the form context and snapshot as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = match &cli.settings {
        Some(path) => settings_loader::from_toml_file_with_env(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => settings_loader::from_env(),
    };
    setup_logging(&settings);

    let span = session_span("contact-details");
    let _guard = span.enter();

    let mut form = FormSession::with_settings(form::contact_fields(), &settings)?;

    for assignment in &cli.set {
        let Some((name, raw)) = assignment.split_once('=') else {
            bail!("expected NAME=VALUE, got '{assignment}'");
        };
        let value = parse_value(&form, name, raw)?;
        let failures = form.set_value(name, value)?.len();
        form.mark_touched(name)?;
        tracing::info!(field = name, failures, "Applied --set {name}");
    }
    for name in &cli.check {
        form.set_value(name, true)?;
        form.mark_touched(name)?;
        tracing::info!(field = name.as_str(), "Checked {name}");
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&form.as_context())?);
    } else {
        print_form(&form);
    }

    let snapshot = form.submit();
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!();
        println!("valid:    {}", form.is_valid());
        println!("snapshot: {snapshot}");
    }
    Ok(())
}

/// Interprets a raw command-line value for the named field.
///
/// Checkboxes take `true`/`1`/`yes`/`on`. Select fields only accept one of
/// their options.
fn parse_value(form: &FormSession, name: &str, raw: &str) -> anyhow::Result<FieldValue> {
    if form.get_control(name)?.value().as_bool().is_some() {
        return Ok(FieldValue::Bool(matches!(raw, "true" | "1" | "yes" | "on")));
    }
    if let Some(field) = form
        .fields()
        .iter()
        .find(|f| f.name == name && f.field_type.is_choice())
    {
        if !field.options.iter().any(|option| option == raw) {
            bail!(
                "'{raw}' is not an option of {name} (expected one of: {})",
                field.options.join(", ")
            );
        }
    }
    Ok(FieldValue::from(raw))
}

fn print_form(form: &FormSession) {
    for view in form.views() {
        for block in &view.static_content {
            match block.kind {
                StaticKind::Header => println!("\n== {} ==", block.text),
                StaticKind::Paragraph => println!("   {}", block.text),
            }
        }
        let shown = match view.field_type {
            FieldType::Password if !view.value.is_empty() => "********".to_string(),
            _ => view.value.to_string(),
        };
        println!("{:<48} [{}] {shown}", view.label, view.input_type);
        if !view.options.is_empty() {
            println!("{:<48} options: {}", "", view.options.join(" | "));
        }
        if view.show_errors() {
            for error in &view.errors {
                println!("{:<48} ! {error}", "");
            }
        }
    }
}
