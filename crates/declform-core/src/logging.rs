//! Logging integration for declform.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`FormSettings`](crate::settings::FormSettings) and for creating
//! per-form spans.

use crate::settings::FormSettings;

/// Filter used when `settings.log_level` is not a valid directive.
pub const FALLBACK_FILTER: &str = "declform_core=info,declform_forms=info,warn";

/// Builds the [`EnvFilter`](tracing_subscriber::EnvFilter) for `settings`.
pub fn env_filter(settings: &FormSettings) -> tracing_subscriber::EnvFilter {
    tracing_subscriber::EnvFilter::try_new(&settings.log_level)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(FALLBACK_FILTER))
}

/// Installs the global tracing subscriber for the form engine.
///
/// Debug mode prints compact, human-readable lines with source locations.
/// Otherwise every event is one flat JSON object that carries the enclosing
/// [`session_span`], so each line names the form it came from. A second
/// call keeps the first subscriber.
pub fn setup_logging(settings: &FormSettings) {
    let builder = tracing_subscriber::fmt().with_env_filter(env_filter(settings));

    let installed = if settings.debug {
        builder
            .compact()
            .with_file(true)
            .with_line_number(true)
            .try_init()
    } else {
        builder
            .json()
            .flatten_event(true)
            .with_current_span(true)
            .with_span_list(false)
            .try_init()
    };
    if installed.is_ok() {
        tracing::debug!(level = %settings.log_level, "Logging initialized");
    }
}

/// Creates a tracing span scoping the events of one form.
///
/// # Examples
///
/// ```
/// use declform_core::logging::session_span;
///
/// let span = session_span("contact-details");
/// let _guard = span.enter();
/// tracing::info!("form initialized");
/// ```
pub fn session_span(form_name: &str) -> tracing::Span {
    tracing::info_span!("form", name = form_name)
}
