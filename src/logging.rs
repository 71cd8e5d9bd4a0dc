//! # Structured Logging Module
//!
//! Environment-aware structured logging for the contact lifecycle. Console
//! output is either human readable or JSON, selected by [`LoggingConfig`].

use crate::config::{detect_environment, LoggingConfig};
use crate::models::ContactId;
use chrono::Utc;
use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize structured logging once per process
pub fn init_structured_logging(config: &LoggingConfig) {
    LOGGER_INITIALIZED.get_or_init(|| {
        let environment = detect_environment();
        let directives = config
            .level
            .clone()
            .unwrap_or_else(|| default_log_level(&environment).to_string());

        let layer = if config.json {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(false)
                .json()
                .with_filter(EnvFilter::new(&directives))
                .boxed()
        } else {
            fmt::layer()
                .with_target(true)
                .with_thread_ids(true)
                .with_level(true)
                .with_ansi(true)
                .with_filter(EnvFilter::new(&directives))
                .boxed()
        };

        // Embedding applications may have installed their own subscriber already
        if tracing_subscriber::registry().with(layer).try_init().is_err() {
            tracing::debug!("Global tracing subscriber already initialized - keeping it");
        }

        tracing::info!(
            environment = %environment,
            directives = %directives,
            json = config.json,
            "Structured logging initialized"
        );
    });
}

/// Default filter directives per environment
fn default_log_level(environment: &str) -> &'static str {
    match environment {
        "production" => "info",
        "test" => "debug",
        _ => "debug",
    }
}

/// Log the outcome of a contact lifecycle operation
pub fn log_contact_operation(
    operation: &str,
    contact_id: Option<ContactId>,
    status: &str,
    details: Option<&str>,
) {
    tracing::info!(
        operation = %operation,
        contact_id = contact_id,
        status = %status,
        details = details,
        timestamp = %Utc::now().to_rfc3339(),
        "CONTACT_OPERATION"
    );
}
