//! Installs the process-wide `tracing` subscriber for hostlink.
//!
//! The subscriber filters with [`Config::log_directives`], so a configured
//! connect log level raises the dispatcher and transport targets without
//! touching anything else. Records go to stderr, rendered per
//! [`Config::log_format`]. Installation happens once per process and the
//! winning filter expression is kept for later callers.

use std::io::{self, IsTerminal};

use hostlink_config::{Config, LogFormat};
use once_cell::sync::OnceCell;
use tracing::{Subscriber, debug, subscriber::SetGlobalDefaultError};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

const TELEMETRY_TARGET: &str = "hostlink_connect::telemetry";

static INSTALLED_FILTER: OnceCell<String> = OnceCell::new();

/// Returned once the global subscriber is in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TelemetryHandle {
    filter: &'static str,
}

impl TelemetryHandle {
    /// Filter expression of the installed subscriber.
    #[must_use]
    pub const fn filter(&self) -> &'static str {
        self.filter
    }
}

/// Errors raised while installing the subscriber.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The composed filter expression does not parse.
    #[error("invalid log filter `{expression}`: {message}")]
    Filter {
        /// Expression handed to the subscriber.
        expression: String,
        /// Parser diagnostic.
        message: String,
    },
    /// Something outside hostlink already installed a global subscriber.
    #[error("another tracing subscriber is already installed: {0}")]
    AlreadyInstalled(#[source] SetGlobalDefaultError),
}

/// Installs the global subscriber on first use.
///
/// Later calls install nothing and return a handle naming the filter that
/// was installed first, whatever `config` they pass.
///
/// # Errors
///
/// Returns [`TelemetryError::Filter`] when `log_filter` combined with
/// `connect_log_level` is not a valid filter, and
/// [`TelemetryError::AlreadyInstalled`] when a foreign subscriber got there
/// first.
pub fn initialise(config: &Config) -> Result<TelemetryHandle, TelemetryError> {
    INSTALLED_FILTER
        .get_or_try_init(|| {
            let expression = config.log_directives();
            let filter = parse_filter(&expression)?;
            tracing::subscriber::set_global_default(subscriber(filter, config.log_format()))
                .map_err(TelemetryError::AlreadyInstalled)?;
            debug!(
                target: TELEMETRY_TARGET,
                filter = %expression,
                format = %config.log_format(),
                "telemetry installed"
            );
            Ok(expression)
        })
        .map(|filter| TelemetryHandle {
            filter: filter.as_str(),
        })
}

fn parse_filter(expression: &str) -> Result<EnvFilter, TelemetryError> {
    EnvFilter::try_new(expression).map_err(|error| TelemetryError::Filter {
        expression: expression.to_owned(),
        message: error.to_string(),
    })
}

fn subscriber(filter: EnvFilter, format: LogFormat) -> Box<dyn Subscriber + Send + Sync> {
    let builder = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        // Escape codes would corrupt JSON and piped output.
        .with_ansi(!format.is_structured() && io::stderr().is_terminal())
        .with_timer(fmt::time::UtcTime::rfc_3339());
    match format {
        LogFormat::Json => Box::new(
            builder
                .json()
                .flatten_event(true)
                .with_current_span(false)
                .finish(),
        ),
        LogFormat::Compact => Box::new(builder.compact().finish()),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::level("info")]
    #[case::connect_directive("warn,hostlink_connect=debug")]
    #[case::module_directive("hostlink_connect::transport::ssh=trace")]
    fn composed_filters_parse(#[case] expression: &str) {
        assert!(parse_filter(expression).is_ok());
    }

    #[test]
    fn invalid_connect_level_names_the_expression() {
        let config = Config {
            connect_log_level: Some(String::from("loud")),
            ..Config::default()
        };
        let Err(err) = parse_filter(&config.log_directives()) else {
            panic!("unknown level should be rejected");
        };
        assert!(matches!(err, TelemetryError::Filter { .. }));
        assert!(
            err.to_string().contains("info,hostlink_connect=loud"),
            "message: {err}"
        );
    }

    #[test]
    fn later_initialisation_reports_the_installed_filter() {
        let first = initialise(&Config::default()).expect("first initialisation");
        let raised = Config {
            connect_log_level: Some(String::from("trace")),
            ..Config::default()
        };
        let second = initialise(&raised).expect("second initialisation");
        assert_eq!(first, second);
        assert_eq!(second.filter(), "info");
    }
}
