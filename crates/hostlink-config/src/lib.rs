//! Shared configuration for hostlink connection dispatch.
//!
//! [`Config`] carries the connection defaults applied when a caller does not
//! spell out every parameter, together with the logging settings consumed by
//! the telemetry layer. Values are layered by `ortho_config`: built-in
//! defaults, then a configuration file, then `HOSTLINK_*` environment
//! variables, then command-line flags.

mod defaults;
mod logging;

use std::time::Duration;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

pub use defaults::{
    DEFAULT_LOG_FILTER, DEFAULT_REMOTE_PORT, DEFAULT_REMOTE_USER, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TRANSPORT, default_log_filter_string, default_log_format, default_remote_port,
    default_remote_user, default_timeout_secs, default_transport,
};
pub use logging::{CONNECT_LOG_TARGET, LogFormat, LogFormatParseError, compose_filter};

/// Connection defaults and logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, OrthoConfig)]
#[ortho_config(prefix = "HOSTLINK")]
pub struct Config {
    /// Transport identifier used when a request does not name one.
    #[serde(default = "default_transport")]
    pub transport: String,
    /// Remote port used when a request does not name one.
    #[serde(default = "default_remote_port")]
    pub remote_port: u16,
    /// Remote account used when a request does not name one.
    #[serde(default = "default_remote_user")]
    pub remote_user: String,
    /// Private key presented to key-based transports.
    #[serde(default)]
    pub private_key_file: Option<Utf8PathBuf>,
    /// Connect timeout handed to transports, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// `tracing` filter expression.
    #[serde(default = "default_log_filter_string")]
    pub log_filter: String,
    /// Level applied to `hostlink_connect` targets on top of `log_filter`.
    #[serde(default)]
    pub connect_log_level: Option<String>,
    /// Output format for log records.
    #[serde(default = "default_log_format")]
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            transport: default_transport(),
            remote_port: DEFAULT_REMOTE_PORT,
            remote_user: default_remote_user(),
            private_key_file: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            log_filter: default_log_filter_string(),
            connect_log_level: None,
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    /// Default transport identifier.
    #[must_use]
    pub fn transport(&self) -> &str {
        self.transport.as_str()
    }

    /// Default remote port.
    #[must_use]
    pub const fn remote_port(&self) -> u16 {
        self.remote_port
    }

    /// Default remote account.
    #[must_use]
    pub fn remote_user(&self) -> &str {
        self.remote_user.as_str()
    }

    /// Default private key file, if any.
    #[must_use]
    pub fn private_key_file(&self) -> Option<&camino::Utf8Path> {
        self.private_key_file.as_deref()
    }

    /// Connect timeout as a [`Duration`].
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Log filter expression.
    #[must_use]
    pub fn log_filter(&self) -> &str {
        self.log_filter.as_str()
    }

    /// Level for `hostlink_connect` targets, if raised or lowered.
    #[must_use]
    pub fn connect_log_level(&self) -> Option<&str> {
        self.connect_log_level.as_deref()
    }

    /// Filter expression handed to the subscriber: `log_filter` plus the
    /// connect-target directive.
    #[must_use]
    pub fn log_directives(&self) -> String {
        compose_filter(self.log_filter(), self.connect_log_level())
    }

    /// Log output format.
    #[must_use]
    pub const fn log_format(&self) -> LogFormat {
        self.log_format
    }
}
