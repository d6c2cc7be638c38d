//! Default values applied when no configuration layer provides a setting.

use crate::logging::LogFormat;

/// Transport used when a host does not name one.
pub const DEFAULT_TRANSPORT: &str = "ssh";

/// Remote port used when a host does not name one.
pub const DEFAULT_REMOTE_PORT: u16 = 22;

/// Remote account used when a host does not name one.
pub const DEFAULT_REMOTE_USER: &str = "root";

/// Connect timeout handed to transports, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default log filter expression.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Owned default transport identifier, for serde.
pub fn default_transport() -> String {
    DEFAULT_TRANSPORT.to_owned()
}

/// Default remote port, for serde.
pub const fn default_remote_port() -> u16 {
    DEFAULT_REMOTE_PORT
}

/// Owned default remote user, for serde.
pub fn default_remote_user() -> String {
    DEFAULT_REMOTE_USER.to_owned()
}

/// Default connect timeout, for serde.
pub const fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Owned log filter value used where allocation is required (e.g. serde).
pub fn default_log_filter_string() -> String {
    DEFAULT_LOG_FILTER.to_owned()
}

/// Default logging format.
pub const fn default_log_format() -> LogFormat {
    LogFormat::Json
}
