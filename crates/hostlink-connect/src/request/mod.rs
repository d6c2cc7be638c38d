//! Connection request parameters.
//!
//! A [`ConnectionRequest`] describes one connection attempt: where to
//! connect, as whom, with which credentials, and through which transport.
//! Requests are immutable once built; the builder methods consume and return
//! the value.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use hostlink_config::{Config, DEFAULT_REMOTE_PORT, DEFAULT_REMOTE_USER, DEFAULT_TIMEOUT_SECS};
use serde::{Deserialize, Serialize};

const fn default_port() -> u16 {
    DEFAULT_REMOTE_PORT
}

fn default_user() -> String {
    DEFAULT_REMOTE_USER.to_owned()
}

const fn default_timeout() -> Duration {
    Duration::from_secs(DEFAULT_TIMEOUT_SECS)
}

/// Parameters for a single connection attempt.
///
/// The password is never serialised and is redacted from `Debug` output.
///
/// # Example
///
/// ```
/// use hostlink_connect::ConnectionRequest;
///
/// let request = ConnectionRequest::new("db01", "ssh")
///     .with_port(2222)
///     .with_user("postgres");
/// assert_eq!(request.transport(), "ssh");
/// assert_eq!(request.port(), 2222);
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionRequest {
    host: String,
    #[serde(default = "default_port")]
    port: u16,
    #[serde(default = "default_user")]
    user: String,
    #[serde(default, skip_serializing)]
    password: Option<String>,
    #[serde(default)]
    auth_type: String,
    transport: String,
    #[serde(default)]
    private_key_file: Option<PathBuf>,
    #[serde(default = "default_timeout")]
    timeout: Duration,
}

impl ConnectionRequest {
    /// Creates a request for `host` over `transport` with default port,
    /// user, and timeout.
    #[must_use]
    pub fn new(host: impl Into<String>, transport: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: DEFAULT_REMOTE_PORT,
            user: default_user(),
            password: None,
            auth_type: String::new(),
            transport: transport.into(),
            private_key_file: None,
            timeout: default_timeout(),
        }
    }

    /// Creates a request for `host` using the defaults held in `config`.
    #[must_use]
    pub fn from_config(host: impl Into<String>, config: &Config) -> Self {
        let request = Self::new(host, config.transport())
            .with_port(config.remote_port())
            .with_user(config.remote_user())
            .with_timeout(config.timeout());
        match config.private_key_file() {
            Some(path) => request.with_private_key_file(path.as_std_path()),
            None => request,
        }
    }

    /// Sets the remote port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Sets the remote account.
    #[must_use]
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Sets the password used by password-capable transports.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Sets the authentication method hint passed to the transport.
    #[must_use]
    pub fn with_auth_type(mut self, auth_type: impl Into<String>) -> Self {
        self.auth_type = auth_type.into();
        self
    }

    /// Sets the private key file presented during authentication.
    ///
    /// An empty path leaves the request without a key.
    #[must_use]
    pub fn with_private_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        let key = path.into();
        self.private_key_file = (!key.as_os_str().is_empty()).then_some(key);
        self
    }

    /// Sets the connect timeout handed to the transport.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Remote host name or address.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Remote port.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// Remote account.
    #[must_use]
    pub fn user(&self) -> &str {
        self.user.as_str()
    }

    /// Password, if one was supplied.
    #[must_use]
    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Authentication method hint; empty when unset.
    #[must_use]
    pub fn auth_type(&self) -> &str {
        self.auth_type.as_str()
    }

    /// Transport identifier.
    #[must_use]
    pub fn transport(&self) -> &str {
        self.transport.as_str()
    }

    /// Private key file, if a non-empty one was supplied.
    #[must_use]
    pub fn private_key_file(&self) -> Option<&Path> {
        self.private_key_file
            .as_deref()
            .filter(|path| !path.as_os_str().is_empty())
    }

    /// Connect timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for ConnectionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionRequest")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("auth_type", &self.auth_type)
            .field("transport", &self.transport)
            .field("private_key_file", &self.private_key_file)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests;
