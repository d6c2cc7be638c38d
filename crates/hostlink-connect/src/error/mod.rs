//! Domain errors raised while dispatching connections.
//!
//! Three families are kept apart so callers can react to each one:
//! [`ConfigurationError`] for caller mistakes, [`TransportError`] for
//! failures inside a transport, and [`ConnectError`] for everything the
//! [`Connector`](crate::Connector) surfaces. I/O errors are wrapped in `Arc`
//! to satisfy the `result_large_err` Clippy lint.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

/// Caller or configuration mistakes. Never retryable.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// The request did not name a transport.
    #[error("connection request does not name a transport")]
    MissingTransport,

    /// No factory is registered for the requested transport.
    #[error("unsupported connection type: {transport}")]
    UnsupportedTransport {
        /// Identifier that was looked up.
        transport: String,
    },

    /// A factory with the same identifier is already registered.
    #[error("transport '{transport}' is already registered")]
    DuplicateTransport {
        /// Identifier that was registered twice.
        transport: String,
    },

    /// A transport rejected the request parameters.
    #[error("invalid settings for transport '{transport}': {message}")]
    InvalidSettings {
        /// Transport that rejected the parameters.
        transport: String,
        /// Description of the problem.
        message: String,
    },
}

/// Failures raised by a transport while connecting or operating.
#[derive(Debug, Error)]
pub enum TransportError {
    /// A helper program could not be launched.
    #[error("failed to launch '{program}': {source}")]
    Spawn {
        /// Program that failed to start.
        program: String,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The remote host could not be reached or refused the session.
    #[error("host '{host}' is unreachable: {message}")]
    Unreachable {
        /// Host that was contacted.
        host: String,
        /// Diagnostic output from the transport.
        message: String,
    },

    /// A transport helper exited with a non-zero status.
    #[error("transport command exited with status {status}: {stderr}")]
    CommandFailed {
        /// Exit status of the helper.
        status: i32,
        /// Captured standard error.
        stderr: String,
    },

    /// A local I/O operation failed.
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The connection was used after being closed.
    #[error("connection has been closed")]
    Closed,
}

impl TransportError {
    /// Returns `true` for failures that may clear up on their own.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }

    pub(crate) fn io(source: io::Error) -> Self {
        Self::Io {
            source: Arc::new(source),
        }
    }
}

/// Errors returned by [`Connector::connect`](crate::Connector::connect).
#[derive(Debug, Error)]
pub enum ConnectError {
    /// The request named no transport, an unknown one, or bad settings.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    /// The private key file can be read by users other than its owner.
    #[error(
        "private_key_file ({path}) is group-readable or world-readable and thus insecure; \
         authentication will probably fail"
    )]
    SecurityPrecondition {
        /// Offending key file.
        path: PathBuf,
    },

    /// The private key file could not be inspected.
    #[error("cannot inspect private_key_file ({path}): {source}")]
    PrivateKeyUnavailable {
        /// Key file that was inspected.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: Arc<io::Error>,
    },

    /// The transport failed to establish the connection.
    #[error("{transport} transport failed to connect: {source}")]
    Transport {
        /// Transport identifier.
        transport: String,
        /// Error raised by the transport.
        #[source]
        source: TransportError,
    },
}

impl ConnectError {
    /// Returns `true` when repeating the same request could succeed.
    ///
    /// The connector never retries by itself; this only classifies the
    /// failure for whoever drives it.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { source, .. } => source.is_transient(),
            Self::Configuration(_)
            | Self::SecurityPrecondition { .. }
            | Self::PrivateKeyUnavailable { .. } => false,
        }
    }
}
