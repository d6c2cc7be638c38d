//! Connection dispatch through the transport registry.
//!
//! The [`Connector`] is the entry point callers use to open connections. It
//! resolves the request's transport from its [`TransportRegistry`], checks
//! the private key file if one is supplied, and hands back whatever the
//! transport's `connect` returns. It keeps no reference to the handle, so a
//! single connector can serve any number of threads.

use tracing::debug;

use crate::error::{ConfigurationError, ConnectError};
use crate::keyfile;
use crate::registry::TransportRegistry;
use crate::request::ConnectionRequest;
use crate::transport::Connection;

/// Tracing target for dispatch events.
const CONNECTOR_TARGET: &str = "hostlink_connect::connector";

/// Resolves transports and opens connections.
///
/// # Example
///
/// ```
/// use hostlink_connect::{ConnectionRequest, Connector};
///
/// let connector = Connector::with_builtins();
/// let err = connector
///     .connect(&ConnectionRequest::new("web01", "bogus"))
///     .err()
///     .expect("unknown transports are rejected");
/// assert_eq!(err.to_string(), "unsupported connection type: bogus");
/// ```
#[derive(Debug, Default)]
pub struct Connector {
    registry: TransportRegistry,
}

impl Connector {
    /// Creates a connector over the given registry.
    #[must_use]
    pub const fn new(registry: TransportRegistry) -> Self {
        Self { registry }
    }

    /// Creates a connector holding the built-in transports.
    #[must_use]
    pub fn with_builtins() -> Self {
        Self::new(TransportRegistry::with_builtins())
    }

    /// Returns a reference to the transport registry.
    #[must_use]
    pub const fn registry(&self) -> &TransportRegistry {
        &self.registry
    }

    /// Returns a mutable reference to the transport registry.
    #[must_use]
    pub const fn registry_mut(&mut self) -> &mut TransportRegistry {
        &mut self.registry
    }

    /// Opens a connection described by `request`.
    ///
    /// The transport is constructed first, then the private key file is
    /// checked, and only then is the transport asked to connect. A failed
    /// key check therefore never reaches the network. Nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`ConnectError::Configuration`] for a blank, unknown, or
    /// misconfigured transport; [`ConnectError::PrivateKeyUnavailable`] or
    /// [`ConnectError::SecurityPrecondition`] for a key file that cannot be
    /// inspected or is readable by others; and [`ConnectError::Transport`]
    /// wrapping whatever the transport raised while connecting.
    pub fn connect(
        &self,
        request: &ConnectionRequest,
    ) -> Result<Box<dyn Connection>, ConnectError> {
        let transport_name = request.transport();
        if transport_name.trim().is_empty() {
            return Err(ConfigurationError::MissingTransport.into());
        }

        debug!(
            target: CONNECTOR_TARGET,
            transport = transport_name,
            host = request.host(),
            port = request.port(),
            "resolving transport"
        );
        let transport = self.registry.build(request)?;

        if let Some(key) = request.private_key_file() {
            keyfile::ensure_owner_only(key)?;
        }

        let connection = transport
            .connect()
            .map_err(|source| ConnectError::Transport {
                transport: transport_name.to_owned(),
                source,
            })?;

        debug!(
            target: CONNECTOR_TARGET,
            transport = transport_name,
            host = request.host(),
            "connection established"
        );
        Ok(connection)
    }
}
