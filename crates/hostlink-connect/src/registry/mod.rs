//! Transport registry mapping identifiers to factories.
//!
//! The [`TransportRegistry`] is populated at start-up and never loads code
//! dynamically. Each entry is a factory that turns a
//! [`ConnectionRequest`] into a transport-specific [`Transport`], validating
//! the parameters on the way. Duplicate identifiers are rejected.

use std::collections::HashMap;
use std::fmt;

use crate::error::ConfigurationError;
use crate::request::ConnectionRequest;
use crate::transport::{Transport, local, ssh};

/// Builds a transport from a request.
pub type TransportFactory =
    dyn Fn(&ConnectionRequest) -> Result<Box<dyn Transport>, ConfigurationError> + Send + Sync;

/// Registry of transport factories keyed by identifier.
///
/// # Example
///
/// ```
/// use hostlink_connect::TransportRegistry;
///
/// let registry = TransportRegistry::with_builtins();
/// assert!(registry.contains("ssh"));
/// assert!(registry.get("telnet").is_none());
/// ```
#[derive(Default)]
pub struct TransportRegistry {
    factories: HashMap<String, Box<TransportFactory>>,
}

impl TransportRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the `local` and `ssh` transports.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry
            .factories
            .insert(local::LOCAL.to_owned(), Box::new(local::factory));
        registry
            .factories
            .insert(ssh::SSH.to_owned(), Box::new(ssh::factory));
        registry
    }

    /// Registers a factory under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingTransport`] for a blank name and
    /// [`ConfigurationError::DuplicateTransport`] when `name` is taken.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        factory: F,
    ) -> Result<(), ConfigurationError>
    where
        F: Fn(&ConnectionRequest) -> Result<Box<dyn Transport>, ConfigurationError>
            + Send
            + Sync
            + 'static,
    {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ConfigurationError::MissingTransport);
        }
        if self.factories.contains_key(&name) {
            return Err(ConfigurationError::DuplicateTransport { transport: name });
        }
        self.factories.insert(name, Box::new(factory));
        Ok(())
    }

    /// Looks up the factory registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TransportFactory> {
        self.factories.get(name).map(|factory| &**factory)
    }

    /// Resolves the request's transport and constructs it.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::UnsupportedTransport`] when no factory is
    /// registered, or whatever error the factory raises.
    pub fn build(
        &self,
        request: &ConnectionRequest,
    ) -> Result<Box<dyn Transport>, ConfigurationError> {
        let factory = self.get(request.transport()).ok_or_else(|| {
            ConfigurationError::UnsupportedTransport {
                transport: request.transport().to_owned(),
            }
        })?;
        factory(request)
    }

    /// Returns `true` when a factory is registered under `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered identifiers in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered transports.
    #[must_use]
    pub fn len(&self) -> usize {
        self.factories.len()
    }

    /// Returns `true` when no transports are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }
}

impl fmt::Debug for TransportRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportRegistry")
            .field("transports", &self.names())
            .finish()
    }
}
