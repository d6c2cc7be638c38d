//! Transport that runs commands on the controller itself.
//!
//! No network is involved: commands go through `sh -c` and files are copied
//! with the local filesystem. Host and credential fields of the request are
//! ignored.

use std::fs;
use std::path::Path;
use std::process::{Command, Stdio};
use std::sync::Arc;

use tracing::debug;

use crate::error::{ConfigurationError, TransportError};
use crate::request::ConnectionRequest;
use crate::transport::{CommandOutput, Connection, Transport};

/// Identifier under which the local transport is registered.
pub const LOCAL: &str = "local";

const LOCAL_TARGET: &str = "hostlink_connect::transport::local";

const SHELL: &str = "sh";

/// Settings for the local transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalSettings {
    host: String,
}

impl LocalSettings {
    /// Builds settings from a request.
    #[must_use]
    pub fn from_request(request: &ConnectionRequest) -> Self {
        Self {
            host: request.host().to_owned(),
        }
    }

    /// Host label carried for logging.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }
}

/// Transport executing on the local machine.
#[derive(Debug, Clone)]
pub struct LocalTransport {
    settings: LocalSettings,
}

impl LocalTransport {
    /// Creates a transport from validated settings.
    #[must_use]
    pub const fn new(settings: LocalSettings) -> Self {
        Self { settings }
    }
}

impl Transport for LocalTransport {
    fn connect(&self) -> Result<Box<dyn Connection>, TransportError> {
        debug!(
            target: LOCAL_TARGET,
            host = self.settings.host(),
            "opening local connection"
        );
        Ok(Box::new(LocalConnection::default()))
    }
}

/// Registry factory for the local transport.
///
/// # Errors
///
/// Never fails; the signature matches [`TransportFactory`](crate::TransportFactory).
pub fn factory(request: &ConnectionRequest) -> Result<Box<dyn Transport>, ConfigurationError> {
    Ok(Box::new(LocalTransport::new(LocalSettings::from_request(
        request,
    ))))
}

/// Connection executing on the local machine.
#[derive(Debug, Default)]
pub struct LocalConnection {
    closed: bool,
}

impl LocalConnection {
    const fn ensure_open(&self) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        Ok(())
    }
}

impl Connection for LocalConnection {
    fn transport(&self) -> &str {
        LOCAL
    }

    fn exec_command(&mut self, command: &str) -> Result<CommandOutput, TransportError> {
        self.ensure_open()?;
        debug!(target: LOCAL_TARGET, command, "running local command");
        let output = Command::new(SHELL)
            .arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .output()
            .map_err(|err| TransportError::Spawn {
                program: SHELL.to_owned(),
                source: Arc::new(err),
            })?;
        Ok(CommandOutput::from(output))
    }

    fn put_file(&mut self, local: &Path, remote: &Path) -> Result<(), TransportError> {
        self.ensure_open()?;
        copy(local, remote)
    }

    fn fetch_file(&mut self, remote: &Path, local: &Path) -> Result<(), TransportError> {
        self.ensure_open()?;
        copy(remote, local)
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        Ok(())
    }
}

fn copy(from: &Path, to: &Path) -> Result<(), TransportError> {
    debug!(
        target: LOCAL_TARGET,
        from = %from.display(),
        to = %to.display(),
        "copying file"
    );
    fs::copy(from, to).map(drop).map_err(TransportError::io)
}
