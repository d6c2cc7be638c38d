//! Transport and connection capabilities.
//!
//! A [`Transport`] is built from a [`ConnectionRequest`](crate::ConnectionRequest)
//! by a registered factory and exposes a single capability: connecting. The
//! resulting [`Connection`] is the handle callers use to run commands and
//! move files until they close it.

pub mod local;
pub mod ssh;

use std::path::Path;
use std::process::Output;

use crate::error::TransportError;

/// A remote-access mechanism able to open connections.
///
/// Implementations receive all parameters at construction, so `connect`
/// takes no arguments. It may block for the duration of the handshake.
pub trait Transport: Send {
    /// Establishes a connection.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] describing why the handshake failed.
    fn connect(&self) -> Result<Box<dyn Connection>, TransportError>;
}

/// A live connection returned by [`Transport::connect`].
pub trait Connection: Send {
    /// Identifier of the transport backing this connection.
    fn transport(&self) -> &str;

    /// Runs `command` on the target and captures its output.
    ///
    /// A non-zero exit status is reported in the returned output, not as an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the command could not be delivered.
    fn exec_command(&mut self, command: &str) -> Result<CommandOutput, TransportError>;

    /// Copies a local file to `remote` on the target.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the copy fails.
    fn put_file(&mut self, local: &Path, remote: &Path) -> Result<(), TransportError>;

    /// Copies `remote` from the target to a local file.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if the copy fails.
    fn fetch_file(&mut self, remote: &Path, local: &Path) -> Result<(), TransportError>;

    /// Closes the connection. Later operations fail with
    /// [`TransportError::Closed`].
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] if tearing the session down fails.
    fn close(&mut self) -> Result<(), TransportError>;
}

/// Captured result of a command run over a [`Connection`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    status: i32,
    stdout: String,
    stderr: String,
}

impl CommandOutput {
    /// Creates an output record.
    #[must_use]
    pub fn new(status: i32, stdout: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self {
            status,
            stdout: stdout.into(),
            stderr: stderr.into(),
        }
    }

    /// Exit status; `-1` when the command was terminated by a signal.
    #[must_use]
    pub const fn status(&self) -> i32 {
        self.status
    }

    /// Captured standard output.
    #[must_use]
    pub fn stdout(&self) -> &str {
        self.stdout.as_str()
    }

    /// Captured standard error.
    #[must_use]
    pub fn stderr(&self) -> &str {
        self.stderr.as_str()
    }

    /// Returns `true` when the command exited with status zero.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status == 0
    }
}

impl From<Output> for CommandOutput {
    fn from(output: Output) -> Self {
        Self {
            status: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
