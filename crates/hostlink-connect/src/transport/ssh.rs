//! Transport driving the system OpenSSH client.
//!
//! Every operation spawns `ssh` (or `scp` for file copies) with options
//! derived from [`SshSettings`]. Options are passed as `-o Key=Value` pairs so
//! the same list serves both programs. When a password is supplied the
//! client runs under `sshpass -e`, which reads the secret from the `SSHPASS`
//! environment variable of the child; otherwise `BatchMode` keeps the client
//! from prompting.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{ConfigurationError, TransportError};
use crate::request::ConnectionRequest;
use crate::transport::{CommandOutput, Connection, Transport};

/// Identifier under which the ssh transport is registered.
pub const SSH: &str = "ssh";

const SSH_TARGET: &str = "hostlink_connect::transport::ssh";

const SSH_PROGRAM: &str = "ssh";
const SCP_PROGRAM: &str = "scp";
const SSHPASS_PROGRAM: &str = "sshpass";

/// Exit status OpenSSH uses for connection-level failures.
const SSH_CONNECTION_FAILURE: i32 = 255;

/// Marks the end of options for `ssh` and `scp`.
const END_OF_OPTIONS: &str = "--";

/// Programs launched by the ssh transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SshPrograms {
    pub(crate) ssh: PathBuf,
    pub(crate) scp: PathBuf,
    pub(crate) sshpass: PathBuf,
}

impl Default for SshPrograms {
    fn default() -> Self {
        Self {
            ssh: PathBuf::from(SSH_PROGRAM),
            scp: PathBuf::from(SCP_PROGRAM),
            sshpass: PathBuf::from(SSHPASS_PROGRAM),
        }
    }
}

/// Validated settings for the ssh transport.
#[derive(Clone, PartialEq, Eq)]
pub struct SshSettings {
    host: String,
    port: u16,
    user: String,
    password: Option<String>,
    auth_type: String,
    private_key_file: Option<PathBuf>,
    timeout: Duration,
    programs: SshPrograms,
}

impl fmt::Debug for SshSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SshSettings")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("auth_type", &self.auth_type)
            .field("private_key_file", &self.private_key_file)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SshSettings {
    /// Builds and validates settings from a request.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::InvalidSettings`] when the host or user
    /// is blank, the host starts with `-`, or the port is zero.
    pub fn from_request(request: &ConnectionRequest) -> Result<Self, ConfigurationError> {
        let invalid = |message: &str| ConfigurationError::InvalidSettings {
            transport: SSH.to_owned(),
            message: message.to_owned(),
        };
        let host = request.host().trim();
        if host.is_empty() {
            return Err(invalid("host must not be empty"));
        }
        // A leading dash would be read as an ssh option.
        if host.starts_with('-') {
            return Err(invalid("host must not start with '-'"));
        }
        if request.user().trim().is_empty() {
            return Err(invalid("user must not be empty"));
        }
        if request.port() == 0 {
            return Err(invalid("port must be non-zero"));
        }
        Ok(Self {
            host: host.to_owned(),
            port: request.port(),
            user: request.user().to_owned(),
            password: request.password().map(str::to_owned),
            auth_type: request.auth_type().trim().to_owned(),
            private_key_file: request.private_key_file().map(Path::to_path_buf),
            timeout: request.timeout(),
            programs: SshPrograms::default(),
        })
    }

    /// Replaces the programs launched for ssh, scp, and sshpass.
    #[cfg(test)]
    #[must_use]
    pub(crate) fn with_programs(mut self, programs: SshPrograms) -> Self {
        self.programs = programs;
        self
    }

    /// Remote host.
    #[must_use]
    pub fn host(&self) -> &str {
        self.host.as_str()
    }

    /// Options shared by `ssh` and `scp`, in command-line order.
    #[must_use]
    pub fn common_options(&self) -> Vec<OsString> {
        let mut options = Vec::new();
        let mut push = |option: String| {
            options.push(OsString::from("-o"));
            options.push(OsString::from(option));
        };
        push(format!("Port={}", self.port));
        push(format!("User={}", self.user));
        push(format!("ConnectTimeout={}", self.timeout.as_secs().max(1)));
        if self.password.is_none() {
            push(String::from("BatchMode=yes"));
        }
        if !self.auth_type.is_empty() {
            push(format!("PreferredAuthentications={}", self.auth_type));
        }
        if let Some(key) = &self.private_key_file {
            options.push(OsString::from("-i"));
            options.push(key.clone().into_os_string());
        }
        options
    }

    /// Arguments passed to `ssh` to run `remote_command`.
    #[must_use]
    pub fn ssh_args(&self, remote_command: &str) -> Vec<OsString> {
        let mut args = self.common_options();
        args.push(OsString::from(END_OF_OPTIONS));
        args.push(OsString::from(self.host.as_str()));
        args.push(OsString::from(remote_command));
        args
    }

    /// Arguments passed to `scp` to copy `from` to `to`.
    #[must_use]
    pub fn scp_args(&self, from: OsString, to: OsString) -> Vec<OsString> {
        let mut args = self.common_options();
        args.push(OsString::from(END_OF_OPTIONS));
        args.push(from);
        args.push(to);
        args
    }

    /// Remote path in `host:path` form, bracketing IPv6 literals.
    #[must_use]
    pub fn remote_spec(&self, path: &Path) -> OsString {
        let mut spec = if self.host.contains(':') {
            OsString::from(format!("[{}]:", self.host))
        } else {
            OsString::from(format!("{}:", self.host))
        };
        spec.push(path.as_os_str());
        spec
    }

    fn command(&self, program: &Path, args: Vec<OsString>) -> Command {
        let mut command = match &self.password {
            Some(password) => {
                let mut command = Command::new(&self.programs.sshpass);
                command.arg("-e").arg(program).env("SSHPASS", password);
                command
            }
            None => Command::new(program),
        };
        command.args(args).stdin(Stdio::null());
        command
    }
}

/// Transport that shells out to OpenSSH.
#[derive(Debug, Clone)]
pub struct SshTransport {
    settings: SshSettings,
}

impl SshTransport {
    /// Creates a transport from validated settings.
    #[must_use]
    pub const fn new(settings: SshSettings) -> Self {
        Self { settings }
    }

    /// Settings the transport was built with.
    #[must_use]
    pub const fn settings(&self) -> &SshSettings {
        &self.settings
    }
}

impl Transport for SshTransport {
    fn connect(&self) -> Result<Box<dyn Connection>, TransportError> {
        debug!(
            target: SSH_TARGET,
            host = self.settings.host(),
            port = self.settings.port,
            user = %self.settings.user,
            "checking ssh session"
        );
        let output = run(
            self.settings
                .command(&self.settings.programs.ssh, self.settings.ssh_args("true")),
        )?;
        check_status(&self.settings, output)?;
        Ok(Box::new(SshConnection {
            settings: self.settings.clone(),
            closed: false,
        }))
    }
}

/// Registry factory for the ssh transport.
///
/// # Errors
///
/// Returns [`ConfigurationError::InvalidSettings`] when the request cannot
/// produce valid [`SshSettings`].
pub fn factory(request: &ConnectionRequest) -> Result<Box<dyn Transport>, ConfigurationError> {
    Ok(Box::new(SshTransport::new(SshSettings::from_request(
        request,
    )?)))
}

/// Connection backed by the OpenSSH client.
#[derive(Debug)]
pub struct SshConnection {
    settings: SshSettings,
    closed: bool,
}

impl SshConnection {
    const fn ensure_open(&self) -> Result<(), TransportError> {
        if self.closed {
            return Err(TransportError::Closed);
        }
        Ok(())
    }

    fn copy(&self, from: OsString, to: OsString) -> Result<(), TransportError> {
        debug!(
            target: SSH_TARGET,
            host = self.settings.host(),
            from = ?from,
            to = ?to,
            "copying file over scp"
        );
        let output = run(
            self.settings
                .command(&self.settings.programs.scp, self.settings.scp_args(from, to)),
        )?;
        check_status(&self.settings, output).map(drop)
    }
}

impl Connection for SshConnection {
    fn transport(&self) -> &str {
        SSH
    }

    fn exec_command(&mut self, command: &str) -> Result<CommandOutput, TransportError> {
        self.ensure_open()?;
        debug!(
            target: SSH_TARGET,
            host = self.settings.host(),
            command,
            "running remote command"
        );
        let output = run(
            self.settings
                .command(&self.settings.programs.ssh, self.settings.ssh_args(command)),
        )?;
        if output.status.code() == Some(SSH_CONNECTION_FAILURE) {
            return Err(unreachable_error(&self.settings, &output));
        }
        Ok(CommandOutput::from(output))
    }

    fn put_file(&mut self, local: &Path, remote: &Path) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.copy(
            local.as_os_str().to_owned(),
            self.settings.remote_spec(remote),
        )
    }

    fn fetch_file(&mut self, remote: &Path, local: &Path) -> Result<(), TransportError> {
        self.ensure_open()?;
        self.copy(
            self.settings.remote_spec(remote),
            local.as_os_str().to_owned(),
        )
    }

    fn close(&mut self) -> Result<(), TransportError> {
        self.closed = true;
        Ok(())
    }
}

fn run(mut command: Command) -> Result<Output, TransportError> {
    command.output().map_err(|err| TransportError::Spawn {
        program: command.get_program().to_string_lossy().into_owned(),
        source: Arc::new(err),
    })
}

fn check_status(settings: &SshSettings, output: Output) -> Result<Output, TransportError> {
    match output.status.code() {
        Some(0) => Ok(output),
        Some(SSH_CONNECTION_FAILURE) => Err(unreachable_error(settings, &output)),
        status => Err(TransportError::CommandFailed {
            status: status.unwrap_or(-1),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        }),
    }
}

fn unreachable_error(settings: &SshSettings, output: &Output) -> TransportError {
    TransportError::Unreachable {
        host: settings.host().to_owned(),
        message: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
    }
}
