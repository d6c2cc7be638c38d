//! Transport selection and connection dispatch for hostlink.
//!
//! The `hostlink-connect` crate turns a [`ConnectionRequest`] into a live
//! [`Connection`]. A [`Connector`] resolves the request's transport
//! identifier through a [`TransportRegistry`], refuses private key files that
//! other users could read, and then asks the resolved [`Transport`] to
//! connect. The returned handle belongs to the caller; the connector keeps no
//! reference to it.
//!
//! Two transports ship with the crate: `local`, which runs commands on the
//! controller itself, and `ssh`, which drives the system OpenSSH client.
//! Further transports are added by registering a factory.
//!
//! # Example
//!
//! ```rust,no_run
//! use hostlink_connect::{ConnectionRequest, Connector};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let connector = Connector::with_builtins();
//! let request = ConnectionRequest::new("web01.example.com", "ssh")
//!     .with_user("deploy")
//!     .with_private_key_file("/home/deploy/.ssh/id_ed25519");
//!
//! let mut connection = connector.connect(&request)?;
//! let output = connection.exec_command("uptime")?;
//! println!("{}", output.stdout());
//! connection.close()?;
//! # Ok(()) }
//! ```

pub mod connector;
pub mod error;
pub mod keyfile;
pub mod registry;
pub mod request;
pub mod telemetry;
pub mod transport;

#[cfg(test)]
mod tests;

pub use self::connector::Connector;
pub use self::error::{ConfigurationError, ConnectError, TransportError};
pub use self::registry::{TransportFactory, TransportRegistry};
pub use self::request::ConnectionRequest;
pub use self::transport::{CommandOutput, Connection, Transport};
