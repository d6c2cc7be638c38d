//! Unit tests for connection requests.

use std::path::Path;
use std::time::Duration;

use camino::Utf8PathBuf;
use hostlink_config::Config;

use super::*;

#[test]
fn new_applies_defaults() {
    let request = ConnectionRequest::new("web01", "ssh");
    assert_eq!(request.host(), "web01");
    assert_eq!(request.transport(), "ssh");
    assert_eq!(request.port(), 22);
    assert_eq!(request.user(), "root");
    assert!(request.password().is_none());
    assert!(request.auth_type().is_empty());
    assert!(request.private_key_file().is_none());
    assert_eq!(request.timeout(), Duration::from_secs(10));
}

#[test]
fn builder_sets_every_field() {
    let request = ConnectionRequest::new("web01", "ssh")
        .with_port(2200)
        .with_user("deploy")
        .with_password("hunter2")
        .with_auth_type("password")
        .with_private_key_file("/keys/id_ed25519")
        .with_timeout(Duration::from_secs(3));

    assert_eq!(request.port(), 2200);
    assert_eq!(request.user(), "deploy");
    assert_eq!(request.password(), Some("hunter2"));
    assert_eq!(request.auth_type(), "password");
    assert_eq!(
        request.private_key_file(),
        Some(Path::new("/keys/id_ed25519"))
    );
    assert_eq!(request.timeout(), Duration::from_secs(3));
}

#[test]
fn from_config_copies_defaults() {
    let mut config = Config::default();
    config.transport = "local".into();
    config.remote_port = 2022;
    config.remote_user = "ops".into();
    config.private_key_file = Some(Utf8PathBuf::from("/keys/ops"));
    config.timeout_secs = 5;

    let request = ConnectionRequest::from_config("db01", &config);
    assert_eq!(request.host(), "db01");
    assert_eq!(request.transport(), "local");
    assert_eq!(request.port(), 2022);
    assert_eq!(request.user(), "ops");
    assert_eq!(request.private_key_file(), Some(Path::new("/keys/ops")));
    assert_eq!(request.timeout(), Duration::from_secs(5));
}

#[test]
fn debug_redacts_password() {
    let request = ConnectionRequest::new("web01", "ssh").with_password("hunter2");
    let rendered = format!("{request:?}");
    assert!(!rendered.contains("hunter2"), "password leaked: {rendered}");
    assert!(rendered.contains("<redacted>"));
}

#[test]
fn serialisation_omits_password() {
    let request = ConnectionRequest::new("web01", "ssh").with_password("hunter2");
    let json = serde_json::to_string(&request).expect("serialise request");
    assert!(!json.contains("hunter2"), "password leaked: {json}");
}

#[test]
fn deserialisation_fills_defaults() {
    let request: ConnectionRequest =
        serde_json::from_str(r#"{"host":"web01","transport":"local"}"#)
            .expect("deserialise request");
    assert_eq!(request.port(), 22);
    assert_eq!(request.user(), "root");
    assert_eq!(request.timeout(), Duration::from_secs(10));
}

#[test]
fn empty_private_key_file_is_treated_as_absent() {
    let request = ConnectionRequest::new("web01", "ssh").with_private_key_file("");
    assert!(request.private_key_file().is_none());
}

#[test]
fn from_config_ignores_empty_private_key_file() {
    let mut config = Config::default();
    config.private_key_file = Some(Utf8PathBuf::from(""));
    let request = ConnectionRequest::from_config("db01", &config);
    assert!(request.private_key_file().is_none());
}

#[test]
fn deserialised_empty_private_key_file_is_treated_as_absent() {
    let request: ConnectionRequest = serde_json::from_str(
        r#"{"host":"web01","transport":"ssh","private_key_file":""}"#,
    )
    .expect("deserialise request");
    assert!(request.private_key_file().is_none());
}
