//! Unit tests for the private key permission guard.

use rstest::rstest;
use tempfile::TempDir;

use super::*;
use crate::tests::key_file_with_mode;

#[rstest]
#[case::owner_only(0o600, false)]
#[case::owner_read_only(0o400, false)]
#[case::owner_and_execute(0o700, false)]
#[case::group_writable_only(0o620, false)]
#[case::group_readable(0o640, true)]
#[case::world_readable(0o604, true)]
#[case::everyone(0o644, true)]
#[case::with_file_type_bits(0o100_600, false)]
fn mode_bits_classify_readability(#[case] mode: u32, #[case] expected: bool) {
    assert_eq!(is_group_or_world_readable(mode), expected, "mode {mode:o}");
}

#[test]
fn owner_only_key_passes() {
    let (_dir, path) = key_file_with_mode(0o600);
    ensure_owner_only(&path).expect("owner-only key should pass");
}

#[cfg(unix)]
#[rstest]
#[case::group(0o640)]
#[case::world(0o604)]
fn readable_key_is_rejected_with_path(#[case] mode: u32) {
    let (_dir, path) = key_file_with_mode(mode);
    let err = ensure_owner_only(&path).expect_err("readable key should fail");
    assert!(matches!(err, ConnectError::SecurityPrecondition { .. }));
    assert!(
        err.to_string().contains(&path.display().to_string()),
        "message should name the key: {err}"
    );
}

#[test]
fn missing_key_is_distinct_from_insecure_key() {
    let dir = TempDir::new().expect("create temp dir");
    let path = dir.path().join("absent");
    let err = ensure_owner_only(&path).expect_err("missing key should fail");
    assert!(
        matches!(err, ConnectError::PrivateKeyUnavailable { .. }),
        "unexpected error: {err}"
    );
}
