//! Private key permission guard.
//!
//! Key-based authentication fails, or is refused outright by OpenSSH, when
//! the key file can be read by anyone but its owner. The guard reports such
//! files instead of changing their mode.

use std::fs::{self, Metadata};
use std::path::Path;
use std::sync::Arc;

use crate::error::ConnectError;

/// Group-read and other-read permission bits.
const GROUP_OR_OTHER_READ: u32 = 0o044;

/// Returns `true` when `mode` grants read access to group or other.
///
/// # Example
///
/// ```
/// use hostlink_connect::keyfile::is_group_or_world_readable;
///
/// assert!(!is_group_or_world_readable(0o600));
/// assert!(is_group_or_world_readable(0o640));
/// assert!(is_group_or_world_readable(0o604));
/// ```
#[must_use]
pub const fn is_group_or_world_readable(mode: u32) -> bool {
    mode & GROUP_OR_OTHER_READ != 0
}

/// Checks that the key file at `path` is readable by its owner only.
///
/// # Errors
///
/// Returns [`ConnectError::PrivateKeyUnavailable`] when the file cannot be
/// inspected and [`ConnectError::SecurityPrecondition`] when group or other
/// may read it.
pub fn ensure_owner_only(path: &Path) -> Result<(), ConnectError> {
    let metadata = fs::metadata(path).map_err(|source| ConnectError::PrivateKeyUnavailable {
        path: path.to_path_buf(),
        source: Arc::new(source),
    })?;
    check_mode(path, &metadata)
}

#[cfg(unix)]
fn check_mode(path: &Path, metadata: &Metadata) -> Result<(), ConnectError> {
    use std::os::unix::fs::PermissionsExt;

    if is_group_or_world_readable(metadata.permissions().mode()) {
        return Err(ConnectError::SecurityPrecondition {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

// Windows has no POSIX mode bits to inspect.
#[cfg(not(unix))]
fn check_mode(_path: &Path, _metadata: &Metadata) -> Result<(), ConnectError> {
    Ok(())
}

#[cfg(test)]
mod tests;
