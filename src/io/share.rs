//! Share module
//!
//! Hands a staged package to an external opener program: `open` on macOS,
//! `xdg-open` elsewhere on unix, or whatever `--via` / `APKSTASH_OPENER`
//! points at. The opener decides which application receives the file.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShareError {
    /// No platform opener exists on this system.
    #[error("no share handler available")]
    Unsupported,

    /// An explicitly requested opener is not on `PATH`.
    #[error("share handler '{0}' not found")]
    HandlerNotFound(String),

    /// The user interrupted the opener before it finished.
    #[error("share cancelled")]
    Cancelled,

    #[error("share handler exited with {0}")]
    Handler(ExitStatus),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(target_os = "macos")]
const HANDLER_CANDIDATES: &[&str] = &["open"];
#[cfg(all(unix, not(target_os = "macos")))]
const HANDLER_CANDIDATES: &[&str] = &["xdg-open"];
#[cfg(windows)]
const HANDLER_CANDIDATES: &[&str] = &["explorer"];

/// Resolve the opener: an explicit override wins, otherwise the first
/// platform candidate present on `PATH`.
///
/// An override that cannot be found is an error; only the platform
/// candidates degrade to [`ShareError::Unsupported`].
fn resolve_handler(via: Option<&str>) -> Result<PathBuf, ShareError> {
    if let Some(program) = via {
        return which::which(program)
            .map_err(|_| ShareError::HandlerNotFound(program.to_string()));
    }

    HANDLER_CANDIDATES
        .iter()
        .find_map(|candidate| which::which(candidate).ok())
        .ok_or(ShareError::Unsupported)
}

/// Hand `path` to the opener and classify the outcome.
///
/// The opener inherits the terminal, so anything interactive it shows
/// reaches the user directly.
pub fn share_file(via: Option<&str>, path: &Path) -> Result<(), ShareError> {
    let handler = resolve_handler(via)?;
    tracing::debug!(handler = %handler.display(), file = %path.display(), "invoking share handler");

    let status = Command::new(&handler).arg(path).status()?;

    if status.success() {
        return Ok(());
    }
    if was_interrupted(status) {
        return Err(ShareError::Cancelled);
    }
    Err(ShareError::Handler(status))
}

#[cfg(unix)]
fn was_interrupted(status: ExitStatus) -> bool {
    use std::os::unix::process::ExitStatusExt;

    // Shells report a SIGINT death as 128 + signal number.
    status.signal() == Some(libc::SIGINT) || status.code() == Some(130)
}

#[cfg(not(unix))]
fn was_interrupted(_status: ExitStatus) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_zero_exit_is_success() {
        share_file(Some("true"), Path::new("/dev/null")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit_is_handler_failure() {
        let err = share_file(Some("false"), Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, ShareError::Handler(_)));
    }

    #[test]
    fn test_unknown_explicit_handler_is_an_error() {
        let err = share_file(Some("definitely-not-a-real-opener-415"), Path::new("file.apk"))
            .unwrap_err();
        assert!(matches!(err, ShareError::HandlerNotFound(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_interrupt_exit_code_reads_as_cancelled() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("cancelling-opener");
        std::fs::write(&script, "#!/bin/sh\nexit 130\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let err = share_file(Some(script.to_str().unwrap()), Path::new("/dev/null")).unwrap_err();
        assert!(matches!(err, ShareError::Cancelled));
    }
}
