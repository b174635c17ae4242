//! Export module
//!
//! Writes stored payloads back onto the filesystem. Sharing goes through
//! here too: the staged copy must outlive this process because the
//! receiving application reads it after we exit.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::exports_path;
use crate::store::Artifact;

/// Write `artifact` under `dest` and return the path written.
///
/// An existing directory receives the artifact under its own name; any
/// other `dest` is the target file. Missing parent directories are created.
pub fn write_artifact(artifact: &Artifact, dest: &Path) -> io::Result<PathBuf> {
    let target = if dest.is_dir() {
        dest.join(&artifact.meta.name)
    } else {
        dest.to_path_buf()
    };

    if let Some(parent) = target.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    fs::write(&target, &artifact.data)?;
    tracing::debug!(file = %target.display(), bytes = artifact.data.len(), "artifact written");

    Ok(target)
}

/// Stage `artifact` in the exports directory for sharing.
pub fn stage_for_share(artifact: &Artifact) -> io::Result<PathBuf> {
    let dir = exports_path();
    fs::create_dir_all(&dir)?;
    write_artifact(artifact, &dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::APK_CONTENT_TYPE;
    use crate::store::{Artifact, ArtifactMeta};
    use sha2::{Digest, Sha256};
    use tempfile::tempdir;

    fn artifact(name: &str, data: &[u8]) -> Artifact {
        Artifact {
            meta: ArtifactMeta {
                name: name.to_string(),
                content_type: APK_CONTENT_TYPE.to_string(),
                size: data.len() as u64,
                sha256: hex::encode(Sha256::digest(data)),
                stored_at: 0,
            },
            data: data.to_vec(),
        }
    }

    #[test]
    fn test_directory_dest_uses_artifact_name() {
        let dir = tempdir().unwrap();
        let a = artifact("app.apk", b"payload");

        let written = write_artifact(&a, dir.path()).unwrap();

        assert_eq!(written, dir.path().join("app.apk"));
        assert_eq!(fs::read(&written).unwrap(), b"payload");
    }

    #[test]
    fn test_file_dest_creates_parents() {
        let dir = tempdir().unwrap();
        let a = artifact("app.apk", b"payload");
        let dest = dir.path().join("deep/nested/renamed.apk");

        let written = write_artifact(&a, &dest).unwrap();

        assert_eq!(written, dest);
        assert_eq!(fs::read(&written).unwrap(), b"payload");
    }
}
