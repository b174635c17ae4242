//! Shared newtypes.

use std::fmt;
use std::ops::Deref;

use serde::Serialize;
use thiserror::Error;

/// Error returned when a string cannot be used as an artifact name.
#[derive(Error, Debug)]
#[error("invalid artifact name '{0}': expected a bare file name")]
pub struct InvalidName(pub String);

/// A validated artifact name.
///
/// Names key the stash and become file names when a package is staged on
/// disk, yet they originate from untrusted URLs. A valid name is a bare
/// file name: non-empty, not `.` or `..`, and free of path separators.
///
/// # Example
///
/// ```
/// use apkstash::types::ArtifactName;
///
/// let name = ArtifactName::derive("https://example.com/builds/app-1.2.apk?dl=1");
/// assert_eq!(name.as_str(), "app-1.2.apk");
///
/// // No usable segment: fall back to the default.
/// assert_eq!(ArtifactName::derive("https://example.com/").as_str(), "app.apk");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ArtifactName(String);

impl ArtifactName {
    /// Validate an explicitly chosen name.
    pub fn new(name: &str) -> Result<Self, InvalidName> {
        if Self::is_valid(name) {
            Ok(Self(name.to_string()))
        } else {
            Err(InvalidName(name.to_string()))
        }
    }

    /// Derive a name from a URL's final path segment.
    ///
    /// Query and fragment are not part of the path and are stripped first.
    /// Falls back to [`crate::DEFAULT_ARTIFACT_NAME`] when the segment is
    /// empty or not a usable file name.
    pub fn derive(url: &str) -> Self {
        let path = url.split(['?', '#']).next().unwrap_or("");
        let segment = path.split('/').next_back().unwrap_or("");

        Self::new(segment).unwrap_or_else(|_| Self(crate::DEFAULT_ARTIFACT_NAME.to_string()))
    }

    fn is_valid(name: &str) -> bool {
        !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\', '\0'])
    }

    /// The name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Deref for ArtifactName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<str> for ArtifactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derives_final_path_segment() {
        assert_eq!(
            ArtifactName::derive("https://x.dev/a/b/tool.apk").as_str(),
            "tool.apk"
        );
    }

    #[test]
    fn test_strips_query_and_fragment() {
        assert_eq!(
            ArtifactName::derive("https://x.dev/app.apk?token=abc#sect").as_str(),
            "app.apk"
        );
    }

    #[test]
    fn test_falls_back_when_segment_unusable() {
        assert_eq!(ArtifactName::derive("https://x.dev/").as_str(), "app.apk");
        assert_eq!(ArtifactName::derive("").as_str(), "app.apk");
        assert_eq!(ArtifactName::derive("https://x.dev/dl/?id=9").as_str(), "app.apk");
    }

    #[test]
    fn test_rejects_path_escapes() {
        assert!(ArtifactName::new("../evil.apk").is_err());
        assert!(ArtifactName::new("a/b.apk").is_err());
        assert!(ArtifactName::new("a\\b.apk").is_err());
        assert!(ArtifactName::new("..").is_err());
        assert!(ArtifactName::new("").is_err());
    }

    #[test]
    fn test_accepts_ordinary_file_names() {
        assert!(ArtifactName::new("app.apk").is_ok());
        assert!(ArtifactName::new("app-1.2.3_arm64.apk").is_ok());
    }
}
