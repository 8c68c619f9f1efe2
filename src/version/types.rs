//! Common types for version resolution

use std::fmt;

use crate::config::{COMMIT_ID_LEN, DEFAULT_VERSION};

/// The version a dependency resolved to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedVersion {
    /// A tag name (e.g. "v1.4.0")
    Tag(String),
    /// Object id the primary branch head points to
    BranchHead(String),
    /// A commit id truncated to [`COMMIT_ID_LEN`] characters
    Commit(String),
    /// The "latest" sentinel, leaving the choice to the go tool
    Latest,
}

impl ResolvedVersion {
    /// Builds a `Commit` from a full commit id, keeping only its prefix
    pub fn short_commit(sha: &str) -> Self {
        let short = sha.get(..COMMIT_ID_LEN).unwrap_or(sha);
        ResolvedVersion::Commit(short.to_string())
    }

    pub fn as_str(&self) -> &str {
        match self {
            ResolvedVersion::Tag(s)
            | ResolvedVersion::BranchHead(s)
            | ResolvedVersion::Commit(s) => s,
            ResolvedVersion::Latest => DEFAULT_VERSION,
        }
    }
}

impl fmt::Display for ResolvedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("0123456789abcdef0123456789abcdef01234567", "01234567")]
    #[case("abc", "abc")]
    fn short_commit_keeps_first_eight_characters(#[case] sha: &str, #[case] expected: &str) {
        assert_eq!(
            ResolvedVersion::short_commit(sha),
            ResolvedVersion::Commit(expected.to_string())
        );
    }

    #[test]
    fn latest_renders_as_sentinel() {
        assert_eq!(ResolvedVersion::Latest.to_string(), "latest");
        assert_eq!(ResolvedVersion::Tag("v1.2.3".into()).to_string(), "v1.2.3");
    }
}
