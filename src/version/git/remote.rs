//! Remote repository locations

use std::fmt;

/// Number of `/`-separated parts kept: host, group and name
const MAX_PARTS: usize = 3;

/// A normalized `https://host/group/name` remote address
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RemoteLocation(String);

impl RemoteLocation {
    /// Normalizes a repository address.
    ///
    /// Strips any `scheme://` prefix, drops path segments past `group/name`
    /// and re-attaches `https://`. Import paths such as
    /// `host.com/group/name/sub/package` collapse onto their repository.
    pub fn normalize(raw: &str) -> Self {
        let trimmed = raw.trim();
        let without_scheme = trimmed
            .split_once("://")
            .map(|(_, rest)| rest)
            .unwrap_or(trimmed);

        let kept = without_scheme
            .split('/')
            .take(MAX_PARTS)
            .collect::<Vec<_>>()
            .join("/");

        RemoteLocation(format!("https://{}", kept))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
