//! go-import origin discovery
//!
//! Vanity import paths (e.g. `golang.org/x/text`) do not name their
//! repository directly. Fetching `https://<path>?go-get=1` returns an HTML
//! page carrying the real origin:
//!
//! ```text
//! <meta name="go-import" content="golang.org/x/text git https://go.googlesource.com/text">
//! ```

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use regex::Regex;
use tracing::debug;

use crate::version::error::ResolveError;
use crate::version::git::remote::RemoteLocation;

/// Default scheme prefix for metadata lookups
const DEFAULT_BASE_URL: &str = "https://";

/// Value of the `name` attribute identifying the metadata tag
const GO_IMPORT: &str = "go-import";

/// `{import-path-prefix, vcs, repository}` recovered from a go-import tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginMetadata {
    pub prefix: String,
    pub vcs: String,
    pub repository: String,
}

impl OriginMetadata {
    /// Parses a `prefix vcs repository` payload
    pub fn parse(payload: &str) -> Result<Self, ResolveError> {
        let fields: Vec<&str> = payload.split_whitespace().collect();
        match fields.as_slice() {
            [prefix, vcs, repository] => Ok(Self {
                prefix: prefix.to_string(),
                vcs: vcs.to_string(),
                repository: repository.to_string(),
            }),
            _ => Err(ResolveError::InvalidMetadata(payload.to_string())),
        }
    }
}

/// Finds the real repository behind an import path
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait OriginDiscoverer: Send + Sync {
    async fn discover(&self, import_path: &str) -> Result<RemoteLocation, ResolveError>;
}

/// [`OriginDiscoverer`] using the `?go-get=1` HTML convention
pub struct GoImportDiscoverer {
    client: reqwest::Client,
    base_url: String,
    scanner: MetaScanner,
}

impl GoImportDiscoverer {
    /// Creates a discoverer that prefixes import paths with `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("gomod")
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.to_string(),
            scanner: MetaScanner::new(),
        }
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(DEFAULT_BASE_URL, timeout)
    }
}

#[async_trait::async_trait]
impl OriginDiscoverer for GoImportDiscoverer {
    async fn discover(&self, import_path: &str) -> Result<RemoteLocation, ResolveError> {
        let url = format!("{}{}?go-get=1", self.base_url, import_path);
        let read_error = |source| ResolveError::MetadataRead {
            import_path: import_path.to_string(),
            source,
        };

        let response = self.client.get(&url).send().await.map_err(read_error)?;
        debug!("{} returned status {}", url, response.status());
        let body = response.text().await.map_err(read_error)?;

        let payload = self
            .scanner
            .go_import_content(&body)
            .ok_or_else(|| ResolveError::MetadataNotFound(import_path.to_string()))?;
        let metadata = OriginMetadata::parse(&payload)?;
        debug!(
            "{} is served by {} repository {}",
            metadata.prefix, metadata.vcs, metadata.repository
        );

        Ok(RemoteLocation::normalize(&metadata.repository))
    }
}

/// Extracts go-import payloads from HTML
struct MetaScanner {
    meta_re: Regex,
    attr_re: Regex,
}

impl MetaScanner {
    fn new() -> Self {
        Self {
            // <meta ...> or <meta .../>
            meta_re: Regex::new(r"(?is)<meta\b([^>]*)>").unwrap(),
            // key="v" | key='v' | key=v
            attr_re: Regex::new(
                r#"([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#,
            )
            .unwrap(),
        }
    }

    /// Returns the `content` attribute of the first `<meta name="go-import">`
    fn go_import_content(&self, html: &str) -> Option<String> {
        self.meta_re.captures_iter(html).find_map(|meta| {
            let attrs = self.attributes(&meta[1]);
            let is_go_import = attrs
                .iter()
                .any(|(key, value)| key.eq_ignore_ascii_case("name") && value == GO_IMPORT);
            if !is_go_import {
                return None;
            }
            attrs
                .into_iter()
                .find(|(key, _)| key.eq_ignore_ascii_case("content"))
                .map(|(_, value)| decode_entities(&value))
        })
    }

    fn attributes(&self, tag_body: &str) -> Vec<(String, String)> {
        self.attr_re
            .captures_iter(tag_body)
            .map(|caps| {
                let value = caps
                    .get(2)
                    .or_else(|| caps.get(3))
                    .or_else(|| caps.get(4))
                    .map(|m| m.as_str())
                    .unwrap_or_default();
                (caps[1].to_string(), value.to_string())
            })
            .collect()
    }
}

/// Decodes the few entities that can appear in a URL attribute
fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
