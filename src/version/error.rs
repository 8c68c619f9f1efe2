use thiserror::Error;

use crate::version::git::selector::{HEAD_PATTERN, TAG_PATTERN};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Errors raised while resolving the latest version of a single dependency
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("git ls-remote {location} failed: {output}")]
    ListFailed { location: String, output: String },

    #[error("git ls-remote {location} timed out after {timeout_ms}ms")]
    ListTimedOut { location: String, timeout_ms: u64 },

    #[error("reference listing is empty")]
    EmptyListing,

    #[error("{line} matches neither {} nor {}", TAG_PATTERN, HEAD_PATTERN)]
    Unclassified { line: String },

    #[error("go-import meta attr not found for {0}")]
    MetadataNotFound(String),

    #[error("read metadata of {import_path} failed: {source}")]
    MetadataRead {
        import_path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("go-import metadata invalid: {0}")]
    InvalidMetadata(String),

    #[error("invalid {host} module path: {path}")]
    InvalidProviderPath { host: &'static str, path: String },
}
