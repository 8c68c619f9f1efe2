use std::path::PathBuf;

/// Error type for manifest operations
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Failed to read the file
    #[error("read {path:?} failed: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Invalid syntax in the file
    #[error("Invalid syntax at line {line}: {message}")]
    InvalidSyntax { line: usize, message: String },
}
