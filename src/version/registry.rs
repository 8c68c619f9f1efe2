//! Provider trait for querying hosted repositories directly

#[cfg(test)]
use mockall::automock;

use crate::version::error::RegistryError;
use crate::version::strategy::Provider;

/// Trait for asking a hosting provider about a repository's latest state
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReleaseProvider: Send + Sync {
    /// Returns the provider this implementation handles
    fn provider(&self) -> Provider;

    /// Fetches the tag name of the latest published release
    ///
    /// # Returns
    /// * `Ok(String)` - The release tag (e.g., "v1.8.0")
    /// * `Err(RegistryError)` - If the repository has no release or the fetch fails
    async fn latest_release(&self, owner: &str, repo: &str) -> Result<String, RegistryError>;

    /// Fetches the ids of the most recent commits on the default branch
    ///
    /// # Arguments
    /// * `limit` - Maximum number of commits to return
    ///
    /// # Returns
    /// * `Ok(Vec<String>)` - Full commit ids, newest first (may be empty)
    /// * `Err(RegistryError)` - If the fetch fails
    async fn recent_commits(
        &self,
        owner: &str,
        repo: &str,
        limit: usize,
    ) -> Result<Vec<String>, RegistryError>;
}
