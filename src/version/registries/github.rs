//! GitHub REST API provider implementation

use std::time::Duration;

use crate::version::error::RegistryError;
use crate::version::registry::ReleaseProvider;
use crate::version::strategy::Provider;
use serde::Deserialize;
use tracing::warn;

/// Response from GitHub latest release API
#[derive(Debug, Deserialize)]
struct Release {
    tag_name: String,
}

/// Entry of GitHub commits API response
#[derive(Debug, Deserialize)]
struct Commit {
    sha: String,
}

/// Provider implementation for the GitHub REST API
pub struct GitHubProvider {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubProvider {
    /// Creates a new GitHubProvider with a custom base URL
    pub fn new(base_url: &str, timeout: Duration, token: Option<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .user_agent("gomod")
                .timeout(timeout)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    async fn get(&self, url: &str, what: &str) -> Result<reqwest::Response, RegistryError> {
        let mut request = self
            .client
            .get(url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound(what.to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok());
            return Err(RegistryError::RateLimited {
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            warn!("GitHub API returned status {}: {}", status, url);
            return Err(RegistryError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        Ok(response)
    }
}

#[async_trait::async_trait]
impl ReleaseProvider for GitHubProvider {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    async fn latest_release(&self, owner: &str, repo: &str) -> Result<String, RegistryError> {
        let url = format!("{}/repos/{}/{}/releases/latest", self.base_url, owner, repo);
        let what = format!("{}/{} releases", owner, repo);

        let release: Release = self.get(&url, &what).await?.json().await.map_err(|e| {
            warn!("Failed to parse GitHub release response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(release.tag_name)
    }

    async fn recent_commits(
        &self,
        owner: &str,
        repo: &str,
        limit: usize,
    ) -> Result<Vec<String>, RegistryError> {
        let url = format!(
            "{}/repos/{}/{}/commits?per_page={}",
            self.base_url, owner, repo, limit
        );
        let what = format!("{}/{}", owner, repo);

        let commits: Vec<Commit> = self.get(&url, &what).await?.json().await.map_err(|e| {
            warn!("Failed to parse GitHub commits response: {}", e);
            RegistryError::InvalidResponse(e.to_string())
        })?;

        Ok(commits.into_iter().map(|c| c.sha).collect())
    }
}
