//! Remote reference listing through `git ls-remote`

use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use tokio::process::Command;
use tracing::error;

use crate::toolchain::{ToolchainError, run};
use crate::version::error::ResolveError;
use crate::version::git::remote::RemoteLocation;

/// Raw `git ls-remote` output: `<object-id>\t<ref-path>` lines,
/// oldest first under the remote's version sort
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceListing(String);

impl ReferenceListing {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Lists the branches and tags of a remote repository
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait ReferenceLister: Send + Sync {
    async fn list(&self, location: &RemoteLocation) -> Result<ReferenceListing, ResolveError>;
}

/// [`ReferenceLister`] backed by the `git` binary
pub struct GitLsRemote {
    program: String,
    timeout: Duration,
}

impl GitLsRemote {
    pub fn new(program: &str, timeout: Duration) -> Self {
        Self {
            program: program.to_string(),
            timeout,
        }
    }
}

#[async_trait::async_trait]
impl ReferenceLister for GitLsRemote {
    async fn list(&self, location: &RemoteLocation) -> Result<ReferenceListing, ResolveError> {
        // Callers may pass an import path; collapse it onto the repository
        let location = RemoteLocation::normalize(location.as_str());
        let args = [
            "ls-remote",
            "--heads",
            "--tags",
            "--sort=v:refname",
            location.as_str(),
        ];

        let mut cmd = Command::new(&self.program);
        cmd.args(args).env("GIT_TERMINAL_PROMPT", "0");
        let command = format!("{} {}", self.program, args.join(" "));

        let stdout = run(cmd, command.clone(), Some(self.timeout))
            .await
            .map_err(|e| {
                error!(cmd = %command, "run command failed: {}", e);
                match e {
                    ToolchainError::TimedOut { timeout_ms, .. } => ResolveError::ListTimedOut {
                        location: location.to_string(),
                        timeout_ms,
                    },
                    ToolchainError::Failed { output, .. } => ResolveError::ListFailed {
                        location: location.to_string(),
                        output,
                    },
                    ToolchainError::Spawn { source, .. } => ResolveError::ListFailed {
                        location: location.to_string(),
                        output: source.to_string(),
                    },
                }
            })?;

        Ok(ReferenceListing::new(
            String::from_utf8_lossy(&stdout).into_owned(),
        ))
    }
}
