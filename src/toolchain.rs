//! External `go` tool invocations
//!
//! - [`Updater`]: `go get -u path@version` and `go mod tidy`
//! - [`InventorySource`]: `go list -m -json all`
//!
//! [`GoTool`] implements both by spawning the `go` binary.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

use crate::version::types::ResolvedVersion;

#[derive(Debug, Error)]
pub enum ToolchainError {
    #[error("run command `{command}` failed: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("command `{command}` timed out after {timeout_ms}ms")]
    TimedOut { command: String, timeout_ms: u64 },

    #[error("command `{command}` exited with {status}: {output}")]
    Failed {
        command: String,
        status: std::process::ExitStatus,
        output: String,
    },
}

/// Applies resolved versions to the current module
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Updater: Send + Sync {
    /// Runs `go get -u <module_path>@<version>`
    async fn upgrade(
        &self,
        module_path: &str,
        version: &ResolvedVersion,
    ) -> Result<(), ToolchainError>;

    /// Runs `go mod tidy`
    async fn tidy(&self) -> Result<(), ToolchainError>;
}

/// Produces the raw `go list -m -json` output
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait InventorySource: Send + Sync {
    /// Lists all modules; `check_updates` adds `-u`
    async fn list_modules(&self, check_updates: bool) -> Result<Vec<u8>, ToolchainError>;
}

/// The `go` command line tool
pub struct GoTool {
    program: String,
    work_dir: Option<PathBuf>,
}

impl GoTool {
    pub fn new(program: &str, work_dir: Option<PathBuf>) -> Self {
        Self {
            program: program.to_string(),
            work_dir,
        }
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(args);
        if let Some(dir) = &self.work_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn describe(&self, args: &[&str]) -> String {
        format!("{} {}", self.program, args.join(" "))
    }
}

#[async_trait::async_trait]
impl Updater for GoTool {
    async fn upgrade(
        &self,
        module_path: &str,
        version: &ResolvedVersion,
    ) -> Result<(), ToolchainError> {
        let target = format!("{}@{}", module_path, version);
        let args = ["get", "-u", target.as_str()];
        run(self.command(&args), self.describe(&args), None).await?;
        Ok(())
    }

    async fn tidy(&self) -> Result<(), ToolchainError> {
        let args = ["mod", "tidy"];
        run(self.command(&args), self.describe(&args), None).await?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl InventorySource for GoTool {
    async fn list_modules(&self, check_updates: bool) -> Result<Vec<u8>, ToolchainError> {
        let args: &[&str] = if check_updates {
            &["list", "-m", "-u", "-json", "-mod=readonly", "all"]
        } else {
            &["list", "-m", "-json", "-mod=readonly", "all"]
        };
        run(self.command(args), self.describe(args), None).await
    }
}

/// Runs a command to completion and returns its stdout.
///
/// A non-zero exit yields [`ToolchainError::Failed`] carrying stdout and
/// stderr. The child is killed when `timeout` elapses.
pub(crate) async fn run(
    mut cmd: Command,
    command: String,
    timeout: Option<Duration>,
) -> Result<Vec<u8>, ToolchainError> {
    cmd.stdin(Stdio::null()).kill_on_drop(true);
    debug!("Running `{}`", command);

    let pending = cmd.output();
    let result = match timeout {
        Some(limit) => match tokio::time::timeout(limit, pending).await {
            Ok(result) => result,
            Err(_) => {
                return Err(ToolchainError::TimedOut {
                    command,
                    timeout_ms: limit.as_millis() as u64,
                });
            }
        },
        None => pending.await,
    };
    let output = result.map_err(|source| ToolchainError::Spawn {
        command: command.clone(),
        source,
    })?;

    if !output.status.success() {
        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));
        return Err(ToolchainError::Failed {
            command,
            status: output.status,
            output: combined.trim().to_string(),
        });
    }

    Ok(output.stdout)
}
