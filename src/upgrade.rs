//! Batch upgrade of manifest dependencies
//!
//! Dependencies are processed one at a time in manifest order. A dependency
//! whose resolution or `go get` fails is retried once with the "latest"
//! sentinel; a failing fallback is logged and the batch moves on.

use tracing::{debug, error, info};

use crate::manifest::types::DependencyRecord;
use crate::toolchain::Updater;
use crate::version::resolver::Resolver;
use crate::version::types::ResolvedVersion;

/// What happened to a single dependency
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Upgraded to the resolved version
    Upgraded(ResolvedVersion),
    /// Resolution or upgrade failed; upgraded to "latest" instead
    FellBack,
    /// The fallback failed as well
    Failed(String),
    /// Root module, or indirect dependency without `--indirect`
    Skipped,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeReport {
    pub path: String,
    pub outcome: Outcome,
}

pub struct Upgrader<'a, U: Updater + ?Sized> {
    resolver: &'a Resolver,
    updater: &'a U,
    include_indirect: bool,
}

impl<'a, U: Updater + ?Sized> Upgrader<'a, U> {
    pub fn new(resolver: &'a Resolver, updater: &'a U, include_indirect: bool) -> Self {
        Self {
            resolver,
            updater,
            include_indirect,
        }
    }

    /// Upgrades every eligible record, then runs `go mod tidy`
    pub async fn run(&self, records: &[DependencyRecord]) -> Vec<UpgradeReport> {
        let mut reports = Vec::with_capacity(records.len());

        for record in records {
            let outcome = if record.root || (record.indirect && !self.include_indirect) {
                debug!("Skipping {}", record.path);
                Outcome::Skipped
            } else {
                self.upgrade_one(record).await
            };
            reports.push(UpgradeReport {
                path: record.path.clone(),
                outcome,
            });
        }

        // Best effort
        if let Err(e) = self.updater.tidy().await {
            debug!("go mod tidy failed: {}", e);
        }

        reports
    }

    async fn upgrade_one(&self, record: &DependencyRecord) -> Outcome {
        let attempt = match self.resolver.resolve(record).await {
            Ok(version) => self
                .updater
                .upgrade(&record.path, &version)
                .await
                .map(|()| version)
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        match attempt {
            Ok(version) => {
                info!(url = %format!("{}@{}", record.path, version), "upgrade success");
                Outcome::Upgraded(version)
            }
            Err(e) => {
                error!(url = %record.path, "upgrade failed: {}. (starting fallback)", e);
                self.fallback(record).await
            }
        }
    }

    async fn fallback(&self, record: &DependencyRecord) -> Outcome {
        let version = ResolvedVersion::Latest;
        let url = format!("{}@{}", record.path, version);

        match self.updater.upgrade(&record.path, &version).await {
            Ok(()) => {
                info!(url = %url, "upgrade success");
                Outcome::FellBack
            }
            Err(e) => {
                error!(url = %url, "upgrade failed: {}", e);
                Outcome::Failed(e.to_string())
            }
        }
    }
}
