//! Hand-written collaborators for the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use gomod::toolchain::{InventorySource, ToolchainError, Updater};
use gomod::version::discovery::OriginDiscoverer;
use gomod::version::error::{RegistryError, ResolveError};
use gomod::version::git::{ReferenceLister, ReferenceListing, RemoteLocation};
use gomod::version::registry::ReleaseProvider;
use gomod::version::resolver::Resolver;
use gomod::version::strategy::Provider;
use gomod::version::types::ResolvedVersion;

/// Discoverer answering from a fixed import path -> repository table
#[derive(Default)]
pub struct StaticDiscoverer {
    origins: HashMap<String, String>,
}

impl StaticDiscoverer {
    pub fn with_origin(mut self, import_path: &str, repository: &str) -> Self {
        self.origins
            .insert(import_path.to_string(), repository.to_string());
        self
    }
}

#[async_trait]
impl OriginDiscoverer for StaticDiscoverer {
    async fn discover(&self, import_path: &str) -> Result<RemoteLocation, ResolveError> {
        self.origins
            .get(import_path)
            .map(|repo| RemoteLocation::normalize(repo))
            .ok_or_else(|| ResolveError::MetadataNotFound(import_path.to_string()))
    }
}

/// Lister answering from a fixed location -> listing table
#[derive(Default)]
pub struct StaticLister {
    listings: HashMap<String, String>,
}

impl StaticLister {
    pub fn with_listing(mut self, location: &str, listing: &str) -> Self {
        self.listings
            .insert(location.to_string(), listing.to_string());
        self
    }
}

#[async_trait]
impl ReferenceLister for StaticLister {
    async fn list(&self, location: &RemoteLocation) -> Result<ReferenceListing, ResolveError> {
        match self.listings.get(location.as_str()) {
            Some(listing) => Ok(ReferenceListing::new(listing.as_str())),
            None => Err(ResolveError::ListFailed {
                location: location.to_string(),
                output: "fatal: repository not found".to_string(),
            }),
        }
    }
}

/// GitHub client answering from fixed release and commit tables
#[derive(Default)]
pub struct StaticProvider {
    releases: HashMap<String, String>,
    commits: HashMap<String, Vec<String>>,
}

impl StaticProvider {
    pub fn with_release(mut self, repo: &str, tag: &str) -> Self {
        self.releases.insert(repo.to_string(), tag.to_string());
        self
    }

    pub fn with_commits(mut self, repo: &str, commits: Vec<&str>) -> Self {
        self.commits.insert(
            repo.to_string(),
            commits.into_iter().map(|c| c.to_string()).collect(),
        );
        self
    }
}

#[async_trait]
impl ReleaseProvider for StaticProvider {
    fn provider(&self) -> Provider {
        Provider::GitHub
    }

    async fn latest_release(&self, owner: &str, repo: &str) -> Result<String, RegistryError> {
        let key = format!("{}/{}", owner, repo);
        self.releases
            .get(&key)
            .cloned()
            .ok_or(RegistryError::NotFound(key))
    }

    async fn recent_commits(
        &self,
        owner: &str,
        repo: &str,
        limit: usize,
    ) -> Result<Vec<String>, RegistryError> {
        let key = format!("{}/{}", owner, repo);
        match self.commits.get(&key) {
            Some(commits) => Ok(commits.iter().take(limit).cloned().collect()),
            None => Err(RegistryError::NotFound(key)),
        }
    }
}

/// Updater that records every `go get` target as `path@version`
#[derive(Default)]
pub struct RecordingUpdater {
    failing: HashSet<String>,
    calls: Mutex<Vec<String>>,
    tidied: Mutex<bool>,
}

impl RecordingUpdater {
    /// Make `go get <target>` fail, where target is `path@version`
    pub fn failing_on(mut self, target: &str) -> Self {
        self.failing.insert(target.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn tidied(&self) -> bool {
        *self.tidied.lock().unwrap()
    }
}

#[async_trait]
impl Updater for RecordingUpdater {
    async fn upgrade(
        &self,
        module_path: &str,
        version: &ResolvedVersion,
    ) -> Result<(), ToolchainError> {
        let target = format!("{}@{}", module_path, version);
        self.calls.lock().unwrap().push(target.clone());
        if self.failing.contains(&target) {
            return Err(ToolchainError::TimedOut {
                command: format!("go get -u {}", target),
                timeout_ms: 1,
            });
        }
        Ok(())
    }

    async fn tidy(&self) -> Result<(), ToolchainError> {
        *self.tidied.lock().unwrap() = true;
        Ok(())
    }
}

/// Inventory source replaying a fixed `go list` output
pub struct CannedInventory {
    pub plain: String,
    pub with_updates: String,
}

#[async_trait]
impl InventorySource for CannedInventory {
    async fn list_modules(&self, check_updates: bool) -> Result<Vec<u8>, ToolchainError> {
        let raw = if check_updates {
            &self.with_updates
        } else {
            &self.plain
        };
        Ok(raw.clone().into_bytes())
    }
}

pub fn create_test_resolver(
    discoverer: StaticDiscoverer,
    lister: StaticLister,
    provider: Option<StaticProvider>,
) -> Resolver {
    let resolver = Resolver::new(Arc::new(discoverer), Arc::new(lister));
    match provider {
        Some(provider) => resolver.with_provider(Arc::new(provider)),
        None => resolver,
    }
}

/// Writes `content` as go.mod in a fresh temporary directory
pub fn create_test_module(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("go.mod");
    std::fs::write(&path, content).unwrap();
    (temp_dir, path)
}
