//! Latest version resolution for a single dependency
//!
//! Groups the collaborators each [`Strategy`] needs:
//! - provider API clients for known hosts
//! - the go-import discoverer, reference lister and selector for the rest

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::config::Config;
use crate::manifest::types::DependencyRecord;
use crate::version::discovery::{GoImportDiscoverer, OriginDiscoverer};
use crate::version::error::ResolveError;
use crate::version::git::{GitLsRemote, ReferenceLister, ReferenceSelector};
use crate::version::registries::GitHubProvider;
use crate::version::registry::ReleaseProvider;
use crate::version::strategy::{Provider, ProviderModule, Strategy, classify};
use crate::version::types::ResolvedVersion;

/// Resolves the latest version of dependencies.
///
/// Holds no per-call state; every resolution builds its own location and
/// listing values.
pub struct Resolver {
    providers: HashMap<Provider, Arc<dyn ReleaseProvider>>,
    discoverer: Arc<dyn OriginDiscoverer>,
    lister: Arc<dyn ReferenceLister>,
    selector: ReferenceSelector,
}

impl Resolver {
    /// Create a Resolver for the generic path only
    pub fn new(discoverer: Arc<dyn OriginDiscoverer>, lister: Arc<dyn ReferenceLister>) -> Self {
        Self {
            providers: HashMap::new(),
            discoverer,
            lister,
            selector: ReferenceSelector::new(),
        }
    }

    /// Register an API client for the provider it reports
    pub fn with_provider(mut self, client: Arc<dyn ReleaseProvider>) -> Self {
        self.providers.insert(client.provider(), client);
        self
    }

    /// Strategy used for an import path.
    ///
    /// Known providers without a registered client fall back to Generic.
    pub fn strategy_for(&self, import_path: &str) -> Strategy {
        match classify(import_path) {
            Strategy::KnownProvider(provider) if self.providers.contains_key(&provider) => {
                Strategy::KnownProvider(provider)
            }
            _ => Strategy::Generic,
        }
    }

    /// Resolve the latest version of a dependency
    pub async fn resolve(
        &self,
        record: &DependencyRecord,
    ) -> Result<ResolvedVersion, ResolveError> {
        if let Strategy::KnownProvider(provider) = self.strategy_for(&record.path) {
            if let Some(client) = self.providers.get(&provider) {
                let module = ProviderModule::parse(provider, &record.path)?;
                return Ok(self.resolve_known(client.as_ref(), &module).await);
            }
        }
        self.resolve_generic(&record.path).await
    }

    /// Latest release, else latest commit, else the "latest" sentinel
    async fn resolve_known(
        &self,
        client: &dyn ReleaseProvider,
        module: &ProviderModule,
    ) -> ResolvedVersion {
        match client.latest_release(&module.owner, &module.repo).await {
            Ok(tag) if module.accepts_release(&tag) => return ResolvedVersion::Tag(tag),
            Ok(tag) => debug!(
                "Release {} of {}/{} does not match major version {:?}",
                tag, module.owner, module.repo, module.major
            ),
            Err(e) => debug!(
                "No latest release for {}/{}: {}",
                module.owner, module.repo, e
            ),
        }

        match client.recent_commits(&module.owner, &module.repo, 1).await {
            Ok(commits) => commits
                .first()
                .map(|sha| ResolvedVersion::short_commit(sha))
                .unwrap_or(ResolvedVersion::Latest),
            Err(e) => {
                warn!(
                    "Failed to fetch latest commit of {}/{}: {}",
                    module.owner, module.repo, e
                );
                ResolvedVersion::Latest
            }
        }
    }

    async fn resolve_generic(&self, import_path: &str) -> Result<ResolvedVersion, ResolveError> {
        let location = self.discoverer.discover(import_path).await?;
        debug!("{} is hosted at {}", import_path, location);
        let listing = self.lister.list(&location).await?;
        self.selector.select(&listing)
    }
}

/// Create the default resolver from configuration
pub fn create_default_resolver(config: &Config) -> Resolver {
    let timeouts = &config.timeouts;
    let metadata_timeout = Duration::from_millis(timeouts.metadata_ms);
    let discoverer = GoImportDiscoverer::with_timeout(metadata_timeout);
    let lister = GitLsRemote::new("git", Duration::from_millis(timeouts.git_ms));
    let resolver = Resolver::new(Arc::new(discoverer), Arc::new(lister));

    let github = &config.registries.github;
    if !github.enabled {
        return resolver;
    }
    let client = GitHubProvider::new(
        &github.base_url,
        Duration::from_millis(timeouts.provider_ms),
        github.token.clone(),
    );
    resolver.with_provider(Arc::new(client))
}
