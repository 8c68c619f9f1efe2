//! Resolution strategy selection
//!
//! Import paths hosted on a known provider are resolved through that
//! provider's API; everything else goes through go-import discovery and
//! `git ls-remote`.

use crate::version::error::ResolveError;
use crate::version::semver::{INCOMPATIBLE_SUFFIX, parse_major_suffix, parse_tag};

/// Hosting providers with a dedicated API client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    /// github.com
    GitHub,
}

impl Provider {
    pub const ALL: &'static [Provider] = &[Provider::GitHub];

    /// Host segment identifying the provider in an import path
    pub fn host(&self) -> &'static str {
        match self {
            Provider::GitHub => "github.com",
        }
    }
}

/// How a dependency's latest version is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Ask the provider API for the latest release or commit
    KnownProvider(Provider),
    /// Discover the origin, list its references and pick the latest
    Generic,
}

/// Classifies an import path by the provider host segment it contains
pub fn classify(import_path: &str) -> Strategy {
    Provider::ALL
        .iter()
        .copied()
        .find(|provider| {
            import_path
                .split('/')
                .any(|segment| segment == provider.host())
        })
        .map(Strategy::KnownProvider)
        .unwrap_or(Strategy::Generic)
}

/// Repository coordinates parsed from a provider-hosted import path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderModule {
    pub owner: String,
    pub repo: String,
    /// Major version suffix (`/v2`) following the repository name
    pub major: Option<u64>,
}

impl ProviderModule {
    /// Parses `<host>/owner/repo[/vN][/...]`
    pub fn parse(provider: Provider, import_path: &str) -> Result<Self, ResolveError> {
        let segments: Vec<&str> = import_path.split('/').collect();
        let after_host = segments
            .iter()
            .position(|segment| *segment == provider.host())
            .map(|pos| &segments[pos + 1..])
            .unwrap_or_default();

        match after_host {
            [owner, repo, rest @ ..] if !owner.is_empty() && !repo.is_empty() => Ok(Self {
                owner: owner.to_string(),
                repo: repo.to_string(),
                major: rest.first().and_then(|segment| parse_major_suffix(segment)),
            }),
            _ => Err(ResolveError::InvalidProviderPath {
                host: provider.host(),
                path: import_path.to_string(),
            }),
        }
    }

    /// Whether a release tag can be required from this module path.
    ///
    /// With a `/vN` suffix only tags of major N qualify. Without one, only
    /// majors 0 and 1, or tags marked `+incompatible`. Unparseable tags are
    /// left for the go tool to judge.
    pub fn accepts_release(&self, tag: &str) -> bool {
        let Some(version) = parse_tag(tag) else {
            return true;
        };
        match self.major {
            Some(major) => version.major == major,
            None => version.major <= 1 || tag.ends_with(INCOMPATIBLE_SUFFIX),
        }
    }
}
