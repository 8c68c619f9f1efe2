//! Version resolution layer
//!
//! This module finds the latest version of a Go module dependency, either
//! through a hosting provider's API or through go-import discovery and the
//! remote's reference listing.
//!
//! # Architecture
//!
//! ```text
//!                  ┌─────────────┐
//!                  │  Resolver   │
//!                  │ (strategy)  │
//!                  └─────────────┘
//!                   │           │
//!      KnownProvider│           │Generic
//!                   ▼           ▼
//! ┌─────────────┐  ┌─────────────┐   ┌─────────────┐   ┌─────────────┐
//! │ Registries  │  │  Discovery  │──▶│ git lister  │──▶│ git selector│
//! │  (GitHub)   │  │ (go-import) │   │ (ls-remote) │   │ (tag/head)  │
//! └─────────────┘  └─────────────┘   └─────────────┘   └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`discovery`]: go-import metadata lookup for vanity import paths
//! - [`error`]: Error types for resolution and provider operations
//! - [`git`]: remote location normalization, `git ls-remote`, reference selection
//! - [`registry`]: Provider trait for querying hosted repositories
//! - [`registries`]: Concrete provider implementations (GitHub)
//! - [`resolver`]: Per-dependency resolution over the strategies
//! - [`semver`]: Tag and major-suffix parsing
//! - [`strategy`]: Provider classification of import paths
//! - [`types`]: `ResolvedVersion`

pub mod discovery;
pub mod error;
pub mod git;
pub mod registries;
pub mod registry;
pub mod resolver;
pub mod semver;
pub mod strategy;
pub mod types;
