//! Provider implementations for querying hosted repositories

pub mod github;

pub use github::GitHubProvider;
