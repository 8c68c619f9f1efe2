//! Manifest layer
//! - error.rs: manifest error type
//! - types.rs: Common types (DependencyRecord, GoModFile)
//! - go_mod.rs: go.mod parser

pub mod error;
pub mod go_mod;
pub mod types;

pub use error::ManifestError;
pub use go_mod::GoModParser;
pub use types::{DependencyRecord, GoModFile};
