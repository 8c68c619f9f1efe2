//! Upgrade the dependencies of a Go module to their latest tag or commit.
//!
//! - [`manifest`]: go.mod reading
//! - [`version`]: latest version resolution per dependency
//! - [`upgrade`]: batch upgrade with the "latest" fallback
//! - [`inventory`]: `go list -m -json` decoding and reports
//! - [`toolchain`]: `go` command invocations

pub mod config;
pub mod inventory;
pub mod logging;
pub mod manifest;
pub mod toolchain;
pub mod upgrade;
pub mod version;
