//! Git remote handling for the generic resolution path
//! - remote.rs: remote location normalization
//! - lister.rs: `git ls-remote` reference listing
//! - selector.rs: picks the latest tag or branch head from a listing

pub mod lister;
pub mod remote;
pub mod selector;

pub use lister::{GitLsRemote, ReferenceLister, ReferenceListing};
pub use remote::RemoteLocation;
pub use selector::ReferenceSelector;
