//! Picks the latest version out of a `git ls-remote` listing
//!
//! The listing is requested with `--sort=v:refname`, so the newest reference
//! is the last line. A tag wins over a branch head; a `main`/`master` head
//! resolves to the commit it points to.

use regex::Regex;

use crate::version::error::ResolveError;
use crate::version::git::lister::ReferenceListing;
use crate::version::types::ResolvedVersion;

pub const TAG_PATTERN: &str = r"refs/tags/(.*)";
pub const HEAD_PATTERN: &str = r"refs/heads/(master|main)$";

/// Suffix git appends to peeled annotated tags
const PEELED_SUFFIX: &str = "^{}";

pub struct ReferenceSelector {
    tag_re: Regex,
    head_re: Regex,
}

impl ReferenceSelector {
    pub fn new() -> Self {
        Self {
            tag_re: Regex::new(TAG_PATTERN).unwrap(),
            head_re: Regex::new(HEAD_PATTERN).unwrap(),
        }
    }

    pub fn select(&self, listing: &ReferenceListing) -> Result<ResolvedVersion, ResolveError> {
        let trimmed = listing.as_str().trim();
        let Some(line) = trimmed.lines().last() else {
            return Err(ResolveError::EmptyListing);
        };

        if let Some(caps) = self.tag_re.captures(line) {
            let name = caps[1].trim();
            let name = name.strip_suffix(PEELED_SUFFIX).unwrap_or(name);
            return Ok(ResolvedVersion::Tag(name.to_string()));
        }

        if let Some(head) = self.head_re.find(line) {
            let object_id = line[..head.start()].trim();
            return Ok(ResolvedVersion::BranchHead(object_id.to_string()));
        }

        Err(ResolveError::Unclassified {
            line: line.to_string(),
        })
    }
}

impl Default for ReferenceSelector {
    fn default() -> Self {
        Self::new()
    }
}
