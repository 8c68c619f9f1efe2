use semver::Version;

/// Build suffix go adds to v2+ versions of modules without a go.mod
pub const INCOMPATIBLE_SUFFIX: &str = "+incompatible";

/// Parse a release tag into a semver::Version, normalizing partial versions.
///
/// Strips a leading `v` and a Go `+incompatible` suffix, and pads partial
/// versions like "v1" or "v1.2" with zeros.
///
/// Examples:
/// - "v1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "v2.0.0+incompatible" -> Version(2, 0, 0)
pub fn parse_tag(tag: &str) -> Option<Version> {
    let version = tag.strip_prefix('v').unwrap_or(tag);
    let version = version.strip_suffix(INCOMPATIBLE_SUFFIX).unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();
    let normalized = match parts.len() {
        1 => format!("{}.0.0", parts[0]),
        2 => format!("{}.{}.0", parts[0], parts[1]),
        _ => version.to_string(),
    };
    Version::parse(&normalized).ok()
}

/// Parse a module path major version suffix (`v2`, `v3`, ...).
///
/// `v0` and `v1` never appear as suffixes and yield None.
pub fn parse_major_suffix(segment: &str) -> Option<u64> {
    segment
        .strip_prefix('v')?
        .parse::<u64>()
        .ok()
        .filter(|major| *major >= 2)
}
