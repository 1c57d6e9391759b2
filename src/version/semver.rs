use semver::Version;

use crate::version::error::VersionParseError;

/// Parse a candidate string into a semver::Version, normalizing partial versions.
///
/// Strips a leading 'v' and pads missing minor/patch components with zeros,
/// keeping any pre-release or build suffix in place.
///
/// Examples:
/// - "1" -> Version(1, 0, 0)
/// - "v1.2" -> Version(1, 2, 0)
/// - "1.2-beta.1" -> Version(1, 2, 0, pre: beta.1)
pub fn parse_version(value: &str) -> Result<Version, VersionParseError> {
    let trimmed = value.strip_prefix('v').unwrap_or(value);
    let (core, suffix) = match trimmed.find(|c| c == '-' || c == '+') {
        Some(index) => trimmed.split_at(index),
        None => (trimmed, ""),
    };

    let normalized = match core.split('.').count() {
        1 => format!("{core}.0.0{suffix}"),
        2 => format!("{core}.0{suffix}"),
        _ => trimmed.to_string(),
    };

    Version::parse(&normalized).map_err(|source| VersionParseError {
        value: value.to_string(),
        source,
    })
}
