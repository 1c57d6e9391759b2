//! Candidate extraction from free-form text
//!
//! Anything that starts with a digit run and continues with separated digit
//! runs (`.`, `_`, `-`) or trailing word characters is a candidate:
//! - `2.3.4`, `1_0_2`, `10-1` - separated numeric runs
//! - `3b2`, `1.0rc1` - runs with alphanumeric suffixes

use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

/// Architecture tokens that look like versions but never are.
pub const IGNORED_VERSIONS: [&str; 4] = ["86_64", "386", "64", "32"];

static CANDIDATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[0-9]+(?:[._-][0-9]+|[0-9A-Za-z_])+").expect("candidate pattern is valid")
});

/// Extract every version-looking substring from `content`, in order of appearance.
///
/// Duplicates are kept; ignored architecture tokens are dropped by exact match.
pub fn extract_all(content: &str) -> Vec<String> {
    CANDIDATE_RE
        .find_iter(content)
        .map(|m| m.as_str())
        .filter(|candidate| {
            let ignored = IGNORED_VERSIONS.contains(candidate);
            if ignored {
                debug!("Skipping ignored version token '{}'", candidate);
            }
            !ignored
        })
        .map(str::to_string)
        .collect()
}
