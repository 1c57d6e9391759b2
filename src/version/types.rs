//! Candidate version value and its derivations

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::version::error::{ExtractionError, VersionParseError};
use crate::version::semver::parse_version;

static MAJOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]").expect("major pattern is valid"));
static MINOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]\.([0-9])").expect("minor pattern is valid"));
static PATCH_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]\.[0-9]\.([0-9])").expect("patch pattern is valid"));
static MAJOR_MINOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]\.[0-9]").expect("major.minor pattern is valid"));
static MAJOR_MINOR_PATCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]\.[0-9]\.[0-9]").expect("major.minor.patch pattern is valid")
});

/// A single version candidate as it was found in the source text
///
/// `value` is never normalized. Two candidates are the same version when their
/// values are byte-equal; `weight` only means something inside one weighting pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Version {
    pub value: String,
    pub weight: u32,
    pub prerelease: bool,
}

impl Version {
    /// Create a candidate with weight 0 that is not a pre-release
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            weight: 0,
            prerelease: false,
        }
    }

    pub fn with_weight(mut self, weight: u32) -> Self {
        self.weight = weight;
        self
    }

    pub fn with_prerelease(mut self, prerelease: bool) -> Self {
        self.prerelease = prerelease;
        self
    }

    /// Returns whether this version orders strictly before `other`.
    ///
    /// Both values must parse as semantic versions (partial `1` / `1.2` and a
    /// leading `v` are accepted).
    pub fn less_than(&self, other: &Version) -> Result<bool, VersionParseError> {
        let this = parse_version(&self.value)?;
        let other = parse_version(&other.value)?;
        Ok(this < other)
    }

    /// First character of the leading digit run: "2" for "2.3.4"
    pub fn major(&self) -> Result<String, ExtractionError> {
        self.find(&MAJOR_RE, "major")
    }

    /// Single digit after the first dot: "3" for "2.3.4"
    pub fn minor(&self) -> Result<String, ExtractionError> {
        self.capture(&MINOR_RE, "minor")
    }

    /// Single digit after the second dot: "4" for "2.3.4"
    pub fn patch(&self) -> Result<String, ExtractionError> {
        self.capture(&PATCH_RE, "patch")
    }

    pub fn major_minor(&self) -> Result<String, ExtractionError> {
        self.find(&MAJOR_MINOR_RE, "major.minor")
    }

    pub fn major_minor_patch(&self) -> Result<String, ExtractionError> {
        self.find(&MAJOR_MINOR_PATCH_RE, "major.minor.patch")
    }

    pub fn before_comma(&self) -> Result<String, ExtractionError> {
        self.split_at_first(',', "before comma")
            .map(|(before, _)| before.to_string())
    }

    pub fn after_comma(&self) -> Result<String, ExtractionError> {
        self.split_at_first(',', "after comma")
            .map(|(_, after)| after.to_string())
    }

    pub fn before_colon(&self) -> Result<String, ExtractionError> {
        self.split_at_first(':', "before colon")
            .map(|(before, _)| before.to_string())
    }

    pub fn after_colon(&self) -> Result<String, ExtractionError> {
        self.split_at_first(':', "after colon")
            .map(|(_, after)| after.to_string())
    }

    pub fn no_dots(&self) -> String {
        self.value.replace('.', "")
    }

    pub fn dots_to_underscores(&self) -> String {
        self.value.replace('.', "_")
    }

    pub fn dots_to_hyphens(&self) -> String {
        self.value.replace('.', "-")
    }

    fn find(&self, re: &Regex, component: &'static str) -> Result<String, ExtractionError> {
        re.find(&self.value)
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExtractionError::new(&self.value, component))
    }

    fn capture(&self, re: &Regex, component: &'static str) -> Result<String, ExtractionError> {
        re.captures(&self.value)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .ok_or_else(|| ExtractionError::new(&self.value, component))
    }

    fn split_at_first(
        &self,
        separator: char,
        component: &'static str,
    ) -> Result<(&str, &str), ExtractionError> {
        self.value
            .split_once(separator)
            .ok_or_else(|| ExtractionError::new(&self.value, component))
    }
}

impl From<&str> for Version {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Version {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
