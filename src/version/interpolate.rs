//! Version interpolation into template strings
//!
//! Templates use Ruby interpolation syntax:
//! - `#{version}` - the version value as is
//! - `#{version.major_minor}` - one transform method
//! - `#{version.before_comma.no_dots}` - transform methods applied left to right

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::version::error::{ExtractionError, InterpolationError};
use crate::version::types::Version;

static INTERPOLATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"#\{version(?:\.([^}]*))?\}").expect("interpolation pattern is valid")
});

/// Transform method usable in an interpolation chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Major,
    Minor,
    Patch,
    MajorMinor,
    MajorMinorPatch,
    BeforeComma,
    AfterComma,
    BeforeColon,
    AfterColon,
    NoDots,
    DotsToUnderscores,
    DotsToHyphens,
}

impl Method {
    /// Returns the name used in templates
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Major => "major",
            Method::Minor => "minor",
            Method::Patch => "patch",
            Method::MajorMinor => "major_minor",
            Method::MajorMinorPatch => "major_minor_patch",
            Method::BeforeComma => "before_comma",
            Method::AfterComma => "after_comma",
            Method::BeforeColon => "before_colon",
            Method::AfterColon => "after_colon",
            Method::NoDots => "no_dots",
            Method::DotsToUnderscores => "dots_to_underscores",
            Method::DotsToHyphens => "dots_to_hyphens",
        }
    }

    pub fn apply(&self, version: &Version) -> Result<String, ExtractionError> {
        match self {
            Method::Major => version.major(),
            Method::Minor => version.minor(),
            Method::Patch => version.patch(),
            Method::MajorMinor => version.major_minor(),
            Method::MajorMinorPatch => version.major_minor_patch(),
            Method::BeforeComma => version.before_comma(),
            Method::AfterComma => version.after_comma(),
            Method::BeforeColon => version.before_colon(),
            Method::AfterColon => version.after_colon(),
            Method::NoDots => Ok(version.no_dots()),
            Method::DotsToUnderscores => Ok(version.dots_to_underscores()),
            Method::DotsToHyphens => Ok(version.dots_to_hyphens()),
        }
    }
}

impl FromStr for Method {
    type Err = InterpolationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Method::Major),
            "minor" => Ok(Method::Minor),
            "patch" => Ok(Method::Patch),
            "major_minor" => Ok(Method::MajorMinor),
            "major_minor_patch" => Ok(Method::MajorMinorPatch),
            "before_comma" => Ok(Method::BeforeComma),
            "after_comma" => Ok(Method::AfterComma),
            "before_colon" => Ok(Method::BeforeColon),
            "after_colon" => Ok(Method::AfterColon),
            "no_dots" => Ok(Method::NoDots),
            "dots_to_underscores" => Ok(Method::DotsToUnderscores),
            "dots_to_hyphens" => Ok(Method::DotsToHyphens),
            _ => Err(InterpolationError::UnknownMethod(s.to_string())),
        }
    }
}

impl Version {
    /// Interpolate this version into `template`.
    ///
    /// Returns `template` untouched when any token names an unknown method or a
    /// method finds nothing to extract.
    pub fn interpolate_into_string(&self, template: &str) -> String {
        self.try_interpolate_into_string(template)
            .unwrap_or_else(|e| {
                debug!("Leaving template '{}' as is: {}", template, e);
                template.to_string()
            })
    }

    /// Interpolate this version into `template`, reporting why it failed.
    pub fn try_interpolate_into_string(&self, template: &str) -> Result<String, InterpolationError> {
        let mut result = template.to_string();

        for caps in INTERPOLATION_RE.captures_iter(template) {
            let token = &caps[0];
            let part = match caps.get(1) {
                Some(chain) => self.apply_chain(chain.as_str())?,
                None => self.value.clone(),
            };
            result = result.replace(token, &part);
        }

        Ok(result)
    }

    fn apply_chain(&self, chain: &str) -> Result<String, InterpolationError> {
        chain.split('.').try_fold(self.value.clone(), |part, name| {
            let method: Method = name.parse()?;
            method
                .apply(&Version::new(part))
                .map_err(InterpolationError::from)
        })
    }
}
