//! Reporting types handed to output collaborators

use serde::Serialize;

/// Where the versions of a checked item were scraped from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Appcast {
    pub url: String,
    /// HTTP status code of the appcast response
    pub status_code: u16,
}

/// Latest version found for a checked item
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LatestVersion {
    pub version: String,
    pub build: String,
    /// Version proposed to the user when the latest one is ambiguous
    pub suggested: String,
}

/// Outcome of checking one item against its appcast
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckedVersion {
    pub appcast: Appcast,
    pub current: String,
    pub latest: LatestVersion,
}

/// One row of an outdated-items report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outdated {
    pub name: String,
    pub appcast: String,
    pub status_code: String,
    pub current_version: String,
    pub status: String,
    pub latest_version: String,
    pub latest_build: String,
    pub suggested_latest_version: String,
}

impl Outdated {
    pub fn new(name: &str, status: &str, checked: &CheckedVersion) -> Self {
        Self {
            name: name.to_string(),
            appcast: checked.appcast.url.clone(),
            status_code: checked.appcast.status_code.to_string(),
            current_version: checked.current.clone(),
            status: status.to_string(),
            latest_version: checked.latest.version.clone(),
            latest_build: checked.latest.build.clone(),
            suggested_latest_version: checked.latest.suggested.clone(),
        }
    }
}
