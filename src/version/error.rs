use thiserror::Error;

/// A derivation could not find the component it extracts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Version '{value}' has no {component} component")]
pub struct ExtractionError {
    pub value: String,
    pub component: &'static str,
}

impl ExtractionError {
    pub(crate) fn new(value: &str, component: &'static str) -> Self {
        Self {
            value: value.to_string(),
            component,
        }
    }
}

#[derive(Debug, Error)]
#[error("Invalid semantic version '{value}': {source}")]
pub struct VersionParseError {
    pub value: String,
    #[source]
    pub source: semver::Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Cannot average weights over zero groups")]
pub struct EmptyInputError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InterpolationError {
    #[error("Unknown interpolation method: {0}")]
    UnknownMethod(String),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),
}
