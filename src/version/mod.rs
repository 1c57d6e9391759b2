//! Version candidate extraction, weighting and interpolation
//!
//! This module turns free-form text from several sources into a small set of
//! high-confidence versions, and renders a chosen version into templates.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Extract   │────▶│    Group    │────▶│   Groups    │
//! │ (candidates)│     │ (per source)│     │ (weighting) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                                ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │ Interpolate │◀────│   Version   │
//!                     │ (templates) │     │ (derivation)│
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`extract`]: Version-looking substrings in free-form text
//! - [`group`]: Per-source groups and the weight / regroup / filter passes
//! - [`interpolate`]: `#{version.method}` template rendering
//! - [`types`]: The `Version` candidate and its derivations
//! - [`semver`]: Lenient semantic version parsing for comparisons
//! - [`error`]: Error types for derivation, comparison and averaging

pub mod error;
pub mod extract;
pub mod group;
pub mod interpolate;
pub mod semver;
pub mod types;

pub use error::{EmptyInputError, ExtractionError, InterpolationError, VersionParseError};
pub use extract::extract_all;
pub use group::{Group, Groups};
pub use interpolate::Method;
pub use types::Version;
