//! Error kinds raised while parsing, resolving and building asset references.

use serde_json::Value;
use thiserror::Error;

use crate::source::AssetSource;

/// Result type used across the crate.
pub type AssetResult<T> = Result<T, AssetError>;

/// Errors produced by the parse, resolve and build operations.
///
/// Only [`AssetError::Unresolvable`] is swallowed by the `try_get_*` resolvers. The parse
/// failures describe inputs that were never going to be a valid asset reference, while
/// [`AssetError::MissingProjectDetails`] signals that an otherwise valid reference cannot be
/// turned into a path without knowing which project and dataset it belongs to.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AssetError {
    /// The input could not be resolved to an asset ID, path or project.
    #[error("{message}")]
    Unresolvable {
        /// Input value that failed to resolve, as JSON.
        input: Value,
        /// Human readable description of what could not be resolved.
        message: String,
    },
    /// A document ID did not match the image or file ID grammar.
    #[error("malformed asset ID '{id}', expected an id like {expected}")]
    MalformedId {
        /// The rejected ID.
        id: String,
        /// Quoted example(s) of a valid ID.
        expected: String,
    },
    /// A filename did not match the image or file filename grammar.
    #[error("invalid image/file asset filename: {filename}")]
    InvalidFilename {
        /// The rejected filename.
        filename: String,
    },
    /// A URL is not served from the hosted CDN or a custom `cdn.` host with a valid asset path.
    #[error("URL is not a valid asset CDN URL: {url}")]
    NotACdnUrl {
        /// The rejected URL.
        url: String,
    },
    /// Project ID and dataset were required but could not be determined.
    #[error("project details (projectId and dataset) required to resolve {target}")]
    MissingProjectDetails {
        /// What was being resolved when the details were found missing.
        target: String,
    },
}

impl AssetError {
    /// Default message attached to unresolvable asset sources.
    pub const UNRESOLVABLE_ASSET_ID: &'static str = "failed to resolve asset ID from source";

    /// Build an [`AssetError::Unresolvable`] carrying the offending source.
    pub fn unresolvable(input: &AssetSource, message: impl Into<String>) -> Self {
        Self::Unresolvable {
            input: serde_json::to_value(input).unwrap_or(Value::Null),
            message: message.into(),
        }
    }

    /// Build an [`AssetError::Unresolvable`] for a plain string input.
    pub fn unresolvable_str(input: &str, message: impl Into<String>) -> Self {
        Self::Unresolvable {
            input: Value::String(input.to_string()),
            message: message.into(),
        }
    }

    /// Build an [`AssetError::MissingProjectDetails`] for the given target.
    pub fn missing_project(target: impl Into<String>) -> Self {
        Self::MissingProjectDetails {
            target: target.into(),
        }
    }

    /// Whether this is the error kind intercepted by the forgiving resolvers.
    pub fn is_unresolvable(&self) -> bool {
        matches!(self, Self::Unresolvable { .. })
    }

    /// The input carried by an unresolvable error, if any.
    pub fn input(&self) -> Option<&Value> {
        match self {
            Self::Unresolvable { input, .. } => Some(input),
            _ => None,
        }
    }
}
