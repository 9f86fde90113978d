//! Errors of loading, merging and writing Swagger documents.
//!
//! Collisions are not errors, they are reported through [`crate::mixer::MixinReport`].
use std::path::PathBuf;

use thiserror::Error;

/// Result type of fallible operations of this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {} as JSON: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to parse {} as YAML: {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unsupported mapping key in {}: {key}", .path.display())]
    YamlKey { path: PathBuf, key: String },

    #[error("number without JSON representation in {}: {value}", .path.display())]
    YamlNumber { path: PathBuf, value: String },

    /// Document does not match the Swagger 2.0 model. Positions are reported for JSON input
    /// only.
    #[error("{} is not a valid swagger 2.0 document: {source}", .path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize merged document: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("failed to write merged document: {0}")]
    Write(#[from] std::io::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// An input document could not be read or parsed. Nothing was merged.
    Load,
    /// The merged document could not be serialized. Nothing was written.
    Serialization,
    /// Writing the merged document to the output failed.
    Write,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Read { .. }
            | Self::Json { .. }
            | Self::Yaml { .. }
            | Self::YamlKey { .. }
            | Self::YamlNumber { .. }
            | Self::Document { .. } => ErrorKind::Load,
            Self::Serialize(_) => ErrorKind::Serialization,
            Self::Write(_) => ErrorKind::Write,
        }
    }
}
