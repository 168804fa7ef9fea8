//! Error types for the protoc-gen-tsd crate.

use std::path::PathBuf;

/// Errors that can occur while synthesizing TypeScript declarations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A field, extendee, or method refers to a type that no file in the
    /// descriptor set defines.
    #[error("cannot resolve type '{type_name}' referenced from {file}")]
    Resolution { type_name: String, file: String },

    /// Two distinct files derive the same namespace alias.
    #[error("files '{first}' and '{second}' both alias to '{alias}'")]
    AliasCollision {
        alias: String,
        first: String,
        second: String,
    },

    /// A file requested for generation is not part of the descriptor set.
    #[error("file '{name}' not found in descriptor set")]
    FileNotFound { name: String },

    /// Descriptor bytes could not be decoded.
    #[error("failed to decode descriptors: {0}")]
    Decode(#[from] prost::DecodeError),

    /// Failed to write generated files.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Failed to read a file from disk.
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON serialization error.
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed plugin parameter string.
    #[error("invalid parameter: {0}")]
    Parameter(String),
}

/// Convenience alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
