// src/error.rs

//! Crate-level error type

use crate::builder::BuildError;
use crate::compression::CompressionError;
use crate::manifest::ManifestError;
use thiserror::Error;

/// Result type for SBOM generation
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while turning a manifest into an SPDX document
#[derive(Error, Debug)]
pub enum Error {
    /// The manifest could not be decoded
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// The manifest decoded but describes an inconsistent filesystem
    #[error(transparent)]
    Build(#[from] BuildError),

    /// The manifest could not be decompressed
    #[error(transparent)]
    Compression(#[from] CompressionError),

    /// IO error while reading inputs or writing the document
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The document could not be encoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
