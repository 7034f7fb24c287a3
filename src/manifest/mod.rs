// src/manifest/mod.rs

//! Chisel manifest (jsonwall) decoding
//!
//! The manifest is a "jsonwall" file: one JSON object per line. The first line
//! is a header naming the format version, the schema and the number of
//! entries; every other line is a record discriminated by its `kind` field:
//!
//! ```text
//! {"jsonwall":"1.0","schema":"1.0","count":3}
//! {"kind":"package","name":"libc6","version":"2.39-0ubuntu8","sha256":"...","arch":"amd64"}
//! {"kind":"path","path":"/etc/ld.so.conf","mode":"0644","slices":["libc6_config"],"sha256":"...","size":34}
//! {"kind":"slice","name":"libc6_config"}
//! ```
//!
//! Kinds this crate does not model (`content`, or anything a newer Chisel adds)
//! decode to [`RawRecord::Unknown`] or are carried but ignored downstream.

use serde::{Deserialize, Serialize};
use std::io::BufRead;
use thiserror::Error;
use tracing::{debug, warn};

/// jsonwall format version this decoder understands
pub const JSONWALL_VERSION: &str = "1.0";

/// Manifest schema version this decoder understands
pub const SCHEMA_VERSION: &str = "1.0";

/// Location of the manifest inside a chiselled rootfs
pub const DEFAULT_MANIFEST_PATH: &str = "var/lib/chisel/manifest.wall";

/// Upper bound on the records preallocated from the header `count`
const MAX_PREALLOCATED_RECORDS: usize = 4096;

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("cannot read manifest: {0}")]
    Io(#[from] std::io::Error),

    #[error("cannot decode manifest line {line}: {source}")]
    Decode {
        line: usize,
        source: serde_json::Error,
    },

    #[error("manifest has no jsonwall header")]
    MissingHeader,

    #[error("unsupported jsonwall version: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported manifest schema: {0}")]
    UnsupportedSchema(String),
}

/// First line of a jsonwall file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ManifestHeader {
    #[serde(default)]
    pub jsonwall: Option<String>,
    #[serde(default)]
    pub schema: Option<String>,
    #[serde(default)]
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPackage {
    pub name: String,
    pub version: String,
    pub sha256: String,
    pub arch: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSlice {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPath {
    pub path: String,
    pub mode: String,
    pub slices: Vec<String>,
    pub sha256: Option<String>,
    pub final_sha256: Option<String>,
    pub size: Option<u64>,
    pub link: Option<String>,
    pub inode: Option<u64>,
}

/// Which slice installed which path; redundant with `RawPath::slices`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawContent {
    pub slice: String,
    pub path: String,
}

/// One decoded manifest line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RawRecord {
    Package(RawPackage),
    Slice(RawSlice),
    Path(RawPath),
    Content(RawContent),
    #[serde(other)]
    Unknown,
}

/// A decoded manifest: header plus records in file order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Manifest {
    pub header: ManifestHeader,
    pub records: Vec<RawRecord>,
}

/// Decode a jsonwall manifest from a line reader
///
/// Blank lines and leading whitespace are ignored. Decoding stops at the first
/// malformed line.
pub fn read_manifest<R: BufRead>(reader: R) -> Result<Manifest, ManifestError> {
    let mut header: Option<ManifestHeader> = None;
    let mut records = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let decode_err = |source| ManifestError::Decode {
            line: idx + 1,
            source,
        };

        if header.is_none() {
            let parsed: ManifestHeader = serde_json::from_str(line).map_err(decode_err)?;
            validate_header(&parsed)?;
            records.reserve(parsed.count.min(MAX_PREALLOCATED_RECORDS));
            header = Some(parsed);
            continue;
        }

        let record: RawRecord = serde_json::from_str(line).map_err(decode_err)?;
        records.push(record);
    }

    let header = header.ok_or(ManifestError::MissingHeader)?;
    if header.count != records.len() {
        warn!(
            "Manifest header announces {} entries but {} were found",
            header.count,
            records.len()
        );
    }
    debug!("Decoded {} manifest records", records.len());

    Ok(Manifest { header, records })
}

fn validate_header(header: &ManifestHeader) -> Result<(), ManifestError> {
    match header.jsonwall.as_deref() {
        None => return Err(ManifestError::MissingHeader),
        Some(JSONWALL_VERSION) => {}
        Some(other) => return Err(ManifestError::UnsupportedFormat(other.to_string())),
    }
    match header.schema.as_deref() {
        Some(SCHEMA_VERSION) => Ok(()),
        Some(other) => Err(ManifestError::UnsupportedSchema(other.to_string())),
        None => Err(ManifestError::UnsupportedSchema(String::new())),
    }
}
