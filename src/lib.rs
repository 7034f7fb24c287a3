// src/lib.rs

//! Chisel SBOM generator
//!
//! Turns the manifest that Chisel writes into a chiselled root filesystem
//! into an SPDX document describing what the filesystem contains.
//!
//! # Architecture
//!
//! - `manifest`: decodes the line-delimited jsonwall manifest into raw records
//! - `converter`: maps raw records onto the typed record model
//! - `builder`: resolves packages, slices and files into an SPDX document graph
//! - `spdx`: the document graph and its JSON encoding
//!
//! Packages own slices by naming convention (`<package>_<slice>`), slices own
//! the paths that list them. Files that were mutated after installation point
//! back at the slices that mutated them.

pub mod builder;
pub mod compression;
pub mod converter;
mod error;
pub mod manifest;
pub mod os_release;
pub mod record;
pub mod spdx;

pub use builder::{build, classify, resolve_slice_owner, BuildError, FileKind, SliceOwnerError};
pub use converter::{convert, convert_file, ManifestData};
pub use error::{Error, Result};
pub use manifest::{read_manifest, Manifest, ManifestError, RawRecord};
pub use record::{PackageRecord, PathRecord, SliceRecord};
pub use spdx::{Document, ElementId, RelationshipKind};
