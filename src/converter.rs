// src/converter.rs

//! Manifest to SPDX conversion
//!
//! Splits the decoded manifest records by kind, maps each kind onto the typed
//! record model and hands the three collections to the builder. No validation
//! happens here; malformed records are rejected by the builder.

use crate::builder::{self, DISTRO_FAMILY};
use crate::compression::open_manifest;
use crate::manifest::{read_manifest, Manifest, RawPackage, RawPath, RawRecord, RawSlice};
use crate::record::{PackageRecord, PathRecord, SliceRecord};
use crate::spdx::Document;
use crate::Result;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, trace};

/// Manifest records grouped by kind, in manifest order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManifestData {
    pub packages: Vec<RawPackage>,
    pub slices: Vec<RawSlice>,
    pub paths: Vec<RawPath>,
}

impl ManifestData {
    pub fn from_records(records: impl IntoIterator<Item = RawRecord>) -> Self {
        let mut data = Self::default();
        for record in records {
            match record {
                RawRecord::Package(package) => data.packages.push(package),
                RawRecord::Slice(slice) => data.slices.push(slice),
                RawRecord::Path(path) => data.paths.push(path),
                RawRecord::Content(content) => {
                    trace!("Skipping content record {} -> {}", content.slice, content.path)
                }
                RawRecord::Unknown => trace!("Skipping manifest record of unknown kind"),
            }
        }
        data
    }

    /// Package records, with purls qualified by `distro` when it is non-empty
    pub fn process_packages(&self, distro: &str) -> Vec<PackageRecord> {
        let qualifier = distro_qualifier(distro);
        self.packages
            .iter()
            .map(|p| PackageRecord {
                name: p.name.clone(),
                version: p.version.clone(),
                sha256: p.sha256.clone(),
                arch: p.arch.clone(),
                distro: qualifier.clone(),
            })
            .collect()
    }

    pub fn process_slices(&self) -> Vec<SliceRecord> {
        self.slices
            .iter()
            .map(|s| SliceRecord::new(s.name.clone()))
            .collect()
    }

    /// Path records; empty strings and a zero inode mean "not set"
    pub fn process_paths(&self) -> Vec<PathRecord> {
        self.paths
            .iter()
            .map(|p| PathRecord {
                path: p.path.clone(),
                mode: p.mode.clone(),
                slices: p.slices.clone(),
                sha256: p.sha256.clone().unwrap_or_default(),
                final_sha256: non_empty(&p.final_sha256),
                link: non_empty(&p.link),
                inode: p.inode.filter(|&inode| inode != 0),
            })
            .collect()
    }
}

impl From<Manifest> for ManifestData {
    fn from(manifest: Manifest) -> Self {
        Self::from_records(manifest.records)
    }
}

/// Purl `distro` qualifier value for a `VERSION_ID`, e.g. `ubuntu-24.04`
pub fn distro_qualifier(distro: &str) -> Option<String> {
    if distro.is_empty() {
        None
    } else {
        Some(format!("{}-{}", DISTRO_FAMILY, distro))
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_deref().filter(|v| !v.is_empty()).map(str::to_string)
}

/// Convert a jsonwall manifest into an SPDX document
///
/// `distro` is the `VERSION_ID` of the rootfs, or empty when unknown.
pub fn convert<R: BufRead>(reader: R, distro: &str) -> Result<Document> {
    let manifest = read_manifest(reader)?;
    let data = ManifestData::from(manifest);
    debug!(
        "Converting {} packages, {} slices, {} paths",
        data.packages.len(),
        data.slices.len(),
        data.paths.len()
    );

    let packages = data.process_packages(distro);
    let slices = data.process_slices();
    let paths = data.process_paths();

    Ok(builder::build(distro, &slices, &packages, &paths)?)
}

/// Convert a manifest file, zstd compressed or plain
pub fn convert_file(path: &Path, distro: &str) -> Result<Document> {
    let reader = open_manifest(path)?;
    convert(reader, distro)
}
