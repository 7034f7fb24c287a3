// src/builder/mod.rs

//! SPDX document builder
//!
//! Resolves the package → slice → file hierarchy described by the typed
//! manifest records and emits it as an SPDX document graph.
//!
//! # Emission order
//!
//! 1. The distribution, when one is known
//! 2. One package per [`PackageRecord`], each described by the document
//! 3. One slice per [`SliceRecord`], each contained by its package
//! 4. One file per [`PathRecord`], related to every slice claiming it
//!
//! Nodes and relationships follow input order within each step. The first
//! invalid record aborts the build; no partial document is returned.

mod classify;
mod slice;

pub use classify::{classify, FileError, FileKind};
pub use slice::{package_part, resolve_slice_owner, SliceOwnerError, SLICE_SEPARATOR};

use crate::record::{PackageRecord, PathRecord, SliceRecord};
use crate::spdx::{
    Checksum, Document, ElementId, ExternalRef, File, NOASSERTION, Package, PackagePurpose,
    Relationship, RelationshipKind,
};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, trace};

/// Name of every generated document
pub const DOCUMENT_NAME: &str = "chiselled-rootfs-sbom";

/// Creators recorded in the document's creation info
pub const DOCUMENT_CREATORS: &[&str] = &[
    concat!("Tool: chisel-sbom-", env!("CARGO_PKG_VERSION")),
    "Organization: Canonical Ltd.",
];

/// Supplier of every Debian package in a chiselled rootfs
pub const PACKAGE_SUPPLIER: &str = "Organization: Canonical Ltd.";

/// Distribution family the rootfs packages come from
pub const DISTRO_FAMILY: &str = "ubuntu";

const PACKAGE_COMMENT: &str =
    "This package includes one or more slice(s); see Relationship information.";
const DISTRO_COMMENT: &str = "This package is the distribution of the rootfs.";

/// Errors that abort a build, tagged with the section that failed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("cannot build slice section: {0}")]
    SliceSection(#[from] SliceOwnerError),

    #[error("cannot build file section: {0}")]
    FileSection(#[from] FileError),
}

/// Build the SPDX document for a chiselled rootfs
///
/// `distro` is the `VERSION_ID` of the rootfs; pass an empty string when it
/// is unknown. It only controls the operating system node: purl qualifiers
/// come from [`PackageRecord::distro`].
pub fn build(
    distro: &str,
    slices: &[SliceRecord],
    packages: &[PackageRecord],
    paths: &[PathRecord],
) -> Result<Document, BuildError> {
    let mut builder = DocumentBuilder::new();
    builder.add_distro(distro);
    builder.add_packages(packages);
    builder.add_slices(slices, packages)?;
    builder.add_files(paths)?;
    Ok(builder.finish())
}

/// Append-only document state for a single build
struct DocumentBuilder {
    doc: Document,
}

impl DocumentBuilder {
    fn new() -> Self {
        let creators = DOCUMENT_CREATORS.iter().map(|c| c.to_string()).collect();
        Self {
            doc: Document::new(DOCUMENT_NAME, creators),
        }
    }

    fn describe(&mut self, id: ElementId) {
        self.doc.relationships.push(Relationship::new(
            ElementId::document(),
            RelationshipKind::Describes,
            id,
        ));
    }

    fn add_distro(&mut self, distro: &str) {
        if distro.is_empty() {
            return;
        }
        debug!("Adding operating system {} {}", DISTRO_FAMILY, distro);

        let id = ElementId::operating_system(DISTRO_FAMILY, distro);
        let mut package = Package::new(DISTRO_FAMILY, id.clone());
        package.version = Some(distro.to_string());
        package.comment = Some(DISTRO_COMMENT.to_string());
        package.primary_package_purpose = Some(PackagePurpose::OperatingSystem);

        self.doc.packages.push(package);
        self.describe(id);
    }

    fn add_packages(&mut self, packages: &[PackageRecord]) {
        debug!("Building package section ({} packages)", packages.len());
        for record in packages {
            let id = ElementId::package(&record.name);
            let mut package = Package::new(&record.name, id.clone());
            package.version = Some(record.version.clone());
            package.supplier = Some(PACKAGE_SUPPLIER.to_string());
            package.checksums.push(Checksum::sha256(&record.sha256));
            package.comment = Some(PACKAGE_COMMENT.to_string());
            package.external_refs = vec![
                ExternalRef {
                    category: "SECURITY".to_string(),
                    ref_type: "cpe23Type".to_string(),
                    locator: cpe(record),
                },
                ExternalRef {
                    category: "PACKAGE_MANAGER".to_string(),
                    ref_type: "purl".to_string(),
                    locator: purl(record),
                },
            ];

            self.doc.packages.push(package);
            self.describe(id);
        }
    }

    fn add_slices(
        &mut self,
        slices: &[SliceRecord],
        packages: &[PackageRecord],
    ) -> Result<(), BuildError> {
        debug!("Building slice section ({} slices)", slices.len());
        let package_names: HashSet<&str> = packages.iter().map(|p| p.name.as_str()).collect();

        for record in slices {
            let owner = resolve_slice_owner(&record.name, &package_names)?;
            trace!("Slice {} belongs to package {}", record.name, owner);

            let id = ElementId::slice(&record.name);
            let mut package = Package::new(&record.name, id.clone());
            package.comment = Some(format!(
                "This slice is a sub-package of the package {}; see Relationship information.",
                owner
            ));

            self.doc.packages.push(package);
            self.doc.relationships.push(Relationship::new(
                ElementId::package(owner),
                RelationshipKind::Contains,
                id,
            ));
        }
        Ok(())
    }

    fn add_files(&mut self, paths: &[PathRecord]) -> Result<(), BuildError> {
        debug!("Building file section ({} paths)", paths.len());
        for record in paths {
            let kind = classify(record)?;
            trace!("Path {} classified as {:?}", record.path, kind);

            let file_id = ElementId::file(&record.path);
            self.doc.files.push(File {
                file_name: record.path.clone(),
                spdx_id: file_id.clone(),
                checksums: vec![Checksum::sha256(kind.checksum(record))],
                copyright_text: NOASSERTION.to_string(),
                comment: Some(kind.file_comment(&record.slices)),
            });

            for slice in &record.slices {
                let slice_id = ElementId::slice(slice);
                let relationship = if kind.is_modified() {
                    Relationship::new(file_id.clone(), RelationshipKind::FileModified, slice_id)
                        .with_comment(format!(
                            "File {} is mutated by the slice {}.",
                            record.path, slice
                        ))
                } else {
                    Relationship::new(slice_id, RelationshipKind::Contains, file_id.clone())
                        .with_comment(format!(
                            "File {} is included in the slice {}.",
                            record.path, slice
                        ))
                };
                self.doc.relationships.push(relationship);
            }
        }
        Ok(())
    }

    fn finish(self) -> Document {
        self.doc
    }
}

/// CPE 2.3 name for a Debian package
fn cpe(record: &PackageRecord) -> String {
    format!(
        "cpe:2.3:a:{name}:{name}:{version}:*:*:*:*:*:*:*",
        name = record.name,
        version = record.version
    )
}

/// Package URL for a Debian package, qualified by distribution when known
fn purl(record: &PackageRecord) -> String {
    let mut purl = format!(
        "pkg:deb/{}/{}@{}?arch={}",
        DISTRO_FAMILY, record.name, record.version, record.arch
    );
    if let Some(ref distro) = record.distro {
        purl.push_str(&format!("&distro={}", distro));
    }
    purl
}
