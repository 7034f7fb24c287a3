// tests/common/mod.rs

//! Shared manifest fixtures and expected SPDX elements for integration tests.

#![allow(dead_code)]

use chisel_sbom::builder::{DOCUMENT_CREATORS, DOCUMENT_NAME, PACKAGE_SUPPLIER};
use chisel_sbom::spdx::{
    Checksum, Document, ElementId, ExternalRef, File, NOASSERTION, Package, PackagePurpose,
    Relationship, RelationshipKind,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Single package, single slice, single unmodified path.
pub const MANIFEST_PLAIN: &str = r#"
    {"jsonwall":"1.0","schema":"1.0","count":3}
    {"kind":"package","name":"test","version":"1.0","sha256":"sha256","arch":"amd64"}
    {"kind":"path","path":"/test","mode":"0644","slices":["test_slice"],"sha256":"sha256","size":1024}
    {"kind":"slice","name":"test_slice"}
"#;

/// Same as [`MANIFEST_PLAIN`] but the path was mutated and the package is `arch: all`.
pub const MANIFEST_MODIFIED: &str = r#"
    {"jsonwall":"1.0","schema":"1.0","count":3}
    {"kind":"package","name":"test","version":"1.0","sha256":"sha256","arch":"all"}
    {"kind":"path","path":"/test","mode":"0644","slices":["test_slice"],"sha256":"sha256","final_sha256":"final_sha256","size":1024}
    {"kind":"slice","name":"test_slice"}
"#;

/// Create a rootfs holding a zstd compressed manifest and, optionally, os-release.
///
/// Returns the TempDir - keep it alive to prevent cleanup.
pub fn setup_rootfs(manifest: &str, version_id: Option<&str>) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    let chisel_dir = dir.path().join("var/lib/chisel");
    fs::create_dir_all(&chisel_dir).unwrap();
    let compressed = zstd::encode_all(manifest.as_bytes(), 3).unwrap();
    fs::write(chisel_dir.join("manifest.wall"), compressed).unwrap();

    if let Some(version_id) = version_id {
        write_os_release(dir.path(), version_id);
    }
    dir
}

pub fn write_os_release(rootfs: &Path, version_id: &str) {
    fs::create_dir_all(rootfs.join("etc")).unwrap();
    fs::write(
        rootfs.join("etc/os-release"),
        format!("NAME=\"Ubuntu\"\nID=ubuntu\nVERSION_ID=\"{}\"\n", version_id),
    )
    .unwrap();
}

pub fn package_node(arch: &str, distro: Option<&str>) -> Package {
    let mut purl = format!("pkg:deb/ubuntu/test@1.0?arch={}", arch);
    if let Some(distro) = distro {
        purl.push_str(&format!("&distro={}", distro));
    }

    let mut package = Package::new("test", ElementId::package("test"));
    package.version = Some("1.0".to_string());
    package.supplier = Some(PACKAGE_SUPPLIER.to_string());
    package.checksums = vec![Checksum::sha256("sha256")];
    package.comment =
        Some("This package includes one or more slice(s); see Relationship information.".to_string());
    package.external_refs = vec![
        ExternalRef {
            category: "SECURITY".to_string(),
            ref_type: "cpe23Type".to_string(),
            locator: "cpe:2.3:a:test:test:1.0:*:*:*:*:*:*:*".to_string(),
        },
        ExternalRef {
            category: "PACKAGE_MANAGER".to_string(),
            ref_type: "purl".to_string(),
            locator: purl,
        },
    ];
    package
}

pub fn slice_node() -> Package {
    let mut package = Package::new("test_slice", ElementId::slice("test_slice"));
    package.comment = Some(
        "This slice is a sub-package of the package test; see Relationship information."
            .to_string(),
    );
    package
}

pub fn os_node(version_id: &str) -> Package {
    let mut package = Package::new("ubuntu", ElementId::operating_system("ubuntu", version_id));
    package.version = Some(version_id.to_string());
    package.comment = Some("This package is the distribution of the rootfs.".to_string());
    package.primary_package_purpose = Some(PackagePurpose::OperatingSystem);
    package
}

pub fn file_node(checksum: &str, comment: &str) -> File {
    File {
        file_name: "/test".to_string(),
        spdx_id: ElementId::file("/test"),
        checksums: vec![Checksum::sha256(checksum)],
        copyright_text: NOASSERTION.to_string(),
        comment: Some(comment.to_string()),
    }
}

pub fn describes(id: ElementId) -> Relationship {
    Relationship::new(ElementId::document(), RelationshipKind::Describes, id)
}

pub fn package_contains_slice() -> Relationship {
    Relationship::new(
        ElementId::package("test"),
        RelationshipKind::Contains,
        ElementId::slice("test_slice"),
    )
}

pub fn slice_contains_file() -> Relationship {
    Relationship::new(
        ElementId::slice("test_slice"),
        RelationshipKind::Contains,
        ElementId::file("/test"),
    )
    .with_comment("File /test is included in the slice test_slice.")
}

pub fn file_modified_by_slice() -> Relationship {
    Relationship::new(
        ElementId::file("/test"),
        RelationshipKind::FileModified,
        ElementId::slice("test_slice"),
    )
    .with_comment("File /test is mutated by the slice test_slice.")
}

pub fn document(
    packages: Vec<Package>,
    files: Vec<File>,
    relationships: Vec<Relationship>,
) -> Document {
    let mut doc = Document::new(
        DOCUMENT_NAME,
        DOCUMENT_CREATORS.iter().map(|c| c.to_string()).collect(),
    );
    doc.packages = packages;
    doc.files = files;
    doc.relationships = relationships;
    doc
}

pub fn find_package<'a>(doc: &'a Document, id: &ElementId) -> Option<&'a Package> {
    doc.packages.iter().find(|p| &p.spdx_id == id)
}

pub fn find_file<'a>(doc: &'a Document, id: &ElementId) -> Option<&'a File> {
    doc.files.iter().find(|f| &f.spdx_id == id)
}
