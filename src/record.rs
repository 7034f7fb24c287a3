// src/record.rs

//! Typed manifest records consumed by the builder

use serde::{Deserialize, Serialize};

/// A Debian package fully or partially installed into the rootfs
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PackageRecord {
    pub name: String,
    pub version: String,
    /// SHA-256 of the .deb the slices were cut from
    pub sha256: String,
    pub arch: String,
    /// Distribution qualifier appended to the purl, e.g. `ubuntu-24.04`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distro: Option<String>,
}

/// A slice of a package, named `<package>_<slice>`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SliceRecord {
    pub name: String,
}

impl SliceRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A filesystem path produced by one or more slices
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PathRecord {
    pub path: String,
    pub mode: String,
    /// Slices claiming this path, in manifest order
    pub slices: Vec<String>,
    /// Checksum of the content as shipped in the package
    pub sha256: String,
    /// Checksum after a slice mutated the content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_sha256: Option<String>,
    /// Symlink target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Hard link group; paths sharing an id are the same inode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inode: Option<u64>,
}
