// src/builder/slice.rs

//! Slice to package ownership
//!
//! The manifest never says which package a slice belongs to. Chisel names
//! slices `<package>_<slice>` and Debian package names cannot contain `_`, so
//! everything before the first separator is the owning package.

use std::collections::HashSet;
use thiserror::Error;

/// Separator between the package and slice parts of a slice name
pub const SLICE_SEPARATOR: char = '_';

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SliceOwnerError {
    #[error("slice {slice} has no package separator")]
    MissingSeparator { slice: String },

    #[error("cannot find package {package} for slice {slice}")]
    UnknownPackage { package: String, slice: String },
}

/// Package part of a slice name, if the name has one
pub fn package_part(slice_name: &str) -> Option<&str> {
    slice_name
        .split_once(SLICE_SEPARATOR)
        .map(|(package, _)| package)
}

/// Resolve the package owning `slice_name` among `package_names`
pub fn resolve_slice_owner<'a>(
    slice_name: &str,
    package_names: &HashSet<&'a str>,
) -> Result<&'a str, SliceOwnerError> {
    let candidate = package_part(slice_name).ok_or_else(|| SliceOwnerError::MissingSeparator {
        slice: slice_name.to_string(),
    })?;

    package_names
        .get(candidate)
        .copied()
        .ok_or_else(|| SliceOwnerError::UnknownPackage {
            package: candidate.to_string(),
            slice: slice_name.to_string(),
        })
}
