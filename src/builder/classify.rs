// src/builder/classify.rs

//! File classification
//!
//! Every path in the manifest is exactly one of a plain file, a file mutated
//! after installation, a symlink or a member of a hard link group. The kind
//! decides the file checksum, its comment and how it relates to its slices.

use crate::record::PathRecord;
use thiserror::Error;

/// Structural problems with a single path record
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FileError {
    /// A link's content is never mutated independently of its target
    #[error("invalid link: link {path} has a final sha256")]
    InvalidLink { path: String },

    #[error("invalid file type: file {path} simultaneously has inode {inode} and link {link}")]
    InvalidFileType {
        path: String,
        inode: u64,
        link: String,
    },
}

/// What a path is, decided once per record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind<'a> {
    Plain,
    Modified { final_sha256: &'a str },
    Symlink { target: &'a str },
    HardLink { inode: u64 },
}

/// Classify a path record, rejecting link/checksum combinations that cannot occur
pub fn classify(record: &PathRecord) -> Result<FileKind<'_>, FileError> {
    let link = record.link.as_deref();
    let inode = record.inode;

    if let Some(final_sha256) = record.final_sha256.as_deref() {
        if link.is_some() || inode.is_some() {
            return Err(FileError::InvalidLink {
                path: record.path.clone(),
            });
        }
        return Ok(FileKind::Modified { final_sha256 });
    }

    match (link, inode) {
        (Some(link), Some(inode)) => Err(FileError::InvalidFileType {
            path: record.path.clone(),
            inode,
            link: link.to_string(),
        }),
        (Some(target), None) => Ok(FileKind::Symlink { target }),
        (None, Some(inode)) => Ok(FileKind::HardLink { inode }),
        (None, None) => Ok(FileKind::Plain),
    }
}

impl<'a> FileKind<'a> {
    /// Checksum the file node carries
    pub fn checksum(&self, record: &'a PathRecord) -> &'a str {
        match *self {
            FileKind::Modified { final_sha256 } => final_sha256,
            _ => &record.sha256,
        }
    }

    /// Whether the file points back at its slices instead of being contained
    pub fn is_modified(&self) -> bool {
        matches!(self, FileKind::Modified { .. })
    }

    /// Comment attached to the file node
    pub fn file_comment(&self, slices: &[String]) -> String {
        match self {
            FileKind::Plain => format!(
                "This file is included in the slice(s) {}; see Relationship information.",
                slices.join(", ")
            ),
            FileKind::Modified { .. } => format!(
                "This file is mutated by the slice {}; see Relationship information.",
                slices.join(", ")
            ),
            FileKind::Symlink { target } => {
                format!("This file is a symlink to the file {}.", target)
            }
            FileKind::HardLink { inode } => format!(
                "This file is within the hard link group {}; files in the same hard link group are alias of each other.",
                inode
            ),
        }
    }
}
