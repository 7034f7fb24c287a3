// src/spdx/mod.rs

//! SPDX 2.3 document graph
//!
//! In-memory model of the document the builder produces, serialized with
//! serde into SPDX JSON field names. Element identifiers are stored without
//! the `SPDXRef-` prefix and gain it on serialization.

use serde::{Serialize, Serializer};
use std::fmt;
use std::io::Write;

pub const SPDX_VERSION: &str = "SPDX-2.3";
pub const DATA_LICENSE: &str = "CC0-1.0";
pub const DOCUMENT_ID: &str = "DOCUMENT";
pub const NOASSERTION: &str = "NOASSERTION";

const SPDX_REF_PREFIX: &str = "SPDXRef-";

/// Identifier of a document element, unique within a document
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn document() -> Self {
        Self::new(DOCUMENT_ID)
    }

    pub fn package(name: &str) -> Self {
        Self(format!("Package-{}", name))
    }

    pub fn slice(name: &str) -> Self {
        Self(format!("Slice-{}", name))
    }

    pub fn file(path: &str) -> Self {
        Self(format!("File-{}", path))
    }

    pub fn operating_system(family: &str, version: &str) -> Self {
        Self(format!("OperatingSystem-{}-{}", family, version))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", SPDX_REF_PREFIX, self.0)
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChecksumAlgorithm {
    #[serde(rename = "SHA256")]
    Sha256,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Checksum {
    pub algorithm: ChecksumAlgorithm,
    #[serde(rename = "checksumValue")]
    pub value: String,
}

impl Checksum {
    pub fn sha256(value: impl Into<String>) -> Self {
        Self {
            algorithm: ChecksumAlgorithm::Sha256,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExternalRef {
    #[serde(rename = "referenceCategory")]
    pub category: String,
    #[serde(rename = "referenceType")]
    pub ref_type: String,
    #[serde(rename = "referenceLocator")]
    pub locator: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackagePurpose {
    OperatingSystem,
}

/// A package-like element: the distribution, a Debian package or a slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub name: String,
    #[serde(rename = "SPDXID")]
    pub spdx_id: ElementId,
    #[serde(rename = "versionInfo", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    pub download_location: String,
    pub files_analyzed: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub checksums: Vec<Checksum>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub external_refs: Vec<ExternalRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primary_package_purpose: Option<PackagePurpose>,
}

impl Package {
    /// A package element with only the mandatory fields set
    pub fn new(name: impl Into<String>, spdx_id: ElementId) -> Self {
        Self {
            name: name.into(),
            spdx_id,
            version: None,
            supplier: None,
            download_location: NOASSERTION.to_string(),
            files_analyzed: false,
            checksums: Vec::new(),
            comment: None,
            external_refs: Vec::new(),
            primary_package_purpose: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct File {
    pub file_name: String,
    #[serde(rename = "SPDXID")]
    pub spdx_id: ElementId,
    pub checksums: Vec<Checksum>,
    pub copyright_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationshipKind {
    Describes,
    Contains,
    FileModified,
}

/// A typed edge between two elements
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    #[serde(rename = "spdxElementId")]
    pub element: ElementId,
    pub related_spdx_element: ElementId,
    #[serde(rename = "relationshipType")]
    pub kind: RelationshipKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Relationship {
    pub fn new(element: ElementId, kind: RelationshipKind, related: ElementId) -> Self {
        Self {
            element,
            related_spdx_element: related,
            kind,
            comment: None,
        }
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreationInfo {
    pub creators: Vec<String>,
    /// RFC 3339 timestamp; left unset by the builder so builds are reproducible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
}

/// A complete SPDX document
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "spdxVersion")]
    pub spdx_version: String,
    pub data_license: String,
    #[serde(rename = "SPDXID")]
    pub spdx_id: ElementId,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub document_namespace: Option<String>,
    pub creation_info: CreationInfo,
    pub packages: Vec<Package>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<File>,
    pub relationships: Vec<Relationship>,
}

impl Document {
    /// An empty document with the fixed SPDX header fields
    pub fn new(name: impl Into<String>, creators: Vec<String>) -> Self {
        Self {
            spdx_version: SPDX_VERSION.to_string(),
            data_license: DATA_LICENSE.to_string(),
            spdx_id: ElementId::document(),
            name: name.into(),
            document_namespace: None,
            creation_info: CreationInfo {
                creators,
                created: None,
            },
            packages: Vec::new(),
            files: Vec::new(),
            relationships: Vec::new(),
        }
    }

    /// Relationships touching `id` on either end
    pub fn relationships_of<'a>(
        &'a self,
        id: &'a ElementId,
    ) -> impl Iterator<Item = &'a Relationship> + 'a {
        self.relationships
            .iter()
            .filter(move |r| &r.element == id || &r.related_spdx_element == id)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn write_json<W: Write>(&self, writer: W) -> serde_json::Result<()> {
        serde_json::to_writer_pretty(writer, self)
    }
}
