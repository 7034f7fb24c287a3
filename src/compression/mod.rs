// src/compression/mod.rs

//! Manifest decompression
//!
//! Chisel writes its manifest zstd compressed. Plain manifests are accepted
//! too so fixtures and hand-edited manifests can be fed in directly.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Compression-related errors
#[derive(Error, Debug)]
pub enum CompressionError {
    #[error("Failed to open {}: {source}", path.display())]
    Open { path: PathBuf, source: io::Error },

    #[error("Failed to create {format} decoder: {source}")]
    DecoderCreation {
        format: &'static str,
        source: io::Error,
    },
}

/// Supported compression formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionFormat {
    /// No compression (raw data)
    None,
    /// Zstandard compression (.zst)
    Zstd,
}

impl CompressionFormat {
    /// Detect compression format from magic bytes
    ///
    /// Zstd frames start with `28 b5 2f fd`; anything else is read as is.
    pub fn from_magic_bytes(data: &[u8]) -> Self {
        if data.len() >= 4
            && data[0] == 0x28
            && data[1] == 0xb5
            && data[2] == 0x2f
            && data[3] == 0xfd
        {
            Self::Zstd
        } else {
            Self::None
        }
    }

    /// Get a human-readable name for this format
    pub fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Zstd => "zstd",
        }
    }
}

impl std::fmt::Display for CompressionFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Create a decompressing reader for the given format
///
/// For `CompressionFormat::None`, returns the reader unchanged.
pub fn create_decoder<'a, R: BufRead + 'a>(
    reader: R,
    format: CompressionFormat,
) -> Result<Box<dyn Read + 'a>, CompressionError> {
    match format {
        CompressionFormat::None => Ok(Box::new(reader)),
        CompressionFormat::Zstd => {
            let decoder = zstd::Decoder::with_buffer(reader).map_err(|e| {
                CompressionError::DecoderCreation {
                    format: "zstd",
                    source: e,
                }
            })?;
            Ok(Box::new(decoder))
        }
    }
}

/// Open a manifest file as a line reader, decompressing it if needed
///
/// The format is sniffed from the first bytes of the file rather than its
/// name; Chisel always writes `manifest.wall` without an extension.
pub fn open_manifest(path: &Path) -> Result<Box<dyn BufRead>, CompressionError> {
    let open_err = |source| CompressionError::Open {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(open_err)?;
    let mut reader = BufReader::new(file);
    let format = CompressionFormat::from_magic_bytes(reader.fill_buf().map_err(open_err)?);
    tracing::debug!("Manifest {} compression: {}", path.display(), format);

    let decoder = create_decoder(reader, format)?;
    Ok(Box::new(BufReader::new(decoder)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_format_from_magic_bytes() {
        assert_eq!(
            CompressionFormat::from_magic_bytes(&[0x28, 0xb5, 0x2f, 0xfd, 0x00]),
            CompressionFormat::Zstd
        );
        assert_eq!(CompressionFormat::from_magic_bytes(b"{\"jsonwall\""), CompressionFormat::None);

        // Too short for any magic
        assert_eq!(CompressionFormat::from_magic_bytes(&[0x28]), CompressionFormat::None);
    }

    #[test]
    fn test_format_display() {
        assert_eq!(format!("{}", CompressionFormat::Zstd), "zstd");
        assert_eq!(format!("{}", CompressionFormat::None), "none");
    }

    #[test]
    fn test_open_manifest_zstd_and_plain() {
        let dir = tempfile::tempdir().unwrap();
        let content = "{\"jsonwall\":\"1.0\",\"schema\":\"1.0\",\"count\":0}\n";

        let zst_path = dir.path().join("manifest.wall");
        let mut f = File::create(&zst_path).unwrap();
        f.write_all(&zstd::encode_all(content.as_bytes(), 3).unwrap()).unwrap();
        drop(f);

        let plain_path = dir.path().join("plain.wall");
        std::fs::write(&plain_path, content).unwrap();

        for path in [zst_path, plain_path] {
            let mut text = String::new();
            open_manifest(&path).unwrap().read_to_string(&mut text).unwrap();
            assert_eq!(text, content);
        }
    }

    #[test]
    fn test_open_manifest_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = match open_manifest(&dir.path().join("missing")) {
            Err(e) => e,
            Ok(_) => panic!("expected open failure"),
        };
        assert!(matches!(err, CompressionError::Open { .. }));
    }
}
