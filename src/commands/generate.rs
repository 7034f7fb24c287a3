// src/commands/generate.rs

//! SBOM generation for a chiselled rootfs

use anyhow::{Context, Result};
use chisel_sbom::os_release::{read_version_id, OS_RELEASE_PATH};
use chisel_sbom::spdx::Document;
use chrono::{SecondsFormat, Utc};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Resolved settings for one generation run
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root of the chiselled filesystem
    pub rootfs: PathBuf,
    /// Destination of the SPDX JSON document
    pub output: PathBuf,
    /// Manifest location relative to `rootfs`
    pub manifest: PathBuf,
    /// VERSION_ID override; looked up in the rootfs when `None`
    pub distro: Option<String>,
    /// Stamp the document with its creation time
    pub timestamp: bool,
}

/// Generate the SPDX document for a chiselled rootfs
///
/// The output file only appears once the whole document has been built and
/// written; a failed run leaves no output behind.
pub fn cmd_generate(opts: &GenerateOptions) -> Result<()> {
    let manifest_path = opts.rootfs.join(&opts.manifest);
    info!("Reading Chisel manifest: {}", manifest_path.display());

    let distro = match &opts.distro {
        Some(distro) => distro.clone(),
        None => lookup_distro(&opts.rootfs)?,
    };
    debug!("Distribution VERSION_ID: {:?}", distro);

    let mut doc = chisel_sbom::converter::convert_file(&manifest_path, &distro)?;
    if opts.timestamp {
        doc.creation_info.created = Some(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true));
    }

    write_document(&doc, &opts.output)?;
    println!("SPDX document created at {}", opts.output.display());
    Ok(())
}

/// VERSION_ID of the rootfs, or an empty string when it cannot be determined
fn lookup_distro(rootfs: &Path) -> Result<String> {
    let path = rootfs.join(OS_RELEASE_PATH);
    match read_version_id(&path) {
        Ok(Some(version_id)) => Ok(version_id),
        Ok(None) => {
            warn!("No VERSION_ID in {}", path.display());
            warn!("The generated SBOM will be incomplete for vulnerability identification.");
            Ok(String::new())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!("OS release file not found in the chiselled rootfs.");
            warn!("The generated SBOM will be incomplete for vulnerability identification.");
            Ok(String::new())
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
    }
}

/// Write `doc` to `output` through a temporary file in the same directory
fn write_document(doc: &Document, output: &Path) -> Result<()> {
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    {
        let mut writer = BufWriter::new(&mut tmp);
        doc.write_json(&mut writer)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }
    tmp.persist(output)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    Ok(())
}
