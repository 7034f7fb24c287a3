// src/cli/mod.rs

//! CLI definitions for chisel-sbom
//!
//! The command implementation lives in the `commands` module.

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Default output file, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "manifest.spdx.json";

#[derive(Parser, Debug)]
#[command(name = "chisel-sbom")]
#[command(author, version)]
#[command(
    about = "Build an SPDX document from the Chisel manifest of a chiselled rootfs",
    long_about = "Build an SPDX document from the Chisel jsonwall manifest of a chiselled rootfs \
                  and save it as JSON to OUTPUT, or to manifest.spdx.json in the current \
                  working directory."
)]
pub struct Cli {
    /// Path to the chiselled rootfs
    pub rootfs: PathBuf,

    /// Path of the SPDX JSON document to write
    #[arg(default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Distribution VERSION_ID to use instead of reading etc/os-release
    #[arg(long, value_name = "VERSION_ID")]
    pub distro: Option<String>,

    /// Manifest location relative to the rootfs
    #[arg(long, value_name = "PATH", default_value = chisel_sbom::manifest::DEFAULT_MANIFEST_PATH)]
    pub manifest: PathBuf,

    /// Omit the creation timestamp for reproducible output
    #[arg(long)]
    pub no_timestamp: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Log filter used when RUST_LOG is not set
    pub fn default_log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}
