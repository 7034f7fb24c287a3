// src/os_release.rs

//! os-release lookup
//!
//! Reads `VERSION_ID` from the rootfs' `etc/os-release`, which qualifies
//! package URLs and names the operating system in the SBOM.

use std::io;
use std::path::Path;

/// Location of os-release inside a rootfs
pub const OS_RELEASE_PATH: &str = "etc/os-release";

/// Read `VERSION_ID` from an os-release file
///
/// Returns `Ok(None)` if the file exists but has no `VERSION_ID`. A missing
/// file is reported as an `io::ErrorKind::NotFound` error.
pub fn read_version_id(path: &Path) -> io::Result<Option<String>> {
    let content = std::fs::read_to_string(path)?;
    Ok(parse_value(&content, "VERSION_ID"))
}

/// Value of `key` in os-release formatted `content`
pub fn parse_value(content: &str, key: &str) -> Option<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .find(|(k, _)| k.trim() == key)
        .map(|(_, value)| unquote(value.trim()).to_string())
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}
