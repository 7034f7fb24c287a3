// build.rs

use clap::{Arg, ArgAction, Command};
use clap_mangen::Man;
use std::env;
use std::fs;
use std::path::PathBuf;

fn build_cli() -> Command {
    Command::new("chisel-sbom")
        .version(env!("CARGO_PKG_VERSION"))
        .author("Chisel SBOM Contributors")
        .about("Build an SPDX document from the Chisel manifest of a chiselled rootfs")
        .arg(Arg::new("rootfs").required(true).help("Path to the chiselled rootfs"))
        .arg(
            Arg::new("output")
                .default_value("manifest.spdx.json")
                .help("Path of the SPDX JSON document to write"),
        )
        .arg(
            Arg::new("distro")
                .long("distro")
                .value_name("VERSION_ID")
                .help("Distribution VERSION_ID to use instead of reading etc/os-release"),
        )
        .arg(
            Arg::new("manifest")
                .long("manifest")
                .value_name("PATH")
                .default_value("var/lib/chisel/manifest.wall")
                .help("Manifest location relative to the rootfs"),
        )
        .arg(
            Arg::new("no_timestamp")
                .long("no-timestamp")
                .action(ArgAction::SetTrue)
                .help("Omit the creation timestamp for reproducible output"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity (-v debug, -vv trace)"),
        )
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = match env::var("OUT_DIR") {
        Ok(dir) => PathBuf::from(dir),
        Err(e) => {
            println!("cargo:warning=OUT_DIR not set: {}", e);
            return;
        }
    };
    let man_dir = out_dir.join("man");

    if let Err(e) = fs::create_dir_all(&man_dir) {
        println!("cargo:warning=Failed to create man directory: {}", e);
        return;
    }

    let man = Man::new(build_cli());
    let mut buffer = Vec::new();

    if let Err(e) = man.render(&mut buffer) {
        println!("cargo:warning=Failed to render man page: {}", e);
        return;
    }

    if let Err(e) = fs::write(man_dir.join("chisel-sbom.1"), buffer) {
        println!("cargo:warning=Failed to write man page: {}", e);
    }
}
