// src/main.rs

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::GenerateOptions;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.default_log_filter())),
        )
        .init();

    let opts = GenerateOptions {
        rootfs: cli.rootfs,
        output: cli.output,
        manifest: cli.manifest,
        distro: cli.distro,
        timestamp: !cli.no_timestamp,
    };
    commands::cmd_generate(&opts)
}
