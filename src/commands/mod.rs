// src/commands/mod.rs

//! Command handlers for the chisel-sbom CLI

mod generate;

pub use generate::{cmd_generate, GenerateOptions};
