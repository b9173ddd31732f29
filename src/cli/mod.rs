//! Command-line interface wiring for the `stringtab` binary.
//!
//! This module owns the clap definitions and delegates execution to
//! the submodule for each command.

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod build;
pub mod charmap;
pub mod common;
pub mod hexdump;
pub mod utils;

/// Parsed CLI entrypoint for the `stringtab` binary.
#[derive(Parser, Debug)]
#[command(
    name = "stringtab",
    version,
    about = "Compile glyph-mapped game scripts into string tables"
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile a script into a `.TBN` table or a `.BIN`/`.TXT` pair.
    Build(build::BuildArgs),
    /// Print any file as a comma-separated hex array.
    Hexdump(hexdump::HexdumpArgs),
    /// List the glyph substitution table.
    Charmap,
}

/// Execute the requested command.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build(args) => build::handle(args),
        Command::Hexdump(args) => hexdump::handle(args),
        Command::Charmap => charmap::handle(),
    }
}
