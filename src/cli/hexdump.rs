//! Hex array rendering (`stringtab hexdump ...`).

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use stringtab::hex_dump;

use crate::cli::utils::write_output;

/// Arguments for `stringtab hexdump`.
#[derive(Args, Debug)]
pub struct HexdumpArgs {
    /// Binary file to render.
    pub file: PathBuf,
    /// Output file (`-` for stdout).
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,
}

pub fn handle(args: HexdumpArgs) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("failed to read {}", args.file.display()))?;
    let dump = hex_dump(&bytes);
    match args.output {
        Some(path) => write_output(&path, dump.as_bytes()),
        None => {
            print!("{}", dump);
            Ok(())
        }
    }
}
