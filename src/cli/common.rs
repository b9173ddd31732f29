//! Shared clap helper types for CLI commands.

use std::path::Path;

use clap::ValueEnum;
use stringtab::{FormatError, OutputFormat};

/// Output format selector.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormatArg {
    /// Pick by output file extension.
    Auto,
    Tbn,
    Bin,
}

impl FormatArg {
    pub fn resolve(self, output: &Path) -> Result<OutputFormat, FormatError> {
        match self {
            FormatArg::Auto => OutputFormat::for_path(output),
            FormatArg::Tbn => Ok(OutputFormat::tbn()),
            FormatArg::Bin => Ok(OutputFormat::bin()),
        }
    }
}
