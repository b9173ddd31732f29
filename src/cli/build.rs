//! Script compilation (`stringtab build ...`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;
use stringtab::{
    Artifact, BuildManifest, Layout, OutputFormat, OutputRecord, assemble_text, hex_dump,
    text_path_for,
};
use tracing::{info, warn};

use crate::cli::common::FormatArg;
use crate::cli::utils::{read_text, write_output};

/// Arguments for `stringtab build`.
#[derive(Args, Debug)]
pub struct BuildArgs {
    /// Script to compile (`-` for stdin).
    pub input: PathBuf,
    /// Output file. For split formats the text goes next to it as `.TXT`.
    pub output: PathBuf,
    /// Output format.
    #[arg(long, default_value_t = FormatArg::Auto, value_enum)]
    pub format: FormatArg,
    /// JSON format descriptor; overrides `--format`.
    #[arg(long = "format-config")]
    pub format_config: Option<PathBuf>,
    /// Print the primary output as a hex array instead of a summary.
    #[arg(long)]
    pub hex: bool,
    /// Write a JSON build manifest with output digests.
    #[arg(long)]
    pub manifest: Option<PathBuf>,
}

fn is_stdout(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Reject output targets that cannot be written cleanly. Runs before any file is touched.
fn check_targets(args: &BuildArgs, format: &OutputFormat) -> Result<()> {
    if args.hex && is_stdout(&args.output) {
        bail!("--hex prints to stdout and cannot be combined with `-` as output");
    }
    if format.layout == Layout::Split {
        if is_stdout(&args.output) {
            bail!("format '{}' writes two files and cannot target stdout", format.name);
        }
        if text_path_for(&args.output) == args.output {
            bail!(
                "format '{}' writes its text to {}, which is the offsets file itself; \
                 pick an output name without a .txt extension",
                format.name,
                args.output.display()
            );
        }
    }
    Ok(())
}

/// Write every output, removing already written files if a later one fails.
fn write_all(outputs: &[(PathBuf, &[u8])]) -> Result<Vec<OutputRecord>> {
    let mut records: Vec<OutputRecord> = Vec::with_capacity(outputs.len());
    for (path, bytes) in outputs {
        if let Err(err) = write_output(path, bytes) {
            for record in &records {
                if let Err(cleanup) = fs::remove_file(&record.path) {
                    warn!(path = %record.path.display(), error = %cleanup, "failed to remove partial output");
                }
            }
            return Err(err);
        }
        info!(path = %path.display(), bytes = bytes.len(), "wrote output");
        records.push(OutputRecord::new(path.clone(), bytes));
    }
    Ok(records)
}

/// Execute a build.
pub fn handle(args: BuildArgs) -> Result<()> {
    // Resolve the format first so an unknown target never leaves files behind.
    let format = match &args.format_config {
        Some(path) => OutputFormat::load(path)?,
        None => args.format.resolve(&args.output)?,
    };
    check_targets(&args, &format)?;

    let text = read_text(&args.input)?;
    let assembly = assemble_text(&text, &format)
        .with_context(|| format!("failed to compile {}", args.input.display()))?;

    let outputs = match &assembly.artifact {
        Artifact::Single(bytes) => vec![(args.output.clone(), bytes.as_slice())],
        Artifact::Split { offsets, text } => vec![
            (args.output.clone(), offsets.as_slice()),
            (text_path_for(&args.output), text.as_slice()),
        ],
    };
    let records = write_all(&outputs)?;

    info!(
        format = %format.name,
        byte_order = %format.byte_order,
        lines = assembly.line_count(),
        data_bytes = assembly.data_len(),
        "compiled script"
    );

    if let Some(path) = &args.manifest {
        let source = (!is_stdout(&args.input)).then(|| args.input.clone());
        BuildManifest::new(source, &assembly, records.clone()).save(path)?;
    }

    if args.hex {
        print!("{}", hex_dump(assembly.artifact.primary()));
    } else if !is_stdout(&args.output) {
        println!(
            "Compiled {} lines ({} bytes of text) as {}",
            assembly.line_count(),
            assembly.data_len(),
            format.name
        );
        for record in &records {
            println!("  {} ({} bytes)", record.path.display(), record.bytes);
        }
    }
    Ok(())
}
