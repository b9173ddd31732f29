use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::assemble::Assembly;
use crate::format::OutputFormat;

const MANIFEST_VERSION: u8 = 1;

/// One file written by a build.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputRecord {
    pub path: PathBuf,
    pub bytes: usize,
    pub sha256: String,
}

impl OutputRecord {
    pub fn new(path: impl Into<PathBuf>, contents: &[u8]) -> Self {
        Self {
            path: path.into(),
            bytes: contents.len(),
            sha256: sha256_hex(contents),
        }
    }
}

/// Summary of a build, stored next to the outputs so a rebuilt string table
/// can be checked against the one the game ships with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BuildManifest {
    pub version: u8,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
    pub format: OutputFormat,
    pub line_count: usize,
    pub data_bytes: usize,
    pub outputs: Vec<OutputRecord>,
}

impl BuildManifest {
    pub fn new(source: Option<PathBuf>, assembly: &Assembly, outputs: Vec<OutputRecord>) -> Self {
        Self {
            version: MANIFEST_VERSION,
            created_at: Utc::now(),
            source,
            format: assembly.format.clone(),
            line_count: assembly.line_count(),
            data_bytes: assembly.data_len(),
            outputs,
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("failed to write manifest {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, self).context("failed to serialize manifest")?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        Ok(())
    }
}

/// Lower-case hex SHA-256 of `bytes`.
pub fn sha256_hex(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    format!("{digest:02x}")
}
