use crate::types::HashMap;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read};
use std::path::Path;

/// Preferred transcript per gene symbol, e.g. `{"ALK": "NM_004304"}`.
#[derive(Debug, Clone, Default)]
pub struct TargetTranscripts {
    by_gene: HashMap<String, String>,
}

impl TargetTranscripts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let by_gene: HashMap<String, String> = serde_json::from_reader(reader)
            .context("target transcript file must be a JSON object of gene -> transcript id")?;
        Ok(Self { by_gene })
    }

    pub fn insert(&mut self, gene: impl Into<String>, transcript: impl Into<String>) {
        self.by_gene.insert(gene.into(), transcript.into());
    }

    pub fn get(&self, gene: &str) -> Option<&str> {
        self.by_gene.get(gene).map(|t| t.as_str())
    }

    pub fn len(&self) -> usize {
        self.by_gene.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_gene.is_empty()
    }
}

/// Load the override map. A missing file means no overrides.
pub fn load_targets(path: &Path) -> Result<TargetTranscripts> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "no target transcript file, using annotation order");
            return Ok(TargetTranscripts::new());
        }
        Err(e) => {
            return Err(e).with_context(|| format!("failed to open target transcripts {}", path.display()));
        }
    };
    TargetTranscripts::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse target transcripts {}", path.display()))
}
