//! Persisted role → printer mapping
//!
//! Stored as the wire-format `PrinterConfig` JSON in `{work_dir}/printers.json`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use shared::PrinterConfig;
use tracing::{debug, info};

use crate::error::HostResult;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the mapping; a missing file yields the all-unset default
    pub fn load(&self) -> HostResult<PrinterConfig> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no printer mapping yet, using defaults");
                return Ok(PrinterConfig::default());
            }
            Err(e) => return Err(e.into()),
        };
        if content.trim().is_empty() {
            return Ok(PrinterConfig::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the mapping (temp file + rename)
    pub fn save(&self, config: &PrinterConfig) -> HostResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(config)?)?;
        std::fs::rename(&tmp, &self.path)?;
        info!(path = %self.path.display(), "printer mapping saved");
        Ok(())
    }
}
