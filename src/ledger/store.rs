use std::fs;
use std::path::{Path, PathBuf};

use super::Block;
use super::error::LedgerError;

/// File-backed chain store: one JSON document holding the ordered array of
/// block records.
///
/// Writes go to a side file which is renamed over the store, so a crash
/// mid-write never leaves a half-written chain behind. Loading trusts the
/// stored `hash` fields as-is; `Ledger::is_valid_chain` re-verifies on demand.
#[derive(Debug, Clone)]
pub struct ChainStore {
    path: PathBuf,
}

impl ChainStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn side_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    /// Overwrite the store with the full chain, atomically.
    pub fn save(&self, chain: &[Block]) -> Result<(), LedgerError> {
        let encoded = serde_json::to_vec_pretty(chain).expect("serialize chain");
        let side = self.side_path();
        fs::write(&side, &encoded)?;
        fs::rename(&side, &self.path)?;
        Ok(())
    }

    /// Read the stored chain. `Ok(None)` when no store file exists yet; a
    /// present but malformed store is a `CorruptStore` error.
    pub fn load(&self) -> Result<Option<Vec<Block>>, LedgerError> {
        if !self.path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        let chain: Vec<Block> = serde_json::from_str(&raw)
            .map_err(|e| LedgerError::CorruptStore(e.to_string()))?;
        if chain.is_empty() {
            return Err(LedgerError::CorruptStore(String::from(
                "store holds no blocks",
            )));
        }
        Ok(Some(chain))
    }
}
