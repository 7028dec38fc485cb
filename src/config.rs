//! TOML configuration for opening a store handle.
//!
//! ```toml
//! root = "m2/process-engine"
//! seed = "fixtures/tree.json"   # optional JSON file for the in-process store
//! ```

use crate::client::TreeRef;
use crate::error::LiveTreeError;
use crate::memory::MemoryStore;
use crate::path::TreePath;
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Bound path of the opened handle.
    pub root: String,
    /// Optional JSON file whose content seeds the in-process store.
    pub seed: Option<PathBuf>,
}

impl StoreConfig {
    pub fn load(path: &Path) -> Result<Self, LiveTreeError> {
        let text = fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|e| LiveTreeError::Config(e.to_string()))
    }
}

/// Open an in-process [`MemoryStore`] per `config` and return a handle bound
/// at `config.root`. Seed-file read or parse failures propagate.
pub fn open_memory(config: &StoreConfig) -> Result<TreeRef, LiveTreeError> {
    let store = match &config.seed {
        Some(seed_path) => {
            let text = fs::read_to_string(seed_path)?;
            let seed: Value = serde_json::from_str(&text)?;
            MemoryStore::with_seed(seed)
        }
        None => MemoryStore::new(),
    };
    Ok(TreeRef::new(Arc::new(store), TreePath::new(&config.root)?))
}
