//! Store configuration

use std::path::PathBuf;

use anyhow::Result;

use crate::kv::{FileStore, KvStore, MemoryStore};
use crate::types::DEFAULT_STATE_KEY;

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Directory for [`FileStore`]; `None` keeps everything in memory.
    pub data_dir: Option<PathBuf>,
    pub state_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            state_key: DEFAULT_STATE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        use std::env;

        let data_dir = env::var("COMBO_BLOCKS_DATA_DIR")
            .ok()
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });

        let state_key = env::var("COMBO_BLOCKS_STATE_KEY")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_STATE_KEY.to_string());

        Self {
            data_dir,
            state_key,
        }
    }

    /// Open the configured backend
    pub fn open(&self) -> Result<Box<dyn KvStore>> {
        match &self.data_dir {
            Some(dir) => Ok(Box::new(FileStore::open(dir)?)),
            None => Ok(Box::new(MemoryStore::new())),
        }
    }
}
