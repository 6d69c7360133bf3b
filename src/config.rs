use crate::error::{ChunkError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkConfig {
    /// Number of elements per chunk handed out by buffer producers
    pub read_chunk_size: usize,

    /// Queue child count above which `compact_if_fragmented` flattens
    pub compact_threshold: usize,
}

impl Default for ChunkConfig {
    fn default() -> Self {
        Self {
            read_chunk_size: 64 * 1024,
            compact_threshold: 64,
        }
    }
}

impl ChunkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ChunkConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject zero chunk sizes
    pub fn validate(&self) -> Result<()> {
        if self.read_chunk_size == 0 {
            return Err(ChunkError::InvalidConfig(
                "read_chunk_size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
