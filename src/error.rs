use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChunkError>;

#[derive(Error, Debug)]
pub enum ChunkError {
    #[error("index {index} out of range for chunk of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("invalid range: offset {offset} + length {length} exceeds capacity {capacity}")]
    InvalidRange {
        offset: usize,
        length: usize,
        capacity: usize,
    },
    #[error("capacity overflow: {existing} + {additional} elements")]
    CapacityOverflow { existing: usize, additional: usize },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error("Invalid config: {0}")]
    InvalidConfig(String),
}

impl ChunkError {
    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }

    pub(crate) fn overflow(existing: usize, additional: usize) -> Self {
        Self::CapacityOverflow {
            existing,
            additional,
        }
    }

    /// Validates an `(offset, length)` window against a region of `capacity`
    /// elements.
    pub(crate) fn check_window(offset: usize, length: usize, capacity: usize) -> Result<()> {
        match offset.checked_add(length) {
            Some(end) if end <= capacity => Ok(()),
            _ => Err(Self::InvalidRange {
                offset,
                length,
                capacity,
            }),
        }
    }
}
