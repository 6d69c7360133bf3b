use crate::error::{ChunkError, Result};
use std::sync::Arc;

/// A window over shared, immutable array storage
///
/// Slicing only moves the window; the backing vector is never copied.
#[derive(Clone, Debug)]
pub struct ArraySlice<T> {
    values: Arc<Vec<T>>,
    offset: usize,
    len: usize,
}

impl<T> ArraySlice<T> {
    /// Wrap a whole vector
    pub fn new(values: Arc<Vec<T>>) -> Self {
        let len = values.len();
        Self {
            values,
            offset: 0,
            len,
        }
    }

    /// Wrap `values[offset..offset + len]`
    pub fn window(values: Arc<Vec<T>>, offset: usize, len: usize) -> Result<Self> {
        ChunkError::check_window(offset, len, values.len())?;
        Ok(Self {
            values,
            offset,
            len,
        })
    }

    /// Get slice length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Start of the window within the storage
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.values.get(self.offset + index)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.values[self.offset..self.offset + self.len]
    }

    /// Backing storage shared with every other slice cut from it
    pub fn storage(&self) -> &Arc<Vec<T>> {
        &self.values
    }

    /// Split into two windows over the same storage. `at` is clamped.
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.len);
        let left = Self {
            values: Arc::clone(&self.values),
            offset: self.offset,
            len: at,
        };
        let right = Self {
            values: Arc::clone(&self.values),
            offset: self.offset + at,
            len: self.len - at,
        };
        (left, right)
    }
}
