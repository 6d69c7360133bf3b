use crate::error::{ChunkError, Result};
use std::fmt;
use std::sync::Arc;

/// Externally owned, read-only memory a buffer chunk can point into
pub trait Region<T>: Send + Sync {
    fn as_slice(&self) -> &[T];
}

impl<T: Send + Sync> Region<T> for Vec<T> {
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl<T: Send + Sync> Region<T> for Box<[T]> {
    fn as_slice(&self) -> &[T] {
        self
    }
}

impl Region<u8> for memmap2::Mmap {
    fn as_slice(&self) -> &[u8] {
        self
    }
}

/// A caller-owned region with a movable read cursor
///
/// The cursor (`position`, `limit`) belongs to this handle only. Chunks made
/// with [`Chunk::from_buffer`](crate::Chunk::from_buffer) copy the cursor at
/// construction, so advancing the buffer afterwards never changes them.
#[derive(Clone)]
pub struct SharedBuffer<T> {
    region: Arc<dyn Region<T>>,
    position: usize,
    limit: usize,
}

impl<T> SharedBuffer<T> {
    /// Wrap a region with the cursor at the start
    pub fn new<R: Region<T> + 'static>(region: R) -> Self {
        Self::from_region(Arc::new(region))
    }

    pub fn from_region(region: Arc<dyn Region<T>>) -> Self {
        let limit = region.as_slice().len();
        Self {
            region,
            position: 0,
            limit,
        }
    }

    /// Buffer over an owned vector
    pub fn from_vec(values: Vec<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        Self::new(values)
    }

    /// Size of the whole region
    pub fn capacity(&self) -> usize {
        self.region.as_slice().len()
    }

    /// Current cursor position
    pub fn position(&self) -> usize {
        self.position
    }

    /// End of the readable part
    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Elements left before the limit
    pub fn remaining(&self) -> usize {
        self.limit - self.position
    }

    pub fn has_remaining(&self) -> bool {
        self.position < self.limit
    }

    /// Elements between the cursor and the limit
    pub fn remaining_slice(&self) -> &[T] {
        &self.region.as_slice()[self.position..self.limit]
    }

    pub fn set_position(&mut self, position: usize) -> Result<()> {
        if position > self.limit {
            return Err(ChunkError::InvalidRange {
                offset: position,
                length: 0,
                capacity: self.limit,
            });
        }
        self.position = position;
        Ok(())
    }

    /// Moves the limit; the position is pulled back if it would pass it.
    pub fn set_limit(&mut self, limit: usize) -> Result<()> {
        ChunkError::check_window(0, limit, self.capacity())?;
        self.limit = limit;
        self.position = self.position.min(limit);
        Ok(())
    }

    /// Move the cursor forward by `count`
    pub fn advance(&mut self, count: usize) -> Result<()> {
        ChunkError::check_window(self.position, count, self.limit)?;
        self.position += count;
        Ok(())
    }

    /// Reset position to zero
    pub fn rewind(&mut self) {
        self.position = 0;
    }

    /// Freeze `count` elements starting at the cursor into a view.
    pub(crate) fn view(&self, count: usize) -> Result<BufferView<T>> {
        ChunkError::check_window(self.position, count, self.limit)?;
        Ok(BufferView {
            region: Arc::clone(&self.region),
            base: self.position,
            len: count,
        })
    }
}

impl<T> fmt::Debug for SharedBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedBuffer")
            .field("position", &self.position)
            .field("limit", &self.limit)
            .field("capacity", &self.capacity())
            .finish()
    }
}

/// Read-only window into a [`SharedBuffer`]'s region with a frozen length
#[derive(Clone)]
pub struct BufferView<T> {
    region: Arc<dyn Region<T>>,
    base: usize,
    len: usize,
}

impl<T> BufferView<T> {
    /// Get view length
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Offset of the view within the region
    pub fn base(&self) -> usize {
        self.base
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        if index < self.len {
            self.region.as_slice().get(self.base + index)
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[T] {
        &self.region.as_slice()[self.base..self.base + self.len]
    }

    /// Split into two views of the same region. `at` is clamped.
    pub fn split_at(&self, at: usize) -> (Self, Self) {
        let at = at.min(self.len);
        let left = Self {
            region: Arc::clone(&self.region),
            base: self.base,
            len: at,
        };
        let right = Self {
            region: Arc::clone(&self.region),
            base: self.base + at,
            len: self.len - at,
        };
        (left, right)
    }
}

impl<T> fmt::Debug for BufferView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BufferView")
            .field("base", &self.base)
            .field("len", &self.len)
            .finish()
    }
}
