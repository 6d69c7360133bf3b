use crate::chunk::{Chunk, SharedBuffer};
use crate::config::ChunkConfig;
use crate::error::Result;

/// Source of chunks for a pull-based pipeline
///
/// Each call hands out the next chunk; whatever state the producer keeps
/// afterwards is the continuation. `None` means the source is exhausted.
pub trait Producer<T> {
    fn next_chunk(&mut self) -> Option<Chunk<T>>;
}

impl<T, P: Producer<T> + ?Sized> Producer<T> for &mut P {
    fn next_chunk(&mut self) -> Option<Chunk<T>> {
        (**self).next_chunk()
    }
}

impl<T, P: Producer<T> + ?Sized> Producer<T> for Box<P> {
    fn next_chunk(&mut self) -> Option<Chunk<T>> {
        (**self).next_chunk()
    }
}

/// Producer over an iterator of ready-made chunks
pub struct IterProducer<I> {
    chunks: I,
}

impl<I: Iterator> IterProducer<I> {
    /// Producer over an iterator of chunks
    pub fn new(chunks: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            chunks: chunks.into_iter(),
        }
    }
}

impl<T, I: Iterator<Item = Chunk<T>>> Producer<T> for IterProducer<I> {
    fn next_chunk(&mut self) -> Option<Chunk<T>> {
        self.chunks.next()
    }
}

/// Cuts a shared buffer into fixed-size buffer chunks
///
/// Only the producer's own cursor advances; chunks already handed out keep
/// pointing at their frozen windows.
pub struct BufferProducer<T> {
    buffer: SharedBuffer<T>,
    chunk_size: usize,
}

impl<T> BufferProducer<T> {
    /// Cut `buffer` into `read_chunk_size` views
    pub fn new(buffer: SharedBuffer<T>, config: &ChunkConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "producer: {} elements in chunks of {}",
            buffer.remaining(),
            config.read_chunk_size
        );
        Ok(Self {
            buffer,
            chunk_size: config.read_chunk_size,
        })
    }

    /// Elements not handed out yet
    pub fn remaining(&self) -> usize {
        self.buffer.remaining()
    }
}

impl<T> Producer<T> for BufferProducer<T> {
    fn next_chunk(&mut self) -> Option<Chunk<T>> {
        if !self.buffer.has_remaining() {
            return None;
        }
        let count = self.chunk_size.min(self.buffer.remaining());
        let view = self.buffer.view(count).ok()?;
        self.buffer.advance(count).ok()?;
        Some(Chunk::Buffer(view))
    }
}
