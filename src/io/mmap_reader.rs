use crate::chunk::SharedBuffer;
use crate::config::ChunkConfig;
use crate::error::Result;
use crate::stream::BufferProducer;
use memmap2::Mmap;
use std::fs::File;
use std::path::Path;

/// Memory-mapped file exposed as a shared byte buffer
///
/// The OS pages data in as chunks read it, so opening a large file is cheap.
pub struct MmapReader {
    buffer: SharedBuffer<u8>,
}

impl MmapReader {
    /// Map the file at `path`
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        // Mapping a zero-length file fails on some platforms
        let buffer = if file.metadata()?.len() == 0 {
            SharedBuffer::from_vec(Vec::new())
        } else {
            // SAFETY: the mapping is read-only; callers must not truncate the
            // file while chunks borrow from it.
            let mmap = unsafe { Mmap::map(&file)? };
            SharedBuffer::new(mmap)
        };

        log::debug!("mmap: mapped {} ({} bytes)", path.display(), buffer.capacity());
        Ok(Self { buffer })
    }

    /// Get file size
    pub fn len(&self) -> usize {
        self.buffer.capacity()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A fresh cursor over the whole file
    pub fn buffer(&self) -> SharedBuffer<u8> {
        self.buffer.clone()
    }

    /// Producer handing out the file in `read_chunk_size` byte chunks
    pub fn chunks(&self, config: &ChunkConfig) -> Result<BufferProducer<u8>> {
        BufferProducer::new(self.buffer(), config)
    }
}

/// Map `path` into a shared byte buffer.
pub fn map_file<P: AsRef<Path>>(path: P) -> Result<SharedBuffer<u8>> {
    Ok(MmapReader::open(path)?.buffer())
}
