pub mod chunk;
pub mod config;
pub mod error;
pub mod io;
pub mod stream;

// Re-export commonly used types
pub use chunk::{ArraySlice, BufferView, Chunk, Queue, Region, SharedBuffer};
pub use config::ChunkConfig;
pub use error::{ChunkError, Result};
pub use io::{map_file, MmapReader};
pub use stream::{uncons, uncons_n, BufferProducer, IterProducer, Producer, Pushback};
