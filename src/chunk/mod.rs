pub mod array;
pub mod buffer;
pub mod chunk;
pub mod ops;
pub mod queue;

pub use array::ArraySlice;
pub use buffer::{BufferView, Region, SharedBuffer};
pub use chunk::{Chunk, Iter};
pub use queue::Queue;
