pub mod mmap_reader;

pub use mmap_reader::{map_file, MmapReader};
