pub mod producer;
pub mod pull;

pub use producer::{BufferProducer, IterProducer, Producer};
pub use pull::{uncons, uncons_n, Pushback};
