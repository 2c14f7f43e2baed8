//! Streaming input
//!
//! Wraps a `Read` source around the tokenizer: chunked reads, UTF-8
//! decoding with carry-over at chunk boundaries, finish at end-of-input.

pub mod buffered;

pub use buffered::{read_to_sink, BufferedReader};
