//! Buffered streaming reader
//!
//! Drives a [`Tokenizer`] from any source implementing `Read`: reads byte
//! chunks, decodes them as UTF-8, feeds the decoded text, and finishes the
//! tokenizer at end-of-input. A multi-byte character split across two reads
//! is carried over (at most 3 bytes) rather than rejected.

use std::io::Read;
use std::str;

use log::trace;

use crate::core::tokenizer::{TokenSink, Tokenizer};
use crate::error::ReadError;

/// Buffer size for reading chunks
const DEFAULT_BUFFER_SIZE: usize = 8192;

/// Streaming reader that tokenizes input from a `Read` source.
///
/// ```
/// use saxine::{reader::BufferedReader, TokenCollector};
/// use std::io::Cursor;
///
/// let input = Cursor::new("<feed><item/></feed>");
/// let mut tokens = TokenCollector::new();
/// BufferedReader::new(input).run(&mut tokens)?;
///
/// assert!(tokens.is_ended());
/// assert_eq!(tokens.token_count(), 3);
/// # Ok::<(), saxine::ReadError>(())
/// ```
pub struct BufferedReader<R: Read> {
    reader: R,
    tokenizer: Tokenizer,
    /// Fixed-size read target
    buffer: Vec<u8>,
    /// Carried bytes plus the fresh read, assembled for decoding
    scratch: Vec<u8>,
    /// Trailing bytes of an incomplete UTF-8 sequence (at most 3)
    carry: Vec<u8>,
    finished: bool,
}

impl<R: Read> BufferedReader<R> {
    /// Create a reader with the default chunk size
    pub fn new(reader: R) -> Self {
        Self::with_capacity(reader, DEFAULT_BUFFER_SIZE)
    }

    /// Create a reader with the given chunk size
    pub fn with_capacity(reader: R, capacity: usize) -> Self {
        BufferedReader {
            reader,
            tokenizer: Tokenizer::new(),
            buffer: vec![0u8; capacity.max(1)],
            scratch: Vec::new(),
            carry: Vec::new(),
            finished: false,
        }
    }

    /// Read and feed one chunk.
    ///
    /// Returns `Ok(false)` once the source is exhausted and the tokenizer
    /// has delivered its terminal event.
    pub fn pump<S: TokenSink>(&mut self, sink: &mut S) -> Result<bool, ReadError> {
        if self.finished {
            return Ok(false);
        }

        let read = self.reader.read(&mut self.buffer)?;
        if read == 0 {
            self.finished = true;
            if !self.carry.is_empty() {
                // The stream ended in the middle of a character.
                return Err(ReadError::InvalidUtf8);
            }
            trace!("input exhausted, finishing");
            self.tokenizer.finish(sink)?;
            return Ok(false);
        }

        self.scratch.clear();
        self.scratch.extend_from_slice(&self.carry);
        self.scratch.extend_from_slice(&self.buffer[..read]);
        self.carry.clear();

        let split = utf8_split_point(&self.scratch);
        let (complete, tail) = self.scratch.split_at(split);
        let chunk = match str::from_utf8(complete) {
            Ok(chunk) => chunk,
            Err(_) => {
                self.finished = true;
                return Err(ReadError::InvalidUtf8);
            }
        };

        trace!("feeding {} bytes, carrying {}", chunk.len(), tail.len());
        self.tokenizer.feed(chunk, sink)?;
        self.carry.extend_from_slice(tail);
        Ok(true)
    }

    /// Pump until the source is exhausted
    pub fn run<S: TokenSink>(&mut self, sink: &mut S) -> Result<(), ReadError> {
        while self.pump(sink)? {}
        Ok(())
    }

    /// Unwrap the underlying reader
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Tokenize an entire `Read` source into a sink.
pub fn read_to_sink<R: Read, S: TokenSink>(reader: R, sink: &mut S) -> Result<(), ReadError> {
    BufferedReader::new(reader).run(sink)
}

/// Find the byte offset before any trailing incomplete UTF-8 sequence.
///
/// Everything before the returned offset decodes on its own; the remainder
/// (at most 3 bytes) needs the next read to complete.
fn utf8_split_point(data: &[u8]) -> usize {
    let len = data.len();

    // The last character sequence starts within the final 4 bytes.
    let mut start = len;
    for back in 1..=len.min(4) {
        if is_utf8_boundary(data[len - back]) {
            start = len - back;
            break;
        }
    }
    if start == len {
        // Nothing but continuation bytes; let str validation report it.
        return len;
    }

    if len - start >= sequence_len(data[start]) {
        len
    } else {
        start
    }
}

/// A boundary byte is ASCII or a UTF-8 lead byte, never a continuation.
#[inline]
const fn is_utf8_boundary(byte: u8) -> bool {
    byte as i8 >= -0x40
}

/// Expected length of the sequence begun by a lead byte.
#[inline]
fn sequence_len(lead: u8) -> usize {
    if lead < 0x80 {
        1
    } else if lead < 0xE0 {
        2
    } else if lead < 0xF0 {
        3
    } else {
        4
    }
}
