//! Saxine - streaming, event-driven XML tokenization
//!
//! A SAX-style tokenizer that consumes a possibly-chunked text stream and
//! emits token events in input order, without building a document tree and
//! without memory proportional to document size. It targets consumers that
//! extract data from well-formed XML feeds and want minimum footprint and
//! maximum throughput.
//!
//! Entry points:
//! - [`Tokenizer`]: feed decoded text chunks, receive events through a
//!   [`TokenSink`]
//! - [`reader::BufferedReader`]: drive the tokenizer from any `Read` source
//! - [`parse_attributes`] / [`expand_entities`]: pure helpers applied per
//!   token, so their cost is only paid where needed
//!
//! # Examples
//!
//! ```
//! use saxine::{expand_entities, parse_attributes, Token, TokenCollector, Tokenizer};
//!
//! let mut tokens = TokenCollector::new();
//! Tokenizer::parse("<entry id=\"1\">a &amp; b</entry>", &mut tokens)?;
//!
//! let tokens = tokens.take_tokens();
//! if let Token::TagOpen { attributes, .. } = &tokens[0] {
//!     let attrs = parse_attributes(attributes)?;
//!     assert_eq!(attrs[0].name, "id");
//!     assert_eq!(attrs[0].value, "1");
//! }
//! if let Token::Text { contents } = &tokens[1] {
//!     assert_eq!(expand_entities(contents), "a & b");
//! }
//! # Ok::<(), saxine::Error>(())
//! ```
//!
//! Chunks may split the input anywhere, including mid-token; the emitted
//! events are the same as for the unsplit document:
//!
//! ```
//! use saxine::{TokenCollector, Tokenizer};
//!
//! let mut tokens = TokenCollector::new();
//! let mut tokenizer = Tokenizer::new();
//! for chunk in ["<![", "CDATA[", "ok]]>"] {
//!     tokenizer.feed(chunk, &mut tokens)?;
//! }
//! tokenizer.finish(&mut tokens)?;
//!
//! assert!(tokens.is_ended());
//! assert_eq!(tokens.tokens()[0].contents(), Some("ok"));
//! # Ok::<(), saxine::Error>(())
//! ```
//!
//! # Errors
//!
//! Structural faults (mismatched tags, unclosed constructs, unsupported
//! `<!…` markup) are fatal: the tokenizer reports the error once and
//! ignores further input. There is no recovery or resynchronization; the
//! library's niche is trusted feeds.

#![warn(missing_docs, rust_2018_idioms)]

pub mod core;
pub mod error;
pub mod reader;
pub mod sax;

pub use crate::core::attributes::{parse_attributes, Attribute};
pub use crate::core::entities::expand_entities;
pub use crate::core::tokenizer::{TokenSink, Tokenizer};
pub use crate::error::{Error, ReadError};
pub use crate::sax::collector::TokenCollector;
pub use crate::sax::events::Token;
