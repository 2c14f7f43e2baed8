//! Owned token events and collection
//!
//! - Events: the owned [`Token`](events::Token) enum
//! - Collector: a [`TokenSink`](crate::TokenSink) implementation that
//!   stores tokens for batch consumption

pub mod collector;
pub mod events;
