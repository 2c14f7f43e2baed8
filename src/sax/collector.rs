//! Token collector
//!
//! Implements [`TokenSink`] by storing owned tokens for batch consumption.

use super::events::Token;
use crate::core::tokenizer::TokenSink;

/// Sink that gathers owned [`Token`]s during tokenization.
///
/// The borrowed payloads handed to the sink are copied into owned tokens,
/// so the collector can outlive the chunks that produced them.
#[derive(Debug, Default)]
pub struct TokenCollector {
    tokens: Vec<Token>,
    ended: bool,
}

impl TokenCollector {
    /// Create an empty collector
    pub fn new() -> Self {
        TokenCollector {
            tokens: Vec::new(),
            ended: false,
        }
    }

    /// Take the collected tokens, leaving the collector empty
    pub fn take_tokens(&mut self) -> Vec<Token> {
        std::mem::take(&mut self.tokens)
    }

    /// Get the collected tokens as a slice
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Number of collected tokens
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    /// Check if the terminal end signal was delivered
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl TokenSink for TokenCollector {
    fn text(&mut self, contents: &str) {
        self.tokens.push(Token::Text {
            contents: contents.to_string(),
        });
    }

    fn cdata(&mut self, contents: &str) {
        self.tokens.push(Token::CData {
            contents: contents.to_string(),
        });
    }

    fn comment(&mut self, contents: &str) {
        self.tokens.push(Token::Comment {
            contents: contents.to_string(),
        });
    }

    fn processing_instruction(&mut self, contents: &str) {
        self.tokens.push(Token::ProcessingInstruction {
            contents: contents.to_string(),
        });
    }

    fn tag_open(&mut self, name: &str, attributes: &str, self_closing: bool) {
        self.tokens.push(Token::TagOpen {
            name: name.to_string(),
            attributes: attributes.to_string(),
            self_closing,
        });
    }

    fn tag_close(&mut self, name: &str) {
        self.tokens.push(Token::TagClose {
            name: name.to_string(),
        });
    }

    fn end(&mut self) {
        self.ended = true;
    }
}
