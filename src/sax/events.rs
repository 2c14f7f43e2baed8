//! Owned token events
//!
//! The owned counterpart of the [`TokenSink`](crate::TokenSink) callbacks,
//! for consumers that want to store tokens past the `feed` call.

/// One token event, with owned payloads.
///
/// Payloads are the raw characters between delimiters: no entity expansion,
/// no whitespace trimming, no attribute splitting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text content between tags
    Text {
        /// Raw text
        contents: String,
    },
    /// CDATA section content (between `<![CDATA[` and `]]>`)
    CData {
        /// Raw section content
        contents: String,
    },
    /// Comment content (between `<!--` and `-->`)
    Comment {
        /// Raw comment content
        contents: String,
    },
    /// Processing instruction content (between `<?` and `?>`)
    ProcessingInstruction {
        /// Raw instruction content, target included
        contents: String,
    },
    /// Opening tag
    TagOpen {
        /// Tag name
        name: String,
        /// Raw attribute substring, leading whitespace included; parse with
        /// [`parse_attributes`](crate::parse_attributes) when needed
        attributes: String,
        /// True for `<name…/>`
        self_closing: bool,
    },
    /// Closing tag
    TagClose {
        /// Tag name
        name: String,
    },
}

impl Token {
    /// Check if this is a text event
    #[inline]
    pub fn is_text(&self) -> bool {
        matches!(self, Token::Text { .. })
    }

    /// Get the tag name if this is an opening or closing tag
    pub fn tag_name(&self) -> Option<&str> {
        match self {
            Token::TagOpen { name, .. } | Token::TagClose { name } => Some(name),
            _ => None,
        }
    }

    /// Get the raw contents if this is a content-carrying token
    pub fn contents(&self) -> Option<&str> {
        match self {
            Token::Text { contents }
            | Token::CData { contents }
            | Token::Comment { contents }
            | Token::ProcessingInstruction { contents } => Some(contents),
            _ => None,
        }
    }
}
