//! Error types for tokenization and streaming input.

use std::io;

/// Errors produced by the tokenizer and the attribute parser.
///
/// The `Display` strings are part of the public contract: consumers match on
/// them across language bindings, so they must not be reworded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A CDATA section was still open when the input ended.
    #[error("Unclosed CDATA section")]
    UnclosedCdata,

    /// A comment was still open when the input ended.
    #[error("Unclosed comment")]
    UnclosedComment,

    /// `--` appeared inside a comment without closing it.
    #[error("Unexpected -- inside comment")]
    CommentDoubleDash,

    /// A processing instruction was still open when the input ended.
    #[error("Unclosed processing instruction")]
    UnclosedProcessingInstruction,

    /// A tag-like token (`<…` without its `>`) was still open when the
    /// input ended.
    #[error("Unclosed tag")]
    UnclosedTag,

    /// A closing tag did not match the innermost open tag. Carries the name
    /// popped from the stack (empty when the stack was already empty).
    #[error("Unclosed tag: {0}")]
    MismatchedTag(String),

    /// Open tags remained when the input ended. Carries the names joined
    /// with `,` in bottom-to-top stack order.
    #[error("Unclosed tags: {0}")]
    UnclosedTags(String),

    /// The first character after `<` was whitespace.
    #[error("Tag names may not start with whitespace")]
    LeadingTagWhitespace,

    /// `<!` was followed by something other than `--` or `[CDATA[`. Carries
    /// the offending character.
    #[error("Unrecognized sequence: <!{0}")]
    UnrecognizedSequence(char),

    /// An attribute name ran into whitespace before its `=`.
    #[error("Attribute names may not contain whitespace")]
    AttributeNameWhitespace,

    /// The attribute list ended while a name was still waiting for `=` or
    /// a value.
    #[error("Expected a value for the attribute")]
    MissingAttributeValue,

    /// An attribute value did not start with `"` or `'`.
    #[error("Attribute values should be quoted")]
    UnquotedAttributeValue,

    /// An attribute value was missing its closing quote.
    #[error("Unclosed attribute value")]
    UnclosedAttributeValue,
}

/// Errors produced by the buffered streaming reader.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// The tokenizer rejected the document.
    #[error(transparent)]
    Parse(#[from] Error),

    /// The byte stream was not valid UTF-8.
    #[error("invalid UTF-8 in input stream")]
    InvalidUtf8,

    /// The underlying reader failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
