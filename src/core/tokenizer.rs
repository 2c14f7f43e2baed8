//! Incremental XML tokenizer
//!
//! A push-style state machine that consumes decoded text chunks and emits
//! token events in input order:
//! - Text content
//! - CDATA sections
//! - Comments
//! - Processing instructions
//! - Opening tags (with the raw attribute substring)
//! - Closing tags
//!
//! A token whose terminator has not arrived yet is carried across the chunk
//! boundary as pending state and re-recognized when the next chunk lands, so
//! the emitted events are identical no matter how the input is split. The
//! tokenizer keeps only the pending buffer and the open-tag stack: memory is
//! bounded by nesting depth plus the largest single token, not by document
//! size.

use super::scanner::{is_whitespace, Scanner};
use crate::error::Error;

/// Receiver for token events.
///
/// The tokenizer calls these methods as tokens complete, passing payload
/// slices that are only valid for the duration of the call. Implementations
/// copy what they need to keep; see
/// [`TokenCollector`](crate::sax::collector::TokenCollector) for an owned
/// variant.
///
/// All payloads are raw: no entity expansion, no whitespace trimming, no
/// attribute splitting. The pure helpers
/// [`parse_attributes`](crate::parse_attributes) and
/// [`expand_entities`](crate::expand_entities) are the opt-in next steps.
pub trait TokenSink {
    /// Called for text content between tags
    fn text(&mut self, contents: &str);

    /// Called for CDATA sections, with the content between `<![CDATA[` and
    /// `]]>`
    fn cdata(&mut self, contents: &str);

    /// Called for comments, with the content between `<!--` and `-->`
    fn comment(&mut self, contents: &str);

    /// Called for processing instructions, with the content between `<?`
    /// and `?>`
    fn processing_instruction(&mut self, contents: &str);

    /// Called when an opening tag completes
    ///
    /// # Arguments
    /// * `name` - tag name up to the first whitespace inside the tag
    /// * `attributes` - the rest of the tag interior, including the leading
    ///   whitespace; empty when the tag holds nothing but its name
    /// * `self_closing` - true for `<name…/>`; such tags expect no close
    fn tag_open(&mut self, name: &str, attributes: &str, self_closing: bool);

    /// Called when a closing tag matches the innermost open tag
    fn tag_close(&mut self, name: &str);

    /// Called exactly once when the input ends cleanly
    fn end(&mut self);
}

/// Kind of token being carried across a chunk boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PendingKind {
    /// Text with no `<` yet; legal at end-of-input
    Text,
    /// Inside `<![CDATA[` … waiting for `]]>`
    CData,
    /// Inside `<!--` … waiting for `-->`
    Comment,
    /// Inside `<?` … waiting for `?>`
    ProcessingInstruction,
    /// `<!` seen, but not enough characters to tell comment, CDATA, and
    /// garbage apart
    MarkupDeclaration,
    /// `<` (possibly with a partial tag interior) waiting for `>`
    TagLike,
}

/// An unfinished token carried across a chunk boundary.
///
/// The buffer keeps the opening delimiter (`<`, `<!--`, …) so the resumed
/// pass re-recognizes the token through the ordinary grammar.
#[derive(Debug)]
struct Pending {
    kind: PendingKind,
    buffer: String,
}

/// Tokenizer lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    /// Accepting input
    #[default]
    Scanning,
    /// `finish` completed; no further input accepted
    Ended,
    /// A fatal error was reported; the tokenizer is inert
    Errored,
}

/// Incremental XML tokenizer.
///
/// Instances are single-use: create, feed chunks in order, finish once,
/// discard. A structural error is returned exactly once, after which the
/// tokenizer ignores further input.
///
/// ```
/// use saxine::{Token, TokenCollector, Tokenizer};
///
/// let mut tokens = TokenCollector::new();
/// let mut tokenizer = Tokenizer::new();
/// tokenizer.feed("<feed><title>hi", &mut tokens)?;
/// tokenizer.feed("</title></feed>", &mut tokens)?;
/// tokenizer.finish(&mut tokens)?;
///
/// assert_eq!(
///     tokens.take_tokens(),
///     vec![
///         Token::TagOpen { name: "feed".into(), attributes: String::new(), self_closing: false },
///         Token::TagOpen { name: "title".into(), attributes: String::new(), self_closing: false },
///         Token::Text { contents: "hi".into() },
///         Token::TagClose { name: "title".into() },
///         Token::TagClose { name: "feed".into() },
///     ],
/// );
/// # Ok::<(), saxine::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct Tokenizer {
    pending: Option<Pending>,
    open_tags: Vec<String>,
    phase: Phase,
}

impl Tokenizer {
    /// Create a tokenizer with empty state
    pub fn new() -> Self {
        Tokenizer {
            pending: None,
            open_tags: Vec::new(),
            phase: Phase::Scanning,
        }
    }

    /// Feed one chunk of decoded text.
    ///
    /// Emits every token that completes within `chunk` (prefixed by any
    /// pending fragment from earlier chunks), in input order. Returns a
    /// structural error at most once; afterwards, and after [`finish`],
    /// chunks are ignored.
    ///
    /// [`finish`]: Tokenizer::finish
    pub fn feed<S: TokenSink>(&mut self, chunk: &str, sink: &mut S) -> Result<(), Error> {
        if self.phase != Phase::Scanning {
            return Ok(());
        }
        match self.pending.take() {
            Some(mut pending) => {
                // Resume: the carried fragment plus the new chunk form one
                // logical input, scanned from the top.
                pending.buffer.push_str(chunk);
                let buffer = pending.buffer;
                self.scan(&buffer, sink)
            }
            None => self.scan(chunk, sink),
        }
    }

    /// Signal end-of-input.
    ///
    /// Emits a pending text fragment if one exists, then reports unclosed
    /// constructs or delivers the terminal [`TokenSink::end`] call.
    pub fn finish<S: TokenSink>(&mut self, sink: &mut S) -> Result<(), Error> {
        if self.phase != Phase::Scanning {
            return Ok(());
        }

        if let Some(pending) = self.pending.take() {
            match pending.kind {
                PendingKind::Text => sink.text(&pending.buffer),
                PendingKind::CData => return Err(self.fail(Error::UnclosedCdata)),
                PendingKind::Comment => return Err(self.fail(Error::UnclosedComment)),
                PendingKind::ProcessingInstruction => {
                    return Err(self.fail(Error::UnclosedProcessingInstruction))
                }
                PendingKind::MarkupDeclaration | PendingKind::TagLike => {
                    return Err(self.fail(Error::UnclosedTag))
                }
            }
        }

        if !self.open_tags.is_empty() {
            let names = self.open_tags.join(",");
            self.open_tags.clear();
            return Err(self.fail(Error::UnclosedTags(names)));
        }

        self.phase = Phase::Ended;
        sink.end();
        Ok(())
    }

    /// Tokenize a complete document: feed it as one chunk, then finish
    pub fn parse<S: TokenSink>(input: &str, sink: &mut S) -> Result<(), Error> {
        let mut tokenizer = Tokenizer::new();
        tokenizer.feed(input, sink)?;
        tokenizer.finish(sink)
    }

    /// Check if a token is being carried across a chunk boundary
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of currently open tags
    pub fn depth(&self) -> usize {
        self.open_tags.len()
    }

    /// Check if the tokenizer reached a clean end
    pub fn is_ended(&self) -> bool {
        self.phase == Phase::Ended
    }

    /// Scan one logical input from the top, emitting completed tokens and
    /// capturing at most one trailing stall.
    fn scan<S: TokenSink>(&mut self, input: &str, sink: &mut S) -> Result<(), Error> {
        let mut scanner = Scanner::new(input);

        while !scanner.is_eof() {
            if scanner.peek() == Some(b'<') {
                if !self.scan_markup(&mut scanner, sink)? {
                    return Ok(()); // stalled at the chunk boundary
                }
            } else {
                match scanner.find_byte(b'<') {
                    Some(lt) => {
                        sink.text(scanner.slice(scanner.position(), lt));
                        scanner.set_position(lt);
                    }
                    None => {
                        // Text may legally extend into the next chunk or to
                        // end-of-input.
                        self.stall(PendingKind::Text, scanner.rest());
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    /// Dispatch on the character after `<`.
    ///
    /// Returns Ok(true) when the token completed and the scanner advanced
    /// past it, Ok(false) when the token stalled at the end of the input.
    fn scan_markup<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner<'_>,
        sink: &mut S,
    ) -> Result<bool, Error> {
        let start = scanner.position();
        match scanner.peek_at(1) {
            None => {
                self.stall(PendingKind::TagLike, scanner.rest());
                Ok(false)
            }
            Some(b'!') => self.scan_declaration(scanner, start, sink),
            Some(b'?') => self.scan_pi(scanner, start, sink),
            Some(b'/') => self.scan_close_tag(scanner, start, sink),
            Some(_) => self.scan_open_tag(scanner, start, sink),
        }
    }

    /// Distinguish `<!--`, `<![CDATA[`, and unsupported `<!…` markup
    fn scan_declaration<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner<'_>,
        start: usize,
        sink: &mut S,
    ) -> Result<bool, Error> {
        scanner.set_position(start + 2);

        if scanner.starts_with("--") {
            return self.scan_comment(scanner, start, sink);
        }
        if scanner.starts_with("[CDATA[") {
            return self.scan_cdata(scanner, start, sink);
        }

        // An incomplete prefix of either opener cannot be classified until
        // more input arrives.
        let rest = scanner.rest();
        if "--".as_bytes().starts_with(rest.as_bytes())
            || "[CDATA[".as_bytes().starts_with(rest.as_bytes())
        {
            scanner.set_position(start);
            self.stall(PendingKind::MarkupDeclaration, scanner.rest());
            return Ok(false);
        }

        match scanner.peek_char() {
            Some(ch) => Err(self.fail(Error::UnrecognizedSequence(ch))),
            // Unreachable: an empty rest is a prefix of "--"
            None => {
                scanner.set_position(start);
                self.stall(PendingKind::MarkupDeclaration, scanner.rest());
                Ok(false)
            }
        }
    }

    /// Scan a comment; `start` points at `<!--`
    fn scan_comment<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner<'_>,
        start: usize,
        sink: &mut S,
    ) -> Result<bool, Error> {
        let content_start = start + 4;
        scanner.set_position(content_start);

        // The first `--` decides: `-->` closes the comment, anything else
        // is fatal.
        loop {
            match scanner.find_byte(b'-') {
                None => break,
                Some(dash) => {
                    scanner.set_position(dash);
                    match (scanner.peek_at(1), scanner.peek_at(2)) {
                        // A trailing `-` or `--` may still complete next chunk
                        (None, _) | (Some(b'-'), None) => break,
                        (Some(b'-'), Some(b'>')) => {
                            sink.comment(scanner.slice(content_start, dash));
                            scanner.set_position(dash + 3);
                            return Ok(true);
                        }
                        (Some(b'-'), Some(_)) => {
                            return Err(self.fail(Error::CommentDoubleDash));
                        }
                        (Some(_), _) => scanner.advance(1),
                    }
                }
            }
        }

        scanner.set_position(start);
        self.stall(PendingKind::Comment, scanner.rest());
        Ok(false)
    }

    /// Scan a CDATA section; `start` points at `<![CDATA[`
    fn scan_cdata<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner<'_>,
        start: usize,
        sink: &mut S,
    ) -> Result<bool, Error> {
        let content_start = start + 9;
        scanner.set_position(content_start);

        loop {
            match scanner.find_byte(b']') {
                None => break,
                Some(bracket) => {
                    scanner.set_position(bracket);
                    match (scanner.peek_at(1), scanner.peek_at(2)) {
                        // `]` or `]]` at the end may complete next chunk
                        (None, _) | (Some(b']'), None) => break,
                        (Some(b']'), Some(b'>')) => {
                            sink.cdata(scanner.slice(content_start, bracket));
                            scanner.set_position(bracket + 3);
                            return Ok(true);
                        }
                        _ => scanner.advance(1),
                    }
                }
            }
        }

        scanner.set_position(start);
        self.stall(PendingKind::CData, scanner.rest());
        Ok(false)
    }

    /// Scan a processing instruction; `start` points at `<?`
    fn scan_pi<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner<'_>,
        start: usize,
        sink: &mut S,
    ) -> Result<bool, Error> {
        let content_start = start + 2;
        scanner.set_position(content_start);

        loop {
            match scanner.find_byte(b'?') {
                None => break,
                Some(mark) => {
                    scanner.set_position(mark);
                    match scanner.peek_at(1) {
                        None => break,
                        Some(b'>') => {
                            sink.processing_instruction(scanner.slice(content_start, mark));
                            scanner.set_position(mark + 2);
                            return Ok(true);
                        }
                        Some(_) => scanner.advance(1),
                    }
                }
            }
        }

        scanner.set_position(start);
        self.stall(PendingKind::ProcessingInstruction, scanner.rest());
        Ok(false)
    }

    /// Scan a closing tag; `start` points at `</`
    fn scan_close_tag<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner<'_>,
        start: usize,
        sink: &mut S,
    ) -> Result<bool, Error> {
        scanner.set_position(start + 2);

        match scanner.find_byte(b'>') {
            None => {
                scanner.set_position(start);
                self.stall(PendingKind::TagLike, scanner.rest());
                Ok(false)
            }
            Some(gt) => {
                // The interior is the name, verbatim
                let name = scanner.slice(start + 2, gt);
                let popped = self.open_tags.pop();
                if popped.as_deref() == Some(name) {
                    sink.tag_close(name);
                    scanner.set_position(gt + 1);
                    Ok(true)
                } else {
                    self.open_tags.clear();
                    Err(self.fail(Error::MismatchedTag(popped.unwrap_or_default())))
                }
            }
        }
    }

    /// Scan an opening tag; `start` points at `<`
    fn scan_open_tag<S: TokenSink>(
        &mut self,
        scanner: &mut Scanner<'_>,
        start: usize,
        sink: &mut S,
    ) -> Result<bool, Error> {
        scanner.set_position(start + 1);

        match scanner.find_byte(b'>') {
            None => {
                scanner.set_position(start);
                self.stall(PendingKind::TagLike, scanner.rest());
                Ok(false)
            }
            Some(gt) => {
                let mut interior = scanner.slice(start + 1, gt);

                let self_closing = interior.ends_with('/');
                if self_closing {
                    interior = &interior[..interior.len() - 1];
                }

                if interior.bytes().next().is_some_and(is_whitespace) {
                    return Err(self.fail(Error::LeadingTagWhitespace));
                }

                // Name runs to the first whitespace; the rest, leading
                // whitespace included, is the raw attribute substring.
                let split = interior
                    .bytes()
                    .position(is_whitespace)
                    .unwrap_or(interior.len());
                let (name, attributes) = interior.split_at(split);

                sink.tag_open(name, attributes, self_closing);
                if !self_closing {
                    self.open_tags.push(name.to_string());
                }
                scanner.set_position(gt + 1);
                Ok(true)
            }
        }
    }

    /// Capture an unfinished token, opening delimiter included
    fn stall(&mut self, kind: PendingKind, fragment: &str) {
        self.pending = Some(Pending {
            kind,
            buffer: fragment.to_string(),
        });
    }

    /// Record a fatal error and hand it back for returning
    fn fail(&mut self, error: Error) -> Error {
        self.phase = Phase::Errored;
        error
    }
}
