//! The message state machine: headers, body framing, and the callback
//! surface consumers implement.
//!
//! `MessageParser<V, C>` plays the role the teacher's `ConnectionParser`
//! plays for `libhtp-rs` (`request.rs`'s `req_headers`/`req_body_determine`/
//! `req_body_chunked_data` family), generalized over the `Variant` strategy
//! type instead of branching on a runtime protocol tag, and reporting
//! anomalies through `Callbacks` instead of the teacher's `htp_warn!`/
//! `htp_error!` hook macros.

use std::collections::VecDeque;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use crate::config::ParserConfig;
use crate::error::ParseErrorKind;
use crate::framer::{FramerSink, LineFramer, Mode};
use crate::headers::HeaderSet;
use crate::parse::{parse_chunk_size, parse_content_length};
use crate::variant::{StartLine, Variant};

/// Where the state machine currently is within a single message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParserState {
    StartLine,
    Headers,
    BodyIdentity { remaining: u64 },
    BodyUntilClose,
    ChunkSize,
    ChunkData { remaining: usize },
    ChunkDataEnd,
    Trailers,
}

/// Consumer-implemented callback surface. All methods default to doing
/// nothing, so a consumer only overrides what it needs — the same shape as
/// the teacher's hook traits, minus the C ABI.
#[allow(unused_variables)]
pub trait Callbacks {
    /// A start line was parsed.
    fn on_start_line(&mut self, start_line: &StartLine) {}
    /// A single header field was parsed, before being folded into the
    /// accumulated header set.
    fn on_header(&mut self, name: &[u8], value: &[u8]) {}
    /// The header block ended (the blank line after the last header).
    fn on_headers_complete(&mut self, headers: &HeaderSet) {}
    /// A fragment of the message body arrived. Called once per framer
    /// delivery, not once per logical body — large bodies arrive over
    /// several calls.
    fn on_body(&mut self, data: &[u8]) {}
    /// The message (start line, headers, and body) is fully parsed.
    fn on_message_complete(&mut self) {}
    /// A wire-grammar or configured-bound violation was detected. No
    /// further callbacks fire for this message until `reset()` is called.
    fn on_parse_error(&mut self, kind: ParseErrorKind) {}
    /// One of the callbacks above panicked; the panic was caught and the
    /// parser's buffered state was discarded so it remains usable.
    fn on_internal_error(&mut self, message: &str) {}
    /// The message just completed was the last one on this connection
    /// (`Connection: close`, HTTP/1.0 without keep-alive, and so on).
    fn on_close_connection(&mut self) {}
}

/// The generic message parser, specialized per wire-message kind by `V`.
pub struct MessageParser<V: Variant, C: Callbacks> {
    framer: LineFramer,
    config: ParserConfig,
    callbacks: C,
    headers: HeaderSet,
    start_line: Option<StartLine>,
    state: ParserState,
    /// Request methods pushed by a response-side consumer so that
    /// `Variant::has_body` can apply the HEAD/1xx/204/304 suppression
    /// rules. Always present, always empty for request-side parsers.
    pending_requests: VecDeque<String>,
    errored: bool,
    _variant: PhantomData<V>,
}

impl<V: Variant, C: Callbacks> MessageParser<V, C> {
    /// Builds a parser with default limits.
    pub fn new(callbacks: C) -> Self {
        Self::with_config(callbacks, ParserConfig::default())
    }

    /// Builds a parser with explicit limits.
    pub fn with_config(callbacks: C, config: ParserConfig) -> Self {
        let framer = LineFramer::new(config.delimiter.clone(), config.max_line_length);
        Self {
            framer,
            config,
            callbacks,
            headers: HeaderSet::new(),
            start_line: None,
            state: ParserState::StartLine,
            pending_requests: VecDeque::new(),
            errored: false,
            _variant: PhantomData,
        }
    }

    /// Feeds a chunk of wire bytes. Safe to call with any fragmentation of
    /// the underlying stream, including a single byte at a time.
    ///
    /// Wrapped in `catch_unwind`: a panicking callback is reported via
    /// `on_internal_error` rather than unwinding out of the parser, and the
    /// framer's buffered bytes are discarded so the instance stays usable
    /// (the in-flight message is lost, but the parser itself is not).
    pub fn feed(&mut self, data: &[u8]) {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            let mut framer = std::mem::replace(&mut self.framer, self.fresh_framer());
            framer.feed(self, data);
            self.framer = framer;
        }));
        if outcome.is_err() {
            self.callbacks.on_internal_error("consumer callback panicked");
        }
    }

    /// Signals that the transport closed. Only meaningful while reading a
    /// read-until-close body; otherwise a no-op.
    pub fn close(&mut self) {
        if matches!(self.state, ParserState::BodyUntilClose) {
            let mut framer = std::mem::replace(&mut self.framer, self.fresh_framer());
            self.finish_message(&mut framer);
            self.framer = framer;
        }
    }

    /// Abandons the in-progress message and returns to the start-line
    /// state. Required after a parse error (the error latch otherwise
    /// suppresses all further callbacks) and harmless to call at any other
    /// time.
    pub fn reset(&mut self) {
        self.start_line = None;
        self.headers.clear();
        self.state = ParserState::StartLine;
        self.errored = false;
        let mut framer = std::mem::replace(&mut self.framer, self.fresh_framer());
        framer.set_mode(self, Mode::Text);
        self.framer = framer;
    }

    /// Headers accumulated for the message currently being parsed (or just
    /// completed, until the next start line begins overwriting them).
    pub fn headers(&self) -> &HeaderSet {
        &self.headers
    }

    pub fn get_header(&self, name: &str) -> Option<&[u8]> {
        self.headers.get(name)
    }

    /// The consumer-supplied callback implementor, for inspection (tests
    /// commonly implement `Callbacks` on a recorder and read it back here).
    pub fn callbacks(&self) -> &C {
        &self.callbacks
    }

    fn fresh_framer(&self) -> LineFramer {
        LineFramer::new(self.config.delimiter.clone(), self.config.max_line_length)
    }

    fn report_parse_error(&mut self, kind: ParseErrorKind) {
        if self.errored {
            return;
        }
        self.errored = true;
        self.callbacks.on_parse_error(kind);
    }

    fn handle_start_line(&mut self, line: &[u8]) {
        match V::parse_start_line(line) {
            Some(start_line) => {
                self.callbacks.on_start_line(&start_line);
                self.start_line = Some(start_line);
                self.state = ParserState::Headers;
            }
            None => self.report_parse_error(ParseErrorKind::InvalidStartLine),
        }
    }

    fn handle_header_line(&mut self, framer: &mut LineFramer, line: &[u8]) {
        if line.is_empty() {
            self.dispatch_body(framer);
            return;
        }
        if line[0] == b' ' || line[0] == b'\t' {
            if self.headers.is_empty() {
                self.report_parse_error(ParseErrorKind::ContinuationWithoutHeader);
                return;
            }
            self.headers.append_to_last(trim_ascii(line));
            return;
        }
        let colon = match line.iter().position(|&b| b == b':') {
            Some(p) => p,
            None => {
                self.report_parse_error(ParseErrorKind::MissingColon);
                return;
            }
        };
        if self.headers.len() >= self.config.max_headers {
            self.report_parse_error(ParseErrorKind::TooManyHeaders);
            return;
        }
        let name = &line[..colon];
        let value = trim_ascii(&line[colon + 1..]);
        self.callbacks.on_header(name, value);
        self.headers.upsert(name, value.to_vec());
    }

    fn dispatch_body(&mut self, framer: &mut LineFramer) {
        self.callbacks.on_headers_complete(&self.headers);
        let start_line = self
            .start_line
            .clone()
            .expect("headers dispatched without a start line");
        let pending_method = self.pending_requests.front().map(|s| s.as_str());
        let has_body = V::has_body(&start_line, pending_method);

        if !has_body {
            self.finish_message(framer);
            return;
        }

        if V::is_chunked(&start_line, &self.headers) {
            self.state = ParserState::ChunkSize;
            return;
        }

        let content_length = match self.headers.get("content-length") {
            Some(raw) => match parse_content_length(raw) {
                Some(n) => Some(n),
                None => {
                    self.report_parse_error(ParseErrorKind::InvalidContentLength);
                    return;
                }
            },
            None => V::missing_content_length(),
        };

        match content_length {
            Some(0) => self.finish_message(framer),
            Some(n) => {
                self.state = ParserState::BodyIdentity { remaining: n };
                framer.set_mode(self, Mode::Raw);
            }
            None => {
                self.state = ParserState::BodyUntilClose;
                framer.set_mode(self, Mode::Raw);
            }
        }
    }

    fn handle_body_identity(&mut self, framer: &mut LineFramer, data: &[u8]) -> usize {
        let remaining = match self.state {
            ParserState::BodyIdentity { remaining } => remaining,
            _ => return 0,
        };
        let take = remaining.min(data.len() as u64) as usize;
        if take > 0 {
            self.callbacks.on_body(&data[..take]);
        }
        let left = remaining - take as u64;
        if left == 0 {
            self.finish_message(framer);
        } else {
            self.state = ParserState::BodyIdentity { remaining: left };
        }
        take
    }

    fn handle_body_until_close(&mut self, data: &[u8]) -> usize {
        if !data.is_empty() {
            self.callbacks.on_body(data);
        }
        data.len()
    }

    fn handle_chunk_size_line(&mut self, framer: &mut LineFramer, line: &[u8]) {
        match parse_chunk_size(line) {
            Some(0) => self.state = ParserState::Trailers,
            Some(n) => {
                self.state = ParserState::ChunkData { remaining: n };
                framer.set_mode(self, Mode::Raw);
            }
            None => self.report_parse_error(ParseErrorKind::InvalidChunkSize),
        }
    }

    fn handle_chunk_data(&mut self, framer: &mut LineFramer, data: &[u8]) -> usize {
        let remaining = match self.state {
            ParserState::ChunkData { remaining } => remaining,
            _ => return 0,
        };
        let take = remaining.min(data.len());
        if take > 0 {
            self.callbacks.on_body(&data[..take]);
        }
        let left = remaining - take;
        if left == 0 {
            self.state = ParserState::ChunkDataEnd;
            framer.set_mode(self, Mode::Text);
        } else {
            self.state = ParserState::ChunkData { remaining: left };
        }
        take
    }

    fn handle_chunk_terminator_line(&mut self, line: &[u8]) {
        if line.is_empty() {
            self.state = ParserState::ChunkSize;
        } else {
            self.report_parse_error(ParseErrorKind::NonEmptyChunkTerminator);
        }
    }

    fn handle_trailer_line(&mut self, framer: &mut LineFramer, line: &[u8]) {
        if line.is_empty() {
            self.finish_message(framer);
        }
    }

    fn finish_message(&mut self, framer: &mut LineFramer) {
        self.callbacks.on_message_complete();
        self.pending_requests.pop_front();
        let persistent = match &self.start_line {
            Some(start_line) => V::is_persistent(start_line, &self.headers),
            None => true,
        };
        self.start_line = None;
        self.headers.clear();
        self.state = ParserState::StartLine;
        self.errored = false;
        framer.set_mode(self, Mode::Text);
        if !persistent {
            self.callbacks.on_close_connection();
        }
    }

    /// Used by response-side parsers to record the method of the request a
    /// forthcoming response answers, so `Variant::has_body` can apply the
    /// HEAD/1xx/204/304 suppression rules.
    pub(crate) fn push_pending_request_method(&mut self, method: String) {
        self.pending_requests.push_back(method);
    }
}

impl<V: Variant, C: Callbacks> FramerSink for MessageParser<V, C> {
    fn on_line(&mut self, framer: &mut LineFramer, line: &[u8]) {
        if self.errored {
            return;
        }
        match self.state {
            ParserState::StartLine => self.handle_start_line(line),
            ParserState::Headers => self.handle_header_line(framer, line),
            ParserState::ChunkSize => self.handle_chunk_size_line(framer, line),
            ParserState::ChunkDataEnd => self.handle_chunk_terminator_line(line),
            ParserState::Trailers => self.handle_trailer_line(framer, line),
            ParserState::BodyIdentity { .. }
            | ParserState::BodyUntilClose
            | ParserState::ChunkData { .. } => {}
        }
    }

    fn on_raw(&mut self, framer: &mut LineFramer, data: &[u8]) -> usize {
        if self.errored {
            return data.len();
        }
        match self.state {
            ParserState::BodyIdentity { .. } => self.handle_body_identity(framer, data),
            ParserState::BodyUntilClose => self.handle_body_until_close(data),
            ParserState::ChunkData { .. } => self.handle_chunk_data(framer, data),
            _ => data.len(),
        }
    }

    fn on_line_too_long(&mut self, _framer: &mut LineFramer) {
        self.report_parse_error(ParseErrorKind::LineTooLong);
    }
}


fn trim_ascii(value: &[u8]) -> &[u8] {
    let mut start = 0;
    let mut end = value.len();
    while start < end && value[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && value[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    &value[start..end]
}
