//! Byte-stream-to-line framer with a bounded buffer and a TEXT/RAW mode
//! switch.
//!
//! `LineFramer` knows nothing about HTTP or RTSP; it only knows how to turn
//! an unframed byte stream into delimited lines (TEXT mode) or hand raw byte
//! chunks straight to the consumer (RAW mode), and how to do both across an
//! arbitrary fragmentation of the input into `feed()` calls. [`crate::message::MessageParser`]
//! is built on top of it and drives the mode switch; this module is
//! reusable for any CRLF-framed (or otherwise delimited) line protocol.

/// Framer output discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Deliver delimited lines via [`FramerSink::on_line`].
    Text,
    /// Deliver raw byte chunks via [`FramerSink::on_raw`].
    Raw,
}

/// Callbacks driven by [`LineFramer::feed`].
///
/// Implementors receive a `&mut LineFramer` alongside each callback so they
/// can switch modes mid-callback — this is the handle back to the framer
/// instance currently driving the feed loop, not a fresh one.
pub trait FramerSink {
    /// A complete line (delimiter stripped) arrived in TEXT mode. May be
    /// empty.
    fn on_line(&mut self, framer: &mut LineFramer, line: &[u8]);

    /// One to N bytes arrived in RAW mode. Returns how many bytes were
    /// consumed; any remainder is handed back to the framer's feed loop
    /// (potentially under a different mode, if this call switched it).
    fn on_raw(&mut self, framer: &mut LineFramer, data: &[u8]) -> usize;

    /// The internal buffer filled without finding a delimiter.
    fn on_line_too_long(&mut self, framer: &mut LineFramer);
}

/// Turns a byte stream into delimited lines, bounded by `buffer_limit`.
pub struct LineFramer {
    delimiter: Vec<u8>,
    buffer: Vec<u8>,
    buffer_limit: usize,
    mode: Mode,
    /// Set for the duration of a `feed()` call (including nested calls made
    /// by `set_mode`'s own replay), so `set_mode` knows whether it's safe to
    /// replay buffered bytes immediately or must defer to the outer loop.
    processing: bool,
}

impl LineFramer {
    /// Creates a new framer. `delimiter` must be non-empty.
    pub fn new(delimiter: impl Into<Vec<u8>>, buffer_limit: usize) -> Self {
        let delimiter = delimiter.into();
        assert!(!delimiter.is_empty(), "delimiter must not be empty");
        Self {
            delimiter,
            buffer: Vec::new(),
            buffer_limit,
            mode: Mode::Text,
            processing: false,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Number of bytes currently buffered in TEXT mode (always `<= buffer_limit`).
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Switches mode. Switching to RAW while bytes are already buffered (the
    /// header block and body arrived in the same segment) re-feeds those
    /// buffered bytes immediately, unless called from within an active
    /// `feed()`, in which case the outer feed loop handles the replay once
    /// this call returns.
    pub fn set_mode(&mut self, sink: &mut dyn FramerSink, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        if mode == Mode::Raw && !self.processing && !self.buffer.is_empty() {
            let buffered = std::mem::take(&mut self.buffer);
            self.feed(sink, &buffered);
        }
    }

    /// The only byte entry point. Safe to call with empty `data`.
    pub fn feed(&mut self, sink: &mut dyn FramerSink, data: &[u8]) {
        self.processing = true;
        let mut pending = data.to_vec();
        let mut offset = 0usize;
        while offset < pending.len() {
            offset += self.process_step(sink, &pending[offset..]);
            if self.mode == Mode::Raw && !self.buffer.is_empty() {
                let mut rest = std::mem::take(&mut self.buffer);
                rest.extend_from_slice(&pending[offset..]);
                pending = rest;
                offset = 0;
            }
        }
        self.processing = false;
    }

    /// Single data-processing step: consumes a prefix of `data` and returns
    /// how many bytes were taken. Called repeatedly by `feed` until the
    /// whole input is processed.
    fn process_step(&mut self, sink: &mut dyn FramerSink, data: &[u8]) -> usize {
        if self.mode == Mode::Raw {
            return sink.on_raw(self, data);
        }

        if self.buffer.len() >= self.buffer_limit {
            sink.on_line_too_long(self);
            self.buffer.clear();
            return data.len();
        }
        let room = self.buffer_limit - self.buffer.len();
        let consumed = room.min(data.len());

        let dlen = self.delimiter.len();
        let start = self.buffer.len().saturating_sub(dlen - 1);
        self.buffer.extend_from_slice(&data[..consumed]);

        let mut pos = find_subslice(&self.buffer[start..], &self.delimiter).map(|p| p + start);
        while self.mode == Mode::Text {
            let Some(p) = pos else { break };
            let line = self.buffer[..p].to_vec();
            self.buffer.drain(..p + dlen);
            sink.on_line(self, &line);
            pos = find_subslice(&self.buffer, &self.delimiter);
        }

        consumed
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
