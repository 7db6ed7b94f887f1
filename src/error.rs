//! Structured anomaly vocabulary reported through [`crate::message::Callbacks`].
//!
//! This plays the role the teacher's `HtpLogCode` enum and `htp_warn!`/
//! `htp_error!` macros play in `libhtp-rs`: every wire-grammar or configured
//! bound violation the parser can detect gets one variant with a fixed
//! diagnostic string, rather than strings assembled ad hoc at each call site.

/// Every grammar or bound violation the parser can report via
/// `on_parse_error`. The associated message text is taken verbatim from the
/// original `protocol-parser-lib` Python implementation this crate's
/// behavior is grounded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// The line framer's buffer filled without finding a delimiter.
    LineTooLong,
    /// The start line didn't match the variant's grammar.
    InvalidStartLine,
    /// A line beginning with SP/HTAB arrived before any header was stored.
    ContinuationWithoutHeader,
    /// A header line has no `:` and isn't a continuation.
    MissingColon,
    /// The header count reached `max_headers`.
    TooManyHeaders,
    /// `Content-Length` is present but not a valid decimal integer.
    InvalidContentLength,
    /// A chunk-size line is not valid hexadecimal.
    InvalidChunkSize,
    /// The line following chunk data was not empty.
    NonEmptyChunkTerminator,
}

impl ParseErrorKind {
    /// The fixed diagnostic text delivered to `on_parse_error`.
    pub fn message(self) -> &'static str {
        match self {
            Self::LineTooLong => "line length exceeded",
            Self::InvalidStartLine => "invalid first line",
            Self::ContinuationWithoutHeader => "first header field cannot be a continuation",
            Self::MissingColon => "header field line does not contain \":\"",
            Self::TooManyHeaders => "max header fields exceeded",
            Self::InvalidContentLength => "unable to decode content length",
            Self::InvalidChunkSize => "unable to decode chunk size",
            Self::NonEmptyChunkTerminator => "non-empty line after chunk data",
        }
    }
}

impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}
