//! Parser configuration.
//!
//! Mirrors the way the teacher centralizes tunable limits in a single
//! `Config` struct rather than scattering constructor arguments, scoped down
//! to the limits this crate's grammar actually uses.

/// Tunable limits for a [`crate::message::MessageParser`].
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Line delimiter the internal [`crate::framer::LineFramer`] splits on.
    pub delimiter: Vec<u8>,
    /// Maximum number of header fields accepted per message.
    pub max_headers: usize,
    /// Maximum number of buffered bytes before a line is reported as too
    /// long via `on_parse_error(ParseErrorKind::LineTooLong, ..)`. Passed
    /// straight through as [`crate::framer::LineFramer`]'s `buffer_limit`
    /// (spec.md §4.1's single bound on the framer's internal buffer).
    pub max_line_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: b"\r\n".to_vec(),
            max_headers: 512,
            max_line_length: 8192,
        }
    }
}

impl ParserConfig {
    /// Builds a config with the default delimiter and header cap but a
    /// custom line-length bound.
    pub fn with_max_line_length(max_line_length: usize) -> Self {
        Self {
            max_line_length,
            ..Self::default()
        }
    }
}
