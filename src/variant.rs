//! Per-protocol, per-direction behavior as a small strategy object.
//!
//! The teacher dispatches HTTP request/response differences at runtime
//! through its `ConnectionParser`'s `cfg`/hooks. This crate's design notes
//! call for modeling the four wire-message variants as "a base parser
//! parameterized by a small strategy object" instead; since each variant's
//! behavior is knowable at compile time (HTTP request parsing never turns
//! into RTSP response parsing mid-stream), a zero-sized marker type with
//! associated functions gets the same result without a vtable or runtime
//! branch on a protocol tag.

use crate::headers::HeaderSet;

/// A parsed start line, generalized over requests and responses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartLine {
    Request {
        method: Vec<u8>,
        target: Vec<u8>,
        version: Vec<u8>,
    },
    Response {
        version: Vec<u8>,
        status: u16,
        reason: Vec<u8>,
    },
}

impl StartLine {
    pub fn version(&self) -> &[u8] {
        match self {
            StartLine::Request { version, .. } => version,
            StartLine::Response { version, .. } => version,
        }
    }
}

/// Per-protocol, per-direction behavior. Implementors are zero-sized marker
/// types; every method is an associated function taking the data it needs
/// explicitly rather than `&self`.
pub trait Variant {
    /// Parses a start line already delimited by the line framer. Returns
    /// `None` on grammar mismatch, which the caller reports as
    /// `ParseErrorKind::InvalidStartLine`.
    fn parse_start_line(line: &[u8]) -> Option<StartLine>;

    /// Whether this message is chunked. RTSP never is, regardless of
    /// headers; HTTP is chunked iff `version == "1.1"` and
    /// `Transfer-Encoding` is present and not `identity` (spec.md §4.4 —
    /// note this is *any* non-identity encoding, not specifically the
    /// literal token `chunked`).
    fn is_chunked(start_line: &StartLine, headers: &HeaderSet) -> bool;

    /// `Content-Length` to assume when the header is absent. Requests
    /// default to `Some(0)` (no body); responses default to `None` (body
    /// runs until connection close).
    fn missing_content_length() -> Option<u64>;

    /// Whether the connection persists past this message, given the
    /// completed start line and headers.
    fn is_persistent(start_line: &StartLine, headers: &HeaderSet) -> bool;

    /// Whether this message can carry a body at all. Requests always can;
    /// responses suppress it for HEAD requests and certain status codes.
    fn has_body(start_line: &StartLine, pending_request_method: Option<&str>) -> bool;
}

/// Per the original source (`protocol.py:199-208`): a whole-value,
/// case-insensitive comparison against `token`, not a comma-separated token
/// scan. `Connection: close, later-proxy-thing` does NOT match `"close"`
/// under this rule and the connection stays persistent — only a `Connection`
/// header whose entire (trimmed) value is exactly `token` counts.
pub(crate) fn connection_has_token(headers: &HeaderSet, token: &str) -> bool {
    match headers.get("connection") {
        Some(value) => std::str::from_utf8(value)
            .unwrap_or("")
            .trim()
            .eq_ignore_ascii_case(token),
        None => false,
    }
}

/// Per the original source (`HttpMixin.is_chunked`): present and not
/// (case-insensitively) exactly `identity`. Any other value, including an
/// unrecognized one, counts as chunked — this is deliberately not a check
/// for the literal token `chunked`.
pub(crate) fn transfer_encoding_is_chunked(headers: &HeaderSet) -> bool {
    match headers.get("transfer-encoding") {
        Some(value) => !std::str::from_utf8(value)
            .unwrap_or("")
            .trim()
            .eq_ignore_ascii_case("identity"),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn connection_token_is_a_whole_value_match_not_a_token_scan() {
        let mut headers = HeaderSet::new();
        headers.upsert(b"Connection", b"close, later-proxy-thing".to_vec());
        assert!(!connection_has_token(&headers, "close"));

        let mut exact = HeaderSet::new();
        exact.upsert(b"Connection", b"Close".to_vec());
        assert!(connection_has_token(&exact, "close"));
    }
}
