//! RTSP/1.x request and response variants.
//!
//! RTSP reuses HTTP's message grammar almost entirely (the original
//! `RtspRequestReader`/`RtspResponseReader` don't override `is_chunked` or
//! `is_persistent` at all), but never supports chunked transfer coding and
//! never gates persistence on protocol version the way HTTP/1.0 does.

use crate::headers::HeaderSet;
use crate::http::response_has_body;
use crate::message::{Callbacks, MessageParser};
use crate::parse::{parse_request_line, parse_status_line};
use crate::variant::{connection_has_token, StartLine, Variant};

/// Convenience alias for an RTSP request-side parser.
pub type RtspRequestParser<C> = MessageParser<RtspRequest, C>;
/// Convenience alias for an RTSP response-side parser.
pub type RtspResponseParser<C> = MessageParser<RtspResponse, C>;

/// Strategy marker for RTSP/1.x requests.
pub struct RtspRequest;
/// Strategy marker for RTSP/1.x responses.
pub struct RtspResponse;

fn is_rtsp_version(version: &[u8]) -> bool {
    version.len() == 8
        && version[..5].eq_ignore_ascii_case(b"RTSP/")
        && version[5].is_ascii_digit()
        && version[6] == b'.'
        && version[7].is_ascii_digit()
}

/// RTSP persistence never depends on protocol version, unlike HTTP's
/// HTTP/1.0-vs-1.1 distinction: only the `Connection` header matters.
fn rtsp_is_persistent(_start_line: &StartLine, headers: &HeaderSet) -> bool {
    !connection_has_token(headers, "close")
}

impl Variant for RtspRequest {
    fn parse_start_line(line: &[u8]) -> Option<StartLine> {
        let rl = parse_request_line(line)?;
        if !is_rtsp_version(&rl.version) {
            return None;
        }
        Some(StartLine::Request {
            method: rl.method,
            target: rl.target,
            version: rl.version,
        })
    }

    fn is_chunked(_start_line: &StartLine, _headers: &HeaderSet) -> bool {
        false
    }

    fn missing_content_length() -> Option<u64> {
        Some(0)
    }

    fn is_persistent(start_line: &StartLine, headers: &HeaderSet) -> bool {
        rtsp_is_persistent(start_line, headers)
    }

    fn has_body(_start_line: &StartLine, _pending_request_method: Option<&str>) -> bool {
        true
    }
}

impl Variant for RtspResponse {
    fn parse_start_line(line: &[u8]) -> Option<StartLine> {
        let sl = parse_status_line(line)?;
        if !is_rtsp_version(&sl.version) {
            return None;
        }
        Some(StartLine::Response {
            version: sl.version,
            status: sl.status,
            reason: sl.reason,
        })
    }

    fn is_chunked(_start_line: &StartLine, _headers: &HeaderSet) -> bool {
        false
    }

    fn missing_content_length() -> Option<u64> {
        None
    }

    fn is_persistent(start_line: &StartLine, headers: &HeaderSet) -> bool {
        rtsp_is_persistent(start_line, headers)
    }

    fn has_body(start_line: &StartLine, pending_request_method: Option<&str>) -> bool {
        response_has_body(start_line, pending_request_method)
    }
}

impl<C: Callbacks> MessageParser<RtspResponse, C> {
    /// See [`crate::http::HttpResponseParser::push_request`]; identical
    /// contract for RTSP responses.
    pub fn push_request(&mut self, method: impl Into<String>) {
        self.push_pending_request_method(method.into());
    }
}
