//! HTTP/1.x request and response variants.

use crate::headers::HeaderSet;
use crate::message::{Callbacks, MessageParser};
use crate::parse::{parse_request_line, parse_status_line};
use crate::variant::{connection_has_token, transfer_encoding_is_chunked, StartLine, Variant};

/// Convenience alias for an HTTP request-side parser.
pub type HttpRequestParser<C> = MessageParser<HttpRequest, C>;
/// Convenience alias for an HTTP response-side parser.
pub type HttpResponseParser<C> = MessageParser<HttpResponse, C>;

/// Strategy marker for HTTP/1.x requests.
pub struct HttpRequest;
/// Strategy marker for HTTP/1.x responses.
pub struct HttpResponse;

fn is_http_version(version: &[u8]) -> bool {
    version.len() == 8
        && version[..5].eq_ignore_ascii_case(b"HTTP/")
        && version[5].is_ascii_digit()
        && version[6] == b'.'
        && version[7].is_ascii_digit()
}

fn is_http_1_1(start_line: &StartLine) -> bool {
    start_line.version().eq_ignore_ascii_case(b"HTTP/1.1")
}

fn http_is_persistent(start_line: &StartLine, headers: &HeaderSet) -> bool {
    if is_http_1_1(start_line) {
        !connection_has_token(headers, "close")
    } else {
        false
    }
}

/// Chunked transfer coding is an HTTP/1.1-only concept (spec.md §4.4):
/// HTTP/1.0 never applies it even if a client sends the header.
fn http_is_chunked(start_line: &StartLine, headers: &HeaderSet) -> bool {
    is_http_1_1(start_line) && transfer_encoding_is_chunked(headers)
}

/// Shared by `HttpResponse` and RTSP's response variant: HEAD requests and
/// 1xx/204/304 status codes never carry a body, regardless of
/// `Content-Length`/`Transfer-Encoding`.
pub(crate) fn response_has_body(start_line: &StartLine, pending_request_method: Option<&str>) -> bool {
    let status = match start_line {
        StartLine::Response { status, .. } => *status,
        StartLine::Request { .. } => return true,
    };
    if matches!(pending_request_method, Some(m) if m.eq_ignore_ascii_case("HEAD")) {
        return false;
    }
    !(100..200).contains(&status) && status != 204 && status != 304
}

impl Variant for HttpRequest {
    fn parse_start_line(line: &[u8]) -> Option<StartLine> {
        let rl = parse_request_line(line)?;
        if !is_http_version(&rl.version) {
            return None;
        }
        Some(StartLine::Request {
            method: rl.method,
            target: rl.target,
            version: rl.version,
        })
    }

    fn is_chunked(start_line: &StartLine, headers: &HeaderSet) -> bool {
        http_is_chunked(start_line, headers)
    }

    fn missing_content_length() -> Option<u64> {
        Some(0)
    }

    fn is_persistent(start_line: &StartLine, headers: &HeaderSet) -> bool {
        http_is_persistent(start_line, headers)
    }

    fn has_body(_start_line: &StartLine, _pending_request_method: Option<&str>) -> bool {
        true
    }
}

impl Variant for HttpResponse {
    fn parse_start_line(line: &[u8]) -> Option<StartLine> {
        let sl = parse_status_line(line)?;
        if !is_http_version(&sl.version) {
            return None;
        }
        Some(StartLine::Response {
            version: sl.version,
            status: sl.status,
            reason: sl.reason,
        })
    }

    fn is_chunked(start_line: &StartLine, headers: &HeaderSet) -> bool {
        http_is_chunked(start_line, headers)
    }

    fn missing_content_length() -> Option<u64> {
        None
    }

    fn is_persistent(start_line: &StartLine, headers: &HeaderSet) -> bool {
        http_is_persistent(start_line, headers)
    }

    fn has_body(start_line: &StartLine, pending_request_method: Option<&str>) -> bool {
        response_has_body(start_line, pending_request_method)
    }
}

impl<C: Callbacks> MessageParser<HttpResponse, C> {
    /// Records the method of the request this response answers. Must be
    /// called, in order, once per request sent on the connection before
    /// feeding the matching response bytes — the parser has no visibility
    /// into the request side of the exchange otherwise.
    pub fn push_request(&mut self, method: impl Into<String>) {
        self.push_pending_request_method(method.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_line_accepts_http_version() {
        let sl = HttpRequest::parse_start_line(b"GET / HTTP/1.1").unwrap();
        assert!(matches!(sl, StartLine::Request { .. }));
    }

    #[test]
    fn request_line_rejects_rtsp_version() {
        assert!(HttpRequest::parse_start_line(b"GET / RTSP/1.0").is_none());
    }

    #[test]
    fn request_line_rejects_non_digit_version_parts() {
        assert!(HttpRequest::parse_start_line(b"GET / HTTP/a.b").is_none());
        assert!(HttpRequest::parse_start_line(b"GET / HTTP/1.b").is_none());
        assert!(HttpRequest::parse_start_line(b"GET / HTTP/a.1").is_none());
    }

    #[test]
    fn http_1_0_is_never_persistent_by_default() {
        let sl = StartLine::Request {
            method: b"GET".to_vec(),
            target: b"/".to_vec(),
            version: b"HTTP/1.0".to_vec(),
        };
        assert!(!http_is_persistent(&sl, &HeaderSet::new()));
    }

    #[test]
    fn http_1_1_is_persistent_unless_connection_close() {
        let sl = StartLine::Request {
            method: b"GET".to_vec(),
            target: b"/".to_vec(),
            version: b"HTTP/1.1".to_vec(),
        };
        assert!(http_is_persistent(&sl, &HeaderSet::new()));
        let mut headers = HeaderSet::new();
        headers.upsert(b"Connection", b"close".to_vec());
        assert!(!http_is_persistent(&sl, &headers));
    }

    #[test]
    fn chunked_requires_http_1_1() {
        let sl10 = StartLine::Request {
            method: b"GET".to_vec(),
            target: b"/".to_vec(),
            version: b"HTTP/1.0".to_vec(),
        };
        let sl11 = StartLine::Request {
            method: b"GET".to_vec(),
            target: b"/".to_vec(),
            version: b"HTTP/1.1".to_vec(),
        };
        let mut headers = HeaderSet::new();
        headers.upsert(b"Transfer-Encoding", b"chunked".to_vec());
        assert!(!http_is_chunked(&sl10, &headers));
        assert!(http_is_chunked(&sl11, &headers));
    }

    #[test]
    fn any_non_identity_transfer_encoding_counts_as_chunked() {
        let sl = StartLine::Request {
            method: b"GET".to_vec(),
            target: b"/".to_vec(),
            version: b"HTTP/1.1".to_vec(),
        };
        let mut identity = HeaderSet::new();
        identity.upsert(b"Transfer-Encoding", b"identity".to_vec());
        assert!(!http_is_chunked(&sl, &identity));

        let mut gzip = HeaderSet::new();
        gzip.upsert(b"Transfer-Encoding", b"gzip".to_vec());
        assert!(http_is_chunked(&sl, &gzip));
    }

    #[test]
    fn head_response_has_no_body_regardless_of_status() {
        let sl = StartLine::Response {
            version: b"HTTP/1.1".to_vec(),
            status: 200,
            reason: b"OK".to_vec(),
        };
        assert!(!response_has_body(&sl, Some("HEAD")));
        assert!(response_has_body(&sl, Some("GET")));
    }

    #[test]
    fn status_204_and_304_have_no_body() {
        let mk = |status| StartLine::Response {
            version: b"HTTP/1.1".to_vec(),
            status,
            reason: b"".to_vec(),
        };
        assert!(!response_has_body(&mk(204), Some("GET")));
        assert!(!response_has_body(&mk(304), Some("GET")));
        assert!(!response_has_body(&mk(100), Some("GET")));
        assert!(response_has_body(&mk(200), Some("GET")));
    }
}
