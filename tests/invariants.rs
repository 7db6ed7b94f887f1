//! Cross-cutting invariants from spec.md §8: fragmentation-independence,
//! callback ordering, and case-insensitive header lookup.

mod common;

use common::{Event, Recorder};
use protoframe::http::HttpRequestParser;

const CHUNKED_REQUEST: &[u8] = b"GET /t HTTP/1.1\r\n\
    Transfer-Encoding: chunked\r\n\
    Test: foo\r\n bar\r\n\
    \r\n\
    5\r\nhello\r\n0\r\n\r\n";

fn run_as_chunks(chunk_size: usize) -> Recorder {
    let mut parser: HttpRequestParser<Recorder> = HttpRequestParser::new(Recorder::default());
    for chunk in CHUNKED_REQUEST.chunks(chunk_size.max(1)) {
        parser.feed(chunk);
    }
    Recorder {
        events: parser.callbacks().events.clone(),
    }
}

/// Invariant 5: feeding the same stream as differently-sized slices yields
/// the identical callback sequence.
#[test]
fn identical_sequence_regardless_of_fragmentation() {
    let whole = run_as_chunks(CHUNKED_REQUEST.len());
    let one_byte = run_as_chunks(1);
    let three_byte = run_as_chunks(3);

    assert_eq!(whole.events, one_byte.events);
    assert_eq!(whole.events, three_byte.events);
}

/// Invariant 4: `on_headers_complete` precedes any `on_body`, which
/// precedes `on_message_complete`, within a single message.
#[test]
fn callback_ordering_within_a_message() {
    let recorder = run_as_chunks(CHUNKED_REQUEST.len());
    let headers_complete = recorder
        .events
        .iter()
        .position(|e| *e == Event::HeadersComplete)
        .unwrap();
    let first_body = recorder.events.iter().position(|e| matches!(e, Event::Body(_))).unwrap();
    let message_complete = recorder
        .events
        .iter()
        .position(|e| *e == Event::MessageComplete)
        .unwrap();
    assert!(headers_complete < first_body);
    assert!(first_body < message_complete);
}

/// Invariant 6: case-insensitive header lookup returns the same field for
/// any ASCII casing of the name.
#[test]
fn header_lookup_is_case_insensitive() {
    // Content-Length is larger than the delivered body so the message
    // never completes and clears the header set out from under us.
    let mut parser: HttpRequestParser<Recorder> = HttpRequestParser::new(Recorder::default());
    parser.feed(b"GET / HTTP/1.1\r\nX-Custom-Header: value\r\nContent-Length: 100\r\n\r\nnot enough bytes");

    for casing in ["x-custom-header", "X-CUSTOM-HEADER", "X-Custom-Header", "x-CUSTOM-header"] {
        assert_eq!(parser.headers().get(casing), Some(&b"value"[..]));
    }
}

/// Boundary case: empty body (`Content-Length: 0`) emits headers-complete
/// then message-complete with zero body callbacks.
#[test]
fn empty_body_emits_no_body_callbacks() {
    let mut parser: HttpRequestParser<Recorder> = HttpRequestParser::new(Recorder::default());
    parser.feed(b"GET / HTTP/1.1\r\nContent-Length: 0\r\n\r\n");

    assert!(parser.callbacks().body_bytes().is_empty());
    assert_eq!(parser.callbacks().message_complete_count(), 1);
}

/// Boundary case: a feed that splits the CRLF delimiter itself, byte by
/// byte, still parses correctly.
#[test]
fn feed_split_across_delimiter_bytes() {
    let full = b"GET / HTTP/1.1\r\nContent-Length: 0\r\n\r\n";
    let mut parser: HttpRequestParser<Recorder> = HttpRequestParser::new(Recorder::default());
    for byte in full {
        parser.feed(std::slice::from_ref(byte));
    }
    assert_eq!(parser.callbacks().message_complete_count(), 1);
}
