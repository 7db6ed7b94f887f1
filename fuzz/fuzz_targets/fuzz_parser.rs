#![no_main]
#[macro_use]
extern crate libfuzzer_sys;
extern crate protoframe;

use protoframe::http::{HttpRequestParser, HttpResponseParser};
use protoframe::message::Callbacks;

/// A no-op callback sink: the fuzz target cares only that `feed` never
/// panics, loops, or overruns its buffers, not about application-level
/// reactions to the parsed message.
struct NullSink;
impl Callbacks for NullSink {}

/// Splits the corpus input on `>>>`/`<<<` boundary markers the same way the
/// teacher's own fuzz harness splits bidirectional traffic captures into
/// client/server chunks, so a single corpus file can exercise both the
/// request-side and response-side parser with independently fragmented
/// feeds.
enum Chunk<'a> {
    Client(&'a [u8]),
    Server(&'a [u8]),
}

fn split_chunks(input: &[u8]) -> Vec<Chunk<'_>> {
    let mut chunks = Vec::new();
    let mut client = true;
    let mut start = 0;
    let mut i = 0;
    while i < input.len() {
        if input[i..].starts_with(b">>>") || input[i..].starts_with(b"<<<") {
            if i > start {
                chunks.push(if client {
                    Chunk::Client(&input[start..i])
                } else {
                    Chunk::Server(&input[start..i])
                });
            }
            client = input[i] == b'>';
            i += 3;
            start = i;
        } else {
            i += 1;
        }
    }
    if start < input.len() {
        chunks.push(if client {
            Chunk::Client(&input[start..])
        } else {
            Chunk::Server(&input[start..])
        });
    }
    chunks
}

fuzz_target!(|data: &[u8]| {
    let mut request_parser: HttpRequestParser<NullSink> = HttpRequestParser::new(NullSink);
    let mut response_parser: HttpResponseParser<NullSink> = HttpResponseParser::new(NullSink);

    for chunk in split_chunks(data) {
        match chunk {
            // Feed one byte at a time: the fuzzer's job is to find an input
            // fragmentation that breaks an invariant, and per spec.md §8
            // invariant 5 the callback sequence must not depend on how the
            // stream is sliced.
            Chunk::Client(bytes) => {
                for byte in bytes {
                    request_parser.feed(std::slice::from_ref(byte));
                }
            }
            Chunk::Server(bytes) => {
                response_parser.push_request("GET");
                for byte in bytes {
                    response_parser.feed(std::slice::from_ref(byte));
                }
            }
        }
    }
});
