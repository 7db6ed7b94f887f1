//! Small `nom` grammars for structural pieces that arrive pre-delimited by
//! the line framer: start lines, status lines, and chunk-size lines.
//!
//! The teacher reaches for `nom` combinators for exactly this category of
//! problem (`request_generic.rs`'s `parse_request_line_generic_ex`,
//! `headers.rs`'s token/value grammars); since lines are already complete
//! by the time they reach these functions (the framer did the streaming
//! part), the `complete` combinators are the right fit rather than `nom`'s
//! `streaming` variants.

use nom::{
    bytes::complete::{take_while, take_while1, take_while_m_n},
    combinator::{map_res, opt},
    sequence::tuple,
    IResult,
};

/// An HTTP/RTSP request start line: `METHOD SP target SP version`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Vec<u8>,
    pub target: Vec<u8>,
    pub version: Vec<u8>,
}

/// An HTTP/RTSP status line: `version SP status SP reason`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub version: Vec<u8>,
    pub status: u16,
    pub reason: Vec<u8>,
}

fn is_not_space(b: u8) -> bool {
    b != b' ' && b != b'\t'
}

fn is_space(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn token(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_not_space)(input)
}

fn spaces(input: &[u8]) -> IResult<&[u8], &[u8]> {
    take_while1(is_space)(input)
}

/// Parses `METHOD SP target SP version`, tolerating run-on whitespace
/// between fields the way the teacher's generic request-line grammar does.
pub fn parse_request_line(line: &[u8]) -> Option<RequestLine> {
    let parser = tuple((token, spaces, token, spaces, token, opt(take_while(is_space))));
    let (rest, (method, _, target, _, version, _)): (&[u8], _) = parser(line).ok()?;
    if !rest.is_empty() {
        return None;
    }
    Some(RequestLine {
        method: method.to_vec(),
        target: target.to_vec(),
        version: version.to_vec(),
    })
}

/// Parses `version SP status SP reason`. `reason` may be empty but the two
/// separating spaces must be present, matching both HTTP and RTSP status
/// line grammar. Status code is exactly three digits (spec.md §9) — a two-
/// or four-digit run is rejected rather than silently truncated/widened.
pub fn parse_status_line(line: &[u8]) -> Option<StatusLine> {
    let (rest, (version, _, status)): (&[u8], _) = tuple((
        token,
        spaces,
        map_res(take_while_m_n(3, 3, |b: u8| b.is_ascii_digit()), |d: &[u8]| {
            std::str::from_utf8(d).unwrap().parse::<u16>()
        }),
    ))(line)
    .ok()?;
    let reason = match opt(spaces)(rest).ok()? {
        (after_sp, Some(_)) => after_sp,
        (after_sp, None) if after_sp.is_empty() => after_sp,
        _ => return None,
    };
    Some(StatusLine {
        version: version.to_vec(),
        status,
        reason: reason.to_vec(),
    })
}

/// Parses a chunk-size line (`<hex digits>[;extensions]`), ignoring chunk
/// extensions entirely per spec (their structure is explicitly out of
/// scope; only the size matters for framing).
pub fn parse_chunk_size(line: &[u8]) -> Option<usize> {
    let (_, hex) = take_while1::<_, _, nom::error::Error<&[u8]>>(|b: u8| b.is_ascii_hexdigit())(line).ok()?;
    let text = std::str::from_utf8(hex).ok()?;
    usize::from_str_radix(text, 16).ok()
}

/// Parses a `Content-Length` header value as a non-negative decimal integer.
pub fn parse_content_length(value: &[u8]) -> Option<u64> {
    let trimmed = trim_ascii(value);
    if trimmed.is_empty() || !trimmed.iter().all(|b| b.is_ascii_digit()) {
        return None;
    }
    std::str::from_utf8(trimmed).ok()?.parse::<u64>().ok()
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
