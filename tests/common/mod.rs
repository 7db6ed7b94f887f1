//! Shared test scaffolding: a `Callbacks` implementor that just records
//! every callback it receives, in order, so scenario tests can assert on
//! the exact sequence spec.md describes.

use protoframe::error::ParseErrorKind;
use protoframe::headers::HeaderSet;
use protoframe::message::Callbacks;
use protoframe::variant::StartLine;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartLine(StartLine),
    Header(Vec<u8>, Vec<u8>),
    HeadersComplete,
    Body(Vec<u8>),
    MessageComplete,
    ParseError(ParseErrorKind),
    InternalError(String),
    CloseConnection,
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: Vec<Event>,
}

impl Callbacks for Recorder {
    fn on_start_line(&mut self, start_line: &StartLine) {
        self.events.push(Event::StartLine(start_line.clone()));
    }

    fn on_header(&mut self, name: &[u8], value: &[u8]) {
        self.events.push(Event::Header(name.to_vec(), value.to_vec()));
    }

    fn on_headers_complete(&mut self, _headers: &HeaderSet) {
        self.events.push(Event::HeadersComplete);
    }

    fn on_body(&mut self, data: &[u8]) {
        self.events.push(Event::Body(data.to_vec()));
    }

    fn on_message_complete(&mut self) {
        self.events.push(Event::MessageComplete);
    }

    fn on_parse_error(&mut self, kind: ParseErrorKind) {
        self.events.push(Event::ParseError(kind));
    }

    fn on_internal_error(&mut self, message: &str) {
        self.events.push(Event::InternalError(message.to_string()));
    }

    fn on_close_connection(&mut self) {
        self.events.push(Event::CloseConnection);
    }
}

impl Recorder {
    /// Every `Body` event's bytes, concatenated in delivery order.
    pub fn body_bytes(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Body(b) => Some(b.as_slice()),
                _ => None,
            })
            .fold(Vec::new(), |mut acc, b| {
                acc.extend_from_slice(b);
                acc
            })
    }

    pub fn message_complete_count(&self) -> usize {
        self.events.iter().filter(|e| **e == Event::MessageComplete).count()
    }
}
