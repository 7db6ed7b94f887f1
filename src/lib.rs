//! Streaming line/header/body parser for HTTP/1.x and RTSP/1.x wire
//! messages.
//!
//! The crate is layered the way the design notes describe: [`framer`] turns
//! an unframed byte stream into delimited lines or raw chunks; [`message`]
//! builds the HTTP-like grammar (start line, headers, body framing) on top
//! of it; [`http`] and [`rtsp`] supply the four concrete wire-message
//! variants as zero-sized strategy types. None of these own a socket — the
//! embedding transport calls [`message::MessageParser::feed`] with inbound
//! bytes and reacts to the [`message::Callbacks`] it implements.
//!
//! ```
//! use protoframe::config::ParserConfig;
//! use protoframe::http::HttpRequestParser;
//! use protoframe::message::Callbacks;
//!
//! #[derive(Default)]
//! struct Collect {
//!     body: Vec<u8>,
//!     done: bool,
//! }
//!
//! impl Callbacks for Collect {
//!     fn on_body(&mut self, data: &[u8]) {
//!         self.body.extend_from_slice(data);
//!     }
//!     fn on_message_complete(&mut self) {
//!         self.done = true;
//!     }
//! }
//!
//! let mut parser: HttpRequestParser<Collect> =
//!     HttpRequestParser::with_config(Collect::default(), ParserConfig::default());
//! parser.feed(b"GET /x HTTP/1.1\r\nContent-Length: 5\r\n\r\nhello");
//! ```

pub mod config;
pub mod error;
pub mod framer;
pub mod headers;
pub mod http;
pub mod message;
pub mod parse;
pub mod rtsp;
pub mod variant;
