//! Streaming reader for the webSocket wire format ([RFC6455](https://datatracker.ietf.org/doc/html/rfc6455)).
//!
//! [`Reader`] turns a byte stream into a sequence of messages: it parses
//! frame headers, unmasks payloads, reassembles fragmented messages, steps
//! over control frames injected between fragments and, if asked to, checks
//! that text messages are valid UTF-8. Payload is pulled incrementally with
//! [`Reader::read`] or through the [`std::io::Read`] adapter [`Reader::message`].
//!
//! ### Example
//!
//! ```
//! use std::io::Read;
//! use web_socket_reader::{Header, Reader};
//!
//! let bytes: &[u8] = &[
//!     0x01, 0x03, b'H', b'e', b'l', // first fragment
//!     0x89, 0x00, // ping between fragments
//!     0x80, 0x02, b'l', b'o', // final fragment
//! ];
//! let mut reader = Reader::client(bytes);
//! reader.on_intermediate(|header: &Header, _: &mut dyn Read| {
//!     assert!(header.opcode.is_control());
//!     Ok(())
//! });
//!
//! reader.next_frame()?;
//! let mut text = String::new();
//! reader.message().read_to_string(&mut text)?;
//! assert_eq!(text, "Hello");
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
mod config;
mod errors;
mod extension;
mod header;
mod mask;
mod opcode;
mod protocol;
mod reader;
mod rsv;
mod state;
mod utf8;
mod utils;

pub use config::*;
pub use errors::*;
pub use extension::*;
pub use header::*;
pub use mask::*;
pub use opcode::*;
pub use protocol::*;
pub use reader::*;
pub use rsv::*;
pub use state::*;
pub use utf8::*;

use utils::*;
