//! DNS message decoding.
//!
//! Decodes the fixed header and the first question entry of a DNS message,
//! optionally framed with the TCP length prefix. Answer, authority and
//! additional sections are left untouched, and compressed names in the
//! question are rejected rather than expanded.
//!
//! Numeric codes are resolved to names through the static `tables`; a code
//! with no known name yields `None` and never fails the decode. The only
//! failures are reads past the end of the buffer and unsupported label types.

pub mod error;
pub mod layout;
pub mod parser;
pub mod reader;
pub mod tables;

pub use error::DecodeError;
pub use parser::{Header, MessageKind, Packet, Question, Transport, decode_packet};
