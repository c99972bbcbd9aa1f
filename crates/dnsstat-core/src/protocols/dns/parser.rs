use std::fmt;

use serde::Serialize;

use super::error::DecodeError;
use super::layout;
use super::reader::DnsReader;
use super::tables;

/// Transport the message was carried over.
///
/// TCP messages are preceded by a two-byte big-endian length prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Transport {
    Udp,
    Tcp,
}

/// Message direction as signalled by the QR bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum MessageKind {
    Query,
    Response,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::Query => "Query",
            MessageKind::Response => "Response",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw header fields, exactly as found on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Header {
    /// Transaction ID matching a query to its response.
    pub id: u16,
    pub qr: bool,
    /// 4-bit operation code, kept even when it has no known name.
    pub opcode: u8,
    /// Authoritative answer.
    pub aa: bool,
    /// Message was truncated.
    pub tc: bool,
    /// Recursion desired.
    pub rd: bool,
    /// Recursion available.
    pub ra: bool,
    /// 4-bit response code, kept even when it has no known name.
    pub rcode: u8,
    pub qd_count: u16,
    pub an_count: u16,
    pub ns_count: u16,
    pub ar_count: u16,
    /// TCP length prefix. Recorded only; it never bounds the decode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<u16>,
}

/// First entry of the question section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Question {
    /// Dot-joined labels with the trailing dot kept (`"example.com."`).
    pub query_name: String,
    pub qtype: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_name: Option<&'static str>,
    pub qclass: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<&'static str>,
}

/// Decoded DNS message.
///
/// The string labels are best-effort lookups; the numeric values they were
/// derived from always stay available in `header`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Packet {
    pub header: Header,
    /// Only decoded for queries; a response's echoed question is skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
    pub kind: MessageKind,
    pub opcode: Option<&'static str>,
    pub rcode: Option<&'static str>,
    pub authority: bool,
    pub an_count: u16,
    pub qd_count: u16,
    pub transport: Transport,
}

impl Packet {
    /// Query name of the decoded question, if any and non-empty.
    pub fn query_name(&self) -> Option<&str> {
        self.question
            .as_ref()
            .map(|q| q.query_name.as_str())
            .filter(|name| !name.is_empty())
    }
}

impl fmt::Display for Packet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ID: {}", self.header.id)?;
        writeln!(f, "Type: {}", self.kind)?;
        writeln!(f, "OpCode: {}", self.opcode.unwrap_or(""))?;
        writeln!(f, "RCode: {}", self.rcode.unwrap_or(""))?;
        writeln!(f, "Authority: {}", self.authority)?;
        writeln!(f, "Answer Count: {}", self.an_count)?;
        writeln!(f, "Question Count: {}", self.qd_count)?;
        write!(f, "TCP: {}", self.transport == Transport::Tcp)
    }
}

/// Decode one DNS message.
///
/// For [`Transport::Tcp`] the leading length prefix is stripped first. Only the
/// header and, for queries, the first question are decoded.
///
/// # Examples
/// ```
/// use dnsstat_core::{MessageKind, Transport, decode_packet};
///
/// let mut msg = vec![0x12, 0x34, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
/// msg.extend_from_slice(b"\x03www\x07example\x03com\x00");
/// msg.extend_from_slice(&[0x00, 0x1c, 0x00, 0x01]);
///
/// let packet = decode_packet(&msg, Transport::Udp)?;
/// assert_eq!(packet.kind, MessageKind::Query);
/// assert_eq!(packet.query_name(), Some("www.example.com."));
/// # Ok::<(), dnsstat_core::DecodeError>(())
/// ```
pub fn decode_packet(buffer: &[u8], transport: Transport) -> Result<Packet, DecodeError> {
    let (length, message) = match transport {
        Transport::Tcp => {
            let framed = DnsReader::new(buffer);
            let length = framed.read_u16_be(layout::TCP_LENGTH_RANGE)?;
            (Some(length), framed.read_tail(layout::TCP_PREFIX_LEN)?)
        }
        Transport::Udp => (None, buffer),
    };

    let reader = DnsReader::new(message);
    reader.require_len(layout::HEADER_LEN)?;

    let mut header = Header {
        id: reader.read_u16_be(layout::ID_RANGE)?,
        length,
        ..Header::default()
    };
    let flag1 = reader.read_u8(layout::FLAG1_OFFSET)?;
    let flag2 = reader.read_u8(layout::FLAG2_OFFSET)?;
    decode_flags(flag1, flag2, &mut header);
    header.qd_count = reader.read_u16_be(layout::QDCOUNT_RANGE)?;
    header.an_count = reader.read_u16_be(layout::ANCOUNT_RANGE)?;
    header.ns_count = reader.read_u16_be(layout::NSCOUNT_RANGE)?;
    header.ar_count = reader.read_u16_be(layout::ARCOUNT_RANGE)?;

    let kind = if header.qr {
        MessageKind::Response
    } else {
        MessageKind::Query
    };
    let question = match kind {
        MessageKind::Query => Some(decode_question(reader.read_tail(layout::HEADER_LEN)?)?),
        MessageKind::Response => None,
    };

    Ok(Packet {
        kind,
        opcode: tables::opcode_name(header.opcode),
        rcode: tables::rcode_name(header.rcode),
        authority: header.aa,
        an_count: header.an_count,
        qd_count: header.qd_count,
        question,
        transport,
        header,
    })
}

fn decode_flags(flag1: u8, flag2: u8, header: &mut Header) {
    header.qr = flag1 & layout::QR_FLAG != 0;
    header.opcode = (flag1 & layout::OPCODE_MASK) >> layout::OPCODE_SHIFT;
    header.aa = flag1 & layout::AA_FLAG != 0;
    header.tc = flag1 & layout::TC_FLAG != 0;
    header.rd = flag1 & layout::RD_FLAG != 0;
    header.ra = flag2 & layout::RA_FLAG != 0;
    header.rcode = flag2 & layout::RCODE_MASK;
}

/// Decode the first question entry. Compressed names are not supported.
fn decode_question(buffer: &[u8]) -> Result<Question, DecodeError> {
    let reader = DnsReader::new(buffer);
    let mut query_name = String::new();
    let mut offset = 0;

    loop {
        let len = reader.read_u8(offset)?;
        if len == layout::NAME_TERMINATOR {
            offset += 1;
            break;
        }
        if len & layout::LABEL_KIND_MASK != 0 {
            return Err(DecodeError::UnsupportedLabel { offset, value: len });
        }
        let start = offset + 1;
        let end = start + len as usize;
        query_name.push_str(&reader.read_label_text(start..end)?);
        query_name.push('.');
        offset = end;
    }
    if query_name.is_empty() {
        query_name.push('.');
    }

    reader.require_len(offset + layout::QTYPE_LEN + layout::QCLASS_LEN)?;
    let qtype = reader.read_u16_be_at(offset)?;
    let qclass = reader.read_u16_be_at(offset + layout::QTYPE_LEN)?;

    Ok(Question {
        query_name,
        qtype,
        type_name: tables::qtype_name(qtype),
        qclass,
        class_name: tables::qclass_name(qclass),
    })
}
