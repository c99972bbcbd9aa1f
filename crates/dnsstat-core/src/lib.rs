//! dnsstat core library: DNS wire-format decoding and streaming statistics.
//!
//! Raw DNS messages (UDP payloads or TCP-framed) are decoded by the pure
//! `protocols::dns` parser into [`Packet`] values. Packets are handed to an
//! [`Aggregator`], which counts them on a dedicated worker thread while any
//! number of producers keep ingesting, and finally yields a [`Snapshot`].
//! Parsing is byte-oriented and side-effect free; capture and transport are
//! left to the caller.
//!
//! Invariants:
//! - Unknown numeric codes never fail a decode; they only lack a name.
//! - A packet accepted by `ingest` is always counted in the snapshot.
//! - Snapshot ordering is deterministic for identical input.
//!
//! # Examples
//! ```
//! use dnsstat_core::{Aggregator, AggregatorConfig, Transport, decode_packet};
//!
//! let mut msg = vec![0x00, 0x2a, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
//! msg.extend_from_slice(b"\x04rust\x04lang\x00\x00\x01\x00\x01");
//!
//! let aggregator = Aggregator::spawn(AggregatorConfig::default())?;
//! aggregator.ingest(decode_packet(&msg, Transport::Udp)?)?;
//! let snapshot = aggregator.summarize()?;
//! println!("{snapshot}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;

mod analysis;
mod config;
mod protocols;

pub use analysis::{Aggregator, AggregatorError, AggregatorState};
pub use config::{AggregatorConfig, DEFAULT_QUEUE_CAPACITY, DEFAULT_TOP_HOSTS};
pub use protocols::dns::tables;
pub use protocols::dns::{
    DecodeError, Header, MessageKind, Packet, Question, Transport, decode_packet,
};

/// Current snapshot schema version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Final statistics of one aggregation window.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    /// Snapshot schema version (not the crate version).
    pub snapshot_version: u32,
    /// RFC3339 time the aggregator was spawned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_start: Option<String>,
    /// RFC3339 time the aggregator was summarized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub window_end: Option<String>,
    /// Every packet ingested, queries and responses, TCP and UDP.
    pub total_packets: u64,
    /// Packets per response-code name; unknown codes count under `""`.
    pub rcode_histogram: BTreeMap<&'static str, u64>,
    /// First packet that reached the highest answer count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_answer: Option<Arc<Packet>>,
    pub top_answer_count: u16,
    /// Most queried hostnames, most frequent first.
    pub top_hosts: Vec<HostCount>,
}

/// Query count for one hostname.
///
/// # Examples
/// ```
/// use dnsstat_core::HostCount;
///
/// let host = HostCount {
///     hostname: "example.com.".to_string(),
///     count: 3,
/// };
/// assert_eq!(host.to_string(), "example.com. (3)");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HostCount {
    pub hostname: String,
    pub count: u64,
}

impl fmt::Display for HostCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.hostname, self.count)
    }
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Total DNS payloads (TCP and UDP, queries and responses): {}",
            self.total_packets
        )?;
        write!(f, "Histogram of response codes:")?;
        for (rcode, count) in &self.rcode_histogram {
            let rcode = if rcode.is_empty() { "<unknown>" } else { *rcode };
            write!(f, " {rcode}={count}")?;
        }
        writeln!(f)?;
        match &self.top_answer {
            Some(packet) => {
                writeln!(f, "Packet with most answers ({}):", self.top_answer_count)?;
                for line in packet.to_string().lines() {
                    writeln!(f, "    {line}")?;
                }
            }
            None => writeln!(f, "Packet with most answers: none")?,
        }
        write!(f, "Top hostnames:")?;
        for host in &self.top_hosts {
            write!(f, " {host}")?;
        }
        Ok(())
    }
}
