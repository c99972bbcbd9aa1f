//! Streaming statistics over decoded packets.
//!
//! An [`Aggregator`] owns one background thread that drains a bounded queue
//! and is the only place counters are mutated. Producers on any thread call
//! [`Aggregator::ingest`]; a full queue blocks them instead of dropping
//! packets. [`Aggregator::summarize`] closes the queue, waits for the worker
//! to finish everything already enqueued and returns the final [`Snapshot`].

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, bounded};
use log::{debug, trace, warn};
use parking_lot::{Mutex, RwLock};
use thiserror::Error;
use time::{OffsetDateTime, format_description::well_known::Rfc3339};

use crate::config::AggregatorConfig;
use crate::protocols::dns::Packet;
use crate::{SNAPSHOT_VERSION, Snapshot};

mod stats;

use stats::Tally;

const WORKER_NAME: &str = "dnsstat-aggregator";

const OPEN: u8 = 0;
const DRAINING: u8 = 1;
const CLOSED: u8 = 2;

#[derive(Debug, Error)]
pub enum AggregatorError {
    #[error("aggregator is closed")]
    Closed,
    #[error("failed to spawn aggregator worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("aggregator worker panicked")]
    WorkerPanicked,
    #[error("aggregator queue disconnected")]
    Disconnected,
}

/// Lifecycle of an [`Aggregator`]. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregatorState {
    Open,
    Draining,
    Closed,
}

/// Concurrent packet aggregator for one reporting window.
///
/// # Examples
/// ```
/// use dnsstat_core::{Aggregator, AggregatorConfig, Transport, decode_packet};
///
/// let aggregator = Aggregator::spawn(AggregatorConfig::default())?;
/// let mut msg = vec![0, 1, 0x01, 0x00, 0, 1, 0, 0, 0, 0, 0, 0];
/// msg.extend_from_slice(b"\x07example\x03org\x00\x00\x01\x00\x01");
/// aggregator.ingest(decode_packet(&msg, Transport::Udp)?)?;
///
/// let snapshot = aggregator.summarize()?;
/// assert_eq!(snapshot.total_packets, 1);
/// assert_eq!(snapshot.top_hosts[0].hostname, "example.org.");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct Aggregator {
    config: AggregatorConfig,
    state: AtomicU8,
    sender: RwLock<Option<Sender<Arc<Packet>>>>,
    worker: Mutex<Option<JoinHandle<Tally>>>,
    opened_at: OffsetDateTime,
}

impl Aggregator {
    /// Create the queue and start the consumer thread.
    pub fn spawn(config: AggregatorConfig) -> Result<Self, AggregatorError> {
        let (sender, receiver) = bounded(config.queue_capacity);
        let worker = thread::Builder::new()
            .name(WORKER_NAME.to_string())
            .spawn(move || consume(receiver))?;
        debug!(
            "aggregator opened (queue_capacity={}, top_hosts={})",
            config.queue_capacity, config.top_hosts
        );

        Ok(Self {
            config,
            state: AtomicU8::new(OPEN),
            sender: RwLock::new(Some(sender)),
            worker: Mutex::new(Some(worker)),
            opened_at: OffsetDateTime::now_utc(),
        })
    }

    pub fn config(&self) -> &AggregatorConfig {
        &self.config
    }

    pub fn state(&self) -> AggregatorState {
        match self.state.load(Ordering::Acquire) {
            OPEN => AggregatorState::Open,
            DRAINING => AggregatorState::Draining,
            _ => AggregatorState::Closed,
        }
    }

    /// Queue a packet for counting.
    ///
    /// Blocks while the queue is full. Fails with
    /// [`AggregatorError::Closed`] once [`summarize`](Self::summarize) has
    /// started.
    pub fn ingest(&self, packet: impl Into<Arc<Packet>>) -> Result<(), AggregatorError> {
        if self.state.load(Ordering::Acquire) != OPEN {
            warn!("ingest rejected: aggregator is no longer open");
            return Err(AggregatorError::Closed);
        }

        // The read guard is held across a blocking send so `summarize` cannot
        // close the queue under an in-flight packet.
        let guard = self.sender.read();
        let Some(sender) = guard.as_ref() else {
            warn!("ingest rejected: aggregator queue already closed");
            return Err(AggregatorError::Closed);
        };
        let packet = packet.into();
        trace!("ingest packet id={}", packet.header.id);
        sender
            .send(packet)
            .map_err(|_| AggregatorError::Disconnected)
    }

    /// Close the window and return its snapshot.
    ///
    /// Waits for every packet ingested before this call to be counted. Only
    /// the first call succeeds; later calls return
    /// [`AggregatorError::Closed`].
    pub fn summarize(&self) -> Result<Snapshot, AggregatorError> {
        if self
            .state
            .compare_exchange(OPEN, DRAINING, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!("summarize rejected: aggregator already summarized");
            return Err(AggregatorError::Closed);
        }
        debug!("aggregator draining");

        // Dropping the only sender disconnects the queue once it is empty.
        drop(self.sender.write().take());
        let worker = self.worker.lock().take();
        let joined = match worker {
            Some(handle) => handle.join().map_err(|_| {
                warn!("aggregator worker panicked");
                AggregatorError::WorkerPanicked
            }),
            None => Err(AggregatorError::Closed),
        };
        self.state.store(CLOSED, Ordering::Release);
        let tally = joined?;

        debug!("aggregator closed after {} packets", tally.packets);
        Ok(build_snapshot(
            tally,
            self.config.top_hosts,
            self.opened_at,
            OffsetDateTime::now_utc(),
        ))
    }
}

impl Drop for Aggregator {
    fn drop(&mut self) {
        self.sender.get_mut().take();
        if let Some(handle) = self.worker.get_mut().take() {
            if handle.join().is_err() {
                warn!("aggregator worker panicked during shutdown");
            }
        }
    }
}

fn consume(receiver: Receiver<Arc<Packet>>) -> Tally {
    debug!("aggregator worker started");
    let mut tally = Tally::default();
    for packet in receiver.iter() {
        tally.record(packet);
    }
    debug!("aggregator worker drained");
    tally
}

fn build_snapshot(
    tally: Tally,
    top_hosts: usize,
    opened_at: OffsetDateTime,
    closed_at: OffsetDateTime,
) -> Snapshot {
    Snapshot {
        snapshot_version: SNAPSHOT_VERSION,
        window_start: ts_to_rfc3339(opened_at),
        window_end: ts_to_rfc3339(closed_at),
        total_packets: tally.packets,
        top_hosts: tally.top_hosts(top_hosts),
        rcode_histogram: tally.rcodes,
        top_answer_count: tally.top_answer_count,
        top_answer: tally.top_answer,
    }
}

fn ts_to_rfc3339(ts: OffsetDateTime) -> Option<String> {
    ts.format(&Rfc3339).ok()
}
