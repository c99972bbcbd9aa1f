use serde::{Deserialize, Serialize};

/// Default capacity of the aggregator's ingest queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 1024;
/// Default number of hostnames ranked in a snapshot.
pub const DEFAULT_TOP_HOSTS: usize = 5;

/// Aggregator tuning.
///
/// Missing fields fall back to their defaults when deserialized.
///
/// # Examples
/// ```
/// use dnsstat_core::AggregatorConfig;
///
/// let config = AggregatorConfig::from_json(r#"{ "queue_capacity": 16 }"#)?;
/// assert_eq!(config.queue_capacity, 16);
/// assert_eq!(config.top_hosts, 5);
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorConfig {
    /// Packets buffered before `ingest` starts blocking its caller.
    /// Zero makes every `ingest` a rendezvous with the consumer.
    pub queue_capacity: usize,
    /// Length of the hostname ranking in the snapshot.
    pub top_hosts: usize,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            top_hosts: DEFAULT_TOP_HOSTS,
        }
    }
}

impl AggregatorConfig {
    pub fn from_json(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}
