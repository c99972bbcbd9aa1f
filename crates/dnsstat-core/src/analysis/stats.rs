use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use crate::HostCount;
use crate::protocols::dns::Packet;

/// Running counters owned by the aggregator's consumer thread.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    pub packets: u64,
    pub rcodes: BTreeMap<&'static str, u64>,
    pub hosts: HashMap<String, u64>,
    pub top_answer: Option<Arc<Packet>>,
    pub top_answer_count: u16,
}

impl Tally {
    pub fn record(&mut self, packet: Arc<Packet>) {
        self.packets += 1;
        *self.rcodes.entry(packet.rcode.unwrap_or("")).or_default() += 1;
        if let Some(name) = packet.query_name() {
            match self.hosts.get_mut(name) {
                Some(count) => *count += 1,
                None => {
                    self.hosts.insert(name.to_string(), 1);
                }
            }
        }
        // Strictly greater: the first packet to reach a count keeps the slot.
        if packet.an_count > self.top_answer_count {
            self.top_answer_count = packet.an_count;
            self.top_answer = Some(packet);
        }
    }

    /// Hostnames by descending count, ties by ascending name.
    pub fn top_hosts(&self, limit: usize) -> Vec<HostCount> {
        let mut ranked: Vec<(&String, u64)> =
            self.hosts.iter().map(|(name, count)| (name, *count)).collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
            .into_iter()
            .take(limit)
            .map(|(hostname, count)| HostCount {
                hostname: hostname.clone(),
                count,
            })
            .collect()
    }
}
