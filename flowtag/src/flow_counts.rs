use std::collections::HashMap;

use crate::lookup::LookupKey;

/// Tag reported for flows that match no lookup entry.
pub const UNTAGGED: &str = "Untagged";

pub type TagCounts = HashMap<String, u64>;
pub type PortProtocolCounts = HashMap<LookupKey, u64>;

/// Occurrence counters produced by a single pass over a flow log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlowCounts {
    pub tag_counts: TagCounts,
    pub port_protocol_counts: PortProtocolCounts,
}

impl FlowCounts {
    pub fn new() -> Self {
        Self {
            tag_counts: HashMap::new(),
            port_protocol_counts: HashMap::new(),
        }
    }

    /// Counts one classified flow under its tag and under its port/protocol pair.
    pub fn increment(&mut self, tag: &str, key: &LookupKey) {
        *self.tag_counts.entry(tag.to_string()).or_insert(0) += 1;
        *self.port_protocol_counts.entry(key.clone()).or_insert(0) += 1;
    }

    /// Number of flows counted so far.
    pub fn total(&self) -> u64 {
        self.tag_counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tag_counts.is_empty() && self.port_protocol_counts.is_empty()
    }

    /// Tags other than `Untagged`, sorted by tag string.
    pub fn sorted_tags(&self) -> Vec<(&str, u64)> {
        let mut tags: Vec<(&str, u64)> = self
            .tag_counts
            .iter()
            .filter(|(tag, _)| tag.as_str() != UNTAGGED)
            .map(|(tag, &count)| (tag.as_str(), count))
            .collect();
        tags.sort_by(|a, b| a.0.cmp(b.0));
        tags
    }

    pub fn untagged(&self) -> Option<u64> {
        self.tag_counts.get(UNTAGGED).copied()
    }

    /// Port/protocol pairs sorted by port string, then protocol string.
    pub fn sorted_port_protocols(&self) -> Vec<(&LookupKey, u64)> {
        let mut pairs: Vec<(&LookupKey, u64)> = self
            .port_protocol_counts
            .iter()
            .map(|(key, &count)| (key, count))
            .collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));
        pairs
    }
}
