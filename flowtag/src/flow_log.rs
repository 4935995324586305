use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::debug;

use crate::error::{FlowTagError, Result};
use crate::flow_counts::{FlowCounts, UNTAGGED};
use crate::lookup::{LookupKey, LookupTable};

// Zero-based positions of the fields consumed from a flow log record.
const DST_PORT_FIELD: usize = 5;
const PROTOCOL_FIELD: usize = 7;
const MIN_FIELDS: usize = 8;

/// The parts of a flow log record used for classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowRecord {
    pub dst_port: String,
    pub protocol: String,
}

impl FlowRecord {
    /// Parses one flow log line.
    ///
    /// Returns `None` when the line has fewer than 8 whitespace-separated fields.
    pub fn parse(line: &str) -> Option<Self> {
        let fields: Vec<&str> = line.split_whitespace().collect();
        if fields.len() < MIN_FIELDS {
            return None;
        }

        Some(FlowRecord {
            dst_port: fields[DST_PORT_FIELD].to_string(),
            protocol: resolve_protocol(fields[PROTOCOL_FIELD]),
        })
    }

    pub fn key(&self) -> LookupKey {
        LookupKey::new(self.dst_port.as_str(), &self.protocol)
    }
}

/// Maps an IANA protocol number to its name.
///
/// Only TCP (6) and UDP (17) are translated; any other token is lowercased and kept.
pub fn resolve_protocol(raw: &str) -> String {
    match raw {
        "6" => "tcp".to_string(),
        "17" => "udp".to_string(),
        other => other.to_lowercase(),
    }
}

impl FlowCounts {
    /// Classifies every record read from `reader` and counts it.
    ///
    /// Lines that do not hold a complete record are skipped without notice.
    pub fn from_reader<R: BufRead>(reader: R, lookup: &LookupTable) -> Result<Self> {
        let mut counts = FlowCounts::new();

        for line in reader.lines() {
            let line = line?;
            let Some(record) = FlowRecord::parse(&line) else {
                continue;
            };

            let key = record.key();
            let tag = lookup.get(&key).unwrap_or(UNTAGGED);
            counts.increment(tag, &key);
        }

        Ok(counts)
    }
}

/// Parses the flow log at `path` and counts flows per tag and per port/protocol pair.
///
/// ### Arguments
///
/// * `path` - The flow log, one record per line.
/// * `lookup` - The table used to tag each record.
///
/// ### Returns
///
/// The counters for every line with at least 8 fields. Fails with `FileAccess`
/// if the log cannot be opened and with `Io` if reading it fails.
pub fn parse_flow_logs(path: impl AsRef<Path>, lookup: &LookupTable) -> Result<FlowCounts> {
    let path = path.as_ref();
    debug!("Opening the flow log: {:?} ...", path);

    let file = File::open(path).map_err(|e| FlowTagError::file_access(path, e))?;
    let counts = FlowCounts::from_reader(BufReader::new(file), lookup)?;

    debug!(
        "Counted {} flows from {:?} ({} tags, {} port/protocol pairs)",
        counts.total(),
        path,
        counts.tag_counts.len(),
        counts.port_protocol_counts.len()
    );
    Ok(counts)
}
