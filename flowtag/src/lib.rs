//! Tags network flow log records by destination port and protocol and
//! reports how often each tag and each port/protocol pair occurs.

pub mod args;
pub mod error;
pub mod flow_counts;
pub mod flow_log;
pub mod lookup;
pub mod pipeline;
pub mod report;

mod tests;

pub use error::{FlowTagError, Result};
pub use flow_counts::{FlowCounts, UNTAGGED};
pub use flow_log::{parse_flow_logs, FlowRecord};
pub use lookup::{read_lookup_table, LookupKey, LookupTable};
pub use pipeline::run;
pub use report::write_report;
