use std::path::Path;

use log::{debug, warn};

use crate::{
    error::Result,
    flow_counts::FlowCounts,
    flow_log::parse_flow_logs,
    lookup::read_lookup_table,
    report::write_report,
};

/// Loads the lookup table and counts the flows of `flow_log` against it.
///
/// The table file is read and closed before the flow log is opened.
pub fn aggregate(
    flow_log: impl AsRef<Path>,
    lookup_table: impl AsRef<Path>,
) -> Result<FlowCounts> {
    let lookup = read_lookup_table(lookup_table.as_ref())?;
    if lookup.is_empty() {
        warn!(
            "Lookup table {:?} has no entries, every flow will be Untagged",
            lookup_table.as_ref()
        );
    }

    parse_flow_logs(flow_log, &lookup)
}

/// Runs the whole pipeline: load the table, count the flow log, write the report.
///
/// ### Arguments
///
/// * `flow_log` - The flow log to classify.
/// * `lookup_table` - The CSV lookup table.
/// * `output` - The report file, created or overwritten.
///
/// ### Returns
///
/// The counters that were written to the report.
pub fn run(
    flow_log: impl AsRef<Path>,
    lookup_table: impl AsRef<Path>,
    output: impl AsRef<Path>,
) -> Result<FlowCounts> {
    let counts = aggregate(flow_log, lookup_table)?;

    debug!("Writing report to {:?}", output.as_ref());
    write_report(output, &counts)?;

    Ok(counts)
}
