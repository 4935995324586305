use std::collections::HashMap;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use log::debug;
use serde::Deserialize;

use crate::error::{FlowTagError, Result};

const REQUIRED_COLUMNS: [&str; 3] = ["dstport", "protocol", "tag"];

/// Identifies a class of flows by destination port and transport protocol.
///
/// Both parts are kept as strings: the port exactly as it appears in the input
/// and the protocol lowercased. The derived ordering compares the port first
/// and the protocol second, both as strings, so "110" sorts before "25".
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LookupKey {
    pub port: String,
    pub protocol: String,
}

impl LookupKey {
    pub fn new(port: impl Into<String>, protocol: &str) -> Self {
        LookupKey {
            port: port.into(),
            protocol: protocol.to_lowercase(),
        }
    }
}

impl fmt::Display for LookupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.port, self.protocol)
    }
}

#[derive(Debug, Deserialize)]
struct LookupRow {
    dstport: String,
    protocol: String,
    tag: String,
}

/// Maps (destination port, protocol) to the tag assigned to matching flows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTable {
    entries: HashMap<LookupKey, String>,
}

impl LookupTable {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Inserts a mapping, replacing any earlier tag for the same key.
    pub fn insert(&mut self, key: LookupKey, tag: impl Into<String>) {
        self.entries.insert(key, tag.into());
    }

    pub fn get(&self, key: &LookupKey) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &LookupKey> {
        self.entries.keys()
    }

    /// Builds a table from CSV data that did not come from a file.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        load(reader, Path::new("<reader>"))
    }
}

/// Reads the lookup table from a CSV file with `dstport`, `protocol` and `tag` columns.
///
/// ### Arguments
///
/// * `path` - Location of the CSV file. The header row is required; extra columns, and
///   extra or missing values in them, are ignored.
///
/// ### Returns
///
/// The loaded table. A file holding only a header, or nothing at all, gives an empty table.
/// Fails with `FileAccess` if the file cannot be opened and with `Format` if a required
/// column is missing or a row cannot be read.
pub fn read_lookup_table(path: impl AsRef<Path>) -> Result<LookupTable> {
    let path = path.as_ref();
    debug!("Opening the lookup table: {:?} ...", path);

    let file = File::open(path).map_err(|e| FlowTagError::file_access(path, e))?;
    let table = load(file, path)?;

    debug!("Loaded {} lookup entries from {:?}", table.len(), path);
    Ok(table)
}

fn load<R: Read>(reader: R, origin: &Path) -> Result<LookupTable> {
    let mut rdr = ReaderBuilder::new()
        .trim(Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers().map_err(|e| csv_error(e, origin))?.clone();
    let mut table = LookupTable::new();
    if headers.is_empty() {
        return Ok(table);
    }

    let indices = required_column_indices(&headers).map_err(|missing| {
        FlowTagError::format(origin, format!("missing required column `{}`", missing))
    })?;
    let required_headers = StringRecord::from(REQUIRED_COLUMNS.to_vec());

    for result in rdr.records() {
        let record = result.map_err(|e| csv_error(e, origin))?;
        let required_record = filter_record(&record, &indices);
        let row: LookupRow = required_record
            .deserialize(Some(&required_headers))
            .map_err(|e| csv_error(e, origin))?;

        table.insert(LookupKey::new(row.dstport, &row.protocol), row.tag);
    }

    Ok(table)
}

// Position of every required column. A header name that repeats resolves to
// its last occurrence.
fn required_column_indices(
    headers: &StringRecord,
) -> std::result::Result<Vec<usize>, &'static str> {
    REQUIRED_COLUMNS
        .iter()
        .map(|column| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, header)| header == column)
                .map(|(index, _)| index)
                .last()
                .ok_or(*column)
        })
        .collect()
}

// Stops at the first absent field. The shortened record then fails to
// deserialize instead of shifting values onto the wrong column.
fn filter_record(record: &StringRecord, indices: &[usize]) -> StringRecord {
    indices.iter().map_while(|&index| record.get(index)).collect()
}

fn csv_error(err: csv::Error, origin: &Path) -> FlowTagError {
    let reason = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(e) => FlowTagError::Io(e),
        _ => FlowTagError::format(origin, reason),
    }
}
