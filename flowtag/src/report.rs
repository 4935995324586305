use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{
    args::ExportMethodType,
    error::{FlowTagError, Result},
    flow_counts::{FlowCounts, UNTAGGED},
};
use log::debug;

pub struct ReportWriter {
    writer: BufWriter<Box<dyn Write>>,
}

impl ReportWriter {
    /// Creates a writer for the selected export method.
    ///
    /// `file_path` is only opened for `ExportMethodType::File`; an existing file is truncated.
    pub fn new(export_type: ExportMethodType, file_path: &Path) -> Result<Self> {
        match export_type {
            ExportMethodType::File => Self::to_file(file_path),
            ExportMethodType::Print => Ok(Self::to_stdout()),
        }
    }

    pub fn to_file(path: &Path) -> Result<Self> {
        debug!("Creating report file: {:?}", path);
        let file = File::create(path).map_err(|e| FlowTagError::file_access(path, e))?;
        Ok(Self::from_writer(file))
    }

    pub fn to_stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer(writer: impl Write + 'static) -> Self {
        ReportWriter {
            writer: BufWriter::new(Box::new(writer)),
        }
    }

    pub fn write(&mut self, counts: &FlowCounts) -> Result<()> {
        debug!("Writing report for {} flows", counts.total());
        write_counts(&mut self.writer, counts)?;
        Ok(())
    }

    /// Flushes buffered output so write errors surface before the writer is dropped.
    pub fn flush_and_close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Writes both count sections in the fixed report layout.
///
/// Tags are sorted by string with `Untagged` always last, and port/protocol
/// pairs are sorted by port string then protocol string.
pub fn write_counts<W: Write>(writer: &mut W, counts: &FlowCounts) -> io::Result<()> {
    writeln!(writer, "Tag Counts:")?;
    writeln!(writer, "Tag,Count")?;
    for (tag, count) in counts.sorted_tags() {
        writeln!(writer, "{},{}", tag, count)?;
    }
    if let Some(count) = counts.untagged() {
        writeln!(writer, "{},{}", UNTAGGED, count)?;
    }

    writeln!(writer, "Port/Protocol Combinations Counts:")?;
    writeln!(writer, "Port,Protocol,Count")?;
    for (key, count) in counts.sorted_port_protocols() {
        writeln!(writer, "{},{}", key, count)?;
    }

    Ok(())
}

/// Renders the report into a string.
pub fn render_report(counts: &FlowCounts) -> io::Result<String> {
    let mut buffer = Vec::new();
    write_counts(&mut buffer, counts)?;
    String::from_utf8(buffer).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes the report to `path`, creating or overwriting it.
pub fn write_report(path: impl AsRef<Path>, counts: &FlowCounts) -> Result<()> {
    let mut report_writer = ReportWriter::to_file(path.as_ref())?;
    report_writer.write(counts)?;
    report_writer.flush_and_close()
}
