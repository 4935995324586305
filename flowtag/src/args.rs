use std::path::PathBuf;

use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, VariantNames};

pub const DEFAULT_FLOW_LOG: &str = "flow_logs.txt";
pub const DEFAULT_LOOKUP_TABLE: &str = "lookup_table.csv";
pub const DEFAULT_EXPORT_PATH: &str = "example_output.txt";

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Load the options below from a configuration file instead
    #[clap(long)]
    pub config_file: Option<String>,

    #[clap(flatten)]
    pub config: ReportConfig,
}

#[derive(Args, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// The flow log to classify, one record per line
    #[clap(long, default_value = DEFAULT_FLOW_LOG)]
    pub flow_log: PathBuf,

    /// The CSV table mapping dstport and protocol to a tag
    #[clap(long, default_value = DEFAULT_LOOKUP_TABLE)]
    pub lookup_table: PathBuf,

    /// Output method
    #[clap(short, long, value_enum, default_value_t = ExportMethodType::File)]
    pub output: ExportMethodType,

    /// File path for the report (used if method is File)
    #[clap(long, default_value = DEFAULT_EXPORT_PATH)]
    pub export_path: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            flow_log: PathBuf::from(DEFAULT_FLOW_LOG),
            lookup_table: PathBuf::from(DEFAULT_LOOKUP_TABLE),
            output: ExportMethodType::File,
            export_path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

#[derive(
    clap::ValueEnum,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    VariantNames,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportMethodType {
    /// The report will be printed to the console
    Print,

    /// The report will be written to the export path
    File,
}
