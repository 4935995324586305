use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use flowtag::{
    args::{Cli, ReportConfig},
    pipeline,
    report::ReportWriter,
};
use log::{debug, error, info};

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    // If a config file is provided, it replaces the CLI options
    let config = if let Some(config_path) = cli.config_file {
        match confy::load_path::<ReportConfig>(&config_path) {
            Ok(config) => config,
            Err(e) => {
                error!("Error loading configuration file: {:?}", e);
                std::process::exit(1);
            }
        }
    } else {
        cli.config
    };
    debug!("Running with {:?}", config);

    let start = Instant::now();
    if let Err(err) = run_with_config(&config) {
        error!("Error: {:?}", err);
        std::process::exit(1);
    }

    info!("Duration: {:.4} seconds", start.elapsed().as_secs_f64());
}

fn run_with_config(config: &ReportConfig) -> anyhow::Result<()> {
    let counts = pipeline::aggregate(&config.flow_log, &config.lookup_table)
        .context("Failed to count the flow log")?;

    if counts.is_empty() {
        info!("No flow records found in {:?}", config.flow_log);
    }

    let mut output_writer = ReportWriter::new(config.output, &config.export_path)
        .with_context(|| format!("Failed to open {} output", config.output))?;
    output_writer
        .write(&counts)
        .and_then(|_| output_writer.flush_and_close())
        .context("Failed to write the report")?;

    info!(
        "Tagged {} flows: {} tags, {} port/protocol pairs",
        counts.total(),
        counts.tag_counts.len(),
        counts.port_protocol_counts.len()
    );
    Ok(())
}
