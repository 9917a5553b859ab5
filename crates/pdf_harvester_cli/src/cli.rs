use std::path::PathBuf;

use clap::Parser;

/// Download annual-report PDFs from investor-relations listing pages.
#[derive(Debug, Parser)]
#[command(name = "pdf-harvester", version)]
pub struct Cli {
    /// Sites to harvest, by id. Harvests every registered site when empty.
    pub sites: Vec<String>,

    /// List registered sites and exit.
    #[arg(long)]
    pub list: bool,

    /// Print reports as JSON instead of text.
    #[arg(long)]
    pub json: bool,

    /// RON configuration file [default: ./harvester.ron when present].
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory documents are saved to.
    #[arg(long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Maximum concurrent downloads per site.
    #[arg(long, value_name = "N")]
    pub concurrency: Option<usize>,

    /// Retries for transient download failures.
    #[arg(long, value_name = "N")]
    pub retries: Option<u32>,

    /// Log level: off, error, warn, info, debug or trace.
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Also write logs to ./harvest.log.
    #[arg(long)]
    pub log_file: bool,
}
