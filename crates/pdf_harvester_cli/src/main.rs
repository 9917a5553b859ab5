mod cli;
mod config;
mod logging;
mod sites;

use std::path::Path;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use harvest_logging::{harvest_error, harvest_warn};
use pdf_harvester_core::HarvestReport;
use pdf_harvester_engine::Harvester;
use tokio_util::sync::CancellationToken;

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let Some(level) = harvest_logging::parse_level(&cli.log_level) else {
        eprintln!("invalid log level `{}`", cli.log_level);
        return ExitCode::from(2);
    };
    logging::initialize(level, cli.log_file.then(|| Path::new(logging::LOG_FILE)));

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            harvest_error!("{:#}", err);
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<ExitCode> {
    let registry = sites::default_registry().context("site registry")?;
    if cli.list {
        for site in registry.iter() {
            println!("{}\t{}\t{}", site.id(), site.adapter().name(), site.listing_url());
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = config::resolve(cli)?;
    let selected = registry.select(&cli.sites)?;
    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;

    let reports = runtime.block_on(async {
        let cancel = CancellationToken::new();
        let trigger = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                harvest_warn!("interrupted, stopping after in-flight writes");
                trigger.cancel();
            }
        });
        Harvester::from_config(&config)
            .harvest_all(&selected, &cancel)
            .await
    });

    print_reports(&reports, cli.json)?;
    if reports.iter().any(HarvestReport::has_failures) {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn print_reports(reports: &[HarvestReport], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }
    for report in reports {
        println!("{report}");
        for result in report.results() {
            println!("  {result}");
        }
    }
    Ok(())
}
