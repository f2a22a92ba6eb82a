//! events2pdf CLI.

use std::io::{self, IsTerminal};

use anyhow::Context;
use clap::Parser;

use e2p_cli::logging::init_logging;
use e2p_cli::pipeline::{PipelineError, configure, run};
use e2p_cli::summary::print_summary;
use e2p_cli::types::RunSummary;

mod cli;

use crate::cli::Cli;

/// Exit status for any fatal error.
const FAILURE: i32 = -1;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = cli.log_config(io::stderr().is_terminal());
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(FAILURE);
    }
    let exit_code = match execute(&cli) {
        Ok(summary) => {
            if cli.summary {
                print_summary(&summary);
            }
            0
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            FAILURE
        }
    };
    std::process::exit(exit_code);
}

fn execute(cli: &Cli) -> anyhow::Result<RunSummary> {
    let config = configure(cli.config.as_deref(), &cli.overrides()).map_err(with_stage)?;
    run(&config)
        .map_err(with_stage)
        .with_context(|| format!("could not render {} to {}", config.input, config.output))
}

fn with_stage(error: PipelineError) -> anyhow::Error {
    let stage = error.stage();
    anyhow::Error::new(error).context(format!("{stage} stage failed"))
}
