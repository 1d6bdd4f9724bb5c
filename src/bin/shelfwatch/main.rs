//! Shelfwatch command line report

use std::{io, process::ExitCode};

use jiff::{Zoned, civil::Date};
use thiserror::Error;
use tracing::{error, info};

use shelfwatch::{
    fixtures::Fixture,
    report::{Report, ReportError, ReportOptions},
    source::{DataSource, SourceError},
};

use crate::config::{Config, report::OutputFormat};

mod config;
mod logging;

/// Errors that end a report run.
#[derive(Debug, Error)]
enum AppError {
    /// Records could not be fetched.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// The report could not be written.
    #[error(transparent)]
    Report(#[from] ReportError),
}

fn main() -> ExitCode {
    let config = match Config::load() {
        Ok(config) => config,
        Err(parse_error) => parse_error.exit(),
    };

    if let Err(init_error) = logging::init(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialize, must use eprintln"
        )]
        {
            eprintln!("Failed to initialize logging: {init_error}");
        }

        return ExitCode::FAILURE;
    }

    let fixture = match Fixture::from_set_in(&config.source.fixtures_dir, &config.source.set) {
        Ok(fixture) => fixture,
        Err(load_error) => {
            error!(
                dir = %config.source.fixtures_dir.display(),
                set = %config.source.set,
                "failed to load fixtures: {load_error}"
            );

            return ExitCode::FAILURE;
        }
    };

    let today = config.report.today.unwrap_or_else(|| Zoned::now().date());

    info!(%today, window_days = config.report.window_days, "building report");

    match run(
        &fixture,
        today,
        &config.report.options(),
        config.report.format,
        io::stdout().lock(),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            error!("report failed: {run_error}");

            ExitCode::FAILURE
        }
    }
}

fn run(
    source: &impl DataSource,
    today: Date,
    options: &ReportOptions,
    format: OutputFormat,
    out: impl io::Write,
) -> Result<(), AppError> {
    let snapshot = source.snapshot()?;
    let report = Report::new(&snapshot, today, options);

    match format {
        OutputFormat::Table => report.write_to(out)?,
        OutputFormat::Json => report.write_json(out)?,
    }

    Ok(())
}
