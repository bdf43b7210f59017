use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use quote_core::{Field, PremiumCalculator};
use quote_export::IssueStamp;
use tracing::{debug, info, warn};

use quote_cli::app::{self, ExportKind};
use quote_cli::{AppConfig, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Motor insurance quotation calculator.
///
/// Builds a quotation from the example form, `--field` overrides or a CSV
/// batch, prints the premium preview and optionally writes the spreadsheet
/// and document exports.
#[derive(Debug, Parser)]
#[command(name = "motor-quote", version)]
struct Cli {
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// CSV batch of quotation forms, one per row.
    #[arg(long, value_name = "CSV", conflicts_with_all = ["example", "fields"])]
    input: Option<PathBuf>,

    /// Start from the built-in example quotation.
    #[arg(long)]
    example: bool,

    /// Set a form field, e.g. `--field vehicle_value=1,500,000`.
    #[arg(
        long = "field",
        value_name = "NAME=VALUE",
        value_parser = app::parse_field_assignment
    )]
    fields: Vec<(Field, String)>,

    /// Exports to write for each quotation.
    #[arg(long, value_enum, default_value_t = ExportKind::None)]
    export: ExportKind,

    /// Print the preview as `slot=value` lines instead of a table.
    #[arg(long)]
    slots: bool,

    /// Directory exports are written into (overrides the config file).
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// Log filter, e.g. `debug` (overrides the config file and RUST_LOG).
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Append log output to this file (overrides the config file).
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    logging::init_logging();

    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(cli.config.as_deref())
        .context("failed to load configuration")?;
    if let Some(dir) = cli.out_dir {
        config.output_dir = dir;
    }

    if let Some(level) = cli.log_level.as_deref().or(config.logging.level.as_deref()) {
        logging::set_log_level(level)?;
    }
    if let Some(file) = cli.log_file.as_deref().or(config.logging.file.as_deref()) {
        logging::enable_file_logging(file)?;
    }

    let calculator = PremiumCalculator::new(config.fee_schedule.clone())
        .context("invalid fee schedule")?;
    debug!(schedule = ?calculator.schedule(), "calculator ready");

    let forms = app::collect_forms(cli.input.as_deref(), cli.example, &cli.fields)
        .context("failed to read quotation input")?;
    if forms.is_empty() {
        warn!("no quotations to process");
    }

    let outcomes = app::run_batch(&config, &calculator, &forms, cli.export, IssueStamp::now);

    let mut failures = 0usize;
    for (idx, outcome) in outcomes.iter().enumerate() {
        if outcomes.len() > 1 {
            println!("── Quotation {} of {} ──", idx + 1, outcomes.len());
        }
        if cli.slots {
            for (slot, text) in outcome.preview.slots() {
                println!("{slot}={text}");
            }
        } else {
            println!("{}", outcome.preview);
        }
        for notice in &outcome.notices {
            println!("{notice}");
        }
        if outcome.failed() {
            failures += 1;
        }
    }

    info!(quotations = forms.len(), failures, "done");
    logging::disable_file_logging();

    Ok(if failures == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
