//! Command implementations for the statement importer CLI
//!
//! This module loads configuration, sets up logging, opens and seeds the
//! template store, and executes the import and template commands.

use crate::app::models::{ImportContext, Template, Transaction};
use crate::app::services::importer::{ImportReport, Importer};
use crate::app::services::template_store::{JsonFileTemplateStore, TemplateStore, seed_from_dir};
use crate::app::services::transaction_sink::{LineProtocolSink, write_all};
use crate::cli::args::{Args, Commands, ImportArgs, OutputFormat, TemplatesCommand};
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Main command runner
///
/// 1. Load layered configuration and set up logging
/// 2. Open the template store and seed it from the configured directory
/// 3. Dispatch the subcommand
pub async fn run(args: Args) -> Result<()> {
    let config = load_configuration(&args)?;
    setup_logging(&args, &config)?;

    info!("Starting statement importer");
    debug!("Command line arguments: {:?}", args);

    let mut store = JsonFileTemplateStore::open(&config.templates.store_path).with_context(|| {
        format!(
            "Failed to open template store {}",
            config.templates.store_path.display()
        )
    })?;
    seed_at_startup(&mut store, &config);

    match &args.command {
        Some(Commands::Import(import_args)) => run_import(import_args, &config, &store).await,
        Some(Commands::Templates(command)) => run_templates(command, &config, &mut store),
        None => Ok(()),
    }
}

/// Load configuration using layered approach (defaults -> file -> env -> args)
fn load_configuration(args: &Args) -> Result<Config> {
    let mut config = Config::load_layered(args.config_file.as_deref())
        .context("Failed to load configuration")?;

    apply_cli_overrides(&mut config, args);
    config.validate().context("Invalid configuration")?;

    Ok(config)
}

/// Apply CLI argument overrides to configuration
fn apply_cli_overrides(config: &mut Config, args: &Args) {
    if let Some(store_path) = &args.store_path {
        config.templates.store_path = store_path.clone();
    }

    config.logging.level = args.get_log_level(&config.logging.level).to_string();
}

/// Set up structured logging based on CLI arguments and configuration
fn setup_logging(args: &Args, config: &Config) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = config.logging.level.as_str();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("statement_importer={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Seed the store from the configured directory, logging failures
fn seed_at_startup(store: &mut JsonFileTemplateStore, config: &Config) {
    let Some(dir) = &config.templates.seed_dir else {
        debug!("No template seed directory configured");
        return;
    };

    match seed_from_dir(store, dir) {
        Ok(stats) => debug!("Startup seeding from {}: {}", dir.display(), stats.summary()),
        Err(e) => warn!("Template seeding from {} failed: {}", dir.display(), e),
    }
}

/// Import one statement and write the result in the requested format
async fn run_import(
    args: &ImportArgs,
    config: &Config,
    store: &JsonFileTemplateStore,
) -> Result<()> {
    let start_time = Instant::now();
    args.validate()?;

    let template = store
        .get(&args.template)
        .with_context(|| format!("Failed to load template '{}'", args.template))?;

    let tenant = args
        .tenant
        .clone()
        .unwrap_or_else(|| config.import.default_tenant.clone());
    let bank = args
        .bank
        .clone()
        .or_else(|| config.import.default_bank.clone());
    let context = ImportContext::new(tenant, args.account.clone(), bank)?;

    let importer = Importer::new(config.calendar_context()?);
    let input = read_statement(args)?;
    let collect_errors = args.collect_errors;

    info!(
        "Importing {} with template '{}' ({} bytes)",
        describe_input(args),
        template.id,
        input.len()
    );

    let report = tokio::task::spawn_blocking(move || {
        if collect_errors {
            importer.import_collecting(input.as_slice(), &template, &context)
        } else {
            importer
                .import(input.as_slice(), &template, &context)
                .map(ImportReport::complete)
        }
    })
    .await
    .context("Import task failed")?
    .with_context(|| format!("Failed to import {}", describe_input(args)))?;

    for error in &report.errors {
        warn!("Row {} (line {}) skipped: {}", error.index, error.line, error.message);
    }

    let mut writer = open_output(args.output.as_deref())?;
    write_report(&mut writer, &report, args.format, collect_errors)?;
    writer.flush().context("Failed to flush output")?;

    info!(
        "Import finished in {:.2}s: {}",
        start_time.elapsed().as_secs_f64(),
        report.summary()
    );

    Ok(())
}

/// Read the whole statement from the input file or standard input
fn read_statement(args: &ImportArgs) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();

    if args.reads_stdin() {
        io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read statement from standard input")?;
    } else {
        File::open(&args.input)
            .and_then(|mut file| file.read_to_end(&mut bytes))
            .with_context(|| format!("Failed to read {}", args.input.display()))?;
    }

    Ok(bytes)
}

fn describe_input(args: &ImportArgs) -> String {
    if args.reads_stdin() {
        "standard input".to_string()
    } else {
        args.input.display().to_string()
    }
}

fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(BufWriter::new(io::stdout().lock()))),
    }
}

/// Write an import report in the requested format
pub fn write_report(
    writer: &mut dyn Write,
    report: &ImportReport,
    format: OutputFormat,
    include_errors: bool,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            if include_errors {
                serde_json::to_writer_pretty(&mut *writer, report)?;
            } else {
                serde_json::to_writer_pretty(&mut *writer, &report.transactions)?;
            }
            writeln!(writer)?;
        }
        OutputFormat::LineProtocol => {
            let mut sink = LineProtocolSink::new(writer);
            write_all(&mut sink, &report.transactions)?;
        }
        OutputFormat::Summary => write_summary(writer, report)?,
    }

    Ok(())
}

/// Human-readable transaction table and totals
fn write_summary(writer: &mut dyn Write, report: &ImportReport) -> Result<()> {
    writeln!(writer, "{}", "Imported transactions".bold())?;
    writeln!(writer, "{}", "=====================".bold())?;

    for transaction in &report.transactions {
        writeln!(writer, "{}", summary_line(transaction))?;
    }

    if !report.errors.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "{}", "Rows not imported:".red().bold())?;
        for error in &report.errors {
            writeln!(
                writer,
                "  {} {}",
                format!("#{} (line {})", error.index, error.line).red(),
                error.message
            )?;
        }
    }

    let inbound = sum_cents(
        report
            .transactions
            .iter()
            .map(|t| t.amount_cents)
            .filter(|c| *c >= 0),
    );
    let outbound = sum_cents(
        report
            .transactions
            .iter()
            .map(|t| t.amount_cents)
            .filter(|c| *c < 0),
    );

    writeln!(writer)?;
    writeln!(
        writer,
        "{} in: {}  out: {}",
        "Totals".bold(),
        format_cents(inbound).green(),
        format_cents(outbound).red()
    )?;
    writeln!(writer, "{}", report.summary())?;

    Ok(())
}

fn summary_line(transaction: &Transaction) -> String {
    let amount = format!(
        "{:>12} {}",
        format_cents(transaction.amount_cents),
        transaction.currency
    );
    let amount = if transaction.amount_cents < 0 {
        amount.red()
    } else {
        amount.green()
    };

    format!(
        "{}  {}  {}  {}  {}",
        transaction.booking_date,
        amount,
        transaction.payee,
        transaction.memo.dimmed(),
        &transaction.tx_uid[..transaction.tx_uid.len().min(12)]
    )
}

/// Total of minor-unit amounts, clamped at the `i64` range
fn sum_cents(amounts: impl Iterator<Item = i64>) -> i64 {
    amounts.fold(0i64, |total, cents| total.saturating_add(cents))
}

/// Minor units as a decimal string with two fraction digits
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

/// Execute a template management command
fn run_templates(
    command: &TemplatesCommand,
    config: &Config,
    store: &mut JsonFileTemplateStore,
) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    templates_command(command, config, store, &mut out)
}

/// Template command execution against any store and writer
pub fn templates_command<S>(
    command: &TemplatesCommand,
    config: &Config,
    store: &mut S,
    out: &mut dyn Write,
) -> Result<()>
where
    S: TemplateStore + ?Sized,
{
    match command {
        TemplatesCommand::List => {
            let templates = store.list()?;
            if templates.is_empty() {
                writeln!(out, "No templates stored")?;
            }
            for template in templates {
                writeln!(
                    out,
                    "{}  {}  ({})",
                    template.id.bold(),
                    template.name,
                    template.template_type
                )?;
            }
        }
        TemplatesCommand::Show { id } => {
            let template = store
                .get(id)
                .with_context(|| format!("Failed to load template '{}'", id))?;
            serde_json::to_writer_pretty(&mut *out, &template)?;
            writeln!(out)?;
        }
        TemplatesCommand::Upsert { file } => {
            let content = std::fs::read_to_string(file)
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let template: Template = serde_json::from_str(&content)
                .with_context(|| format!("Invalid template document {}", file.display()))?;
            if let Err(e) = template.validate() {
                warn!("Template '{}' is not importable yet: {}", template.id, e);
            }

            let stored = store.upsert(template)?;
            writeln!(out, "Stored template '{}'", stored.id.green())?;
        }
        TemplatesCommand::Seed { dir } => {
            let dir = dir
                .as_deref()
                .or(config.templates.seed_dir.as_deref())
                .context("No template directory given or configured")?;
            let stats = seed_from_dir(store, dir)
                .with_context(|| format!("Failed to seed templates from {}", dir.display()))?;
            writeln!(out, "{}", stats.summary())?;
        }
    }

    Ok(())
}
