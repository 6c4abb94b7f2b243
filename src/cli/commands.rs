//! Command implementations for the boatrace processor CLI
//!
//! Contains the main command execution logic, logging setup, progress
//! reporting and the colored per-document status output.

use std::sync::Arc;
use std::time::Instant;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::app::models::{DocumentKind, RaceDate, RawDocument};
use crate::app::services::csv_emitter::{self, emitter};
use crate::app::services::race_text_parser::DocumentParser;
use crate::app::services::track_registry::TrackRegistry;
use crate::cli::args::{Args, Commands, OutputFormat, ProcessArgs, TracksArgs};
use crate::config::Config;
use crate::{Error, Result};

/// Processing statistics for the final report
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    /// Documents read and parsed
    pub documents_processed: usize,
    /// Documents that parsed successfully but yielded zero races
    pub documents_empty: usize,
    /// Races converted across all documents
    pub races_converted: usize,
    /// Rows appended to the sinks
    pub rows_written: usize,
    /// Recovered per-line parse failures across all documents
    pub lines_rejected: usize,
    /// Total processing time
    pub processing_time: std::time::Duration,
}

/// Main command runner.
pub fn run(args: Args) -> Result<ProcessingStats> {
    setup_logging(&args)?;

    match args.command {
        Some(Commands::Process(process_args)) => run_process(process_args, args.quiet),
        Some(Commands::Tracks(tracks_args)) => {
            run_tracks(tracks_args)?;
            Ok(ProcessingStats::default())
        }
        None => Err(Error::invalid_argument("no command provided")),
    }
}

/// Convert one race day's documents to CSV rows.
fn run_process(args: ProcessArgs, quiet: bool) -> Result<ProcessingStats> {
    let start_time = Instant::now();

    args.validate()?;
    let date = RaceDate::new(args.year, args.month, args.day)?;

    let config = load_configuration(&args)?;
    debug!("Configuration: {:?}", config);

    let registry = load_registry(args.track_table.as_deref().or(config.track_table.as_deref()))?;
    let parser = DocumentParser::new(registry);

    let kinds = args.kinds();
    info!("Processing {} for kinds: {:?}", date, kinds);

    let progress_bar = if quiet {
        None
    } else {
        let pb = ProgressBar::new(kinds.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap()
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    let mut stats = ProcessingStats::default();
    let mut first_failure: Option<Error> = None;

    for (i, kind) in kinds.iter().enumerate() {
        if let Some(pb) = &progress_bar {
            pb.set_position(i as u64);
            pb.set_message(format!("Converting {} document", kind));
        }

        match process_document(&parser, &config, *kind, &date, &mut stats, quiet) {
            Ok(()) => {}
            // A missing or unreadable input is fatal for that document only;
            // the remaining kinds still convert, and the run exits non-zero
            Err(error @ (Error::ResourceNotFound { .. } | Error::Io { .. })) => {
                if !quiet {
                    println!("{}", format!("{} document for {}: {}", kind, date, error).red());
                }
                first_failure.get_or_insert(error);
            }
            Err(error) => return Err(error),
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    stats.processing_time = start_time.elapsed();
    report(&stats, quiet);

    match first_failure {
        Some(error) => Err(error),
        None => Ok(stats),
    }
}

/// Read, parse and append one document kind.
fn process_document(
    parser: &DocumentParser,
    config: &Config,
    kind: DocumentKind,
    date: &RaceDate,
    stats: &mut ProcessingStats,
    quiet: bool,
) -> Result<()> {
    let input_path = config.input_path(kind, date);

    let text = std::fs::read_to_string(&input_path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            Error::resource_not_found(input_path.display().to_string())
        } else {
            Error::io(format!("reading {}", input_path.display()), e)
        }
    })?;

    let document = RawDocument::new(kind, *date, text);
    let result = parser.parse(&document);

    stats.documents_processed += 1;
    stats.lines_rejected += result.stats.entrant_rows_rejected;

    if let Some(document_date) = result.document_date {
        if document_date != *date {
            warn!(
                "Document {} reports date {} but {} was requested",
                input_path.display(),
                document_date,
                date
            );
        }
    }

    if result.is_empty() {
        stats.documents_empty += 1;
        if !quiet {
            println!(
                "{}",
                format!("{} document for {}: no races found", kind, date).yellow()
            );
        }
        return Ok(());
    }

    let (headers, output_path) = match kind {
        DocumentKind::Program => (csv_emitter::program_headers(), config.output_path(kind)),
        DocumentKind::Result => (csv_emitter::result_headers(), config.output_path(kind)),
    };

    let rows: Vec<Vec<String>> = result
        .races
        .iter()
        .map(|race| emitter::emit_row(date, race))
        .collect();

    let written = csv_emitter::append_rows(&output_path, &headers, &rows)?;

    stats.races_converted += result.races.len();
    stats.rows_written += written;

    if !quiet {
        println!(
            "{}",
            format!(
                "{} document for {}: converted {} races -> {}",
                kind,
                date,
                result.races.len(),
                output_path.display()
            )
            .green()
        );
    }

    Ok(())
}

/// Print the track registry.
fn run_tracks(args: TracksArgs) -> Result<()> {
    let registry = load_registry(args.track_table.as_deref())?;

    match args.format {
        OutputFormat::Text => {
            for (code, name) in registry.entries() {
                println!("{}  {}", code, name);
            }
        }
        OutputFormat::Json => {
            let entries: serde_json::Map<String, serde_json::Value> = registry
                .entries()
                .into_iter()
                .map(|(code, name)| (code, serde_json::Value::String(name)))
                .collect();
            println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
        }
    }

    Ok(())
}

/// Layered configuration: defaults, then config file, then CLI overrides.
fn load_configuration(args: &ProcessArgs) -> Result<Config> {
    let mut config = match &args.config_file {
        Some(path) => Config::from_json_file(path)?,
        None => Config::default(),
    };

    if let Some(input_dir) = &args.input_dir {
        config.input_dir = input_dir.clone();
    }
    if let Some(output_dir) = &args.output_dir {
        config.output_dir = output_dir.clone();
    }

    config.validate()?;
    Ok(config)
}

fn load_registry(track_table: Option<&std::path::Path>) -> Result<Arc<TrackRegistry>> {
    let registry = match track_table {
        Some(path) => TrackRegistry::from_json_file(path)?,
        None => TrackRegistry::builtin(),
    };
    debug!("Track registry holds {} venues", registry.len());
    Ok(Arc::new(registry))
}

/// Final summary report.
fn report(stats: &ProcessingStats, quiet: bool) {
    info!(
        "Processed {} documents in {:.2?}: {} races, {} rows written",
        stats.documents_processed, stats.processing_time, stats.races_converted, stats.rows_written
    );

    if quiet {
        return;
    }

    println!();
    println!(
        "Converted {} races from {} documents in {:.2?}",
        stats.races_converted, stats.documents_processed, stats.processing_time
    );
    if stats.documents_empty > 0 {
        println!(
            "{}",
            format!("{} documents yielded no races", stats.documents_empty).yellow()
        );
    }
    if stats.lines_rejected > 0 {
        println!("{} malformed entrant lines were skipped", stats.lines_rejected);
    }
}

/// Set up tracing output for the selected verbosity.
fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("boatrace_processor={}", args.log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .init();
    }

    debug!("Logging initialized at level: {}", args.log_level);
    Ok(())
}
