//! Notice Extractor CLI
//!
//! Local execution entry point: replay exported boards, extract a single
//! notice, or try the date normalizer on a fragment.

use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::{Datelike, Local};
use clap::{Parser, Subcommand};
use notice_extractor::{
    collector::JsonFileCollector,
    error::{AppError, Result},
    models::{Config, ExtractedRecord, NormalizedDate, NoticeInput, check_reference_year},
    pipeline::{self, ExtractionOutcome},
    services::{DateNormalizer, NoticeExtractor},
    utils::console,
};

/// Notice Extractor - structured fields from university notices
#[derive(Parser, Debug)]
#[command(
    name = "notice-extractor",
    version,
    about = "Extract dates, venue and audience from Korean university notices"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract every notice from a JSON export
    Extract {
        /// JSON array of { "title", "body", "link"? } objects
        #[arg(short, long)]
        input: PathBuf,

        /// Print records as JSON instead of the report
        #[arg(long)]
        json: bool,

        /// Year for dates written without one
        #[arg(long)]
        year: Option<i32>,

        /// Keep only notices posted on this day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date, conflicts_with = "since")]
        on: Option<NormalizedDate>,

        /// Keep only notices posted on or after this day (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date)]
        since: Option<NormalizedDate>,
    },

    /// Extract a single notice
    Notice {
        /// Notice title
        #[arg(short, long)]
        title: String,

        /// File holding the notice body, or `-` for stdin
        #[arg(short, long, default_value = "-")]
        body: PathBuf,

        /// Print the record as JSON instead of the report
        #[arg(long)]
        json: bool,

        /// Year for dates written without one
        #[arg(long)]
        year: Option<i32>,
    },

    /// Normalize a single date fragment
    Normalize {
        /// Raw fragment, e.g. "5월 3일(토)"
        fragment: String,

        /// Year for fragments written without one
        #[arg(long)]
        year: Option<i32>,
    },

    /// Validate the configuration file, without falling back to defaults
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn parse_date(s: &str) -> std::result::Result<NormalizedDate, String> {
    NormalizedDate::parse(s).ok_or_else(|| format!("expected YYYY-MM-DD, got '{s}'"))
}

fn read_body(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut body = String::new();
        std::io::stdin().read_to_string(&mut body)?;
        return Ok(body);
    }
    Ok(std::fs::read_to_string(path)?)
}

fn print_records(config: &Config, records: &[ExtractedRecord]) {
    for (i, record) in records.iter().enumerate() {
        console::block(&record.format(
            &config.output.template,
            i + 1,
            config.output.max_field_chars,
        ));
        console::separator();
    }
}

fn print_outcome(outcome: &ExtractionOutcome) {
    console::summary(
        "Extraction",
        &[
            ("pages", outcome.pages.to_string()),
            ("listed", outcome.listed.to_string()),
            ("extracted", outcome.records.len().to_string()),
            ("skipped", outcome.skipped.to_string()),
            ("filtered", outcome.filtered.to_string()),
            ("duplicates", outcome.duplicates.to_string()),
            ("failed", outcome.detail_failures.to_string()),
        ],
    );
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Extract {
            input,
            json,
            year,
            on,
            since,
        } => {
            let mut config = Config::load_or_default(&cli.config);
            if on.is_some() || since.is_some() {
                config.collector.posted_on = on;
                config.collector.posted_since = since;
            }
            config.check_settings()?;
            let extractor = NoticeExtractor::from_rules(&config.extractor, year)?;
            let collector = JsonFileCollector::open(&input, config.collector.page_size).await?;
            if collector.is_empty() {
                log::warn!("{} holds no notices", input.display());
            }

            let outcome =
                pipeline::run_extraction(&config.collector, &collector, &extractor).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&outcome.records)?);
            } else {
                console::header(&format!(
                    "{} notices from {}",
                    collector.len(),
                    input.display()
                ));
                print_records(&config, &outcome.records);
                print_outcome(&outcome);
            }
        }

        Command::Notice {
            title,
            body,
            json,
            year,
        } => {
            let config = Config::load_or_default(&cli.config);
            let extractor = NoticeExtractor::from_rules(&config.extractor, year)?;
            let notice = NoticeInput::new(title, read_body(&body)?);
            if extractor.is_placeholder_title(&notice.title) {
                log::warn!("Title '{}' looks like a placeholder", notice.title);
            }

            let record = extractor.extract(&notice);
            if json {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                print_records(&config, std::slice::from_ref(&record));
            }
        }

        Command::Normalize { fragment, year } => {
            let config = Config::load_or_default(&cli.config);
            let year = year
                .or(config.extractor.reference_year)
                .unwrap_or_else(|| Local::now().year());
            check_reference_year(year)?;
            match DateNormalizer::new(year).normalize(&fragment) {
                Some(date) => println!("{date}"),
                None => {
                    return Err(AppError::validation(format!(
                        "Not a recognizable date: '{fragment}'"
                    )));
                }
            }
        }

        Command::Validate => {
            log::info!("Validating {}...", cli.config.display());
            pipeline::run_validate(&cli.config)?;
            log::info!("All validations passed!");
        }
    }

    Ok(())
}
