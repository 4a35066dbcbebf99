use activity_core::{format_iso, parse_iso_date, today_in};
use activity_export::{
    Delivered, ExportOutcome, FileSink, StderrNotifier, WriterSink, deliver,
};
use activity_ingest::{Extraction, Extractor};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;
mod state;

use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "wsexport",
    version,
    long_version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("WSEXPORT_BUILD_SHA"), ")"),
    about = "Export settled transactions from a saved Wealthsimple activity page to CSV"
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Config file (default: ~/.wsexport/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Debug)]
struct PageArgs {
    /// Saved activity page (HTML); `-` reads stdin
    #[arg(long, default_value = "-")]
    html: PathBuf,

    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long)]
    today: Option<String>,

    /// IANA timezone for "Today"/"Yesterday" (overrides config)
    #[arg(long)]
    tz: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract settled transactions and write the CSV export
    Export {
        #[command(flatten)]
        page: PageArgs,

        /// Directory to write into (overrides config; default: current directory)
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Output file name (overrides config)
        #[arg(long)]
        filename: Option<String>,

        /// Write the CSV to stdout instead of a file
        #[arg(long, conflicts_with_all = ["out_dir", "overwrite"])]
        stdout: bool,

        /// Replace an existing export file
        #[arg(long)]
        overwrite: bool,
    },

    /// Run extraction and print what would be exported, without writing anything
    Inspect {
        #[command(flatten)]
        page: PageArgs,

        /// Print the report and records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the config file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a config file with default values (never overwrites)
    Init,
    /// Print the effective config
    Show,
    /// Print the config file location
    Path,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let explicit_config = cli.config.as_deref();

    match cli.command {
        Command::Export {
            page,
            out_dir,
            filename,
            stdout,
            overwrite,
        } => {
            let cfg = config::load_config(explicit_config)?;
            let extraction = run_extraction(&page, &cfg)?;
            let filename = filename.unwrap_or_else(|| cfg.output.filename.clone());
            let mut notifier = StderrNotifier;

            let outcome = if stdout {
                let mut sink = WriterSink::new(std::io::stdout().lock());
                deliver(&extraction.records, &filename, &mut sink, &mut notifier)?
            } else {
                let dir = out_dir
                    .or_else(|| cfg.output.dir.clone())
                    .unwrap_or_else(|| PathBuf::from("."));
                let mut sink = FileSink::new(dir).overwrite(overwrite || cfg.output.overwrite);
                deliver(&extraction.records, &filename, &mut sink, &mut notifier)?
            };

            if let ExportOutcome::Delivered(Delivered::File(path)) = outcome {
                println!(
                    "Exported {} transactions to {}",
                    extraction.records.len(),
                    path.display()
                );
            }
        }

        Command::Inspect { page, json } => {
            let cfg = config::load_config(explicit_config)?;
            let extraction = run_extraction(&page, &cfg)?;
            if json {
                print_json(&extraction)?;
            } else {
                print_inspection(&extraction);
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config(explicit_config)?;
            }
            ConfigCommand::Show => {
                let cfg = config::load_config(explicit_config)?;
                print!("{}", config::render_config(&cfg)?);
            }
            ConfigCommand::Path => {
                let p = match explicit_config {
                    Some(p) => p.to_path_buf(),
                    None => config::default_config_path()?,
                };
                println!("{}", p.display());
            }
        },
    }

    Ok(())
}

fn run_extraction(page: &PageArgs, cfg: &Config) -> Result<Extraction> {
    let today = resolve_today(page, cfg)?;
    let html = state::read_html(&page.html)?;
    tracing::info!(source = %source_label(&page.html), today = %format_iso(today), "extracting");

    let extractor = Extractor::new(cfg.layout.clone());
    Ok(extractor.extract_html(&html, today))
}

fn resolve_today(page: &PageArgs, cfg: &Config) -> Result<NaiveDate> {
    if let Some(s) = &page.today {
        return parse_iso_date(s).context("--today");
    }
    let tz = page.tz.as_deref().or(cfg.clock.timezone.as_deref());
    today_in(tz)
}

fn source_label(path: &Path) -> String {
    if path == Path::new("-") {
        "stdin".to_string()
    } else {
        path.display().to_string()
    }
}

fn print_inspection(extraction: &Extraction) {
    let r = &extraction.report;
    println!("# Extraction report\n");
    println!("sections:            {}", r.sections);
    println!("non-date headings:   {}", r.non_date_headings);
    println!("undated headings:    {}", r.undated_headings);
    println!("amount candidates:   {}", r.candidates);
    println!("dead ends:           {}", r.dead_ends);
    println!("pending skipped:     {}", r.pending_skipped);
    println!("unparseable amounts: {}", r.unparseable_amounts);
    println!("duplicates:          {}", r.duplicates);
    println!("records:             {}", r.records);

    if extraction.records.is_empty() {
        println!("\n(no settled transactions found)");
        return;
    }

    println!("\n# Records\n");
    for rec in &extraction.records {
        println!("{} | {:>12} | {}", rec.iso_date(), rec.amount_text(), rec.payee);
    }
}

fn print_json(extraction: &Extraction) -> Result<()> {
    let out = serde_json::json!({
        "report": extraction.report,
        "records": extraction.records,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
