//! Notestore - read-only viewer for markdown study notes
//!
//! Loads a directory of notes, splits each one into headed sections, and
//! prints listings, whole documents or single sections.

mod app;
mod core;
mod ui;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::NotestoreApp;
use crate::core::config::{AppConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "notestore", version, about = "Browse a directory of markdown notes")]
struct Cli {
    /// Notes directory (defaults to the last one used)
    #[arg(short, long, global = true)]
    dir: Option<PathBuf>,

    /// Config file to use instead of the platform default
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    /// More logging on stderr (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List document names in load order
    List,

    /// Print a document
    Show {
        /// Document name
        name: String,

        /// Print only the section with this heading (case-insensitive)
        #[arg(short, long)]
        section: Option<String>,
    },

    /// List the section headings of a document
    Sections {
        /// Document name
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        _ => LevelFilter::DEBUG,
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.or_else(AppConfig::default_path);
    let config = match &config_path {
        Some(path) => AppConfig::load_from(path)?,
        None => {
            tracing::warn!("Could not determine config directory, using defaults");
            AppConfig::default()
        }
    };

    let mut app = NotestoreApp::new(config, config_path);
    if let Some(format) = cli.format {
        app.set_format(format);
    }

    match cli.dir {
        Some(dir) => app.open_store(dir)?,
        None => app.open_last_store()?,
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::List => app.list(&mut out),
        Command::Show { name, section } => app.show(&mut out, &name, section.as_deref()),
        Command::Sections { name } => app.sections(&mut out, &name),
    }
}
