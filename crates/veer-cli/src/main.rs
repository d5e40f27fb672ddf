//! Veering analysis for recorded walking sessions.
//!
//! Usage:
//!   veer analyze session.json
//!   veer analyze session.csv --distance 12.5 --pretty --output report.json
//!
//! Enable debug logging to see per-step votes:
//!   RUST_LOG=debug veer analyze session.json

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use log::error;
use veer_cli::errors::Result;
use veer_cli::types::{CliConfig, SessionFormat};
use veer_cli::SessionProcessor;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Estimate veering for one recorded session
    Analyze(AnalyzeArgs),
}

#[derive(clap::Args, Debug)]
struct AnalyzeArgs {
    /// Session file (.json or .csv)
    session: PathBuf,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Session format (defaults to the file extension)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Walked distance; required for CSV sessions
    #[arg(short, long)]
    distance: Option<f64>,

    #[arg(long)]
    canvas_width: Option<f64>,

    #[arg(long)]
    canvas_height: Option<f64>,

    /// Average start/end headings over this many milliseconds
    #[arg(long)]
    settle_window_ms: Option<u64>,

    /// Write the report here instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the report into the configured output directory
    #[arg(long, conflicts_with = "output")]
    save: bool,

    /// Pretty-print JSON
    #[arg(long)]
    pretty: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for SessionFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => SessionFormat::Json,
            FormatArg::Csv => SessionFormat::Csv,
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let result = match args.command {
        Command::Analyze(analyze) => run_analyze(analyze),
    };

    if let Err(err) = result {
        error!("{err}");
        eprintln!("analysis failed: {err}");
        process::exit(1);
    }
}

fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };

    if let Some(width) = args.canvas_width {
        config.canvas_width = width;
    }
    if let Some(height) = args.canvas_height {
        config.canvas_height = height;
    }
    if let Some(window) = args.settle_window_ms {
        config.analyzer.settle_window_ms = window;
    }
    config.pretty |= args.pretty;

    let processor = SessionProcessor::new(config)?;
    let report = processor.process_session(
        &args.session,
        args.format.map(SessionFormat::from),
        args.distance,
    )?;

    if args.output.is_some() || args.save {
        processor.write_report(&report, args.output.as_deref())?;
    } else {
        println!("{}", processor.render(&report)?);
    }

    Ok(())
}
