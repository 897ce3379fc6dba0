//! aero-dashboard CLI - Aeronautical Safety Dashboards
//!
//! Loads the occurrence, recommendation and contributing factor tables and
//! serves the dashboards, or prints a text summary.
//!
//! Usage:
//!   aero-dashboard [OPTIONS] [DATA_DIR]

use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::process;
use std::time::Instant;

use clap::Parser;
use tracing::{debug, info};

use aero_dashboard::{
    DashboardConfig, Datasets, Verbosity, generate_summary, init_logging, load_config,
    load_config_file, parse_delimiter,
    web::{ServerConfig, start_server},
};

/// aero-dashboard - Interactive aeronautical safety dashboards
#[derive(Parser, Debug)]
#[command(name = "aero-dashboard")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Directory containing the dataset files
    data_dir: Option<PathBuf>,

    /// Config file path (default: search for .aero-dashboard.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Occurrence table (default: ocorrencia_clean.csv)
    #[arg(long, value_name = "FILE")]
    occurrences: Option<PathBuf>,

    /// Safety recommendation table (default: recomendacao_clean.csv)
    #[arg(long, value_name = "FILE")]
    recommendations: Option<PathBuf>,

    /// Contributing factor table (default: fator_contribuinte_clean.csv)
    #[arg(long, value_name = "FILE")]
    factors: Option<PathBuf>,

    /// Field delimiter (default: ';')
    #[arg(long)]
    delimiter: Option<String>,

    // === Web server options ===
    /// Address to bind (default: 127.0.0.1)
    #[arg(long)]
    host: Option<String>,

    /// Port for web server (default: 8050)
    #[arg(long)]
    port: Option<u16>,

    /// Don't open browser automatically when starting web server
    #[arg(long)]
    no_open: bool,

    // === Summary options ===
    /// Print a text summary instead of starting the web server
    #[arg(short, long)]
    summary: bool,

    /// Output file for the summary (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Categories listed per table in the summary
    #[arg(long, default_value = "10")]
    top: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show timing information
    #[arg(long)]
    timing: bool,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_logging(Verbosity::from_flags(args.quiet, args.verbose));

    let config = resolve_config(&args)?;
    debug!(?config, "configuration resolved");

    let load_start = Instant::now();
    let datasets = Datasets::load(&config.data)?;
    if args.timing {
        info!("Datasets loaded in {:.2?}", load_start.elapsed());
    }

    if args.summary {
        let output: Box<dyn Write> = match &args.output {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(stdout()),
        };
        let mut writer = output;
        generate_summary(&datasets, args.top, &mut writer)?;
        writer.flush()?;

        if let Some(path) = &args.output {
            info!("Summary written to: {}", path.display());
        }
        return Ok(());
    }

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        open_browser: config.server.open_browser && !args.no_open,
    };

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(start_server(datasets, config.map, server_config))
        .map_err(|e| -> Box<dyn std::error::Error> { e })?;

    Ok(())
}

/// CLI args override the config file, which overrides defaults
fn resolve_config(args: &Args) -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    let mut config = match (&args.config, &args.data_dir) {
        (Some(path), _) => load_config_file(path)?,
        (None, Some(dir)) => load_config(dir)?,
        (None, None) => load_config(&std::env::current_dir()?)?,
    };

    if let Some(dir) = &args.data_dir {
        config.data.dir = Some(dir.clone());
    }
    if let Some(path) = &args.occurrences {
        config.data.occurrences = path.clone();
    }
    if let Some(path) = &args.recommendations {
        config.data.recommendations = path.clone();
    }
    if let Some(path) = &args.factors {
        config.data.factors = path.clone();
    }
    if let Some(delimiter) = &args.delimiter {
        parse_delimiter(delimiter)?;
        config.data.delimiter = delimiter.clone();
    }
    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    Ok(config)
}
