//! Ordex Command-Line Tool
//!
//! Orders a JSON array of documents by dotted field paths.

mod formatter;
mod plan;

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use formatter::OutputFormat;
use ordex_core::{NullOrdering, OrderSpec, OrderingConfig};
use tracing_subscriber::filter::{Directive, LevelFilter};

/// Ordex Command-Line Tool
#[derive(Parser, Debug)]
#[command(name = "ordex")]
#[command(version, about = "Order JSON documents by dotted field paths")]
pub struct Args {
    /// Input file containing a JSON array (`-` for stdin)
    #[arg(short, long, default_value = "-")]
    pub input: String,

    /// Entity name used for the inferred definition
    #[arg(short, long, default_value = "Record")]
    pub entity: String,

    /// Sort key as PATH or PATH:asc|desc (repeatable)
    #[arg(short, long = "by", value_name = "PATH")]
    pub by: Vec<String>,

    /// Descending sort key (repeatable, applied after --by keys)
    #[arg(long, value_name = "PATH")]
    pub desc: Vec<String>,

    /// JSON file with an array of order specs
    #[arg(long)]
    pub spec: Option<PathBuf>,

    /// JSON file with ordering configuration
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Place absent values last in ascending order
    #[arg(long)]
    pub nulls_last: bool,

    /// Output format
    #[arg(long, default_value = "table", value_enum)]
    pub format: OutputFormat,
}

fn main() {
    // Initialize tracing
    let directive = "ordex_cli=info"
        .parse()
        .unwrap_or_else(|_| Directive::from(LevelFilter::INFO));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(directive))
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => plan::load_config(path)?,
        None => OrderingConfig::default(),
    };
    if args.nulls_last {
        config = config.with_null_ordering(NullOrdering::Last);
    }

    let mut specs = match &args.spec {
        Some(path) => plan::load_specs(path)?,
        None => Vec::new(),
    };
    for key in &args.by {
        specs.push(plan::parse_key(key)?);
    }
    specs.extend(args.desc.iter().map(OrderSpec::desc));

    let content = read_input(&args.input)?;
    let docs = plan::parse_documents(&content)?;

    let (entity, rows) = plan::sort_documents(docs, &args.entity, &specs, config)?;

    let formatter = formatter::create_formatter(args.format);
    println!("{}", formatter.format_rows(&entity, &rows));
    Ok(())
}

fn read_input(input: &str) -> Result<String> {
    if input == "-" {
        let mut content = String::new();
        io::stdin()
            .read_to_string(&mut content)
            .context("failed to read stdin")?;
        Ok(content)
    } else {
        fs::read_to_string(input).with_context(|| format!("failed to read input file {}", input))
    }
}
