use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use dataviz_report::config::EngineConfig;
use dataviz_report::data::loader::load_file;
use dataviz_report::state::Session;

#[derive(Parser)]
#[command(name = "dataviz-report")]
#[command(about = "Column statistics, chart data and an analysis report for a CSV or JSON dataset")]
#[command(version)]
struct Args {
    /// Dataset to analyse (.csv, .txt or .json records)
    file: PathBuf,

    /// JSON configuration file; missing keys use defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Comma-separated columns to analyse (default: all)
    #[arg(long, value_delimiter = ',')]
    columns: Vec<String>,

    /// Print dataset statistics only, without charts and narrative
    #[arg(long)]
    stats_only: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => EngineConfig::from_path(path)?,
        None => EngineConfig::default(),
    };

    let dataset = load_file(&args.file)
        .with_context(|| format!("loading {}", args.file.display()))?;
    let name = args
        .file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned());

    let mut session = Session::new(config);
    session.set_dataset(dataset, name);
    if !args.columns.is_empty() {
        session.selected_columns = args.columns.clone();
    }

    let output = if args.stats_only {
        let stats = session.statistics()?;
        to_json(&stats, args.pretty)?
    } else {
        let report = session.report()?;
        to_json(&report, args.pretty)?
    };
    println!("{output}");
    Ok(())
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> Result<String> {
    let text = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(text)
}
