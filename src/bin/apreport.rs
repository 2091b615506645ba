//! Report average precision and interpolated curves without rendering a chart.

use anyhow::Result;
use clap::Parser;
use prcurve::curve::InterpolationMethod;
use prcurve::data::load_inputs;
use prcurve::{analyze, ComparisonMode, Config, CurveOptions, Report};
use std::path::PathBuf;

/// Average precision report for precision-recall data files.
#[derive(Parser, Debug)]
#[command(name = "apreport")]
struct Args {
    /// Precision-recall data files or directories.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Report title.
    #[arg(long, default_value = "Average precision")]
    title: String,

    /// Treat files as consecutive (non-stemmed, stemmed) pairs.
    #[arg(long)]
    paired: bool,

    #[arg(long, value_enum)]
    method: Option<InterpolationMethod>,

    #[arg(long)]
    levels: Option<usize>,

    /// Skip the averaged curve.
    #[arg(long)]
    no_average: bool,

    /// Print JSON instead of a table.
    #[arg(long)]
    json: bool,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level()),
    )
    .init();
    config.log_source();

    let options = CurveOptions::from(&config.curve).with_overrides(
        args.method,
        args.levels,
        args.no_average,
    );
    let mode = if args.paired {
        ComparisonMode::Paired
    } else {
        ComparisonMode::Single
    };

    let series = load_inputs(&args.files)?;
    let analysis = analyze(args.title, series, mode, options)?;
    let report = Report::from_analysis(&analysis);

    if args.json {
        println!("{}", report.to_json()?);
    } else {
        print!("{}", report.to_text());
    }

    Ok(())
}
