//! prcurve: plot interpolated precision-recall curves with their average precision.

use anyhow::{Context, Result};
use clap::Parser;
use prcurve::curve::InterpolationMethod;
use prcurve::data::load_inputs;
use prcurve::eval::slugify;
use prcurve::plot::{build_figure, write_svg};
use prcurve::{analyze, ComparisonMode, Config, CurveOptions, Report};
use std::path::PathBuf;

/// Render precision-recall data files as an SVG chart.
#[derive(Parser, Debug)]
#[command(name = "prcurve", version)]
struct Args {
    /// Figure name, used as the chart title.
    figure: String,

    /// Precision-recall data files (`rank precision recall` per line) or directories.
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Treat files as consecutive (non-stemmed, stemmed) pairs.
    #[arg(long)]
    paired: bool,

    /// Interpolation method (default from config: eleven-point).
    #[arg(long, value_enum)]
    method: Option<InterpolationMethod>,

    /// Number of recall levels (default from config: 11).
    #[arg(long)]
    levels: Option<usize>,

    /// Do not append the averaged interpolated curve.
    #[arg(long)]
    no_average: bool,

    /// Output SVG path (default: <figure>.svg).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the numeric report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,

    /// Config file (default: $PRCURVE_CONFIG or ./prcurve.toml).
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
    let analysis = analyze(args.figure.clone(), series, mode, options)?;

    let output = args.output.clone().unwrap_or_else(|| {
        let slug = slugify(&args.figure);
        let stem = if slug.is_empty() { "prcurve".to_string() } else { slug };
        PathBuf::from(format!("{}.svg", stem))
    });

    let figure = build_figure(&analysis);
    write_svg(&figure, &config.plot, &output)
        .with_context(|| format!("Failed to write chart to {}", output.display()))?;

    let report = Report::from_analysis(&analysis);
    if let Some(path) = &args.report {
        std::fs::write(path, report.to_json()?)
            .with_context(|| format!("Failed to write report to {}", path.display()))?;
        log::info!("Wrote report to {}", path.display());
    }

    print!("{}", report.to_text());
    println!("\nChart: {}", output.display());

    Ok(())
}
