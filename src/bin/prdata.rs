//! Produce PR data files from ranked result lists and relevance judgements.

use anyhow::Context;
use clap::Parser;
use prcurve::eval::{f1_score, load_runs, precision_at_k, recall_at_k};
use prcurve::Config;
use std::path::PathBuf;

/// Write one `rank precision recall` file per ranked run.
#[derive(Parser, Debug)]
#[command(name = "prdata")]
struct Args {
    /// JSON array of {query, variant?, retrieved: [ids], relevant: [ids]}.
    #[arg(long, default_value = "runs.json")]
    runs: PathBuf,

    /// Directory for the generated data files.
    #[arg(long, default_value = "pr-data")]
    out_dir: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_level()),
    )
    .init();
    config.log_source();

    let runs = load_runs(&args.runs)
        .with_context(|| format!("Failed to load runs from {}", args.runs.display()))?;

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

    println!("Writing precision-recall data for {} runs\n", runs.len());

    for run in &runs {
        let path = run.write_pr_file(&args.out_dir)?;
        let k = run.retrieved.len();
        let precision = precision_at_k(&run.retrieved, &run.relevant, k);
        let recall = recall_at_k(&run.retrieved, &run.relevant, k);
        if run.relevant.is_empty() {
            log::warn!("'{}' has no relevant documents; recall is 0", run.query);
        }

        println!(
            "  {} -> {} (hits: {}, P: {:.4}, R: {:.4}, F1: {:.4})",
            run.query,
            path.display(),
            run.hits(),
            precision,
            recall,
            f1_score(precision, recall)
        );
    }

    Ok(())
}
