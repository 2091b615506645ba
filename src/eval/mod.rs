//! Ranking evaluation: per-rank precision/recall points from ranked results and
//! relevance judgements, written out as PR data files.

pub mod metrics;
pub mod run;

pub use metrics::{f1_score, pr_points, precision_at_k, recall_at_k};
pub use run::{load_runs, slugify, RankedRun};
