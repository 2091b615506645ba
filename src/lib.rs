pub mod config;
pub mod error;
pub mod data;
pub mod curve;
pub mod analysis;
pub mod report;
pub mod plot;
pub mod eval;

pub use analysis::{analyze, Analysis, ComparisonMode, CurveOptions};
pub use config::Config;
pub use error::{PrcurveError, Result};
pub use report::Report;
