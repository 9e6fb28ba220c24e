// HealthBot - Core Library
// Shared by the terminal dashboard, the CLI subcommands and the API server

pub mod advice;
pub mod bmi;
pub mod config;
pub mod dataset;
pub mod error;
pub mod insights;
pub mod report;

#[cfg(feature = "tui")]
pub mod ui;

#[cfg(feature = "server")]
pub mod api;

// Re-export commonly used types
pub use advice::{
    classify, AdviceEngine, AdviceLine, AdviceSet, Catalog, ConditionId, Severity,
    DISCLAIMER, SUCCESS_MARKER, WARNING_MARKER,
};
pub use bmi::{Bmi, BmiCategory, Tone};
pub use config::Config;
pub use dataset::{ChartKind, CorrelationMatrix, HealthDataset};
pub use error::{HealthError, Result};
pub use insights::Insights;
pub use report::UploadedReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
