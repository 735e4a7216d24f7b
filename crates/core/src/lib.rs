//! taskrank core data models.
//!
//! This crate defines the data structures shared by the analysis engine
//! and its front-ends: raw and normalized task records, weight
//! configurations, the strategy registry, and the error type.

#![warn(missing_docs)]

mod error;
mod task;
mod weights;

pub use error::{AnalysisError, Result};
pub use task::{
    AnalyzedTask, PriorityLabel, Task, TaskInput, HIGH_PRIORITY_THRESHOLD,
    MEDIUM_PRIORITY_THRESHOLD,
};
pub use weights::{Strategy, StrategyInfo, WeightConfig};

/// Timestamp type used as the "now" reference for an analysis call.
pub type Time = chrono::DateTime<chrono::Utc>;
