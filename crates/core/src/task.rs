//! Task records - raw input, normalized form, and scored output.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A raw task record as supplied by the caller.
///
/// Every field is optional; the field normalizer applies defaults and
/// clamping, and drops records without a usable id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskInput {
    /// Unique identifier (required; tasks without one are dropped)
    #[serde(default)]
    pub id: Option<String>,

    /// Task title (defaulted to "Task {id}" when blank)
    #[serde(default)]
    pub title: Option<String>,

    /// Due date as a `YYYY-MM-DD` string
    #[serde(default)]
    pub due_date: Option<String>,

    /// Estimated effort in hours (non-negative; defaults to 1)
    #[serde(default)]
    pub estimated_hours: Option<f64>,

    /// Importance rating on a 1-10 scale (defaults to 5)
    #[serde(default)]
    pub importance: Option<i64>,

    /// Ids of tasks this task depends on
    #[serde(default)]
    pub dependencies: Vec<String>,
}

/// A task after field normalization, ready for scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: String,

    /// Effective title
    pub title: String,

    /// Parsed due date, if one was given and parsable
    pub due_date: Option<NaiveDate>,

    /// Estimated effort in hours, clamped to be non-negative
    pub estimated_hours: f64,

    /// Importance rating, clamped to 1-10
    pub importance: u8,

    /// Deduplicated dependency ids, first-seen order
    pub dependencies: Vec<String>,
}

/// A scored and ranked task as returned by the analysis engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzedTask {
    /// Unique identifier
    pub id: String,

    /// Effective title
    pub title: String,

    /// Parsed due date, if any
    pub due_date: Option<NaiveDate>,

    /// Estimated effort in hours
    pub estimated_hours: f64,

    /// Importance rating (1-10)
    pub importance: u8,

    /// Dependency ids
    pub dependencies: Vec<String>,

    /// Final priority score, nominally 0-100 (overdue tasks can exceed it)
    pub score: f64,

    /// Qualitative priority bucket derived from the score
    pub priority_label: PriorityLabel,

    /// Human-readable summary of what drove the score
    pub explanation: String,

    /// Whether this task is on, or depends on, a dependency cycle
    pub in_circular_dependency: bool,

    /// How many other tasks list this one as a dependency
    pub num_dependents: usize,
}

/// Score threshold at or above which a task is labeled High priority.
pub const HIGH_PRIORITY_THRESHOLD: f64 = 75.0;

/// Score threshold at or above which a task is labeled Medium priority.
pub const MEDIUM_PRIORITY_THRESHOLD: f64 = 50.0;

/// Qualitative priority bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriorityLabel {
    /// Score >= 75
    High,
    /// Score >= 50
    Medium,
    /// Everything else
    Low,
}

impl PriorityLabel {
    /// Derive the label for a final 0-100 score.
    pub fn from_score(score: f64) -> Self {
        if score >= HIGH_PRIORITY_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_PRIORITY_THRESHOLD {
            Self::Medium
        } else {
            Self::Low
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
        }
    }
}

impl std::fmt::Display for PriorityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
