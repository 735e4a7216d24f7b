//! Analysis engine - normalization, dependency analysis, scoring and
//! ranking of task sets.
//!
//! The pipeline is a single pure pass: field normalization, cycle
//! detection and dependent counting over the dependency graph, factor
//! scoring, and weighted ranking. There is no cross-call state; every
//! input (the task list, the "now" timestamp, the weights) is a
//! parameter, so independent calls can run concurrently without locking.

#![warn(missing_docs)]

pub mod graph;
pub mod normalize;
pub mod ranker;
pub mod scoring;

pub use graph::{CycleReport, DependencyMap};
pub use normalize::normalize_tasks;
pub use ranker::{
    analyze, list_strategies, suggest, top_suggestions, AnalysisOptions, AnalysisReport,
    Confidence, SuggestReport, Suggestion, SUGGESTION_COUNT,
};
pub use scoring::{
    dependency_score, effort_score, importance_score, urgency_score, DueStatus, FactorScores,
};
