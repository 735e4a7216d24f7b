//! Error type for analysis operations.

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that reject an analysis call before any scoring happens.
///
/// Data-quality problems in individual tasks never produce an error;
/// they are reported through the warnings list of the analysis report.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// A weight coefficient is negative or not a finite number.
    #[error("weight '{factor}' must be a non-negative finite number, got {value}")]
    InvalidWeight {
        /// Which coefficient failed validation ("u", "i", "e" or "d").
        factor: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// A strategy name that is not in the registry.
    #[error("unknown strategy '{0}'")]
    UnknownStrategy(String),
}
