//! Weight configurations and the strategy registry.

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, Result};

/// Relative weights for the four scoring factors.
///
/// The coefficients need not sum to 1; the ranker treats them as relative
/// weights, not a probability distribution. Negative or non-finite values
/// are rejected by [`WeightConfig::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightConfig {
    /// Urgency weight
    pub u: f64,
    /// Importance weight
    pub i: f64,
    /// Effort weight
    pub e: f64,
    /// Dependency weight
    pub d: f64,
}

impl WeightConfig {
    /// Create a weight configuration, validating the coefficients.
    pub fn new(u: f64, i: f64, e: f64, d: f64) -> Result<Self> {
        let config = Self { u, i, e, d };
        config.validate()?;
        Ok(config)
    }

    /// Reject negative or non-finite coefficients.
    pub fn validate(&self) -> Result<()> {
        for (factor, value) in [("u", self.u), ("i", self.i), ("e", self.e), ("d", self.d)] {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidWeight { factor, value });
            }
        }
        Ok(())
    }
}

/// Named weight presets consumable by the ranker.
///
/// The registry is a fixed lookup table; there is no process-wide mutable
/// state, so analyses on independent threads never interfere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Balanced approach considering all factors
    SmartBalance,
    /// Prioritizes quick wins - tasks that take less time
    Fastest,
    /// Prioritizes importance over other factors
    HighImpact,
    /// Prioritizes urgent tasks based on due dates
    Deadline,
}

impl Strategy {
    /// All registered strategies, in registry order.
    pub fn all() -> [Strategy; 4] {
        [
            Strategy::SmartBalance,
            Strategy::Fastest,
            Strategy::HighImpact,
            Strategy::Deadline,
        ]
    }

    /// The preset weights for this strategy.
    pub fn weights(&self) -> WeightConfig {
        match self {
            Strategy::SmartBalance => WeightConfig { u: 0.35, i: 0.35, e: 0.15, d: 0.15 },
            Strategy::Fastest => WeightConfig { u: 0.15, i: 0.20, e: 0.50, d: 0.15 },
            Strategy::HighImpact => WeightConfig { u: 0.15, i: 0.60, e: 0.10, d: 0.15 },
            Strategy::Deadline => WeightConfig { u: 0.60, i: 0.25, e: 0.05, d: 0.10 },
        }
    }

    /// The registry name of this strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "smart_balance",
            Strategy::Fastest => "fastest",
            Strategy::HighImpact => "high_impact",
            Strategy::Deadline => "deadline",
        }
    }

    /// One-line human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Strategy::SmartBalance => "Balanced approach considering all factors equally",
            Strategy::Fastest => "Prioritizes quick wins - tasks that take less time",
            Strategy::HighImpact => "Prioritizes importance over other factors",
            Strategy::Deadline => "Prioritizes urgent tasks based on due dates",
        }
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::SmartBalance
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Strategy {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "smart_balance" => Ok(Strategy::SmartBalance),
            "fastest" => Ok(Strategy::Fastest),
            "high_impact" => Ok(Strategy::HighImpact),
            "deadline" => Ok(Strategy::Deadline),
            other => Err(AnalysisError::UnknownStrategy(other.to_string())),
        }
    }
}

/// A registry entry: strategy name, description and preset weights.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyInfo {
    /// Registry name
    pub name: &'static str,
    /// Human-readable description
    pub description: &'static str,
    /// Preset weights
    pub weights: WeightConfig,
}

impl From<Strategy> for StrategyInfo {
    fn from(strategy: Strategy) -> Self {
        Self {
            name: strategy.name(),
            description: strategy.description(),
            weights: strategy.weights(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_weights_match_registry() {
        let w = Strategy::SmartBalance.weights();
        assert_eq!((w.u, w.i, w.e, w.d), (0.35, 0.35, 0.15, 0.15));

        let w = Strategy::Deadline.weights();
        assert_eq!((w.u, w.i, w.e, w.d), (0.60, 0.25, 0.05, 0.10));
    }

    #[test]
    fn validate_rejects_negative_weight() {
        let err = WeightConfig::new(0.35, -0.1, 0.15, 0.15).unwrap_err();
        assert_eq!(
            err,
            AnalysisError::InvalidWeight { factor: "i", value: -0.1 }
        );
    }

    #[test]
    fn validate_rejects_non_finite_weight() {
        assert!(WeightConfig::new(f64::NAN, 0.0, 0.0, 0.0).is_err());
        assert!(WeightConfig::new(0.0, 0.0, f64::INFINITY, 0.0).is_err());
    }

    #[test]
    fn validate_allows_weights_above_one() {
        // Weights are relative coefficients, not a distribution.
        assert!(WeightConfig::new(2.0, 0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn strategy_names_round_trip() {
        for strategy in Strategy::all() {
            assert_eq!(strategy.name().parse::<Strategy>().unwrap(), strategy);
        }
        assert!(matches!(
            "does_not_exist".parse::<Strategy>(),
            Err(AnalysisError::UnknownStrategy(_))
        ));
    }
}
