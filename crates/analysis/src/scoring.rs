//! Factor scoring: the four normalized component scores per task.

use chrono::NaiveDate;
use taskrank_core::WeightConfig;

/// Urgency assigned to a task with no due date.
pub const NEUTRAL_URGENCY: f64 = 0.5;

/// Days of lateness at which the overdue bonus saturates.
pub const LATENESS_SATURATION_DAYS: f64 = 7.0;

/// Days out at which future urgency decays to zero.
pub const URGENCY_HORIZON_DAYS: f64 = 30.0;

/// Due-date proximity relative to the analysis timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueStatus {
    /// No due date was given
    NoDueDate,
    /// The due date has passed
    Overdue {
        /// Whole days past due
        late_days: i64,
    },
    /// Due on the analysis day itself
    DueToday,
    /// Due in the future
    Upcoming {
        /// Whole days until due
        days_left: i64,
    },
}

/// The four component scores for one task.
///
/// Importance, effort and dependency lie in [0, 1]; urgency reaches 2.0
/// for heavily overdue tasks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorScores {
    /// Urgency (U)
    pub urgency: f64,
    /// Importance (I)
    pub importance: f64,
    /// Effort (E)
    pub effort: f64,
    /// Dependency (D)
    pub dependency: f64,
}

impl FactorScores {
    /// Combine the factors under a weight configuration, on a 0-100 scale.
    pub fn weighted_score(&self, weights: &WeightConfig) -> f64 {
        100.0
            * (weights.u * self.urgency
                + weights.i * self.importance
                + weights.e * self.effort
                + weights.d * self.dependency)
    }
}

/// Urgency score from the due date.
///
/// Overdue tasks score above 1.0 with a lateness bonus that saturates at
/// seven days; future tasks decay linearly to 0 over thirty days; due
/// today is exactly 1.0; no due date is neutral.
pub fn urgency_score(due_date: Option<NaiveDate>, today: NaiveDate) -> (f64, DueStatus) {
    let Some(due) = due_date else {
        return (NEUTRAL_URGENCY, DueStatus::NoDueDate);
    };

    let days_left = (due - today).num_days();
    if days_left < 0 {
        let late_days = -days_left;
        let bonus = (late_days as f64 / LATENESS_SATURATION_DAYS).min(1.0);
        (1.0 + bonus, DueStatus::Overdue { late_days })
    } else if days_left == 0 {
        (1.0, DueStatus::DueToday)
    } else {
        let score = (1.0 - days_left as f64 / URGENCY_HORIZON_DAYS).max(0.0);
        (score, DueStatus::Upcoming { days_left })
    }
}

/// Importance score: the 1-10 rating mapped linearly onto [0, 1].
pub fn importance_score(importance: u8) -> f64 {
    f64::from(importance - 1) / 9.0
}

/// Effort score: logarithmic quick-win scaling against the largest
/// estimate in the call.
///
/// Zero hours score 1.0; the task holding `max_hours` scores 0. When
/// every task is zero-effort the log ratio would divide by zero, so all
/// tasks score 1.0.
pub fn effort_score(hours: f64, max_hours: f64) -> f64 {
    if max_hours <= 0.0 {
        return 1.0;
    }
    1.0 - (hours + 1.0).ln() / (max_hours + 1.0).ln()
}

/// Dependency score: dependent count relative to the most-depended-on
/// task, 0 for every task when nothing has dependents.
pub fn dependency_score(num_dependents: usize, max_dependents: usize) -> f64 {
    if max_dependents == 0 {
        return 0.0;
    }
    num_dependents as f64 / max_dependents as f64
}
