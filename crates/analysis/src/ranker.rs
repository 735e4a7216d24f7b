//! Weighted ranking - combines factor scores into the final ordering.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use taskrank_core::{
    AnalyzedTask, PriorityLabel, Result, Strategy, StrategyInfo, Task, TaskInput, Time,
    WeightConfig, HIGH_PRIORITY_THRESHOLD, MEDIUM_PRIORITY_THRESHOLD,
};

use crate::graph::{CycleReport, DependencyMap};
use crate::normalize::normalize_tasks;
use crate::scoring::{self, DueStatus, FactorScores};

/// How many tasks the suggestion view returns.
pub const SUGGESTION_COUNT: usize = 3;

/// Upcoming tasks due within this many days get a proximity phrase in
/// their explanation.
const DUE_SOON_DAYS: i64 = 3;

/// Options for one analysis call.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AnalysisOptions {
    /// Named weight preset to use.
    pub strategy: Strategy,

    /// Caller-supplied weights; take precedence over the strategy preset.
    pub custom_weights: Option<WeightConfig>,
}

impl AnalysisOptions {
    /// Use a named strategy preset.
    pub fn with_strategy(strategy: Strategy) -> Self {
        Self { strategy, custom_weights: None }
    }

    /// Override the preset with custom weights.
    pub fn with_weights(mut self, weights: WeightConfig) -> Self {
        self.custom_weights = Some(weights);
        self
    }

    /// The weights this call will actually apply.
    pub fn effective_weights(&self) -> WeightConfig {
        self.custom_weights.unwrap_or_else(|| self.strategy.weights())
    }
}

/// Result of one analysis call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Scored tasks, highest priority first
    pub analyzed: Vec<AnalyzedTask>,

    /// Data-quality warnings, in detection order
    pub warnings: Vec<String>,

    /// Name of the strategy the call was made under
    pub strategy: String,

    /// The weights actually applied
    pub weights: WeightConfig,

    /// Detected dependency cycles, as ordered id paths
    pub cycles: Vec<Vec<String>>,
}

/// Qualitative confidence attached to a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    /// Score >= 75
    High,
    /// Score >= 50
    Medium,
    /// Everything else
    Moderate,
}

impl Confidence {
    fn from_score(score: f64) -> Self {
        if score >= HIGH_PRIORITY_THRESHOLD {
            Self::High
        } else if score >= MEDIUM_PRIORITY_THRESHOLD {
            Self::Medium
        } else {
            Self::Moderate
        }
    }

    /// Get string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Moderate => "Moderate",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One ranked recommendation from the suggestion view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Suggestion {
    /// The underlying scored task
    #[serde(flatten)]
    pub task: AnalyzedTask,

    /// 1-based position in the ranking
    pub rank: usize,

    /// Qualitative confidence derived from the score
    pub confidence: Confidence,

    /// Recommendation text echoing rank and explanation
    pub recommendation: String,
}

/// Result of a suggestion call: the top of the ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuggestReport {
    /// Top-ranked tasks with rank/confidence attached
    pub suggestions: Vec<Suggestion>,

    /// How many tasks were analyzed in total
    pub total_tasks: usize,

    /// Name of the strategy the call was made under
    pub strategy: String,

    /// Data-quality warnings from the underlying analysis
    pub warnings: Vec<String>,
}

/// Score and rank a set of tasks.
///
/// The sole entry point of the engine: normalizes the raw records, runs
/// cycle detection and dependent counting, scores the four factors per
/// task and returns the ranked result. Data-quality problems become
/// warnings; only a malformed weight configuration is an error.
///
/// The call is pure - identical inputs with an identical `now` produce an
/// identical report.
pub fn analyze(
    tasks: Vec<TaskInput>,
    options: &AnalysisOptions,
    now: Time,
) -> Result<AnalysisReport> {
    let weights = options.effective_weights();
    weights.validate()?;

    let input_count = tasks.len();
    let mut warnings = Vec::new();
    let tasks = normalize_tasks(tasks, &mut warnings);
    debug!(
        input_count,
        valid = tasks.len(),
        strategy = options.strategy.name(),
        "analyzing tasks"
    );

    if tasks.is_empty() {
        if input_count > 0 {
            warnings.push("No valid tasks to analyze".to_string());
        }
        return Ok(AnalysisReport {
            analyzed: Vec::new(),
            warnings,
            strategy: options.strategy.name().to_string(),
            weights,
            cycles: Vec::new(),
        });
    }

    let cycle_report = CycleReport::detect(&tasks);
    for cycle in &cycle_report.cycles {
        warnings.push(format!(
            "Circular dependency detected: {}",
            CycleReport::describe_cycle(cycle)
        ));
    }

    let dependency_map = DependencyMap::build(&tasks);
    if !dependency_map.missing.is_empty() {
        let ids: Vec<&str> = dependency_map.missing.iter().map(String::as_str).collect();
        warnings.push(format!("Missing dependency ids referenced: {}", ids.join(", ")));
    }

    let max_hours = tasks
        .iter()
        .map(|t| t.estimated_hours)
        .fold(0.0_f64, f64::max);
    let today = now.date_naive();

    let mut analyzed: Vec<AnalyzedTask> = tasks
        .into_iter()
        .map(|task| score_task(task, &weights, &dependency_map, &cycle_report, max_hours, today))
        .collect();

    // Stable sort: score desc, dependents desc, hours asc; ties keep
    // input order.
    analyzed.sort_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b.num_dependents.cmp(&a.num_dependents))
            .then_with(|| a.estimated_hours.total_cmp(&b.estimated_hours))
    });

    Ok(AnalysisReport {
        analyzed,
        warnings,
        strategy: options.strategy.name().to_string(),
        weights,
        cycles: cycle_report.cycles,
    })
}

/// Analyze and return the top recommendations with rank and confidence.
pub fn suggest(
    tasks: Vec<TaskInput>,
    options: &AnalysisOptions,
    now: Time,
) -> Result<SuggestReport> {
    let report = analyze(tasks, options, now)?;
    Ok(top_suggestions(report, SUGGESTION_COUNT))
}

/// Take the first `count` entries of a ranked report as suggestions.
pub fn top_suggestions(report: AnalysisReport, count: usize) -> SuggestReport {
    let total_tasks = report.analyzed.len();
    let suggestions = report
        .analyzed
        .into_iter()
        .take(count)
        .enumerate()
        .map(|(idx, task)| {
            let rank = idx + 1;
            let confidence = Confidence::from_score(task.score);
            let recommendation = format!("Rank #{rank}: {}", task.explanation);
            Suggestion { task, rank, confidence, recommendation }
        })
        .collect();

    SuggestReport {
        suggestions,
        total_tasks,
        strategy: report.strategy,
        warnings: report.warnings,
    }
}

/// The strategy registry: every preset with its weights and description.
pub fn list_strategies() -> Vec<StrategyInfo> {
    Strategy::all().into_iter().map(StrategyInfo::from).collect()
}

fn score_task(
    task: Task,
    weights: &WeightConfig,
    dependency_map: &DependencyMap,
    cycle_report: &CycleReport,
    max_hours: f64,
    today: NaiveDate,
) -> AnalyzedTask {
    let num_dependents = dependency_map.num_dependents(&task.id);
    let (urgency, due_status) = scoring::urgency_score(task.due_date, today);
    let factors = FactorScores {
        urgency,
        importance: scoring::importance_score(task.importance),
        effort: scoring::effort_score(task.estimated_hours, max_hours),
        dependency: scoring::dependency_score(num_dependents, dependency_map.max_dependents),
    };

    let score = round2(factors.weighted_score(weights));
    let explanation =
        build_explanation(due_status, task.importance, task.estimated_hours, num_dependents);

    AnalyzedTask {
        in_circular_dependency: cycle_report.in_cycle.contains(&task.id),
        score,
        priority_label: PriorityLabel::from_score(score),
        explanation,
        num_dependents,
        id: task.id,
        title: task.title,
        due_date: task.due_date,
        estimated_hours: task.estimated_hours,
        importance: task.importance,
        dependencies: task.dependencies,
    }
}

fn build_explanation(
    due_status: DueStatus,
    importance: u8,
    hours: f64,
    num_dependents: usize,
) -> String {
    let mut parts: Vec<String> = Vec::new();

    match due_status {
        DueStatus::Overdue { late_days: 1 } => parts.push("OVERDUE by 1 day".to_string()),
        DueStatus::Overdue { late_days } => parts.push(format!("OVERDUE by {late_days} days")),
        DueStatus::DueToday => parts.push("Due TODAY".to_string()),
        DueStatus::Upcoming { days_left: 1 } => parts.push("Due in 1 day".to_string()),
        DueStatus::Upcoming { days_left } if days_left <= DUE_SOON_DAYS => {
            parts.push(format!("Due in {days_left} days"))
        }
        DueStatus::Upcoming { .. } | DueStatus::NoDueDate => {}
    }

    if importance >= 8 {
        parts.push(format!("High importance ({importance}/10)"));
    } else if importance >= 6 {
        parts.push(format!("Medium importance ({importance}/10)"));
    }

    if hours <= 2.0 {
        parts.push(format!("Quick win ({hours}h)"));
    }

    if num_dependents == 1 {
        parts.push("Blocks 1 task".to_string());
    } else if num_dependents > 1 {
        parts.push(format!("Blocks {num_dependents} tasks"));
    }

    if parts.is_empty() {
        "Standard priority task".to_string()
    } else {
        parts.join(". ")
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
