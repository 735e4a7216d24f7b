//! taskrank CLI - scores and ranks tasks from a JSON request document.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde::Deserialize;
use tracing::Level;

use taskrank_analysis::{analyze, list_strategies, suggest, AnalysisOptions};
use taskrank_core::{Strategy, TaskInput, WeightConfig};

#[derive(Parser)]
#[command(name = "taskrank")]
#[command(about = "Task priority scoring and ranking", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and rank every task in a request document
    Analyze {
        /// Path to a JSON request document
        file: PathBuf,
        /// Strategy name, overriding the document
        #[arg(long)]
        strategy: Option<String>,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the top recommendations
    Suggest {
        /// Path to a JSON request document
        file: PathBuf,
        /// Strategy name, overriding the document
        #[arg(long)]
        strategy: Option<String>,
        /// Emit the full report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List the registered strategies
    Strategies,
}

/// Request document: a task list plus optional strategy and weight
/// overrides.
#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    tasks: Vec<TaskInput>,
    #[serde(default)]
    strategy: Option<String>,
    #[serde(default)]
    weights: Option<WeightConfig>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze { file, strategy, json } => {
            let (tasks, options) = load_request(&file, strategy.as_deref())?;
            let report = analyze(tasks, &options, Utc::now())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            print_warnings(&report.warnings);
            println!("Tasks ({}) | strategy: {}", report.analyzed.len(), report.strategy);
            for (idx, task) in report.analyzed.iter().enumerate() {
                let cycle_mark = if task.in_circular_dependency { " [cycle]" } else { "" };
                println!(
                    "  {:>2}. {:>6.2} | {:<6} | {} - {}{}",
                    idx + 1,
                    task.score,
                    task.priority_label,
                    task.id,
                    task.title,
                    cycle_mark,
                );
                println!("      {}", task.explanation);
            }
        }
        Commands::Suggest { file, strategy, json } => {
            let (tasks, options) = load_request(&file, strategy.as_deref())?;
            let report = suggest(tasks, &options, Utc::now())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            print_warnings(&report.warnings);
            println!(
                "Top {} of {} tasks | strategy: {}",
                report.suggestions.len(),
                report.total_tasks,
                report.strategy,
            );
            for suggestion in &report.suggestions {
                println!(
                    "  #{} {} ({} confidence, score {:.2})",
                    suggestion.rank,
                    suggestion.task.title,
                    suggestion.confidence,
                    suggestion.task.score,
                );
                println!("     {}", suggestion.recommendation);
            }
        }
        Commands::Strategies => {
            let strategies = list_strategies();
            println!("Strategies ({})", strategies.len());
            for info in strategies {
                let w = info.weights;
                println!(
                    "  {:<13} | u={:.2} i={:.2} e={:.2} d={:.2} | {}",
                    info.name, w.u, w.i, w.e, w.d, info.description,
                );
            }
        }
    }

    Ok(())
}

fn load_request(
    path: &Path,
    strategy_override: Option<&str>,
) -> Result<(Vec<TaskInput>, AnalysisOptions)> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading request file {}", path.display()))?;
    let request: AnalyzeRequest = serde_json::from_str(&text)
        .with_context(|| format!("parsing request file {}", path.display()))?;

    let strategy = match strategy_override.or(request.strategy.as_deref()) {
        Some(name) => name.parse::<Strategy>()?,
        None => Strategy::default(),
    };

    let mut options = AnalysisOptions::with_strategy(strategy);
    if let Some(weights) = request.weights {
        options = options.with_weights(weights);
    }

    Ok((request.tasks, options))
}

fn print_warnings(warnings: &[String]) {
    for warning in warnings {
        eprintln!("warning: {warning}");
    }
}
