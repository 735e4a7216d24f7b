//! Field normalization for raw task records.

use std::collections::HashSet;

use chrono::NaiveDate;
use taskrank_core::{Task, TaskInput};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Clean, default and clamp raw task records.
///
/// Tasks without an id are dropped; all other anomalies are repaired in
/// place. One warning is pushed per anomaly, in the order the records were
/// supplied.
pub fn normalize_tasks(inputs: Vec<TaskInput>, warnings: &mut Vec<String>) -> Vec<Task> {
    let mut tasks = Vec::with_capacity(inputs.len());
    let mut seen_ids: HashSet<String> = HashSet::new();

    for (idx, input) in inputs.into_iter().enumerate() {
        let id = match input.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => id.to_string(),
            _ => {
                warnings.push(format!("Task at index {idx} missing 'id' field - skipped"));
                continue;
            }
        };

        if !seen_ids.insert(id.clone()) {
            warnings.push(format!(
                "Duplicate task id '{id}' at index {idx} - keeping first occurrence"
            ));
            continue;
        }

        let title = match input.title.as_deref().map(str::trim) {
            Some(title) if !title.is_empty() => title.to_string(),
            _ => {
                warnings.push(format!("Task '{id}' missing 'title' - using default"));
                format!("Task {id}")
            }
        };

        let due_date = normalize_due_date(&id, input.due_date.as_deref(), warnings);

        let estimated_hours = match input.estimated_hours {
            Some(hours) if hours < 0.0 => {
                warnings.push(format!(
                    "Task '{id}' has negative estimated_hours ({hours}) - clamped to 0"
                ));
                0.0
            }
            Some(hours) => hours,
            None => 1.0,
        };

        let importance = match input.importance {
            Some(value) if !(1..=10).contains(&value) => {
                let clamped = value.clamp(1, 10);
                warnings.push(format!(
                    "Task '{id}' importance {value} out of range - clamped to {clamped}"
                ));
                clamped as u8
            }
            Some(value) => value as u8,
            None => 5,
        };

        // Dependencies are a set: drop repeats, keep first-seen order.
        let mut dep_seen = HashSet::new();
        let dependencies = input
            .dependencies
            .into_iter()
            .filter(|dep| dep_seen.insert(dep.clone()))
            .collect();

        tasks.push(Task {
            id,
            title,
            due_date,
            estimated_hours,
            importance,
            dependencies,
        });
    }

    tasks
}

fn normalize_due_date(
    id: &str,
    raw: Option<&str>,
    warnings: &mut Vec<String>,
) -> Option<NaiveDate> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warnings.push(format!(
                "Task '{id}' has unparsable due_date '{raw}' - treated as no due date"
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(id: &str) -> TaskInput {
        TaskInput {
            id: Some(id.to_string()),
            title: Some(format!("{id} title")),
            ..Default::default()
        }
    }

    #[test]
    fn missing_id_drops_task_with_warning() {
        let mut warnings = Vec::new();
        let tasks = normalize_tasks(
            vec![TaskInput::default(), input("t1")],
            &mut warnings,
        );

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "t1");
        assert_eq!(warnings, vec!["Task at index 0 missing 'id' field - skipped"]);
    }

    #[test]
    fn blank_id_is_treated_as_missing() {
        let mut warnings = Vec::new();
        let tasks = normalize_tasks(
            vec![TaskInput { id: Some("   ".to_string()), ..Default::default() }],
            &mut warnings,
        );

        assert!(tasks.is_empty());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn duplicate_id_keeps_first_occurrence() {
        let mut warnings = Vec::new();
        let mut second = input("t1");
        second.title = Some("second".to_string());
        let tasks = normalize_tasks(vec![input("t1"), second], &mut warnings);

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "t1 title");
        assert!(warnings[0].contains("Duplicate task id 't1'"));
    }

    #[test]
    fn blank_title_gets_default() {
        let mut warnings = Vec::new();
        let tasks = normalize_tasks(
            vec![TaskInput { id: Some("t1".to_string()), ..Default::default() }],
            &mut warnings,
        );

        assert_eq!(tasks[0].title, "Task t1");
        assert!(warnings[0].contains("missing 'title'"));
    }

    #[test]
    fn defaults_for_absent_fields() {
        let mut warnings = Vec::new();
        let tasks = normalize_tasks(vec![input("t1")], &mut warnings);

        assert_eq!(tasks[0].estimated_hours, 1.0);
        assert_eq!(tasks[0].importance, 5);
        assert!(tasks[0].due_date.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut warnings = Vec::new();
        let mut raw = input("t1");
        raw.importance = Some(42);
        raw.estimated_hours = Some(-3.0);
        let tasks = normalize_tasks(vec![raw], &mut warnings);

        assert_eq!(tasks[0].importance, 10);
        assert_eq!(tasks[0].estimated_hours, 0.0);
        assert_eq!(warnings.len(), 2);
    }

    #[test]
    fn due_date_parsing() {
        let mut warnings = Vec::new();
        let mut ok = input("t1");
        ok.due_date = Some("2026-08-23".to_string());
        let mut blank = input("t2");
        blank.due_date = Some("  ".to_string());
        let mut bad = input("t3");
        bad.due_date = Some("next tuesday".to_string());
        let tasks = normalize_tasks(vec![ok, blank, bad], &mut warnings);

        assert_eq!(
            tasks[0].due_date,
            Some(NaiveDate::from_ymd_opt(2026, 8, 23).unwrap())
        );
        assert!(tasks[1].due_date.is_none());
        assert!(tasks[2].due_date.is_none());
        // Blank dates are silently absent; only the unparsable one warns.
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("unparsable due_date"));
    }

    #[test]
    fn dependency_lists_are_deduplicated() {
        let mut warnings = Vec::new();
        let mut raw = input("t1");
        raw.dependencies = vec!["a".into(), "b".into(), "a".into()];
        let tasks = normalize_tasks(vec![raw], &mut warnings);

        assert_eq!(tasks[0].dependencies, vec!["a".to_string(), "b".to_string()]);
    }
}
