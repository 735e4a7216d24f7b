//! Dependency graph analysis: cycle detection and dependent counting.
//!
//! Edges point from a task to the tasks it depends on. Dependency ids
//! that do not name a task in the input set are never traversed; the
//! dependency map collects them for a single aggregate warning.

use std::collections::{BTreeSet, HashMap, HashSet};

use taskrank_core::Task;

/// Node state for the three-color depth-first search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Color {
    /// Not yet visited
    White,
    /// On the current traversal path
    Gray,
    /// Fully explored
    Black,
}

/// Result of cycle detection over the task dependency graph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Each detected cycle as an ordered task-id path; the closing edge
    /// back to the first element is implied.
    pub cycles: Vec<Vec<String>>,

    /// Ids of every task on a cycle or reachable from one along
    /// dependency edges.
    pub in_cycle: HashSet<String>,
}

impl CycleReport {
    /// Run the three-color DFS over the normalized task set.
    ///
    /// Uses an explicit stack so deep dependency chains cannot overflow
    /// the call stack. Each node is expanded exactly once; total work is
    /// O(V+E).
    pub fn detect(tasks: &[Task]) -> Self {
        let index: HashMap<&str, usize> = tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        // Adjacency restricted to known ids; unknown deps are leaves.
        let adjacency: Vec<Vec<usize>> = tasks
            .iter()
            .map(|task| {
                task.dependencies
                    .iter()
                    .filter_map(|dep| index.get(dep.as_str()).copied())
                    .collect()
            })
            .collect();

        let mut color = vec![Color::White; tasks.len()];
        let mut path: Vec<usize> = Vec::new();
        let mut cycles: Vec<Vec<usize>> = Vec::new();

        enum Frame {
            Enter(usize),
            Exit(usize),
        }

        for root in 0..tasks.len() {
            if color[root] != Color::White {
                continue;
            }

            let mut stack = vec![Frame::Enter(root)];
            while let Some(frame) = stack.pop() {
                match frame {
                    Frame::Enter(node) => {
                        if color[node] != Color::White {
                            continue;
                        }
                        color[node] = Color::Gray;
                        path.push(node);
                        stack.push(Frame::Exit(node));

                        for &next in adjacency[node].iter().rev() {
                            match color[next] {
                                Color::White => stack.push(Frame::Enter(next)),
                                Color::Gray => {
                                    // Back edge: the cycle is the path
                                    // slice from `next` through `node`.
                                    let start =
                                        path.iter().position(|&n| n == next).unwrap_or(0);
                                    cycles.push(path[start..].to_vec());
                                }
                                Color::Black => {}
                            }
                        }
                    }
                    Frame::Exit(node) => {
                        color[node] = Color::Black;
                        path.pop();
                    }
                }
            }
        }

        // Flag cycle members plus everything reachable from them.
        let mut in_cycle: HashSet<usize> = HashSet::new();
        let mut frontier: Vec<usize> = cycles.iter().flatten().copied().collect();
        while let Some(node) = frontier.pop() {
            if !in_cycle.insert(node) {
                continue;
            }
            frontier.extend(adjacency[node].iter().copied());
        }

        Self {
            cycles: cycles
                .into_iter()
                .map(|cycle| cycle.into_iter().map(|n| tasks[n].id.clone()).collect())
                .collect(),
            in_cycle: in_cycle.into_iter().map(|n| tasks[n].id.clone()).collect(),
        }
    }

    /// Render a cycle as a closed `a -> b -> a` path for warnings.
    pub fn describe_cycle(cycle: &[String]) -> String {
        let mut path = cycle.join(" -> ");
        if let Some(first) = cycle.first() {
            path.push_str(" -> ");
            path.push_str(first);
        }
        path
    }
}

/// Per-task dependent counts for the current analysis call.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DependencyMap {
    dependents: HashMap<String, usize>,

    /// Highest dependent count across the set (0 when nothing is
    /// depended on).
    pub max_dependents: usize,

    /// Dependency ids referenced but absent from the input set; sorted
    /// so the aggregate warning is deterministic.
    pub missing: BTreeSet<String>,
}

impl DependencyMap {
    /// Count, for every task, how many other tasks depend on it.
    pub fn build(tasks: &[Task]) -> Self {
        let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        let mut dependents: HashMap<String, usize> = HashMap::new();
        let mut missing = BTreeSet::new();

        for task in tasks {
            for dep in &task.dependencies {
                if known.contains(dep.as_str()) {
                    *dependents.entry(dep.clone()).or_insert(0) += 1;
                } else {
                    missing.insert(dep.clone());
                }
            }
        }

        let max_dependents = dependents.values().copied().max().unwrap_or(0);
        Self { dependents, max_dependents, missing }
    }

    /// Number of tasks that list `id` as a dependency.
    pub fn num_dependents(&self, id: &str) -> usize {
        self.dependents.get(id).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(id: &str, deps: &[&str]) -> Task {
        Task {
            id: id.to_string(),
            title: format!("Task {id}"),
            due_date: None,
            estimated_hours: 1.0,
            importance: 5,
            dependencies: deps.iter().map(|d| d.to_string()).collect(),
        }
    }

    #[test]
    fn linear_chain_has_no_cycles() {
        let tasks = vec![task("a", &["b"]), task("b", &["c"]), task("c", &[])];
        let report = CycleReport::detect(&tasks);

        assert!(report.cycles.is_empty());
        assert!(report.in_cycle.is_empty());
    }

    #[test]
    fn two_node_mutual_dependency() {
        let tasks = vec![task("a", &["b"]), task("b", &["a"])];
        let report = CycleReport::detect(&tasks);

        assert_eq!(report.cycles.len(), 1);
        let cycle = &report.cycles[0];
        assert_eq!(cycle.len(), 2);
        assert!(cycle.contains(&"a".to_string()));
        assert!(cycle.contains(&"b".to_string()));
        assert!(report.in_cycle.contains("a"));
        assert!(report.in_cycle.contains("b"));
    }

    #[test]
    fn three_node_cycle() {
        let tasks = vec![task("a", &["b"]), task("b", &["c"]), task("c", &["a"])];
        let report = CycleReport::detect(&tasks);

        assert_eq!(report.cycles.len(), 1);
        assert_eq!(report.cycles[0].len(), 3);
        assert_eq!(report.in_cycle.len(), 3);
    }

    #[test]
    fn self_dependency_is_a_cycle_of_length_one() {
        let tasks = vec![task("a", &["a"])];
        let report = CycleReport::detect(&tasks);

        assert_eq!(report.cycles, vec![vec!["a".to_string()]]);
        assert!(report.in_cycle.contains("a"));
    }

    #[test]
    fn flag_propagates_to_tasks_reachable_from_cycle() {
        // a <-> b, and b depends on c; c is downstream of the cycle.
        let tasks = vec![
            task("a", &["b"]),
            task("b", &["a", "c"]),
            task("c", &[]),
            task("d", &[]),
        ];
        let report = CycleReport::detect(&tasks);

        assert!(report.in_cycle.contains("a"));
        assert!(report.in_cycle.contains("b"));
        assert!(report.in_cycle.contains("c"));
        assert!(!report.in_cycle.contains("d"));
    }

    #[test]
    fn unknown_dependencies_are_not_traversed() {
        let tasks = vec![task("a", &["ghost"]), task("b", &["a"])];
        let report = CycleReport::detect(&tasks);

        assert!(report.cycles.is_empty());
        assert!(report.in_cycle.is_empty());
    }

    #[test]
    fn deep_chain_does_not_overflow() {
        let mut tasks: Vec<Task> = (0..10_000)
            .map(|i| {
                let mut t = task(&format!("t{i}"), &[]);
                t.dependencies = vec![format!("t{}", i + 1)];
                t
            })
            .collect();
        tasks.push(task("t10000", &[]));

        let report = CycleReport::detect(&tasks);
        assert!(report.cycles.is_empty());
    }

    #[test]
    fn describe_cycle_closes_the_loop() {
        let cycle = vec!["a".to_string(), "b".to_string()];
        assert_eq!(CycleReport::describe_cycle(&cycle), "a -> b -> a");
    }

    #[test]
    fn dependent_counts() {
        let tasks = vec![
            task("a", &["c"]),
            task("b", &["c"]),
            task("c", &[]),
            task("d", &["a"]),
        ];
        let map = DependencyMap::build(&tasks);

        assert_eq!(map.num_dependents("c"), 2);
        assert_eq!(map.num_dependents("a"), 1);
        assert_eq!(map.num_dependents("b"), 0);
        assert_eq!(map.max_dependents, 2);
        assert!(map.missing.is_empty());
    }

    #[test]
    fn missing_dependencies_are_collected_not_counted() {
        let tasks = vec![task("a", &["ghost", "b"]), task("b", &["ghost"])];
        let map = DependencyMap::build(&tasks);

        assert_eq!(map.num_dependents("ghost"), 0);
        assert_eq!(map.num_dependents("b"), 1);
        assert_eq!(map.missing.iter().collect::<Vec<_>>(), vec!["ghost"]);
    }

    #[test]
    fn max_dependents_is_zero_without_edges() {
        let tasks = vec![task("a", &[]), task("b", &[])];
        let map = DependencyMap::build(&tasks);

        assert_eq!(map.max_dependents, 0);
    }
}
