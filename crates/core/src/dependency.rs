//! Dependency arrows and dependency groups.
//!
//! Arrows connect the trailing edge of a prerequisite's bar to the leading
//! edge of the dependent bar with a three-segment elbow. Groups are the
//! connected components of the dependency graph, used to colour related
//! bars alike.

use serde::Serialize;
use std::collections::{HashMap, HashSet};

use crate::bars::TaskBar;
use crate::models::{Task, TaskKind};

/// Horizontal gap between a source bar's end and its arrow.
pub const ARROW_SOURCE_MARGIN: i64 = 4;

/// Length of the first horizontal segment before the vertical elbow.
pub const ARROW_ELBOW: i64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ArrowPoint {
    pub x: i64,
    pub y: i64,
}

/// Polyline from a prerequisite task to the task depending on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyArrow {
    /// The prerequisite
    pub from_task: String,
    /// The dependent task
    pub to_task: String,
    /// Source, elbow top, elbow bottom, target
    pub points: [ArrowPoint; 4],
}

/// Route an arrow for every dependency whose both ends have a bar.
///
/// `bars` must be the positioned bars for `tasks`. Dependencies on tasks
/// that are not in the list (filtered out, or unknown ids) are skipped.
pub fn route_arrows(
    tasks: &[Task],
    bars: &[TaskBar],
    cell_width: i64,
    row_height: i64,
) -> Vec<DependencyArrow> {
    let by_id: HashMap<&str, &TaskBar> = bars.iter().map(|b| (b.task_id.as_str(), b)).collect();
    let mid_row = row_height / 2;

    let mut arrows = Vec::new();
    for task in tasks {
        let Some(target) = by_id.get(task.id.as_str()) else {
            continue;
        };

        for source_id in &task.dependencies {
            let Some(source) = by_id.get(source_id.as_str()) else {
                continue;
            };

            let source_x = match source.kind {
                TaskKind::Milestone => source.pixel_left + cell_width / 2,
                TaskKind::Task => source.pixel_right() + ARROW_SOURCE_MARGIN,
            };
            let target_x = match target.kind {
                TaskKind::Milestone => target.pixel_left + cell_width / 2,
                TaskKind::Task => target.pixel_left,
            };
            let source_y = source.pixel_top + mid_row;
            let target_y = target.pixel_top + mid_row;
            let elbow_x = source_x + ARROW_ELBOW;

            arrows.push(DependencyArrow {
                from_task: source.task_id.clone(),
                to_task: target.task_id.clone(),
                points: [
                    ArrowPoint {
                        x: source_x,
                        y: source_y,
                    },
                    ArrowPoint {
                        x: elbow_x,
                        y: source_y,
                    },
                    ArrowPoint {
                        x: elbow_x,
                        y: target_y,
                    },
                    ArrowPoint {
                        x: target_x,
                        y: target_y,
                    },
                ],
            });
        }
    }
    arrows
}

/// Compute connected components in the dependency graph using Union-Find.
///
/// Returns a map from task id to group id. Only tasks that take part in at
/// least one dependency between listed tasks are included; group ids are
/// assigned in list order, so the result is deterministic.
pub fn compute_dependency_groups(tasks: &[Task]) -> HashMap<String, usize> {
    if tasks.is_empty() {
        return HashMap::new();
    }

    let id_to_index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    let mut parent: Vec<usize> = (0..tasks.len()).collect();
    let mut rank: Vec<usize> = vec![0; tasks.len()];

    // Find with path compression
    fn find(parent: &mut [usize], i: usize) -> usize {
        if parent[i] != i {
            parent[i] = find(parent, parent[i]);
        }
        parent[i]
    }

    // Union by rank
    fn union(parent: &mut [usize], rank: &mut [usize], x: usize, y: usize) {
        let root_x = find(parent, x);
        let root_y = find(parent, y);
        if root_x == root_y {
            return;
        }
        match rank[root_x].cmp(&rank[root_y]) {
            std::cmp::Ordering::Less => parent[root_x] = root_y,
            std::cmp::Ordering::Greater => parent[root_y] = root_x,
            std::cmp::Ordering::Equal => {
                parent[root_y] = root_x;
                rank[root_x] += 1;
            }
        }
    }

    let mut linked: HashSet<usize> = HashSet::new();
    for (to_idx, task) in tasks.iter().enumerate() {
        for dep in &task.dependencies {
            if let Some(&from_idx) = id_to_index.get(dep.as_str()) {
                union(&mut parent, &mut rank, from_idx, to_idx);
                linked.insert(from_idx);
                linked.insert(to_idx);
            }
        }
    }

    let mut root_to_group: HashMap<usize, usize> = HashMap::new();
    let mut result = HashMap::new();
    for (i, task) in tasks.iter().enumerate() {
        if !linked.contains(&i) {
            continue;
        }
        let root = find(&mut parent, i);
        let next_group = root_to_group.len();
        let group = *root_to_group.entry(root).or_insert(next_group);
        result.insert(task.id.clone(), group);
    }
    result
}
