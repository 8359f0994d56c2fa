//! Workload statistics.

use serde::Serialize;

use crate::workload::Workload;

/// Aggregate facts about a workload.
#[derive(Clone, Debug, Serialize)]
pub struct WorkloadStats {
    pub task_count: usize,
    pub edge_count: usize,
    pub processor_count: usize,
    /// Sum of data volumes over all edges.
    pub total_data: f64,
    /// Sum over tasks of the minimum execution cost across processors.
    pub total_min_work: f64,
    /// Longest entry-to-exit path counting minimum execution costs and no
    /// communication.
    pub critical_path_min_work: f64,
}

impl WorkloadStats {
    pub fn new(workload: &Workload) -> Self {
        let task_count = workload.task_count();
        Self {
            task_count,
            edge_count: (0..task_count).map(|task| workload.successors(task).len()).sum(),
            processor_count: workload.processor_count(),
            total_data: (0..task_count)
                .flat_map(|task| {
                    workload
                        .successors(task)
                        .iter()
                        .map(move |&succ| workload.data_volume(task, succ))
                })
                .sum(),
            total_min_work: (0..task_count).map(|task| min_execution_cost(workload, task)).sum(),
            critical_path_min_work: critical_path_min_work(workload),
        }
    }
}

/// A makespan no schedule can beat: the larger of the best-case critical path
/// and the total best-case work spread perfectly over all processors.
pub fn makespan_lower_bound(workload: &Workload) -> f64 {
    let total_min_work: f64 = (0..workload.task_count())
        .map(|task| min_execution_cost(workload, task))
        .sum();
    let balanced = total_min_work / workload.processor_count() as f64;
    critical_path_min_work(workload).max(balanced)
}

fn min_execution_cost(workload: &Workload, task: usize) -> f64 {
    (0..workload.processor_count())
        .map(|processor| workload.execution_cost(task, processor))
        .min_by(|a, b| a.total_cmp(b))
        .unwrap()
}

fn critical_path_min_work(workload: &Workload) -> f64 {
    let task_count = workload.task_count();
    let mut ranks = vec![0.; task_count];
    let mut visited = vec![false; task_count];
    for task in 0..task_count {
        calc_rank(task, workload, &mut ranks, &mut visited);
    }
    ranks.into_iter().max_by(|a, b| a.total_cmp(b)).unwrap_or(0.)
}

fn calc_rank(task: usize, workload: &Workload, ranks: &mut [f64], visited: &mut [bool]) {
    if visited[task] {
        return;
    }
    visited[task] = true;

    ranks[task] = 0.;
    for &succ in workload.successors(task) {
        calc_rank(succ, workload, ranks, visited);
        ranks[task] = ranks[task].max(ranks[succ]);
    }
    ranks[task] += min_execution_cost(workload, task);
}
