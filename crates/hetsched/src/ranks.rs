//! Task ranks.

use crate::workload::Workload;

/// Computes the upward rank of every task: the length of the longest path
/// from the task to the exit task, counting average execution and
/// communication costs.
pub fn upward_ranks(workload: &Workload) -> Vec<f64> {
    let task_count = workload.task_count();
    let mut ranks = vec![0.; task_count];
    let mut visited = vec![false; task_count];
    for task in 0..task_count {
        upward_rank(task, workload, &mut ranks, &mut visited);
    }
    ranks
}

fn upward_rank(task: usize, workload: &Workload, ranks: &mut [f64], visited: &mut [bool]) {
    if visited[task] {
        return;
    }
    visited[task] = true;

    if task == workload.exit_task() {
        ranks[task] = workload.avg_execution_cost(task);
        return;
    }
    ranks[task] = 0.;
    for &succ in workload.successors(task) {
        upward_rank(succ, workload, ranks, visited);
        ranks[task] = ranks[task].max(workload.avg_communication_cost(task, succ) + ranks[succ]);
    }
    ranks[task] += workload.avg_execution_cost(task);
}

/// Computes the downward rank of every task: the length of the longest path
/// from the entry task to the task, counting average costs and excluding the
/// task's own execution. The entry task has downward rank 0.
pub fn downward_ranks(workload: &Workload) -> Vec<f64> {
    let task_count = workload.task_count();
    let mut ranks = vec![0.; task_count];
    let mut visited = vec![false; task_count];
    for task in 0..task_count {
        downward_rank(task, workload, &mut ranks, &mut visited);
    }
    ranks
}

fn downward_rank(task: usize, workload: &Workload, ranks: &mut [f64], visited: &mut [bool]) {
    if visited[task] {
        return;
    }
    visited[task] = true;

    ranks[task] = 0.;
    for &pred in workload.predecessors(task) {
        downward_rank(pred, workload, ranks, visited);
        let through_pred =
            ranks[pred] + workload.avg_execution_cost(pred) + workload.avg_communication_cost(pred, task);
        ranks[task] = ranks[task].max(through_pred);
    }
}

/// Combined priorities, upward plus downward rank. All tasks on a critical
/// path share the entry task's priority.
pub fn priorities(workload: &Workload) -> Vec<f64> {
    let upward = upward_ranks(workload);
    let downward = downward_ranks(workload);
    upward.into_iter().zip(downward).map(|(up, down)| up + down).collect()
}
