use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use log::{debug, info};

use crate::ranks::priorities;
use crate::schedule::Schedule;
use crate::scheduler::Scheduler;
use crate::schedulers::common::{est, min_eft_placement};
use crate::workload::Workload;

/// Two priorities within this distance are treated as equal when following
/// the critical path.
const PRIORITY_TOLERANCE: f64 = 0.005;

#[derive(Clone, Debug)]
struct ReadyTask {
    priority: f64,
    task: usize,
}

impl PartialOrd for ReadyTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        // descending priority, ascending task index on ties
        Some(self.priority.total_cmp(&other.priority).then(other.task.cmp(&self.task)))
    }
}

impl Ord for ReadyTask {
    fn cmp(&self, other: &Self) -> Ordering {
        self.partial_cmp(other).unwrap()
    }
}

impl PartialEq for ReadyTask {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.task == other.task
    }
}

impl Eq for ReadyTask {}

/// Critical Path on a Processor. Pins every critical-path task to the
/// processor with the minimal total execution cost along the path, places the
/// remaining tasks by earliest finish time, and releases tasks in priority
/// order as their predecessors complete.
pub struct CpopScheduler;

impl CpopScheduler {
    pub fn new() -> Self {
        CpopScheduler
    }

    /// Walks from the entry task to the exit task, at each step following the
    /// first successor whose priority matches the critical path length.
    /// Returns the path in walk order.
    fn critical_path(workload: &Workload, task_priorities: &[f64]) -> Vec<usize> {
        let critical_priority = task_priorities[workload.entry_task()];
        let mut path = vec![workload.entry_task()];
        let mut task = workload.entry_task();
        while task != workload.exit_task() {
            let &next = workload
                .successors(task)
                .iter()
                .find(|&&succ| (task_priorities[succ] - critical_priority).abs() < PRIORITY_TOLERANCE)
                .unwrap_or_else(|| panic!("no successor of task {} continues the critical path", task));
            path.push(next);
            task = next;
        }
        path
    }

    // summing in walk order keeps the argmin stable on near-tie cost tables
    fn critical_path_processor(workload: &Workload, path: &[usize]) -> usize {
        let mut best_processor = 0;
        let mut best_cost = f64::MAX;
        for processor in 0..workload.processor_count() {
            let cost = path
                .iter()
                .map(|&task| workload.execution_cost(task, processor))
                .sum::<f64>();
            if cost < best_cost {
                best_cost = cost;
                best_processor = processor;
            }
        }
        best_processor
    }
}

impl Scheduler for CpopScheduler {
    fn schedule(&self, workload: &Workload) -> Schedule {
        let task_count = workload.task_count();
        let task_priorities = priorities(workload);

        let path = Self::critical_path(workload, &task_priorities);
        let path_processor = Self::critical_path_processor(workload, &path);
        debug!(
            "critical path has {} tasks, pinned to processor {}",
            path.len(),
            path_processor
        );
        let critical_tasks: HashSet<usize> = path.into_iter().collect();

        let mut schedule = Schedule::new(task_count, workload.processor_count());
        let mut scheduled = 0;
        let mut queue = BinaryHeap::new();
        queue.push(ReadyTask {
            priority: task_priorities[workload.entry_task()],
            task: workload.entry_task(),
        });

        while let Some(ReadyTask { task, .. }) = queue.pop() {
            if schedule.is_scheduled(task) {
                continue;
            }

            let (processor, start, finish) = if critical_tasks.contains(&task) {
                let start = est(workload, task, path_processor, &schedule);
                (path_processor, start, start + workload.execution_cost(task, path_processor))
            } else {
                min_eft_placement(workload, task, &schedule)
            };
            debug!(
                "scheduling [cpop] task {} on processor {} at {:.3}-{:.3}",
                task, processor, start, finish
            );
            schedule.assign(task, processor, start, finish);
            scheduled += 1;

            for &succ in workload.successors(task) {
                if schedule.is_scheduled(succ) {
                    continue;
                }
                let ready = workload.predecessors(succ).iter().all(|&pred| schedule.is_scheduled(pred));
                if ready {
                    queue.push(ReadyTask {
                        priority: task_priorities[succ],
                        task: succ,
                    });
                }
            }
        }

        assert_eq!(scheduled, task_count, "not all tasks were scheduled");
        info!("expected makespan: {:.3}", schedule.makespan());
        schedule
    }

    fn name(&self) -> &'static str {
        "cpop"
    }
}
