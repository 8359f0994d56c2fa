use log::{debug, info};

use crate::ranks::upward_ranks;
use crate::schedule::Schedule;
use crate::scheduler::Scheduler;
use crate::schedulers::common::min_eft_placement;
use crate::workload::Workload;

/// Heterogeneous Earliest Finish Time. Orders tasks by non-increasing upward
/// rank and greedily assigns each one to the processor that finishes it
/// earliest.
pub struct HeftScheduler;

impl HeftScheduler {
    pub fn new() -> Self {
        HeftScheduler
    }
}

impl Scheduler for HeftScheduler {
    fn schedule(&self, workload: &Workload) -> Schedule {
        let task_count = workload.task_count();
        let ranks = upward_ranks(workload);

        let mut order = (0..task_count).collect::<Vec<_>>();
        // stable sort, so equal ranks keep ascending task order
        order.sort_by(|&a, &b| ranks[b].total_cmp(&ranks[a]));

        let mut schedule = Schedule::new(task_count, workload.processor_count());
        for task in order.into_iter() {
            let (processor, start, finish) = min_eft_placement(workload, task, &schedule);
            debug!(
                "scheduling [heft] task {} on processor {} at {:.3}-{:.3}",
                task, processor, start, finish
            );
            schedule.assign(task, processor, start, finish);
        }

        info!("expected makespan: {:.3}", schedule.makespan());
        schedule
    }

    fn name(&self) -> &'static str {
        "heft"
    }
}
