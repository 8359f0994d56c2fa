use crate::schedule::Schedule;
use crate::workload::Workload;

/// Time to move the data of the edge `from -> to` between the given
/// processors. Zero when both tasks run on the same processor.
pub fn communication_cost(
    workload: &Workload,
    from: usize,
    to: usize,
    from_processor: usize,
    to_processor: usize,
) -> f64 {
    if from_processor == to_processor {
        return 0.;
    }
    workload.data_volume(from, to) / workload.transfer_rate(from_processor, to_processor)
}

/// Earliest time `task` could start on `processor` given the placements made
/// so far: bounded by the processor's availability and by the arrival of data
/// from every scheduled predecessor. Predecessors that are not scheduled yet
/// are skipped. The entry task always starts at 0.
pub fn est(workload: &Workload, task: usize, processor: usize, schedule: &Schedule) -> f64 {
    if task == workload.entry_task() {
        return 0.;
    }
    let mut ready = schedule.availability(processor);
    for &pred in workload.predecessors(task) {
        let entry = schedule.entry(pred);
        if let Some(pred_processor) = entry.processor {
            let arrival = entry.finish + communication_cost(workload, pred, task, pred_processor, processor);
            ready = ready.max(arrival);
        }
    }
    ready
}

/// Earliest finish time of `task` on `processor` against the current schedule.
pub fn eft(workload: &Workload, task: usize, processor: usize, schedule: &Schedule) -> f64 {
    est(workload, task, processor, schedule) + workload.execution_cost(task, processor)
}

/// Evaluates `task` on every processor and returns the placement with the
/// minimal earliest finish time as `(processor, start, finish)`. Processors
/// are scanned from 0 upward, so the lowest index wins ties.
pub fn min_eft_placement(workload: &Workload, task: usize, schedule: &Schedule) -> (usize, f64, f64) {
    let mut best = (0, 0., f64::MAX);
    for processor in 0..workload.processor_count() {
        let start = est(workload, task, processor, schedule);
        let finish = start + workload.execution_cost(task, processor);
        if finish < best.2 {
            best = (processor, start, finish);
        }
    }
    best
}
