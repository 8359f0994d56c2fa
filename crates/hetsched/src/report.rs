//! Schedule report.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use crate::schedule::Schedule;

/// Placement of one task in the report. Task and processor ids are 1-based,
/// matching the workload file formats.
#[derive(Clone, Debug, Serialize)]
pub struct TaskPlacement {
    pub task: usize,
    pub start: f64,
    pub finish: f64,
    pub processor: usize,
}

/// Report of a completed schedule: per-task placements, per-processor task
/// counts and the makespan.
#[derive(Clone, Debug, Serialize)]
pub struct ScheduleSummary {
    pub tasks: Vec<TaskPlacement>,
    pub processor_task_counts: Vec<usize>,
    pub makespan: f64,
}

impl ScheduleSummary {
    /// Builds the summary of a completed schedule. Panics if some task is
    /// still unassigned.
    pub fn new(schedule: &Schedule) -> Self {
        let mut processor_task_counts = vec![0; schedule.processor_count()];
        let tasks = schedule
            .entries()
            .iter()
            .enumerate()
            .map(|(task, entry)| {
                let processor = entry
                    .processor
                    .unwrap_or_else(|| panic!("task {} is not scheduled", task + 1));
                processor_task_counts[processor] += 1;
                TaskPlacement {
                    task: task + 1,
                    start: entry.start,
                    finish: entry.finish,
                    processor: processor + 1,
                }
            })
            .collect();
        Self {
            tasks,
            processor_task_counts,
            makespan: schedule.makespan(),
        }
    }

    /// Writes the plain text report: one line per task in index order, then
    /// one line per processor, then the makespan. Times are printed with two
    /// decimal places.
    pub fn write<W: Write>(&self, w: &mut W) -> std::io::Result<()> {
        for placement in self.tasks.iter() {
            writeln!(
                w,
                "task {}: start {:.2}, finish {:.2}, processor {}",
                placement.task, placement.start, placement.finish, placement.processor
            )?;
        }
        for (processor, count) in self.processor_task_counts.iter().enumerate() {
            writeln!(w, "processor {}: {} tasks", processor + 1, count)?;
        }
        writeln!(w, "makespan: {:.2}", self.makespan)
    }

    /// Saves the plain text report to a file.
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        self.write(&mut File::create(path)?)
    }

    /// Pretty-printed JSON form of the report.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap()
    }
}
