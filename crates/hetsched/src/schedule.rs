//! Schedule state.

use serde::Serialize;

/// Placement of a single task: the assigned processor and the execution
/// window. `processor` is `None` while the task is still unassigned.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScheduleEntry {
    pub processor: Option<usize>,
    pub start: f64,
    pub finish: f64,
}

/// A partial or complete assignment of tasks to processors. Every task is
/// assigned at most once and processor availability never decreases.
#[derive(Clone, Debug, Serialize)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
    availability: Vec<f64>,
}

impl Schedule {
    /// Creates an empty schedule: every task unassigned, every processor free
    /// at time 0.
    pub fn new(task_count: usize, processor_count: usize) -> Self {
        Self {
            entries: vec![
                ScheduleEntry {
                    processor: None,
                    start: 0.,
                    finish: 0.,
                };
                task_count
            ],
            availability: vec![0.; processor_count],
        }
    }

    pub fn processor_count(&self) -> usize {
        self.availability.len()
    }

    pub fn entry(&self, task: usize) -> &ScheduleEntry {
        &self.entries[task]
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn is_scheduled(&self, task: usize) -> bool {
        self.entries[task].processor.is_some()
    }

    /// Time at which the processor finishes its last assigned task.
    pub fn availability(&self, processor: usize) -> f64 {
        self.availability[processor]
    }

    /// Records the placement of a task.
    pub fn assign(&mut self, task: usize, processor: usize, start: f64, finish: f64) {
        let entry = &mut self.entries[task];
        assert!(entry.processor.is_none(), "task {} is already scheduled", task);
        *entry = ScheduleEntry {
            processor: Some(processor),
            start,
            finish,
        };
        self.availability[processor] = self.availability[processor].max(finish);
    }

    /// Maximum finish time over all scheduled tasks.
    pub fn makespan(&self) -> f64 {
        self.entries
            .iter()
            .map(|entry| entry.finish)
            .max_by(|a, b| a.total_cmp(b))
            .unwrap_or(0.)
    }
}
