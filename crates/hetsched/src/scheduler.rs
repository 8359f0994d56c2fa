//! Scheduler interface.

use crate::schedule::Schedule;
use crate::schedulers::cpop::CpopScheduler;
use crate::schedulers::heft::HeftScheduler;
use crate::workload::Workload;

/// A static scheduling algorithm: maps a workload to a complete schedule
/// before anything executes.
pub trait Scheduler {
    /// Produces a schedule with every task assigned.
    fn schedule(&self, workload: &Workload) -> Schedule;
    /// Short lowercase algorithm name, as accepted by [`algorithm_resolver`].
    fn name(&self) -> &'static str;
}

/// Resolves an algorithm name into a scheduler instance.
pub fn algorithm_resolver(name: &str) -> Option<Box<dyn Scheduler>> {
    match name {
        "heft" => Some(Box::new(HeftScheduler::new())),
        "cpop" => Some(Box::new(CpopScheduler::new())),
        _ => None,
    }
}
