//! Workload model.

use std::collections::HashSet;

use thiserror::Error;

use crate::graph::TaskGraph;
use crate::matrix::Matrix;

/// Structural problem detected while assembling a workload. Task and
/// processor ids in messages are 1-based, matching the workload file formats
/// and reports.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("workload has no tasks")]
    NoTasks,
    #[error("workload has no processors")]
    NoProcessors,
    #[error("task id {0} is out of range 1..={1}")]
    TaskIdOutOfRange(usize, usize),
    #[error("processor id {0} is out of range 1..={1}")]
    ProcessorIdOutOfRange(usize, usize),
    #[error("execution cost row of task {task} has {len} entries, expected {expected}")]
    BadCostRow { task: usize, len: usize, expected: usize },
    #[error("execution cost of task {task} on processor {processor} is not a finite non-negative number")]
    InvalidExecutionCost { task: usize, processor: usize },
    #[error("data volume on edge {from} -> {to} is not a finite non-negative number")]
    InvalidDataVolume { from: usize, to: usize },
    #[error("edge {from} -> {to} is defined twice")]
    DuplicateEdge { from: usize, to: usize },
    #[error("task {0} has an edge to itself")]
    SelfLoop(usize),
    #[error("task graph contains a cycle")]
    Cycle,
    #[error("task {0} has no predecessors, only task 1 may be an entry")]
    UnexpectedEntry(usize),
    #[error("task {0} has no successors, only task {1} may be an exit")]
    UnexpectedExit(usize, usize),
    #[error("processor {0} has a link to itself")]
    SelfLink(usize),
    #[error("link between processors {from} and {to} is defined twice")]
    DuplicateLink { from: usize, to: usize },
    #[error("transfer rate between processors {from} and {to} is not a finite positive number")]
    InvalidTransferRate { from: usize, to: usize },
}

/// A scheduling problem instance: the task precedence graph plus the cost
/// tables for a fixed set of heterogeneous processors. Instances are built
/// with [`WorkloadBuilder`] or loaded from a file and are immutable afterwards.
///
/// Tasks and processors are identified by 0-based indices. Task 0 is the only
/// entry of the graph and the last task is the only exit.
#[derive(Clone, Debug)]
pub struct Workload {
    graph: TaskGraph,
    execution_costs: Matrix,
    data_volumes: Matrix,
    transfer_rates: Matrix,
}

impl Workload {
    pub fn task_count(&self) -> usize {
        self.graph.task_count()
    }

    pub fn processor_count(&self) -> usize {
        self.execution_costs.cols()
    }

    /// The single task without predecessors.
    pub fn entry_task(&self) -> usize {
        0
    }

    /// The single task without successors.
    pub fn exit_task(&self) -> usize {
        self.task_count() - 1
    }

    pub fn successors(&self, task: usize) -> &[usize] {
        self.graph.successors(task)
    }

    pub fn predecessors(&self, task: usize) -> &[usize] {
        self.graph.predecessors(task)
    }

    /// Time to execute `task` on `processor`.
    pub fn execution_cost(&self, task: usize, processor: usize) -> f64 {
        self.execution_costs.get(task, processor)
    }

    /// Bytes sent over the edge `from -> to`, 0 if there is no such edge.
    /// Volumes are stored symmetrically, so the argument order does not matter.
    pub fn data_volume(&self, from: usize, to: usize) -> f64 {
        self.data_volumes.get(from, to)
    }

    /// Bytes per time unit between two distinct processors.
    pub fn transfer_rate(&self, from: usize, to: usize) -> f64 {
        self.transfer_rates.get(from, to)
    }

    /// Mean execution cost of `task` over all processors.
    pub fn avg_execution_cost(&self, task: usize) -> f64 {
        (0..self.processor_count())
            .map(|processor| self.execution_cost(task, processor))
            .sum::<f64>()
            / self.processor_count() as f64
    }

    // mean rate over the chain of adjacent processor pairs (0, 1), (1, 2), ...,
    // not over all pairs; the rank heuristics are defined against this average
    fn avg_transfer_rate(&self) -> f64 {
        let processors = self.processor_count();
        (0..processors - 1)
            .map(|processor| self.transfer_rate(processor, processor + 1))
            .sum::<f64>()
            / (processors - 1) as f64
    }

    /// Average cost of moving the data of the edge `from -> to` between
    /// processors, ignoring the actual placement. Returns 0 for a single
    /// processor, where every placement is local.
    pub fn avg_communication_cost(&self, from: usize, to: usize) -> f64 {
        if self.processor_count() == 1 {
            return 0.;
        }
        self.data_volume(from, to) / self.avg_transfer_rate()
    }
}

/// Assembles a [`Workload`] incrementally. Task and processor indices are
/// 0-based. Validation happens in [`WorkloadBuilder::build`], so parts can be
/// added in any order.
pub struct WorkloadBuilder {
    processor_count: usize,
    execution_costs: Vec<Vec<f64>>,
    edges: Vec<(usize, usize, f64)>,
    links: Vec<(usize, usize, f64)>,
}

impl WorkloadBuilder {
    pub fn new(processor_count: usize) -> Self {
        Self {
            processor_count,
            execution_costs: Vec::new(),
            edges: Vec::new(),
            links: Vec::new(),
        }
    }

    /// Adds a task with the given per-processor execution costs and returns
    /// its index.
    pub fn add_task(&mut self, execution_costs: &[f64]) -> usize {
        self.execution_costs.push(execution_costs.to_vec());
        self.execution_costs.len() - 1
    }

    /// Adds a precedence edge: `to` consumes `volume` bytes produced by `from`.
    pub fn add_edge(&mut self, from: usize, to: usize, volume: f64) {
        self.edges.push((from, to, volume));
    }

    /// Sets the transfer rate between a pair of distinct processors, in both
    /// directions.
    pub fn add_link(&mut self, from: usize, to: usize, rate: f64) {
        self.links.push((from, to, rate));
    }

    /// Validates the collected parts and produces the workload.
    pub fn build(self) -> Result<Workload, ValidationError> {
        let task_count = self.execution_costs.len();
        let processor_count = self.processor_count;
        if task_count == 0 {
            return Err(ValidationError::NoTasks);
        }
        if processor_count == 0 {
            return Err(ValidationError::NoProcessors);
        }

        let mut execution_costs = Matrix::new(task_count, processor_count);
        for (task, row) in self.execution_costs.iter().enumerate() {
            if row.len() != processor_count {
                return Err(ValidationError::BadCostRow {
                    task: task + 1,
                    len: row.len(),
                    expected: processor_count,
                });
            }
            for (processor, &cost) in row.iter().enumerate() {
                if !cost.is_finite() || cost < 0. {
                    return Err(ValidationError::InvalidExecutionCost {
                        task: task + 1,
                        processor: processor + 1,
                    });
                }
                execution_costs.set(task, processor, cost);
            }
        }

        let mut graph = TaskGraph::new(task_count);
        let mut data_volumes = Matrix::new(task_count, task_count);
        let mut seen_edges = HashSet::new();
        for &(from, to, volume) in self.edges.iter() {
            if from >= task_count {
                return Err(ValidationError::TaskIdOutOfRange(from + 1, task_count));
            }
            if to >= task_count {
                return Err(ValidationError::TaskIdOutOfRange(to + 1, task_count));
            }
            if from == to {
                return Err(ValidationError::SelfLoop(from + 1));
            }
            if !seen_edges.insert((from, to)) {
                return Err(ValidationError::DuplicateEdge {
                    from: from + 1,
                    to: to + 1,
                });
            }
            if !volume.is_finite() || volume < 0. {
                return Err(ValidationError::InvalidDataVolume {
                    from: from + 1,
                    to: to + 1,
                });
            }
            graph.add_edge(from, to);
            data_volumes.set(from, to, volume);
            data_volumes.set(to, from, volume);
        }

        if graph.topological_order().is_none() {
            return Err(ValidationError::Cycle);
        }
        for task in 1..task_count {
            if graph.predecessors(task).is_empty() {
                return Err(ValidationError::UnexpectedEntry(task + 1));
            }
        }
        for task in 0..task_count - 1 {
            if graph.successors(task).is_empty() {
                return Err(ValidationError::UnexpectedExit(task + 1, task_count));
            }
        }

        let mut transfer_rates = Matrix::new(processor_count, processor_count);
        let mut seen_links = HashSet::new();
        for &(from, to, rate) in self.links.iter() {
            if from >= processor_count {
                return Err(ValidationError::ProcessorIdOutOfRange(from + 1, processor_count));
            }
            if to >= processor_count {
                return Err(ValidationError::ProcessorIdOutOfRange(to + 1, processor_count));
            }
            if from == to {
                return Err(ValidationError::SelfLink(from + 1));
            }
            // links are undirected, (a, b) and (b, a) name the same link
            if !seen_links.insert((from.min(to), from.max(to))) {
                return Err(ValidationError::DuplicateLink {
                    from: from + 1,
                    to: to + 1,
                });
            }
            transfer_rates.set(from, to, rate);
            transfer_rates.set(to, from, rate);
        }
        for from in 0..processor_count {
            for to in from + 1..processor_count {
                let rate = transfer_rates.get(from, to);
                if !rate.is_finite() || rate <= 0. {
                    return Err(ValidationError::InvalidTransferRate {
                        from: from + 1,
                        to: to + 1,
                    });
                }
            }
        }

        Ok(Workload {
            graph,
            execution_costs,
            data_volumes,
            transfer_rates,
        })
    }
}
