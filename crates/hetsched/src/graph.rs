//! Task precedence graph.

use std::collections::VecDeque;

/// Directed graph over task indices with successor and predecessor adjacency
/// lists. Successors are kept in edge insertion order.
#[derive(Clone, Debug)]
pub struct TaskGraph {
    successors: Vec<Vec<usize>>,
    predecessors: Vec<Vec<usize>>,
}

impl TaskGraph {
    pub fn new(task_count: usize) -> Self {
        Self {
            successors: vec![Vec::new(); task_count],
            predecessors: vec![Vec::new(); task_count],
        }
    }

    pub fn task_count(&self) -> usize {
        self.successors.len()
    }

    pub fn add_edge(&mut self, from: usize, to: usize) {
        self.successors[from].push(to);
        self.predecessors[to].push(from);
    }

    pub fn successors(&self, task: usize) -> &[usize] {
        &self.successors[task]
    }

    pub fn predecessors(&self, task: usize) -> &[usize] {
        &self.predecessors[task]
    }

    /// Kahn's algorithm. Returns `None` if the graph contains a cycle.
    pub fn topological_order(&self) -> Option<Vec<usize>> {
        let mut in_degree: Vec<usize> = self.predecessors.iter().map(|preds| preds.len()).collect();
        let mut queue: VecDeque<usize> = (0..self.task_count()).filter(|&task| in_degree[task] == 0).collect();
        let mut order = Vec::with_capacity(self.task_count());
        while let Some(task) = queue.pop_front() {
            order.push(task);
            for &succ in self.successors[task].iter() {
                in_degree[succ] -= 1;
                if in_degree[succ] == 0 {
                    queue.push_back(succ);
                }
            }
        }
        if order.len() == self.task_count() {
            Some(order)
        } else {
            None
        }
    }
}
