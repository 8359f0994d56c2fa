//! Batch runs of multiple workloads and algorithms.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use itertools::Itertools;
use log::debug;
use serde::{Deserialize, Serialize};
use threadpool::ThreadPool;

use crate::parsers::LoadError;
use crate::scheduler::algorithm_resolver;
use crate::workload::Workload;

/// Result of scheduling one workload with one algorithm.
#[derive(Serialize, Debug)]
pub struct RunResult {
    pub workload: String,
    pub algorithm: String,
    pub makespan: f64,
}

#[derive(Deserialize)]
struct ExperimentConfig {
    workloads: Vec<PathBuf>,
    algorithms: Vec<String>,
}

struct Run {
    workload_name: String,
    workload: Workload,
    algorithm: String,
}

/// A set of scheduling runs, the cartesian product of the workloads and the
/// algorithms from a config file.
pub struct Experiment {
    runs: Vec<Run>,
}

impl Experiment {
    /// Loads an experiment config: a YAML file with a list of workload files
    /// or directories (expanded recursively) and a list of algorithm names.
    /// All workloads are loaded up front, so a malformed input fails the
    /// whole experiment before any run starts.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self, LoadError> {
        let config_path = config_path.as_ref();
        let content = std::fs::read_to_string(config_path).map_err(|e| LoadError::io(config_path, e))?;
        let config: ExperimentConfig = serde_yaml::from_str(&content)?;

        for algorithm in config.algorithms.iter() {
            if algorithm_resolver(algorithm).is_none() {
                return Err(LoadError::Syntax(format!("unknown algorithm '{}'", algorithm)));
            }
        }

        let mut workloads = Vec::new();
        for path in collect_files(&config.workloads)?.into_iter() {
            let name = path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            workloads.push((name, Workload::from_file(&path)?));
        }

        let runs = workloads
            .into_iter()
            .cartesian_product(config.algorithms.into_iter())
            .map(|((workload_name, workload), algorithm)| Run {
                workload_name,
                workload,
                algorithm,
            })
            .collect();

        Ok(Self { runs })
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Executes every run on a thread pool and returns the results sorted by
    /// makespan.
    pub fn run(self, num_threads: usize) -> Vec<RunResult> {
        let result = Arc::new(Mutex::new(Vec::with_capacity(self.runs.len())));

        let pool = ThreadPool::new(num_threads);
        for run in self.runs.into_iter() {
            let result = result.clone();
            pool.execute(move || {
                let scheduler = algorithm_resolver(&run.algorithm).unwrap();
                let makespan = scheduler.schedule(&run.workload).makespan();
                debug!("{} on {}: makespan {:.3}", run.algorithm, run.workload_name, makespan);
                result.lock().unwrap().push(RunResult {
                    workload: run.workload_name,
                    algorithm: run.algorithm,
                    makespan,
                });
            });
        }
        pool.join();

        let mut result = Arc::try_unwrap(result).unwrap().into_inner().unwrap();
        result.sort_by(|a, b| a.makespan.total_cmp(&b.makespan));
        result
    }
}

fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>, LoadError> {
    let mut files = Vec::new();
    for path in paths.iter() {
        if path.is_dir() {
            let mut entries = Vec::new();
            for entry in std::fs::read_dir(path).map_err(|e| LoadError::io(path, e))? {
                entries.push(entry.map_err(|e| LoadError::io(path, e))?.path());
            }
            entries.sort();
            files.extend(collect_files(&entries)?);
        } else {
            files.push(path.clone());
        }
    }
    Ok(files)
}
