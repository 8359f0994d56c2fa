//! Workload file parsers.

mod text_parser;
mod yaml_parser;

use std::path::Path;

use thiserror::Error;

use crate::workload::{ValidationError, Workload};

/// Failure while loading a workload or an experiment config from a file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("can't read file {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("can't parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("{0}")]
    Syntax(String),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl LoadError {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        LoadError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}

fn check_task_id(id: usize, task_count: usize) -> Result<usize, ValidationError> {
    if id < 1 || id > task_count {
        return Err(ValidationError::TaskIdOutOfRange(id, task_count));
    }
    Ok(id - 1)
}

fn check_processor_id(id: usize, processor_count: usize) -> Result<usize, ValidationError> {
    if id < 1 || id > processor_count {
        return Err(ValidationError::ProcessorIdOutOfRange(id, processor_count));
    }
    Ok(id - 1)
}

impl Workload {
    /// Reads a workload from a file, choosing the format by extension:
    /// `.yaml` and `.yml` files use the YAML format, everything else the
    /// plain text format.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Workload, LoadError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| LoadError::io(path, e))?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => Workload::from_yaml(&content),
            _ => Workload::from_text(&content),
        }
    }
}
