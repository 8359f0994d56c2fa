use serde::{Deserialize, Serialize};

use crate::parsers::{check_processor_id, check_task_id, LoadError};
use crate::workload::{Workload, WorkloadBuilder};

fn zero() -> f64 {
    0.
}

#[derive(Debug, Serialize, Deserialize)]
struct Edge {
    from: usize,
    to: usize,
    #[serde(default = "zero")]
    bytes: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Link {
    from: usize,
    to: usize,
    rate: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct Yaml {
    execution_costs: Vec<Vec<f64>>,
    #[serde(default = "Vec::new")]
    edges: Vec<Edge>,
    #[serde(default = "Vec::new")]
    links: Vec<Link>,
}

impl Workload {
    /// Parses the YAML workload format: an `execution_costs` table with one
    /// row per task, a list of `edges` and a list of `links`. Task and
    /// processor ids are 1-based like in the text format.
    pub fn from_yaml(content: &str) -> Result<Workload, LoadError> {
        let yaml: Yaml = serde_yaml::from_str(content)?;
        let task_count = yaml.execution_costs.len();
        let processor_count = yaml.execution_costs.first().map(|row| row.len()).unwrap_or(0);

        let mut builder = WorkloadBuilder::new(processor_count);
        for costs in yaml.execution_costs.iter() {
            builder.add_task(costs);
        }
        for edge in yaml.edges.iter() {
            let from = check_task_id(edge.from, task_count)?;
            let to = check_task_id(edge.to, task_count)?;
            builder.add_edge(from, to, edge.bytes);
        }
        for link in yaml.links.iter() {
            let from = check_processor_id(link.from, processor_count)?;
            let to = check_processor_id(link.to, processor_count)?;
            builder.add_link(from, to, link.rate);
        }
        builder.build().map_err(LoadError::from)
    }
}
