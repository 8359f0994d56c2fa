use crate::parsers::{check_processor_id, check_task_id, LoadError};
use crate::workload::{Workload, WorkloadBuilder};

struct Cursor<'a> {
    tokens: std::str::SplitWhitespace<'a>,
}

impl<'a> Cursor<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            tokens: content.split_whitespace(),
        }
    }

    fn next_token(&mut self, what: &str) -> Result<&'a str, LoadError> {
        self.tokens
            .next()
            .ok_or_else(|| LoadError::Syntax(format!("unexpected end of input while reading {}", what)))
    }

    fn next_usize(&mut self, what: &str) -> Result<usize, LoadError> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| LoadError::Syntax(format!("invalid {} '{}'", what, token)))
    }

    fn next_f64(&mut self, what: &str) -> Result<f64, LoadError> {
        let token = self.next_token(what)?;
        token
            .parse()
            .map_err(|_| LoadError::Syntax(format!("invalid {} '{}'", what, token)))
    }

    fn finish(mut self) -> Result<(), LoadError> {
        match self.tokens.next() {
            Some(token) => Err(LoadError::Syntax(format!(
                "trailing data after workload definition, starting at '{}'",
                token
            ))),
            None => Ok(()),
        }
    }
}

impl Workload {
    /// Parses the plain text workload format: a `V E P` header, `E` edge
    /// lines `from to bytes`, `V` rows of `P` execution costs and
    /// `(P^2 - P) / 2` link lines `from to rate`. Task and processor ids are
    /// 1-based. Tokens are separated by whitespace and may be split across
    /// lines arbitrarily.
    pub fn from_text(content: &str) -> Result<Workload, LoadError> {
        let mut cursor = Cursor::new(content);
        let task_count = cursor.next_usize("task count")?;
        let edge_count = cursor.next_usize("edge count")?;
        let processor_count = cursor.next_usize("processor count")?;

        let mut builder = WorkloadBuilder::new(processor_count);
        for _ in 0..edge_count {
            let from = check_task_id(cursor.next_usize("edge source")?, task_count)?;
            let to = check_task_id(cursor.next_usize("edge target")?, task_count)?;
            let volume = cursor.next_f64("data volume")?;
            builder.add_edge(from, to, volume);
        }

        let mut costs = vec![0.; processor_count];
        for _ in 0..task_count {
            for cost in costs.iter_mut() {
                *cost = cursor.next_f64("execution cost")?;
            }
            builder.add_task(&costs);
        }

        let link_count = processor_count.saturating_mul(processor_count.saturating_sub(1)) / 2;
        for _ in 0..link_count {
            let from = check_processor_id(cursor.next_usize("link source")?, processor_count)?;
            let to = check_processor_id(cursor.next_usize("link target")?, processor_count)?;
            let rate = cursor.next_f64("transfer rate")?;
            builder.add_link(from, to, rate);
        }

        cursor.finish()?;
        builder.build().map_err(LoadError::from)
    }
}
