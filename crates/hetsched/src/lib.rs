#![doc = include_str!("../README.md")]

pub mod experiment;
pub mod graph;
pub mod matrix;
pub mod parsers;
pub mod ranks;
pub mod report;
pub mod schedule;
pub mod scheduler;
pub mod schedulers;
pub mod stats;
pub mod workload;
