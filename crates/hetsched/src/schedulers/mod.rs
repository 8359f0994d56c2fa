//! Scheduling algorithms.

pub mod common;
pub mod cpop;
pub mod heft;
