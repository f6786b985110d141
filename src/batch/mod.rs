// src/batch/mod.rs
//! Time-series driver
//!
//! Converts a range of time steps of one or more index series into one
//! Tecplot file per step, merging the mesh once and re-sampling only the
//! field values for each step.

mod config;
mod naming;
mod runner;

pub use config::{BatchConfig, ErrorPolicy, StepRange};
pub use naming::{output_path, step_path};
pub use runner::{run_batch, BatchReport};
