// src/batch/config.rs
use std::path::PathBuf;

/// What the batch driver does when a time step fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop and return the first error
    #[default]
    Abort,
    /// Log the failure, record it in the report and continue
    Skip,
}

/// Half-open integer range of time steps, `start, start + step, ...` up to
/// but excluding `end`. A negative `step` counts down; a zero `step` is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl StepRange {
    pub fn new(start: i64, end: i64, step: i64) -> Self {
        StepRange { start, end, step }
    }

    pub fn single(step: i64) -> Self {
        StepRange::new(step, step + 1, 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = i64> {
        let StepRange { start, end, step } = *self;
        let mut current = Some(start);
        std::iter::from_fn(move || {
            let value = current?;
            let in_range = match step {
                s if s > 0 => value < end,
                s if s < 0 => value > end,
                _ => false,
            };
            if !in_range {
                return None;
            }
            current = value.checked_add(step);
            Some(value)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }
}

impl Default for StepRange {
    fn default() -> Self {
        StepRange::single(0)
    }
}

/// Time-series conversion settings
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Index base names ending in `.pvd`; the first one also provides the mesh
    pub inputs: Vec<PathBuf>,
    /// Output base name; step `n` is written to `<output>.<n>.tec`
    pub output: PathBuf,
    pub steps: StepRange,
    /// Number of steps converted in parallel
    pub workers: usize,
    pub on_error: ErrorPolicy,
}

impl Default for BatchConfig {
    fn default() -> Self {
        BatchConfig {
            inputs: Vec::new(),
            output: PathBuf::from("solution"),
            steps: StepRange::default(),
            workers: 1,
            on_error: ErrorPolicy::Abort,
        }
    }
}
