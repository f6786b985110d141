// src/batch/runner.rs
use crate::batch::{output_path, step_path, BatchConfig, ErrorPolicy};
use crate::error::{ConvertError, Result};
use crate::mesh::{GlobalMesh, MeshMerger};
use crate::metadata::read_index;
use crate::sampler::FieldSampler;
use crate::writer::write_tec;
use log::{info, warn};
use parking_lot::Mutex;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Written output files by step, in step order
    pub written: Vec<(i64, PathBuf)>,
    /// Failed steps with their error message (only with [`ErrorPolicy::Skip`])
    pub skipped: Vec<(i64, String)>,
}

/// Convert every time step of `config`.
///
/// The mesh is merged once, from the first input at the first step, and
/// reused read-only for all steps.
pub fn run_batch(config: &BatchConfig) -> Result<BatchReport> {
    let steps: Vec<i64> = config.steps.iter().collect();
    let first_step = match steps.first() {
        Some(&step) => step,
        None => {
            warn!("empty step range, nothing to convert");
            return Ok(BatchReport::default());
        }
    };
    let mesh_input = match config.inputs.first() {
        Some(input) => input,
        None => {
            warn!("no input series given, nothing to convert");
            return Ok(BatchReport::default());
        }
    };

    let (_, partitions) = read_index(step_path(mesh_input, first_step)?)?;
    let mesh = MeshMerger::merge(&partitions)?;
    info!(
        "merged mesh from {} partitions: {} points, {} cells",
        partitions.len(),
        mesh.num_points(),
        mesh.num_cells()
    );

    let component_counts = config
        .inputs
        .iter()
        .map(|input| Ok(read_index(step_path(input, first_step)?)?.0.component_count))
        .collect::<Result<Vec<usize>>>()?;

    let job = StepJob {
        config,
        mesh: &mesh,
        component_counts: &component_counts,
    };

    let mut report = if config.workers <= 1 {
        run_sequential(&job, &steps)?
    } else {
        run_parallel(&job, &steps)?
    };

    report.written.sort_by_key(|(step, _)| *step);
    report.skipped.sort_by_key(|(step, _)| *step);
    info!(
        "converted {} of {} steps ({} skipped)",
        report.written.len(),
        steps.len(),
        report.skipped.len()
    );
    Ok(report)
}

struct StepJob<'a> {
    config: &'a BatchConfig,
    mesh: &'a GlobalMesh,
    component_counts: &'a [usize],
}

impl StepJob<'_> {
    fn convert(&self, step: i64) -> Result<PathBuf> {
        let sampler = FieldSampler::new(self.mesh);
        let mut fields = Vec::with_capacity(self.config.inputs.len());

        for (input, &expected) in self.config.inputs.iter().zip(self.component_counts) {
            let (descriptor, partitions) = read_index(step_path(input, step)?)?;
            if descriptor.component_count != expected {
                return Err(ConvertError::FieldTypeMismatch {
                    expected: format!("{} components for {}", expected, input.display()),
                    found: format!("{} components at step {}", descriptor.component_count, step),
                });
            }
            fields.push(sampler.sample(&partitions, &descriptor)?);
        }

        let output = output_path(&self.config.output, step);
        write_tec(&output, self.mesh, &fields)?;
        info!("step {}: wrote {}", step, output.display());
        Ok(output)
    }

    /// Fold one step result into the report; `Err` means abort the run.
    fn record(&self, report: &Mutex<BatchReport>, step: i64, result: Result<PathBuf>) -> Result<()> {
        match result {
            Ok(path) => report.lock().written.push((step, path)),
            Err(err) => match self.config.on_error {
                ErrorPolicy::Abort => return Err(err),
                ErrorPolicy::Skip => {
                    warn!("step {} skipped: {}", step, err);
                    report.lock().skipped.push((step, err.to_string()));
                }
            },
        }
        Ok(())
    }
}

fn run_sequential(job: &StepJob, steps: &[i64]) -> Result<BatchReport> {
    let report = Mutex::new(BatchReport::default());
    for &step in steps {
        job.record(&report, step, job.convert(step))?;
    }
    Ok(report.into_inner())
}

fn run_parallel(job: &StepJob, steps: &[i64]) -> Result<BatchReport> {
    let (step_tx, step_rx) = crossbeam_channel::unbounded();
    for &step in steps {
        let _ = step_tx.send(step);
    }
    drop(step_tx);

    let report = Mutex::new(BatchReport::default());
    let failure: Mutex<Option<ConvertError>> = Mutex::new(None);
    let stop = AtomicBool::new(false);
    let workers = job.config.workers.min(steps.len()).max(1);

    thread::scope(|scope| {
        for _ in 0..workers {
            let step_rx = step_rx.clone();
            let (report, failure, stop) = (&report, &failure, &stop);
            scope.spawn(move || {
                for step in step_rx.iter() {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    if let Err(err) = job.record(report, step, job.convert(step)) {
                        stop.store(true, Ordering::Relaxed);
                        failure.lock().get_or_insert(err);
                        break;
                    }
                }
            });
        }
    });

    match failure.into_inner() {
        Some(err) => Err(err),
        None => Ok(report.into_inner()),
    }
}
