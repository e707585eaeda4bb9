//! Parallel sweep execution.

use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use rayon::prelude::*;
use thiserror::Error;

use qtr2d_core::{
    boltzmann::BoltzmannSolver, diagnostics::TransportDiagnostics, hamiltonian::Hamiltonian,
    kubo::KuboSolver, mesh::Mesh,
};

use crate::{
    config::{ConfigError, Method, SweepConfig},
    expansion::{expand_jobs, ExpandedJob, ModelInstance},
    output::{OutputWriter, TensorSet},
};

#[derive(Debug, Error)]
pub enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("thread pool construction failed: {0}")]
    ThreadPool(String),
    #[error("output error: {0}")]
    Output(String),
}

/// Per-job failure, reported after the sweep completes. A failed
/// eigen-decomposition aborts only its own parameter point.
#[derive(Debug, Clone)]
pub struct JobError {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Default)]
pub struct DriverStats {
    pub completed: usize,
    pub failed: usize,
    pub duration_secs: f64,
    /// Recoverable numerical edge cases counted across all jobs.
    pub edge_cases: usize,
    pub errors: Vec<JobError>,
}

pub struct SweepDriver {
    config: SweepConfig,
    jobs: Vec<ExpandedJob>,
}

impl SweepDriver {
    pub fn new(config: SweepConfig) -> Result<Self, DriverError> {
        config.validate()?;
        let jobs = expand_jobs(&config)?;
        Ok(Self { config, jobs })
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Execute all jobs and write one CSV row per completed parameter point,
    /// in job order.
    pub fn run(&self) -> Result<DriverStats, DriverError> {
        if self.jobs.is_empty() {
            warn!("no jobs to execute (sweep axes resolved to zero combinations)");
            return Ok(DriverStats::default());
        }

        let mesh = Mesh::new(
            self.config.mesh.nx,
            self.config.mesh.ny,
            self.config.mesh.nz,
            self.config.mesh.kmax,
        );
        info!(
            "sweep: {} jobs on a {}x{}x{} mesh ({} k-points)",
            self.jobs.len(),
            mesh.nx(),
            mesh.ny(),
            mesh.nz(),
            mesh.len()
        );

        let threads = self.config.threads.unwrap_or_else(num_cpus::get);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|err| DriverError::ThreadPool(err.to_string()))?;

        let progress = ProgressBar::new(self.jobs.len() as u64);
        progress.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
                .unwrap()
                .progress_chars("█▓░"),
        );

        let diagnostics = TransportDiagnostics::new();
        let start = Instant::now();
        let results: Vec<Result<TensorSet, JobError>> = pool.install(|| {
            self.jobs
                .par_iter()
                .map(|job| {
                    let result = self.execute_job(job, &mesh, &diagnostics);
                    progress.inc(1);
                    result
                })
                .collect()
        });
        progress.finish_and_clear();

        let mut writer = OutputWriter::create(
            self.config.output.path.as_deref(),
            self.config.transport.method,
            &self.jobs,
        )
        .map_err(|err| DriverError::Output(err.to_string()))?;

        let mut stats = DriverStats {
            duration_secs: start.elapsed().as_secs_f64(),
            ..DriverStats::default()
        };
        for (job, result) in self.jobs.iter().zip(&results) {
            match result {
                Ok(tensors) => {
                    writer
                        .write_row(job, tensors)
                        .map_err(|err| DriverError::Output(err.to_string()))?;
                    stats.completed += 1;
                }
                Err(job_error) => {
                    error!("job {} failed: {}", job_error.index, job_error.message);
                    stats.failed += 1;
                    stats.errors.push(job_error.clone());
                }
            }
        }
        writer
            .finish()
            .map_err(|err| DriverError::Output(err.to_string()))?;

        let snapshot = diagnostics.snapshot();
        stats.edge_cases = snapshot.total();
        if stats.edge_cases > 0 {
            debug!(
                "recoverable numerical edge cases: {}",
                serde_json::to_string(&snapshot).unwrap_or_default()
            );
        }
        info!(
            "sweep finished: {} completed, {} failed in {:.2}s",
            stats.completed, stats.failed, stats.duration_secs
        );
        Ok(stats)
    }

    fn execute_job(
        &self,
        job: &ExpandedJob,
        mesh: &Mesh,
        diagnostics: &TransportDiagnostics,
    ) -> Result<TensorSet, JobError> {
        match &job.model {
            ModelInstance::Altermagnet(model) => self.solve(model, job, mesh, diagnostics),
            ModelInstance::Haldane(model) => self.solve(model, job, mesh, diagnostics),
            ModelInstance::KaneMele(model) => self.solve(model, job, mesh, diagnostics),
        }
    }

    fn solve<H: Hamiltonian>(
        &self,
        model: &H,
        job: &ExpandedJob,
        mesh: &Mesh,
        diagnostics: &TransportDiagnostics,
    ) -> Result<TensorSet, JobError> {
        let transport = &self.config.transport;
        let mut tensors = TensorSet::default();
        if matches!(transport.method, Method::Boltzmann | Method::Both) {
            let solver = BoltzmannSolver::new(
                model,
                mesh,
                transport.tau,
                transport.temperature_in_kelvin,
                transport.energy_scale,
            )
            .with_diagnostics(diagnostics);
            let (sigma, alpha) = solver
                .compute_transport_tensors(
                    transport.fermi_energy,
                    transport.temperature,
                    &transport.grad_t,
                    &transport.e_field,
                    &transport.b_field,
                )
                .map_err(|err| JobError {
                    index: job.index,
                    message: err.to_string(),
                })?;
            tensors.boltzmann = Some((sigma, alpha));
        }
        if matches!(transport.method, Method::Kubo | Method::Both) {
            let solver = KuboSolver::new(
                model,
                mesh,
                transport.eta,
                transport.temperature_in_kelvin,
                transport.energy_scale,
            );
            let kubo = solver
                .compute_transport_tensors(transport.fermi_energy, transport.temperature)
                .map_err(|err| JobError {
                    index: job.index,
                    message: err.to_string(),
                })?;
            tensors.kubo = Some(kubo);
        }
        Ok(tensors)
    }
}
