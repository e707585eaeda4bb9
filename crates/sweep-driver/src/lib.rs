//! qtr2d sweep driver - multi-threaded parameter sweeps over band models.
//!
//! Expands swept model parameters from a TOML configuration into individual
//! transport jobs, executes them on a rayon pool, and writes one CSV row per
//! parameter point. A job that fails (a non-converging eigen-decomposition
//! at some k) is reported with its cause and does not abort the rest of the
//! sweep.

pub mod config;
pub mod driver;
pub mod expansion;
pub mod output;

pub use config::{ConfigError, Method, SweepConfig, SweepValues};
pub use driver::{DriverError, DriverStats, JobError, SweepDriver};
pub use expansion::{expand_jobs, ExpandedJob, ModelInstance};
pub use output::{OutputWriter, TensorSet};
