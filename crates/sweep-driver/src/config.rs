//! Sweep configuration parsing and validation.
//!
//! # File Format
//!
//! ```toml
//! [model]
//! type = "altermagnet"
//! t = 1.0
//! j = "0.0:1.0:0.1"      # start:end:step triple
//! lambda = [0.0, 0.1, 0.5]
//!
//! [mesh]
//! nx = 100
//! ny = 100
//! kmax = 3.14159265358979
//!
//! [transport]
//! method = "both"
//! fermi_energy = 0.5
//! temperature = 0.02
//! tau = 100.0
//! eta = 1e-2
//! e_field = [1.0, 0.0, 0.0]
//!
//! [output]
//! path = "data/transport.csv"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(String),
    #[error("failed to parse config: {0}")]
    Parse(String),
    #[error("malformed range spec '{0}' (expected 'start:end:step' or a comma list)")]
    MalformedRange(String),
    #[error("sweep axis resolved to no values")]
    EmptyAxis,
    #[error("invalid configuration: {0}")]
    Validation(String),
}

/// One sweep axis: a single value, an explicit list, or a string holding
/// either a comma list or a `start:end:step` triple.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SweepValues {
    Scalar(f64),
    List(Vec<f64>),
    Spec(String),
}

impl SweepValues {
    pub fn scalar(value: f64) -> Self {
        SweepValues::Scalar(value)
    }

    /// Resolve to concrete values. Malformed specs are rejected here,
    /// before any computation starts.
    pub fn values(&self) -> Result<Vec<f64>, ConfigError> {
        match self {
            SweepValues::Scalar(value) => Ok(vec![*value]),
            SweepValues::List(values) => {
                if values.is_empty() {
                    return Err(ConfigError::EmptyAxis);
                }
                Ok(values.clone())
            }
            SweepValues::Spec(text) => parse_spec(text),
        }
    }

    pub fn count(&self) -> Result<usize, ConfigError> {
        Ok(self.values()?.len())
    }
}

fn parse_spec(text: &str) -> Result<Vec<f64>, ConfigError> {
    let text = text.trim();
    if text.contains(':') {
        let parts: Vec<&str> = text.split(':').collect();
        if parts.len() != 3 {
            return Err(ConfigError::MalformedRange(text.to_string()));
        }
        let mut nums = [0.0; 3];
        for (slot, part) in nums.iter_mut().zip(&parts) {
            *slot = part
                .trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::MalformedRange(text.to_string()))?;
        }
        let [start, end, step] = nums;
        if step <= 0.0 || end < start {
            return Err(ConfigError::MalformedRange(text.to_string()));
        }
        // Endpoint inclusive up to a small tolerance.
        let mut values = Vec::new();
        let mut v = start;
        while v <= end + step * 1e-9 {
            values.push(v);
            v += step;
        }
        Ok(values)
    } else {
        let values = text
            .split(',')
            .map(|token| token.trim().parse::<f64>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::MalformedRange(text.to_string()))?;
        if values.is_empty() {
            Err(ConfigError::EmptyAxis)
        } else {
            Ok(values)
        }
    }
}

/// Model section: which Hamiltonian to build and which of its parameters
/// to sweep.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelSection {
    Altermagnet {
        #[serde(default = "default_one")]
        t: f64,
        #[serde(default = "default_j")]
        j: SweepValues,
        #[serde(default = "default_lambda")]
        lambda: SweepValues,
    },
    Haldane {
        #[serde(default = "default_one")]
        t1: f64,
        #[serde(default = "default_t2")]
        t2: f64,
        #[serde(default = "default_phi")]
        phi: SweepValues,
        #[serde(default)]
        m: f64,
    },
    KaneMele {
        #[serde(default = "default_one")]
        t: f64,
        #[serde(default = "default_so")]
        lambda_so: SweepValues,
        #[serde(default = "default_v")]
        lambda_v: f64,
        #[serde(default)]
        lambda_r: f64,
    },
}

impl ModelSection {
    pub(crate) fn sweep_axes(&self) -> Vec<(&'static str, &SweepValues)> {
        match self {
            ModelSection::Altermagnet { j, lambda, .. } => vec![("j", j), ("lambda", lambda)],
            ModelSection::Haldane { phi, .. } => vec![("phi", phi)],
            ModelSection::KaneMele { lambda_so, .. } => vec![("lambda_so", lambda_so)],
        }
    }
}

fn default_one() -> f64 {
    1.0
}

fn default_j() -> SweepValues {
    SweepValues::Scalar(0.1)
}

fn default_lambda() -> SweepValues {
    SweepValues::Scalar(0.2)
}

fn default_t2() -> f64 {
    0.1
}

fn default_phi() -> SweepValues {
    SweepValues::Scalar(std::f64::consts::FRAC_PI_2)
}

fn default_so() -> SweepValues {
    SweepValues::Scalar(0.1)
}

fn default_v() -> f64 {
    0.2
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshSection {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    pub kmax: f64,
}

impl Default for MeshSection {
    fn default() -> Self {
        Self {
            nx: 100,
            ny: 100,
            nz: 1,
            kmax: std::f64::consts::PI,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    Boltzmann,
    Kubo,
    Both,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportSection {
    pub method: Method,
    pub fermi_energy: f64,
    pub temperature: f64,
    pub temperature_in_kelvin: bool,
    pub energy_scale: f64,
    pub tau: f64,
    pub eta: f64,
    pub e_field: [f64; 3],
    pub b_field: [f64; 3],
    pub grad_t: [f64; 3],
}

impl Default for TransportSection {
    fn default() -> Self {
        Self {
            method: Method::Both,
            fermi_energy: 0.0,
            temperature: 0.02,
            temperature_in_kelvin: false,
            energy_scale: 1.0,
            tau: 1.0,
            eta: 1e-2,
            e_field: [1.0, 0.0, 0.0],
            b_field: [0.0; 3],
            grad_t: [0.0; 3],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct OutputSection {
    /// CSV destination; stdout when absent.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepConfig {
    pub model: ModelSection,
    #[serde(default)]
    pub mesh: MeshSection,
    #[serde(default)]
    pub transport: TransportSection,
    #[serde(default)]
    pub output: OutputSection,
    /// Worker threads; all cores when absent.
    #[serde(default)]
    pub threads: Option<usize>,
}

impl SweepConfig {
    pub fn from_str(raw: &str) -> Result<Self, ConfigError> {
        let config: SweepConfig =
            toml::from_str(raw).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
        Self::from_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mesh.nx == 0 || self.mesh.ny == 0 || self.mesh.nz == 0 {
            return Err(ConfigError::Validation(
                "mesh axes must each have at least one point".into(),
            ));
        }
        if self.mesh.kmax <= 0.0 {
            return Err(ConfigError::Validation("mesh kmax must be positive".into()));
        }
        if self.transport.temperature <= 0.0 {
            return Err(ConfigError::Validation(
                "transport temperature must be positive".into(),
            ));
        }
        if self.transport.tau <= 0.0 {
            return Err(ConfigError::Validation(
                "relaxation time tau must be positive".into(),
            ));
        }
        if self.transport.eta <= 0.0 {
            return Err(ConfigError::Validation(
                "broadening eta must be positive".into(),
            ));
        }
        if self.transport.energy_scale <= 0.0 {
            return Err(ConfigError::Validation(
                "energy scale must be positive".into(),
            ));
        }
        if let Some(threads) = self.threads {
            if threads == 0 {
                return Err(ConfigError::Validation(
                    "thread count must be positive".into(),
                ));
            }
        }
        // Resolve every sweep axis once so malformed ranges fail up front.
        for (_, axis) in self.model.sweep_axes() {
            axis.values()?;
        }
        Ok(())
    }
}
