//! CSV output for sweep results: one row per swept parameter point.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use qtr2d_core::{kubo::KuboTensors, numerics::Mat3};

use crate::config::Method;
use crate::expansion::ExpandedJob;

/// Tensors produced by one job, depending on the requested method.
#[derive(Debug, Clone, Default)]
pub struct TensorSet {
    pub boltzmann: Option<(Mat3, Mat3)>,
    pub kubo: Option<KuboTensors>,
}

/// In-plane tensor components emitted per tensor.
const COMPONENTS: [(&str, usize, usize); 4] = [("xx", 0, 0), ("xy", 0, 1), ("yx", 1, 0), ("yy", 1, 1)];

pub struct OutputWriter {
    writer: Box<dyn Write + Send>,
}

impl OutputWriter {
    /// Open the destination (a file, or stdout when `path` is `None`) and
    /// write the header row.
    pub fn create(
        path: Option<&Path>,
        method: Method,
        jobs: &[ExpandedJob],
    ) -> io::Result<Self> {
        let mut writer: Box<dyn Write + Send> = match path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        std::fs::create_dir_all(parent)?;
                    }
                }
                Box::new(BufWriter::new(File::create(path)?))
            }
            None => Box::new(BufWriter::new(io::stdout())),
        };
        writeln!(writer, "{}", header_line(method, jobs))?;
        Ok(Self { writer })
    }

    pub fn write_row(&mut self, job: &ExpandedJob, tensors: &TensorSet) -> io::Result<()> {
        writeln!(self.writer, "{}", row_line(job, tensors))
    }

    pub fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

pub(crate) fn header_line(method: Method, jobs: &[ExpandedJob]) -> String {
    let mut columns: Vec<String> = jobs
        .first()
        .map(|job| job.params.iter().map(|(name, _)| name.to_string()).collect())
        .unwrap_or_default();
    match method {
        Method::Boltzmann => {
            push_tensor_columns(&mut columns, "sigma");
            push_tensor_columns(&mut columns, "alpha");
        }
        Method::Kubo => {
            push_tensor_columns(&mut columns, "sigma");
            push_tensor_columns(&mut columns, "alpha");
            push_tensor_columns(&mut columns, "kappa");
        }
        Method::Both => {
            push_tensor_columns(&mut columns, "boltzmann_sigma");
            push_tensor_columns(&mut columns, "boltzmann_alpha");
            push_tensor_columns(&mut columns, "kubo_sigma");
            push_tensor_columns(&mut columns, "kubo_alpha");
            push_tensor_columns(&mut columns, "kubo_kappa");
        }
    }
    columns.join(",")
}

pub(crate) fn row_line(job: &ExpandedJob, tensors: &TensorSet) -> String {
    let mut fields: Vec<String> = job
        .params
        .iter()
        .map(|(_, value)| format!("{value:.6}"))
        .collect();
    if let Some((sigma, alpha)) = &tensors.boltzmann {
        push_tensor_values(&mut fields, sigma);
        push_tensor_values(&mut fields, alpha);
    }
    if let Some(kubo) = &tensors.kubo {
        push_tensor_values(&mut fields, &kubo.sigma);
        push_tensor_values(&mut fields, &kubo.alpha);
        push_tensor_values(&mut fields, &kubo.kappa);
    }
    fields.join(",")
}

fn push_tensor_columns(columns: &mut Vec<String>, name: &str) {
    for (suffix, _, _) in COMPONENTS {
        columns.push(format!("{name}_{suffix}"));
    }
}

fn push_tensor_values(fields: &mut Vec<String>, tensor: &Mat3) {
    for (_, i, j) in COMPONENTS {
        fields.push(format!("{:.9e}", tensor[i][j]));
    }
}
