//! Job expansion from swept model parameters.
//!
//! Every combination of the swept axes becomes one `ExpandedJob` carrying a
//! concrete model instance plus the labelled parameter values for the
//! output columns.

use qtr2d_core::models::{Altermagnet, Haldane, KaneMele};

use crate::config::{ConfigError, ModelSection, SweepConfig};

/// A single job with all swept parameters resolved to concrete values.
#[derive(Debug, Clone)]
pub struct ExpandedJob {
    /// 0-based job index; output rows keep this order.
    pub index: usize,
    pub model: ModelInstance,
    /// Labelled parameter values for the output columns.
    pub params: Vec<(&'static str, f64)>,
}

#[derive(Debug, Clone)]
pub enum ModelInstance {
    Altermagnet(Altermagnet),
    Haldane(Haldane),
    KaneMele(KaneMele),
}

pub fn expand_jobs(config: &SweepConfig) -> Result<Vec<ExpandedJob>, ConfigError> {
    let combos: Vec<(ModelInstance, Vec<(&'static str, f64)>)> = match &config.model {
        ModelSection::Altermagnet { t, j, lambda } => {
            let j_values = j.values()?;
            let lambda_values = lambda.values()?;
            let mut combos = Vec::with_capacity(j_values.len() * lambda_values.len());
            for &lambda in &lambda_values {
                for &j in &j_values {
                    combos.push((
                        ModelInstance::Altermagnet(Altermagnet { t: *t, j, lambda }),
                        vec![("j", j), ("lambda", lambda)],
                    ));
                }
            }
            combos
        }
        ModelSection::Haldane { t1, t2, phi, m } => phi
            .values()?
            .into_iter()
            .map(|phi| {
                (
                    ModelInstance::Haldane(Haldane {
                        t1: *t1,
                        t2: *t2,
                        phi,
                        m: *m,
                    }),
                    vec![("phi", phi)],
                )
            })
            .collect(),
        ModelSection::KaneMele {
            t,
            lambda_so,
            lambda_v,
            lambda_r,
        } => lambda_so
            .values()?
            .into_iter()
            .map(|lambda_so| {
                (
                    ModelInstance::KaneMele(KaneMele {
                        t: *t,
                        lambda_so,
                        lambda_v: *lambda_v,
                        lambda_r: *lambda_r,
                    }),
                    vec![("lambda_so", lambda_so)],
                )
            })
            .collect(),
    };

    Ok(combos
        .into_iter()
        .enumerate()
        .map(|(index, (model, params))| ExpandedJob {
            index,
            model,
            params,
        })
        .collect())
}
