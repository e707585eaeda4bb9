//! Density-of-states histograms over the sampling mesh.

use rayon::prelude::*;

use crate::{error::TransportError, hamiltonian::Hamiltonian, mesh::Mesh};

/// Energy grid (bin centres) and matching DOS values.
#[derive(Debug, Clone)]
pub struct DosHistogram {
    pub energies: Vec<f64>,
    pub values: Vec<f64>,
}

pub struct DosCalculator<'a, H: Hamiltonian> {
    hamiltonian: &'a H,
    mesh: &'a Mesh,
}

impl<'a, H: Hamiltonian> DosCalculator<'a, H> {
    pub fn new(hamiltonian: &'a H, mesh: &'a Mesh) -> Self {
        Self { hamiltonian, mesh }
    }

    /// Total DOS with Gaussian smearing of width `sigma`, normalised per
    /// k-point and per unit energy. Each eigenvalue contributes to the bins
    /// within ±3σ.
    pub fn total(
        &self,
        e_min: f64,
        e_max: f64,
        bins: usize,
        sigma: f64,
    ) -> Result<DosHistogram, TransportError> {
        assert!(bins > 0, "histogram needs at least one bin");
        assert!(e_max > e_min, "energy window must be non-empty");
        assert!(sigma > 0.0, "smearing width must be positive");

        let de = (e_max - e_min) / bins as f64;
        let energies: Vec<f64> = (0..bins).map(|b| e_min + (b as f64 + 0.5) * de).collect();
        let gauss_norm = 1.0 / (sigma * (2.0 * std::f64::consts::PI).sqrt());

        let values = self
            .mesh
            .k_points()
            .par_iter()
            .map(|k| -> Result<Vec<f64>, TransportError> {
                let es = self.hamiltonian.eigensystem(k)?;
                let mut local = vec![0.0; bins];
                for &energy in es.evals.iter() {
                    let lo = ((energy - 3.0 * sigma - e_min) / de).floor().max(0.0) as usize;
                    let hi_bin = ((energy + 3.0 * sigma - e_min) / de).ceil();
                    if hi_bin < 0.0 || lo >= bins {
                        continue;
                    }
                    let hi = (hi_bin as usize).min(bins - 1);
                    for bin in lo..=hi {
                        let x = (energies[bin] - energy) / sigma;
                        local[bin] += (-0.5 * x * x).exp() * gauss_norm;
                    }
                }
                Ok(local)
            })
            .try_reduce(
                || vec![0.0; bins],
                |mut acc, local| {
                    for (dst, src) in acc.iter_mut().zip(local) {
                        *dst += src;
                    }
                    Ok(acc)
                },
            )?;

        let norm = 1.0 / (self.mesh.len() as f64 * de);
        Ok(DosHistogram {
            energies,
            values: values.into_iter().map(|v| v * norm).collect(),
        })
    }

    /// Orbital-projected DOS with Lorentzian smearing of width `eta`,
    /// weighting each state by `|⟨orbital|ψ_n⟩|²`.
    pub fn projected(
        &self,
        e_min: f64,
        e_max: f64,
        bins: usize,
        eta: f64,
        orbital: usize,
    ) -> Result<DosHistogram, TransportError> {
        assert!(bins > 0, "histogram needs at least one bin");
        assert!(e_max > e_min, "energy window must be non-empty");
        assert!(eta > 0.0, "broadening must be positive");

        let de = (e_max - e_min) / bins as f64;
        let energies: Vec<f64> = (0..bins).map(|b| e_min + (b as f64 + 0.5) * de).collect();

        let values = self
            .mesh
            .k_points()
            .par_iter()
            .map(|k| -> Result<Vec<f64>, TransportError> {
                let es = self.hamiltonian.eigensystem(k)?;
                assert!(
                    orbital < es.evecs.nrows(),
                    "orbital index out of range for this model"
                );
                let mut local = vec![0.0; bins];
                for band in 0..es.num_bands() {
                    let weight = es.evecs[(orbital, band)].norm_sqr();
                    let energy = es.evals[band];
                    for (bin, &centre) in energies.iter().enumerate() {
                        let x = (centre - energy) / eta;
                        local[bin] += weight / (std::f64::consts::PI * eta * (1.0 + x * x));
                    }
                }
                Ok(local)
            })
            .try_reduce(
                || vec![0.0; bins],
                |mut acc, local| {
                    for (dst, src) in acc.iter_mut().zip(local) {
                        *dst += src;
                    }
                    Ok(acc)
                },
            )?;

        let norm = 1.0 / self.mesh.len() as f64;
        Ok(DosHistogram {
            energies,
            values: values.into_iter().map(|v| v * norm).collect(),
        })
    }
}
