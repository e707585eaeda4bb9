//! Quantum linear-response transport via the Kubo-Greenwood formula.
//!
//! Per k-point the velocity operators are built in the eigenbasis,
//! `v_i = U†(∂H/∂k_i)U`, and every ordered pair of distinct bands
//! contributes `(f_n - f_m)/(ΔE² + η²) · Im(v_i(n,m)·v_j(m,n))` to the
//! response moments L0/L1/L2. η is a Lorentzian regulator trading
//! resolution for stability near ΔE → 0; it is a caller-supplied knob.

use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;

use crate::{
    error::TransportError,
    hamiltonian::Hamiltonian,
    mesh::Mesh,
    numerics::{self, Mat3, Vec3, MAT3_ZERO},
    units,
};

/// Kubo transport tensors: σ (electrical), α (thermoelectric) and κ
/// (thermal, via the Onsager relation).
#[derive(Debug, Clone, Copy)]
pub struct KuboTensors {
    pub sigma: Mat3,
    pub alpha: Mat3,
    pub kappa: Mat3,
}

/// Entries of L0 below this magnitude are structural zeros of the response;
/// the Onsager quotient treats them as contributing nothing.
const ONSAGER_QUOTIENT_EPS: f64 = 1e-14;

/// Finite-difference step for the velocity-operator matrices.
const VELOCITY_OPERATOR_STEP: f64 = 1e-5;

pub struct KuboSolver<'a, H: Hamiltonian> {
    hamiltonian: &'a H,
    mesh: &'a Mesh,
    eta: f64,
    temperature_in_kelvin: bool,
    energy_scale: f64,
}

impl<'a, H: Hamiltonian> KuboSolver<'a, H> {
    pub fn new(
        hamiltonian: &'a H,
        mesh: &'a Mesh,
        eta: f64,
        temperature_in_kelvin: bool,
        energy_scale: f64,
    ) -> Self {
        assert!(eta > 0.0, "broadening eta must be positive");
        assert!(energy_scale > 0.0, "energy scale must be positive");
        Self {
            hamiltonian,
            mesh,
            eta,
            temperature_in_kelvin,
            energy_scale,
        }
    }

    /// σ, α and κ averaged over the mesh, in `e²/h` units.
    pub fn compute_transport_tensors(
        &self,
        ef: f64,
        t: f64,
    ) -> Result<KuboTensors, TransportError> {
        let t_red = units::reduced_temperature(t, self.temperature_in_kelvin, self.energy_scale);
        let beta = 1.0 / t_red;

        let (l0, l1, l2) = self
            .mesh
            .k_points()
            .par_iter()
            .map(|k| self.moments_at(k, ef, beta))
            .try_reduce(
                || (MAT3_ZERO, MAT3_ZERO, MAT3_ZERO),
                |a, b| {
                    Ok((
                        numerics::mat3_add(a.0, b.0),
                        numerics::mat3_add(a.1, b.1),
                        numerics::mat3_add(a.2, b.2),
                    ))
                },
            )?;

        // e²/h convention: 2π·(1/|mesh|)·scale²·(1/2π).
        let pi = std::f64::consts::PI;
        let scaling = 2.0 * pi * self.energy_scale * self.energy_scale
            / (2.0 * pi * self.mesh.len() as f64);
        let l0 = numerics::mat3_scale(l0, scaling);
        let l1 = numerics::mat3_scale(l1, scaling);
        let l2 = numerics::mat3_scale(l2, scaling);

        let sigma = l0;
        let alpha = numerics::mat3_scale(l1, 1.0 / t_red);
        let cross = numerics::mat3_mul(l1, numerics::mat3_transpose(l1));
        let mut kappa = MAT3_ZERO;
        for i in 0..3 {
            for j in 0..3 {
                let quotient = if l0[i][j].abs() > ONSAGER_QUOTIENT_EPS {
                    cross[i][j] / l0[i][j]
                } else {
                    0.0
                };
                kappa[i][j] = (l2[i][j] - quotient) / t_red;
            }
        }

        Ok(KuboTensors {
            sigma,
            alpha,
            kappa,
        })
    }

    fn moments_at(&self, k: &Vec3, ef: f64, beta: f64) -> Result<(Mat3, Mat3, Mat3), TransportError> {
        let es = self.hamiltonian.eigensystem(k)?;
        let n_bands = es.num_bands();

        let u_dagger = numerics::adjoint(&es.evecs);
        let velocity: Vec<Array2<Complex64>> = (0..3)
            .map(|axis| {
                let dh =
                    numerics::dh_dk_central2(self.hamiltonian, k, axis, VELOCITY_OPERATOR_STEP);
                u_dagger.dot(&dh).dot(&es.evecs)
            })
            .collect();

        let mut l0 = MAT3_ZERO;
        let mut l1 = MAT3_ZERO;
        let mut l2 = MAT3_ZERO;
        for n in 0..n_bands {
            let e_n = es.evals[n];
            let f_n = numerics::fermi(e_n, ef, beta);
            for m in 0..n_bands {
                if m == n {
                    continue;
                }
                let e_m = es.evals[m];
                let delta = e_n - e_m;
                let f_diff = f_n - numerics::fermi(e_m, ef, beta);
                let factor = f_diff / (delta * delta + self.eta * self.eta);
                let offset = 0.5 * (e_n + e_m) - ef;
                for i in 0..3 {
                    let v_nm = velocity[i][(n, m)];
                    for j in 0..3 {
                        let weight = factor * (v_nm * velocity[j][(m, n)]).im;
                        l0[i][j] += weight;
                        l1[i][j] += weight * offset;
                        l2[i][j] += weight * offset * offset;
                    }
                }
            }
        }
        Ok((l0, l1, l2))
    }
}
