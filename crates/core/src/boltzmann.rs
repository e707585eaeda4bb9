//! Semiclassical transport in the relaxation-time approximation.
//!
//! The velocity at each (k, band) sample carries the full set of
//! corrections: anomalous (E × Ω), Lorentz ((v × B) × Ω) and
//! thermal-gradient (∇T × Ω) terms, weighted by the phase-space factor
//! D = 1 + B·Ω. The k-sum is an embarrassingly parallel reduction with
//! per-partition accumulators; an eigensystem failure at any point aborts
//! the whole computation rather than biasing the normalisation.

use rayon::prelude::*;

use crate::{
    berry::{self, CurvatureOptions},
    diagnostics::TransportDiagnostics,
    error::TransportError,
    hamiltonian::Hamiltonian,
    mesh::Mesh,
    numerics::{self, Mat3, Vec3, MAT3_ZERO},
    units,
};

/// Total band velocity and its phase-space factor at one (k, band) sample.
#[derive(Debug, Clone, Copy)]
pub struct VelocityResult {
    pub velocity: Vec3,
    pub phase_space_factor: f64,
}

pub struct BoltzmannSolver<'a, H: Hamiltonian> {
    hamiltonian: &'a H,
    mesh: &'a Mesh,
    tau: f64,
    temperature_in_kelvin: bool,
    energy_scale: f64,
    dk: f64,
    curvature: CurvatureOptions,
    diagnostics: Option<&'a TransportDiagnostics>,
}

impl<'a, H: Hamiltonian> BoltzmannSolver<'a, H> {
    pub fn new(
        hamiltonian: &'a H,
        mesh: &'a Mesh,
        tau: f64,
        temperature_in_kelvin: bool,
        energy_scale: f64,
    ) -> Self {
        assert!(tau > 0.0, "relaxation time must be positive");
        assert!(energy_scale > 0.0, "energy scale must be positive");
        Self {
            hamiltonian,
            mesh,
            tau,
            temperature_in_kelvin,
            energy_scale,
            dk: 1e-4,
            curvature: CurvatureOptions::default(),
            diagnostics: None,
        }
    }

    /// Override the finite-difference step used for band derivatives.
    pub fn with_step(mut self, dk: f64) -> Self {
        assert!(dk > 0.0, "finite-difference step must be positive");
        self.dk = dk;
        self
    }

    pub fn with_curvature_options(mut self, opts: CurvatureOptions) -> Self {
        self.curvature = opts;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: &'a TransportDiagnostics) -> Self {
        self.diagnostics = Some(diagnostics);
        self
    }

    /// Full band velocity at (k, band) including anomalous, Lorentz and
    /// thermal-gradient corrections. `energy` is the band energy at k and
    /// `t` the temperature in model units.
    #[allow(clippy::too_many_arguments)]
    pub fn velocity(
        &self,
        energy: f64,
        ef: f64,
        t: f64,
        k: &Vec3,
        band: usize,
        grad_t: &Vec3,
        e_field: &Vec3,
        b_field: &Vec3,
        dk: f64,
    ) -> Result<VelocityResult, TransportError> {
        let mut v_group = [0.0; 3];
        for (axis, v) in v_group.iter_mut().enumerate() {
            let mut above = *k;
            above[axis] += dk;
            let mut below = *k;
            below[axis] -= dk;
            let e_above = self.hamiltonian.eigensystem(&above)?.evals[band];
            let e_below = self.hamiltonian.eigensystem(&below)?.evals[band];
            *v = (e_above - e_below) / (2.0 * dk);
        }

        let opts = CurvatureOptions {
            dk,
            ..self.curvature
        };
        let omega_z =
            berry::plaquette_curvature(self.hamiltonian, k, band, &opts, self.diagnostics)?;
        let omega = [0.0, 0.0, omega_z];

        let mut d = 1.0 + numerics::dot(*b_field, omega);
        if d <= 0.0 {
            // Unphysical phase-space weight; a modelling edge case, not an error.
            if let Some(diag) = self.diagnostics {
                diag.record_phase_space_fallback();
            }
            d = 1.0;
        }

        let v_anomalous = numerics::scale(numerics::cross(*e_field, omega), -1.0 / d);
        let v_lorentz = numerics::scale(
            numerics::cross(numerics::cross(v_group, *b_field), omega),
            -1.0 / d,
        );
        let v_thermal = numerics::scale(numerics::cross(*grad_t, omega), (energy - ef) / t);

        let total = numerics::scale(
            numerics::add(
                numerics::add(v_group, v_anomalous),
                numerics::add(v_lorentz, v_thermal),
            ),
            1.0 / d,
        );
        Ok(VelocityResult {
            velocity: total,
            phase_space_factor: d,
        })
    }

    /// Conductivity σ and thermoelectric α tensors, averaged over the mesh.
    ///
    /// Accumulates `τ·D·(-∂f/∂E)·(v⊗v)` per (k, band), with the α weight
    /// carrying an extra `(E-Ef)/T`. Both tensors are symmetric by
    /// construction and the parallel reduction is deterministic up to
    /// floating-point summation order.
    pub fn compute_transport_tensors(
        &self,
        ef: f64,
        t: f64,
        grad_t: &Vec3,
        e_field: &Vec3,
        b_field: &Vec3,
    ) -> Result<(Mat3, Mat3), TransportError> {
        let t_red = units::reduced_temperature(t, self.temperature_in_kelvin, self.energy_scale);
        let beta = 1.0 / t_red;

        let (sigma, alpha) = self
            .mesh
            .k_points()
            .par_iter()
            .map(|k| self.tensors_at(k, ef, t_red, beta, grad_t, e_field, b_field))
            .try_reduce(
                || (MAT3_ZERO, MAT3_ZERO),
                |a, b| Ok((numerics::mat3_add(a.0, b.0), numerics::mat3_add(a.1, b.1))),
            )?;

        let norm = 1.0 / self.mesh.len() as f64;
        Ok((
            numerics::mat3_scale(sigma, norm),
            numerics::mat3_scale(alpha, norm),
        ))
    }

    #[allow(clippy::too_many_arguments)]
    fn tensors_at(
        &self,
        k: &Vec3,
        ef: f64,
        t_red: f64,
        beta: f64,
        grad_t: &Vec3,
        e_field: &Vec3,
        b_field: &Vec3,
    ) -> Result<(Mat3, Mat3), TransportError> {
        let es = self.hamiltonian.eigensystem(k)?;
        let mut sigma = MAT3_ZERO;
        let mut alpha = MAT3_ZERO;
        for band in 0..es.num_bands() {
            let energy = es.evals[band];
            let weight = -numerics::fermi_derivative(energy, ef, beta);
            let result =
                self.velocity(energy, ef, t_red, k, band, grad_t, e_field, b_field, self.dk)?;
            let outer = numerics::outer(result.velocity, result.velocity);
            let w_sigma = self.tau * result.phase_space_factor * weight;
            numerics::mat3_add_scaled(&mut sigma, outer, w_sigma);
            numerics::mat3_add_scaled(&mut alpha, outer, w_sigma * (energy - ef) / t_red);
        }
        Ok((sigma, alpha))
    }
}
