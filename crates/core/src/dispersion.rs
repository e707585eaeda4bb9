//! Analytic dispersion contract for single-band references.

use ndarray::{array, Array2};
use num_complex::Complex64;

use crate::{hamiltonian::Hamiltonian, numerics::Vec3};

/// Bands with a closed-form ε(k) and ∇ε(k), used to validate the
/// finite-difference group velocities.
pub trait Dispersion {
    fn energy(&self, k: &Vec3) -> f64;
    fn group_velocity(&self, k: &Vec3) -> Vec3;
}

/// Nearest-neighbour tight binding on the square lattice.
#[derive(Debug, Clone, Copy)]
pub struct TightBindingSquare {
    pub t: f64,
}

impl Default for TightBindingSquare {
    fn default() -> Self {
        Self { t: 1.0 }
    }
}

impl Dispersion for TightBindingSquare {
    fn energy(&self, k: &Vec3) -> f64 {
        -2.0 * self.t * (k[0].cos() + k[1].cos())
    }

    fn group_velocity(&self, k: &Vec3) -> Vec3 {
        [2.0 * self.t * k[0].sin(), 2.0 * self.t * k[1].sin(), 0.0]
    }
}

impl Hamiltonian for TightBindingSquare {
    fn hk(&self, k: &Vec3) -> Array2<Complex64> {
        array![[Complex64::new(self.energy(k), 0.0)]]
    }
}
