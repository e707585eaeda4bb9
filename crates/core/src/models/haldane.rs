//! Haldane model on the honeycomb lattice.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::{hamiltonian::Hamiltonian, models::two_band, numerics::Vec3};

/// Two-band Chern insulator: nearest-neighbour hopping `t1`, complex
/// next-nearest hopping `t2·e^{iφ}` and sublattice mass `m`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Haldane {
    pub t1: f64,
    pub t2: f64,
    pub phi: f64,
    pub m: f64,
}

impl Default for Haldane {
    fn default() -> Self {
        Self {
            t1: 1.0,
            t2: 0.1,
            phi: std::f64::consts::FRAC_PI_2,
            m: 0.2,
        }
    }
}

impl Hamiltonian for Haldane {
    fn hk(&self, k: &Vec3) -> Array2<Complex64> {
        let (kx, ky) = (k[0], k[1]);
        let i = Complex64::i();
        let arg = 0.5 * kx + 0.5 * 3f64.sqrt() * ky;
        let f = (Complex64::new(1.0, 0.0) + (-i * kx).exp() + (-i * arg).exp()) * self.t1;
        let dz = self.m - 2.0 * self.t2 * self.phi.sin() * (kx.sin() - arg.sin());
        two_band(0.0, f.re, f.im, dz)
    }
}
