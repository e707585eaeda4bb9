//! Altermagnetic two-band model with d-wave spin splitting.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::{hamiltonian::Hamiltonian, models::two_band, numerics::Vec3};

/// Square-lattice altermagnet: scalar hopping, anisotropic spin splitting
/// `J(cos kx - cos ky)` and optional spin-orbit terms of strength λ.
///
/// With λ = 0 the Hamiltonian is diagonal in spin and mirror symmetric,
/// carrying no Berry curvature; λ ≠ 0 breaks the mirror and opens the
/// anomalous response channels.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Altermagnet {
    /// Hopping amplitude.
    pub t: f64,
    /// Spin-splitting strength.
    pub j: f64,
    /// Spin-orbit coupling strength.
    pub lambda: f64,
}

impl Default for Altermagnet {
    fn default() -> Self {
        Self {
            t: 1.0,
            j: 0.1,
            lambda: 0.2,
        }
    }
}

impl Hamiltonian for Altermagnet {
    fn hk(&self, k: &Vec3) -> Array2<Complex64> {
        let (kx, ky) = (k[0], k[1]);
        let eps = -2.0 * self.t * (kx.cos() + ky.cos());
        let dz = self.j * (kx.cos() - ky.cos());
        let dx = self.lambda * (0.5 * (kx + ky)).sin();
        let dy = self.lambda * (0.5 * (ky - kx)).sin();
        two_band(eps, dx, dy, dz)
    }
}
