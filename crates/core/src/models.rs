//! Concrete momentum-space band models.

pub mod altermagnet;
pub mod haldane;
pub mod kane_mele;

pub use altermagnet::Altermagnet;
pub use haldane::Haldane;
pub use kane_mele::KaneMele;

use ndarray::{array, Array2};
use num_complex::Complex64;

/// `ε·σ₀ + d·σ` for the two-band models.
pub(crate) fn two_band(eps: f64, dx: f64, dy: f64, dz: f64) -> Array2<Complex64> {
    array![
        [Complex64::new(eps + dz, 0.0), Complex64::new(dx, -dy)],
        [Complex64::new(dx, dy), Complex64::new(eps - dz, 0.0)],
    ]
}
