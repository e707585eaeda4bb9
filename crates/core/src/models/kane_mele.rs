//! Kane-Mele model with optional Rashba coupling.

use ndarray::{array, s, Array2};
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::{
    hamiltonian::Hamiltonian,
    numerics::{self, Vec3},
};

/// 4×4 spin-block model: a graphene-like sublattice part plus intrinsic
/// spin-orbit coupling `λ_SO` and sublattice potential `λ_v`. A nonzero
/// `λ_r` adds the Rashba blocks coupling the spin sectors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct KaneMele {
    pub t: f64,
    pub lambda_so: f64,
    pub lambda_v: f64,
    pub lambda_r: f64,
}

impl Default for KaneMele {
    fn default() -> Self {
        Self {
            t: 1.0,
            lambda_so: 0.1,
            lambda_v: 0.2,
            lambda_r: 0.0,
        }
    }
}

impl Hamiltonian for KaneMele {
    fn hk(&self, k: &Vec3) -> Array2<Complex64> {
        let (kx, ky) = (k[0], k[1]);
        let i = Complex64::i();
        let f = (i * kx).exp()
            + (i * (0.5 * kx)).exp() * (2.0 * (0.5 * 3f64.sqrt() * ky).cos());

        // Sublattice part: -t·Re(f)·σx - t·Im(f)·σy + λv·σz.
        let h0 = array![
            [
                Complex64::new(self.lambda_v, 0.0),
                Complex64::new(-self.t * f.re, self.t * f.im)
            ],
            [
                Complex64::new(-self.t * f.re, -self.t * f.im),
                Complex64::new(-self.lambda_v, 0.0)
            ],
        ];
        let so = array![
            [Complex64::new(self.lambda_so, 0.0), Complex64::new(0.0, 0.0)],
            [Complex64::new(0.0, 0.0), Complex64::new(-self.lambda_so, 0.0)],
        ];

        let mut h = Array2::<Complex64>::zeros((4, 4));
        h.slice_mut(s![0..2, 0..2]).assign(&(&h0 + &so));
        h.slice_mut(s![2..4, 2..4]).assign(&(&h0 - &so));

        if self.lambda_r != 0.0 {
            // Rashba block: λr·(sin kx·σx - sin ky·σy).
            let r = array![
                [
                    Complex64::new(0.0, 0.0),
                    Complex64::new(self.lambda_r * kx.sin(), self.lambda_r * ky.sin())
                ],
                [
                    Complex64::new(self.lambda_r * kx.sin(), -self.lambda_r * ky.sin()),
                    Complex64::new(0.0, 0.0)
                ],
            ];
            h.slice_mut(s![0..2, 2..4]).assign(&r);
            h.slice_mut(s![2..4, 0..2]).assign(&numerics::adjoint(&r));
        }

        h
    }
}
