//! Small fixed-size vector/tensor helpers and shared numerical kernels.
//!
//! The transport tensors are 3×3 and the field vectors are 3-component, so
//! plain arrays with free helpers keep the hot per-k-point loops allocation
//! free. Dense matrix work (Hamiltonians, eigenvectors) stays in `ndarray`.

use ndarray::{Array2, ArrayView1};
use num_complex::Complex64;

use crate::hamiltonian::Hamiltonian;

pub type Vec3 = [f64; 3];
pub type Mat3 = [[f64; 3]; 3];

pub const MAT3_ZERO: Mat3 = [[0.0; 3]; 3];

pub fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

pub fn cross(a: Vec3, b: Vec3) -> Vec3 {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

pub fn add(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

pub fn scale(a: Vec3, s: f64) -> Vec3 {
    [a[0] * s, a[1] * s, a[2] * s]
}

pub fn outer(a: Vec3, b: Vec3) -> Mat3 {
    let mut m = MAT3_ZERO;
    for (i, row) in m.iter_mut().enumerate() {
        for (j, entry) in row.iter_mut().enumerate() {
            *entry = a[i] * b[j];
        }
    }
    m
}

pub fn mat3_add(a: Mat3, b: Mat3) -> Mat3 {
    let mut m = a;
    for i in 0..3 {
        for j in 0..3 {
            m[i][j] += b[i][j];
        }
    }
    m
}

pub fn mat3_scale(a: Mat3, s: f64) -> Mat3 {
    let mut m = a;
    for row in m.iter_mut() {
        for entry in row.iter_mut() {
            *entry *= s;
        }
    }
    m
}

pub fn mat3_add_scaled(acc: &mut Mat3, m: Mat3, s: f64) {
    for i in 0..3 {
        for j in 0..3 {
            acc[i][j] += m[i][j] * s;
        }
    }
}

pub fn mat3_transpose(a: Mat3) -> Mat3 {
    let mut m = MAT3_ZERO;
    for i in 0..3 {
        for j in 0..3 {
            m[i][j] = a[j][i];
        }
    }
    m
}

pub fn mat3_mul(a: Mat3, b: Mat3) -> Mat3 {
    let mut m = MAT3_ZERO;
    for i in 0..3 {
        for j in 0..3 {
            for (l, b_row) in b.iter().enumerate() {
                m[i][j] += a[i][l] * b_row[j];
            }
        }
    }
    m
}

/// Fermi-Dirac occupation.
pub fn fermi(e: f64, ef: f64, beta: f64) -> f64 {
    1.0 / ((beta * (e - ef)).exp() + 1.0)
}

/// Closed-form `∂f/∂E = -(β/4)·sech²(β(E-Ef)/2)`, negative everywhere.
pub fn fermi_derivative(e: f64, ef: f64, beta: f64) -> f64 {
    let sech = 1.0 / (0.5 * beta * (e - ef)).cosh();
    -0.25 * beta * sech * sech
}

/// `⟨a|b⟩` for eigenvector columns.
pub fn overlap(a: ArrayView1<Complex64>, b: ArrayView1<Complex64>) -> Complex64 {
    a.iter().zip(b.iter()).map(|(x, y)| x.conj() * y).sum()
}

/// `⟨bra|op|ket⟩` for eigenvector columns.
pub fn braket(
    bra: ArrayView1<Complex64>,
    op: &Array2<Complex64>,
    ket: ArrayView1<Complex64>,
) -> Complex64 {
    let applied = op.dot(&ket);
    bra.iter().zip(applied.iter()).map(|(b, a)| b.conj() * a).sum()
}

/// Conjugate transpose.
pub fn adjoint(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// 2-point centered `∂H/∂k` along `axis`.
pub fn dh_dk_central2<H: Hamiltonian + ?Sized>(
    h: &H,
    k: &Vec3,
    axis: usize,
    step: f64,
) -> Array2<Complex64> {
    let hp = h.hk(&shifted(k, axis, step));
    let hm = h.hk(&shifted(k, axis, -step));
    (&hp - &hm).mapv(|z| z / (2.0 * step))
}

/// 4-point (4th-order) centered `∂H/∂k` along `axis`.
pub fn dh_dk_central4<H: Hamiltonian + ?Sized>(
    h: &H,
    k: &Vec3,
    axis: usize,
    step: f64,
) -> Array2<Complex64> {
    let hp2 = h.hk(&shifted(k, axis, 2.0 * step));
    let hp1 = h.hk(&shifted(k, axis, step));
    let hm1 = h.hk(&shifted(k, axis, -step));
    let hm2 = h.hk(&shifted(k, axis, -2.0 * step));
    ((&hp1 - &hm1).mapv(|z| z * 8.0) - &hp2 + &hm2).mapv(|z| z / (12.0 * step))
}

fn shifted(k: &Vec3, axis: usize, step: f64) -> Vec3 {
    let mut q = *k;
    q[axis] += step;
    q
}
