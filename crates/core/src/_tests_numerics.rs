#![cfg(test)]

use super::models::Altermagnet;
use super::numerics::{
    self, cross, dot, fermi, fermi_derivative, mat3_mul, mat3_transpose, outer, MAT3_ZERO,
};

#[test]
fn cross_product_follows_the_right_hand_rule() {
    assert_eq!(cross([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
    assert_eq!(cross([0.0, 1.0, 0.0], [1.0, 0.0, 0.0]), [0.0, 0.0, -1.0]);
    assert_eq!(dot(cross([1.0, 2.0, 3.0], [4.0, 5.0, 6.0]), [1.0, 2.0, 3.0]), 0.0);
}

#[test]
fn outer_product_is_rank_one() {
    let m = outer([1.0, 2.0, 0.0], [3.0, -1.0, 0.0]);
    assert_eq!(m[0][0], 3.0);
    assert_eq!(m[0][1], -1.0);
    assert_eq!(m[1][0], 6.0);
    assert_eq!(m[1][1], -2.0);
    // rows are parallel
    assert_eq!(m[0][0] * m[1][1], m[0][1] * m[1][0]);
}

#[test]
fn mat3_mul_against_transpose_identity() {
    let a = [[1.0, 2.0, 0.0], [0.0, 1.0, 3.0], [4.0, 0.0, 1.0]];
    let at = mat3_transpose(a);
    let prod = mat3_mul(a, at);
    // (A·Aᵀ) is symmetric
    for i in 0..3 {
        for j in 0..3 {
            assert!((prod[i][j] - prod[j][i]).abs() < 1e-12);
        }
    }
    assert_eq!(mat3_mul(MAT3_ZERO, a), MAT3_ZERO);
}

#[test]
fn fermi_function_limits() {
    let beta = 100.0;
    assert!((fermi(0.0, 0.0, beta) - 0.5).abs() < 1e-12);
    assert!(fermi(1.0, 0.0, beta) < 1e-12);
    assert!((fermi(-1.0, 0.0, beta) - 1.0).abs() < 1e-12);
    // extreme arguments must not overflow into NaN
    assert_eq!(fermi(1e6, 0.0, beta), 0.0);
    assert!(fermi(-1e6, 0.0, beta).is_finite());
}

#[test]
fn fermi_derivative_peaks_at_the_fermi_level() {
    let beta = 50.0;
    let peak = fermi_derivative(0.0, 0.0, beta);
    assert!((peak + 0.25 * beta).abs() < 1e-12);
    for e in [-0.5, -0.1, 0.1, 0.5] {
        let value = fermi_derivative(e, 0.0, beta);
        assert!(value < 0.0);
        assert!(value > peak);
        // even in energy about Ef
        assert!((value - fermi_derivative(-e, 0.0, beta)).abs() < 1e-14);
    }
    assert_eq!(fermi_derivative(1e6, 0.0, beta), 0.0);
}

#[test]
fn finite_difference_stencils_match_the_analytic_derivative() {
    let model = Altermagnet {
        t: 1.0,
        j: 0.3,
        lambda: 0.2,
    };
    let k: [f64; 3] = [0.7, -0.3, 0.0];
    let (kx, ky) = (k[0], k[1]);
    // analytic ∂H/∂kx entries
    let deps = 2.0 * kx.sin();
    let ddz = -0.3 * kx.sin();
    let ddx = 0.1 * (0.5 * (kx + ky)).cos();
    let ddy = -0.1 * (0.5 * (ky - kx)).cos();

    for (dh, tol) in [
        (numerics::dh_dk_central2(&model, &k, 0, 1e-5), 1e-8),
        (numerics::dh_dk_central4(&model, &k, 0, 1e-3), 1e-9),
    ] {
        assert!((dh[(0, 0)].re - (deps + ddz)).abs() < tol);
        assert!((dh[(1, 1)].re - (deps - ddz)).abs() < tol);
        assert!((dh[(0, 1)].re - ddx).abs() < tol);
        assert!((dh[(0, 1)].im + ddy).abs() < tol);
    }
}
