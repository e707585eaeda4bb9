#![cfg(test)]

use num_complex::Complex64;

use super::hamiltonian::Hamiltonian;
use super::models::{Altermagnet, Haldane, KaneMele};
use super::numerics;

fn assert_hermitian(h: &dyn Hamiltonian, k: [f64; 3]) {
    let matrix = h.hk(&k);
    let adj = numerics::adjoint(&matrix);
    for (a, b) in matrix.iter().zip(adj.iter()) {
        assert!((a - b).norm() < 1e-12, "H(k) must equal its adjoint");
    }
}

#[test]
fn model_hamiltonians_are_hermitian() {
    let k = [0.8, -1.3, 0.0];
    assert_hermitian(&Altermagnet::default(), k);
    assert_hermitian(&Haldane::default(), k);
    assert_hermitian(&KaneMele::default(), k);
    assert_hermitian(
        &KaneMele {
            lambda_r: 0.4,
            ..KaneMele::default()
        },
        k,
    );
}

#[test]
fn altermagnet_eigenvalues_match_the_closed_form() {
    let model = Altermagnet {
        t: 1.0,
        j: 0.3,
        lambda: 0.2,
    };
    let k: [f64; 3] = [0.9, -0.4, 0.0];
    let (kx, ky) = (k[0], k[1]);
    let eps = -2.0 * (kx.cos() + ky.cos());
    let dz = 0.3 * (kx.cos() - ky.cos());
    let dx = 0.2 * (0.5 * (kx + ky)).sin();
    let dy = 0.2 * (0.5 * (ky - kx)).sin();
    let d = (dx * dx + dy * dy + dz * dz).sqrt();

    let es = model.eigensystem(&k).unwrap();
    assert!((es.evals[0] - (eps - d)).abs() < 1e-12);
    assert!((es.evals[1] - (eps + d)).abs() < 1e-12);
}

#[test]
fn haldane_spectrum_is_particle_hole_symmetric() {
    // H = d·σ with no identity part, so the bands come in ± pairs.
    let model = Haldane::default();
    for k in [[0.4, 1.2, 0.0], [-2.0, 0.3, 0.0]] {
        let es = model.eigensystem(&k).unwrap();
        assert!((es.evals[0] + es.evals[1]).abs() < 1e-12);
    }
}

#[test]
fn kane_mele_spin_blocks_decouple_without_rashba() {
    let model = KaneMele::default();
    let h = model.hk(&[0.7, -0.2, 0.0]);
    for row in 0..2 {
        for col in 2..4 {
            assert_eq!(h[(row, col)], Complex64::new(0.0, 0.0));
            assert_eq!(h[(col, row)], Complex64::new(0.0, 0.0));
        }
    }
}

#[test]
fn rashba_coupling_populates_the_off_diagonal_blocks() {
    let model = KaneMele {
        lambda_r: 0.4,
        ..KaneMele::default()
    };
    let h = model.hk(&[0.7, -0.2, 0.0]);
    let coupling: f64 = (0..2)
        .flat_map(|row| (2..4).map(move |col| (row, col)))
        .map(|(row, col)| h[(row, col)].norm())
        .sum();
    assert!(coupling > 1e-3);
}
