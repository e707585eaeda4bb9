#![cfg(test)]

use super::hamiltonian::Hamiltonian;
use super::models::{Altermagnet, Haldane, KaneMele};
use super::numerics;

fn check_eigensystem(h: &dyn Hamiltonian, k: [f64; 3]) {
    let es = h.eigensystem(&k).expect("eigensystem should converge");
    let evals: Vec<f64> = es.evals.iter().copied().collect();
    for pair in evals.windows(2) {
        assert!(pair[0] <= pair[1] + 1e-12, "eigenvalues must be ascending");
    }
    for a in 0..es.num_bands() {
        for b in 0..es.num_bands() {
            let ip = numerics::overlap(es.evecs.column(a), es.evecs.column(b));
            let expected = if a == b { 1.0 } else { 0.0 };
            assert!(
                (ip.norm() - expected).abs() < 1e-10,
                "columns {a},{b} not orthonormal: |<a|b>| = {}",
                ip.norm()
            );
        }
    }
}

#[test]
fn eigensystems_are_sorted_and_orthonormal() {
    let k = [0.3, -0.7, 0.0];
    check_eigensystem(&Altermagnet::default(), k);
    check_eigensystem(&Haldane::default(), k);
    check_eigensystem(
        &KaneMele {
            lambda_r: 0.3,
            ..KaneMele::default()
        },
        k,
    );
}

#[test]
fn eigensystem_is_recomputed_consistently() {
    let model = Haldane::default();
    let k = [1.1, 0.4, 0.0];
    let first = model.eigensystem(&k).unwrap();
    let second = model.eigensystem(&k).unwrap();
    for (a, b) in first.evals.iter().zip(second.evals.iter()) {
        assert_eq!(a, b);
    }
}

#[test]
fn eigenvalues_reconstruct_the_hamiltonian() {
    // U·diag(E)·U† must reproduce H(k).
    let model = Altermagnet::default();
    let k = [0.9, 0.2, 0.0];
    let h = model.hk(&k);
    let es = model.eigensystem(&k).unwrap();
    for row in 0..2 {
        for col in 0..2 {
            let mut rebuilt = num_complex::Complex64::new(0.0, 0.0);
            for band in 0..2 {
                rebuilt += es.evecs[(row, band)] * es.evals[band] * es.evecs[(col, band)].conj();
            }
            assert!((rebuilt - h[(row, col)]).norm() < 1e-10);
        }
    }
}
