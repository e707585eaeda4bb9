#![cfg(test)]

use std::f64::consts::PI;

use super::mesh::Mesh;

#[test]
fn cardinality_matches_axis_counts() {
    let mesh = Mesh::new(5, 5, 1, PI);
    assert_eq!(mesh.len(), 25);
    assert_eq!(mesh.k_points().len(), 25);
    assert!(!mesh.is_empty());
}

#[test]
fn grid_spans_symmetric_interval() {
    let mesh = Mesh::new(5, 5, 1, PI);
    let first = mesh.k_points()[0];
    let last = mesh.k_points()[mesh.len() - 1];
    assert!((first[0] + PI).abs() < 1e-12);
    assert!((first[1] + PI).abs() < 1e-12);
    assert_eq!(first[2], 0.0);
    assert!((last[0] - PI).abs() < 1e-12);
    assert!((last[1] - PI).abs() < 1e-12);
    assert_eq!(last[2], 0.0);
}

#[test]
fn collapsed_axes_sit_exactly_at_zero() {
    let mesh = Mesh::new(4, 1, 1, 2.0);
    assert!(mesh.k_points().iter().all(|k| k[1] == 0.0 && k[2] == 0.0));
}

#[test]
fn single_point_mesh_sits_at_gamma() {
    let mesh = Mesh::new(1, 1, 1, PI);
    assert_eq!(mesh.len(), 1);
    assert_eq!(mesh.k_points()[0], [0.0, 0.0, 0.0]);
}

#[test]
fn axis_spacing_is_uniform() {
    let mesh = Mesh::new(3, 1, 1, 1.0);
    let xs: Vec<f64> = mesh.k_points().iter().map(|k| k[0]).collect();
    assert_eq!(xs, vec![-1.0, 0.0, 1.0]);
}

#[test]
fn square_helper_collapses_z() {
    let mesh = Mesh::square(7, PI);
    assert_eq!(mesh.len(), 49);
    assert_eq!(mesh.nx(), 7);
    assert_eq!(mesh.ny(), 7);
    assert_eq!(mesh.nz(), 1);
}

#[test]
#[should_panic(expected = "at least one point")]
fn zero_axis_count_is_rejected() {
    let _ = Mesh::new(0, 5, 1, PI);
}
