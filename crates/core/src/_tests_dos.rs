#![cfg(test)]

use std::f64::consts::PI;

use super::dos::DosCalculator;
use super::mesh::Mesh;
use super::models::Altermagnet;

#[test]
fn total_dos_integrates_to_the_band_count() {
    let model = Altermagnet::default();
    let mesh = Mesh::new(20, 20, 1, PI);
    let dos = DosCalculator::new(&model, &mesh);
    let hist = dos.total(-6.0, 6.0, 240, 0.05).unwrap();
    assert_eq!(hist.energies.len(), 240);
    assert_eq!(hist.values.len(), 240);

    let de = 12.0 / 240.0;
    let integral: f64 = hist.values.iter().map(|v| v * de).sum();
    // two bands per unit cell; the ±3σ truncation costs ~0.3%
    assert!((integral - 2.0).abs() < 0.05, "integral = {integral}");
    assert!(hist.values.iter().all(|v| *v >= 0.0));
}

#[test]
fn bin_centres_span_the_requested_window() {
    let model = Altermagnet::default();
    let mesh = Mesh::new(4, 4, 1, PI);
    let dos = DosCalculator::new(&model, &mesh);
    let hist = dos.total(-1.0, 1.0, 10, 0.1).unwrap();
    let de = 0.2;
    assert!((hist.energies[0] - (-1.0 + 0.5 * de)).abs() < 1e-12);
    assert!((hist.energies[9] - (1.0 - 0.5 * de)).abs() < 1e-12);
}

#[test]
fn projected_dos_carries_unit_weight_per_orbital() {
    let model = Altermagnet::default();
    let mesh = Mesh::new(12, 12, 1, PI);
    let dos = DosCalculator::new(&model, &mesh);
    let hist = dos.projected(-8.0, 8.0, 320, 0.05, 0).unwrap();
    assert!(hist.values.iter().all(|v| *v >= 0.0));

    let de = 16.0 / 320.0;
    let integral: f64 = hist.values.iter().map(|v| v * de).sum();
    // one orbital's worth of weight, minus the Lorentzian tails
    assert!((integral - 1.0).abs() < 0.1, "integral = {integral}");
}

#[test]
#[should_panic(expected = "energy window must be non-empty")]
fn inverted_energy_window_is_rejected() {
    let model = Altermagnet::default();
    let mesh = Mesh::new(2, 2, 1, PI);
    let dos = DosCalculator::new(&model, &mesh);
    let _ = dos.total(1.0, -1.0, 10, 0.1);
}
