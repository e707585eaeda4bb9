//! Core math and physics for the qtr2d k-space transport solver.

pub mod berry;
pub mod boltzmann;
pub mod diagnostics;
pub mod dispersion;
pub mod dos;
pub mod error;
pub mod hamiltonian;
pub mod kubo;
pub mod mesh;
pub mod models;
pub mod numerics;
pub mod units;

#[cfg(test)]
mod _tests_dos;
#[cfg(test)]
mod _tests_hamiltonian;
#[cfg(test)]
mod _tests_kubo;
#[cfg(test)]
mod _tests_mesh;
#[cfg(test)]
mod _tests_models;
#[cfg(test)]
mod _tests_numerics;
