//! Hamiltonian capability contract and the shared eigensystem path.

use ndarray::{Array1, Array2};
use ndarray_linalg::{Eigh, UPLO};
use num_complex::Complex64;

use crate::{error::TransportError, numerics::Vec3};

/// Eigen-decomposition of H(k): ascending eigenvalues paired with the
/// matching eigenvector columns of a unitary matrix.
#[derive(Debug, Clone)]
pub struct Eigensystem {
    pub evals: Array1<f64>,
    pub evecs: Array2<Complex64>,
}

impl Eigensystem {
    pub fn num_bands(&self) -> usize {
        self.evals.len()
    }
}

/// Capability contract for momentum-space lattice models.
///
/// Implementors supply the Bloch Hamiltonian; the eigensystem is shared
/// logic layered on top and is recomputed fresh for every query.
pub trait Hamiltonian: Sync {
    /// Bloch Hamiltonian H(k). Must satisfy H(k) = H(k)†.
    fn hk(&self, k: &Vec3) -> Array2<Complex64>;

    /// Hermitian eigen-decomposition of H(k). A failed decomposition is
    /// surfaced to the caller, never assumed away.
    fn eigensystem(&self, k: &Vec3) -> Result<Eigensystem, TransportError> {
        let (evals, evecs) =
            self.hk(k)
                .eigh(UPLO::Lower)
                .map_err(|source| TransportError::Eigensystem {
                    kx: k[0],
                    ky: k[1],
                    kz: k[2],
                    source,
                })?;
        Ok(Eigensystem { evals, evecs })
    }
}
