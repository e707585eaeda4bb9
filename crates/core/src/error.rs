//! Error taxonomy for the transport engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    /// Hermitian eigen-decomposition failed to converge. Fatal for the whole
    /// k-sum: dropping the point would bias the `1/|mesh|` normalisation.
    #[error("eigen-decomposition failed at k = ({kx:.6}, {ky:.6}, {kz:.6}): {source}")]
    Eigensystem {
        kx: f64,
        ky: f64,
        kz: f64,
        #[source]
        source: ndarray_linalg::error::LinalgError,
    },
}
