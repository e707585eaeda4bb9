//! Uniform Brillouin-zone sampling mesh.

use crate::numerics::Vec3;

/// Uniform k-point grid spanning `[-kmax, +kmax]` along each populated axis.
///
/// Axis values follow `k(i) = -kmax + 2*kmax*i/(n-1)`; an axis with a single
/// point collapses to exactly 0. Points are ordered x-outer / z-inner and the
/// sequence is immutable after construction.
#[derive(Debug, Clone)]
pub struct Mesh {
    nx: usize,
    ny: usize,
    nz: usize,
    kmax: f64,
    kpoints: Vec<Vec3>,
}

impl Mesh {
    pub fn new(nx: usize, ny: usize, nz: usize, kmax: f64) -> Self {
        assert!(
            nx > 0 && ny > 0 && nz > 0,
            "mesh axes must each have at least one point"
        );
        let mut kpoints = Vec::with_capacity(nx * ny * nz);
        for i in 0..nx {
            for j in 0..ny {
                for l in 0..nz {
                    kpoints.push([
                        axis_value(i, nx, kmax),
                        axis_value(j, ny, kmax),
                        axis_value(l, nz, kmax),
                    ]);
                }
            }
        }
        Self {
            nx,
            ny,
            nz,
            kmax,
            kpoints,
        }
    }

    /// Square in-plane grid with a collapsed z axis.
    pub fn square(n: usize, kmax: f64) -> Self {
        Self::new(n, n, 1, kmax)
    }

    pub fn k_points(&self) -> &[Vec3] {
        &self.kpoints
    }

    pub fn len(&self) -> usize {
        self.kpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kpoints.is_empty()
    }

    pub fn nx(&self) -> usize {
        self.nx
    }

    pub fn ny(&self) -> usize {
        self.ny
    }

    pub fn nz(&self) -> usize {
        self.nz
    }

    pub fn kmax(&self) -> f64 {
        self.kmax
    }
}

fn axis_value(i: usize, n: usize, kmax: f64) -> f64 {
    if n == 1 {
        0.0
    } else {
        -kmax + 2.0 * kmax * i as f64 / (n - 1) as f64
    }
}
