//! Counters for recoverable numerical edge cases.
//!
//! Vanishing link overlaps and near-degenerate band pairs are expected at
//! isolated high-symmetry points and must not abort a sweep; the fallback
//! paths fire silently. These counters let the surrounding tooling report
//! how often that happened.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Serialize;

#[derive(Debug, Default)]
pub struct TransportDiagnostics {
    vanishing_overlap: AtomicUsize,
    degenerate_pair: AtomicUsize,
    clamped_curvature: AtomicUsize,
    phase_space_fallback: AtomicUsize,
}

impl TransportDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_vanishing_overlap(&self) {
        self.vanishing_overlap.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_degenerate_pair(&self) {
        self.degenerate_pair.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_clamped_curvature(&self) {
        self.clamped_curvature.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_phase_space_fallback(&self) {
        self.phase_space_fallback.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> DiagnosticsSnapshot {
        DiagnosticsSnapshot {
            vanishing_overlap: self.vanishing_overlap.load(Ordering::Relaxed),
            degenerate_pair: self.degenerate_pair.load(Ordering::Relaxed),
            clamped_curvature: self.clamped_curvature.load(Ordering::Relaxed),
            phase_space_fallback: self.phase_space_fallback.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time view of the counters, serialisable for log output.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DiagnosticsSnapshot {
    pub vanishing_overlap: usize,
    pub degenerate_pair: usize,
    pub clamped_curvature: usize,
    pub phase_space_fallback: usize,
}

impl DiagnosticsSnapshot {
    pub fn total(&self) -> usize {
        self.vanishing_overlap
            + self.degenerate_pair
            + self.clamped_curvature
            + self.phase_space_fallback
    }
}
