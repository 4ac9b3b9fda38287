//! Public-sample estimation of the quantum bit error rate.

use log::debug;
use serde::Serialize;

use crate::random_source::RandomSource;

/// Outcome of comparing a public sample of sifted bits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QberEstimate {
    /// Positions (drawn from the sifted set) revealed for comparison, ascending.
    pub sample_positions: Vec<usize>,
    /// Revealed positions where Alice's and Bob's bits differ.
    pub mismatches: usize,
    /// `mismatches / sample_positions.len()`, or `None` for an empty sample.
    pub qber: Option<f64>,
}

/// Number of sifted bits revealed: `round(sample_fraction * sifted_len)`,
/// rounding halves away from zero.
pub fn sample_size(sample_fraction: f64, sifted_len: usize) -> usize {
    let size = (sample_fraction * sifted_len as f64).round() as usize;
    size.min(sifted_len)
}

/// Draw the public sample from `sift_idx` and count disagreements.
pub fn estimate_qber(
    alice_bits: &[bool],
    bob_bits: &[bool],
    sift_idx: &[usize],
    sample_fraction: f64,
    rng: &mut RandomSource,
) -> QberEstimate {
    let amount = sample_size(sample_fraction, sift_idx.len());
    let sample_positions = rng.sample_without_replacement(sift_idx, amount);

    let mismatches = sample_positions
        .iter()
        .filter(|&&i| alice_bits[i] != bob_bits[i])
        .count();

    let qber = if sample_positions.is_empty() {
        None
    } else {
        Some(mismatches as f64 / sample_positions.len() as f64)
    };

    debug!(
        "qber: sampled {} of {} sifted, {} mismatches",
        sample_positions.len(),
        sift_idx.len(),
        mismatches
    );

    QberEstimate {
        sample_positions,
        mismatches,
        qber,
    }
}
