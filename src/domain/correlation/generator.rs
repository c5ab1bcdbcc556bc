//! Synthetic correlation matrices for the risk engine.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::matrix::CorrelationMatrix;
use crate::domain::error::SignalError;

/// Symmetric matrix with unit diagonal and off-diagonal entries drawn
/// uniformly from [0, 1).
pub fn random_matrix<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<CorrelationMatrix, SignalError> {
    let upper: Vec<f64> = (0..n * n.saturating_sub(1) / 2)
        .map(|_| rng.gen_range(0.0..1.0))
        .collect();
    CorrelationMatrix::from_upper_triangle(n, &upper)
}

/// Reproducible matrix for a given seed.
pub fn seeded_matrix(n: usize, seed: u64) -> Result<CorrelationMatrix, SignalError> {
    random_matrix(n, &mut StdRng::seed_from_u64(seed))
}

/// Fresh seed from the thread-local generator, so unseeded runs can still be
/// logged and replayed.
pub fn fresh_seed() -> u64 {
    rand::thread_rng().r#gen()
}
