//! Seeded randomness for one simulation run.
//!
//! Every draw made by Alice, Bob, Eve and the channel goes through a single
//! `RandomSource`, which owns its own `StdRng`. Nothing in the engine touches
//! `thread_rng()`, so a fixed seed replays a run bit-for-bit.

use rand::rngs::StdRng;
use rand::seq::index;
use rand::{Rng, SeedableRng};

use crate::bb84_states::Basis;

/// Seeded generator threaded through the pipeline by `&mut`.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform bit.
    pub fn bit(&mut self) -> bool {
        self.rng.gen()
    }

    /// Uniform choice between the two BB84 bases.
    pub fn basis(&mut self) -> Basis {
        if self.rng.gen::<bool>() {
            Basis::Diagonal
        } else {
            Basis::Rectilinear
        }
    }

    /// `true` with probability `p`. `p` must lie in `[0, 1]`.
    pub fn bernoulli(&mut self, p: f64) -> bool {
        self.rng.gen_bool(p)
    }

    pub fn bits(&mut self, n: usize) -> Vec<bool> {
        (0..n).map(|_| self.bit()).collect()
    }

    pub fn bases(&mut self, n: usize) -> Vec<Basis> {
        (0..n).map(|_| self.basis()).collect()
    }

    /// Pick `amount` distinct elements of `population`, returned in the
    /// population's original order.
    ///
    /// # Panics
    ///
    /// Panics if `amount > population.len()`.
    pub fn sample_without_replacement(&mut self, population: &[usize], amount: usize) -> Vec<usize> {
        let mut picked = index::sample(&mut self.rng, population.len(), amount).into_vec();
        picked.sort_unstable();
        picked.into_iter().map(|i| population[i]).collect()
    }
}
