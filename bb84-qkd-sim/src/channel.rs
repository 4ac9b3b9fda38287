//! Quantum channel between Alice and Bob.
//!
//! Per qubit, in index order:
//! 1. Alice's state is prepared from her bit and basis.
//! 2. With probability `eve_strength`, Eve intercepts: she measures in a
//!    random basis and re-sends a fresh state prepared in *her* basis with
//!    the bit she read (intercept-resend).
//! 3. Bob measures whatever arrives in his own basis.
//! 4. With probability `channel_noise`, Bob's observed bit is flipped.
//!
//! Eve's basis choices never leave this module; only the announced
//! Alice/Bob bases are public.

use log::debug;

use crate::bb84_states::{measure, prepare, BB84State, Basis};
use crate::random_source::RandomSource;

/// Channel parameters for one run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelSimulator {
    eve_strength: f64,
    channel_noise: f64,
}

/// What Bob observed after the quantum exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub bob_bits: Vec<bool>,
    /// Number of qubits Eve measured and re-sent.
    pub intercepted: usize,
}

impl ChannelSimulator {
    /// `eve_strength` and `channel_noise` must already be validated to `[0, 1]`.
    pub fn new(eve_strength: f64, channel_noise: f64) -> Self {
        Self {
            eve_strength,
            channel_noise,
        }
    }

    /// Intercept-resend: Eve reads `state` in a random basis and forwards
    /// her own preparation of what she saw.
    fn intercept(&self, state: BB84State, rng: &mut RandomSource) -> BB84State {
        let eve_basis = rng.basis();
        let eve_bit = measure(state, eve_basis, rng);
        prepare(eve_bit, eve_basis)
    }

    /// Send every qubit through the channel and return Bob's outcomes.
    ///
    /// # Panics
    ///
    /// Panics if the three input sequences differ in length.
    pub fn transmit(
        &self,
        alice_bits: &[bool],
        alice_bases: &[Basis],
        bob_bases: &[Basis],
        rng: &mut RandomSource,
    ) -> Transmission {
        assert!(
            alice_bits.len() == alice_bases.len() && alice_bases.len() == bob_bases.len(),
            "channel inputs must have equal length ({}, {}, {})",
            alice_bits.len(),
            alice_bases.len(),
            bob_bases.len()
        );

        let mut bob_bits = Vec::with_capacity(alice_bits.len());
        let mut intercepted = 0;

        for ((&bit, &alice_basis), &bob_basis) in
            alice_bits.iter().zip(alice_bases).zip(bob_bases)
        {
            let mut state = prepare(bit, alice_basis);

            if self.eve_strength > 0.0 && rng.bernoulli(self.eve_strength) {
                state = self.intercept(state, rng);
                intercepted += 1;
            }

            let mut observed = measure(state, bob_basis, rng);
            if rng.bernoulli(self.channel_noise) {
                observed = !observed;
            }
            bob_bits.push(observed);
        }

        debug!(
            "channel: {} qubits, {} intercepted (strength {}), noise {}",
            alice_bits.len(),
            intercepted,
            self.eve_strength,
            self.channel_noise
        );

        Transmission {
            bob_bits,
            intercepted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_channel(n: usize, eve: f64, noise: f64, seed: u64) -> (Vec<bool>, Vec<Basis>, Vec<Basis>, Transmission) {
        let mut rng = RandomSource::from_seed(seed);
        let alice_bits = rng.bits(n);
        let alice_bases = rng.bases(n);
        let bob_bases = rng.bases(n);
        let out = ChannelSimulator::new(eve, noise).transmit(&alice_bits, &alice_bases, &bob_bases, &mut rng);
        (alice_bits, alice_bases, bob_bases, out)
    }

    fn sifted_error_rate(alice_bits: &[bool], alice_bases: &[Basis], bob_bases: &[Basis], bob_bits: &[bool]) -> f64 {
        let mut sifted = 0usize;
        let mut errors = 0usize;
        for i in 0..alice_bits.len() {
            if alice_bases[i] == bob_bases[i] {
                sifted += 1;
                if alice_bits[i] != bob_bits[i] {
                    errors += 1;
                }
            }
        }
        errors as f64 / sifted as f64
    }

    #[test]
    fn clean_channel_preserves_sifted_bits() {
        let (alice_bits, alice_bases, bob_bases, out) = run_channel(2000, 0.0, 0.0, 1);
        assert_eq!(out.intercepted, 0);
        for i in 0..alice_bits.len() {
            if alice_bases[i] == bob_bases[i] {
                assert_eq!(alice_bits[i], out.bob_bits[i], "position {}", i);
            }
        }
    }

    #[test]
    fn full_noise_inverts_sifted_bits() {
        let (alice_bits, alice_bases, bob_bases, out) = run_channel(500, 0.0, 1.0, 2);
        for i in 0..alice_bits.len() {
            if alice_bases[i] == bob_bases[i] {
                assert_ne!(alice_bits[i], out.bob_bits[i]);
            }
        }
    }

    #[test]
    fn full_interception_gives_quarter_error_rate() {
        let (alice_bits, alice_bases, bob_bases, out) = run_channel(20_000, 1.0, 0.0, 3);
        assert_eq!(out.intercepted, 20_000);
        let rate = sifted_error_rate(&alice_bits, &alice_bases, &bob_bases, &out.bob_bits);
        assert!((rate - 0.25).abs() < 0.02, "error rate {}", rate);
    }

    #[test]
    fn partial_interception_count_tracks_strength() {
        let (_, _, _, out) = run_channel(20_000, 0.3, 0.0, 4);
        let fraction = out.intercepted as f64 / 20_000.0;
        assert!((fraction - 0.3).abs() < 0.02, "intercepted fraction {}", fraction);
    }

    #[test]
    fn mismatched_bases_are_uncorrelated() {
        let (alice_bits, alice_bases, bob_bases, out) = run_channel(20_000, 0.0, 0.0, 5);
        let mut total = 0usize;
        let mut agree = 0usize;
        for i in 0..alice_bits.len() {
            if alice_bases[i] == bob_bases[i].other() {
                total += 1;
                if alice_bits[i] == out.bob_bits[i] {
                    agree += 1;
                }
            }
        }
        let ratio = agree as f64 / total as f64;
        assert!((ratio - 0.5).abs() < 0.03, "agreement {}", ratio);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn length_mismatch_is_fatal() {
        let mut rng = RandomSource::from_seed(0);
        ChannelSimulator::new(0.0, 0.0).transmit(&[true], &[Basis::Diagonal], &[], &mut rng);
    }
}
