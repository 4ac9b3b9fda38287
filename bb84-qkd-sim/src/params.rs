//! Input parameters for a BB84 run.

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

/// Configuration for a single BB84 simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationParameters {
    /// Number of qubits Alice sends.
    pub n_bits: usize,
    /// Whether Eve sits on the quantum channel at all.
    pub eve_present: bool,
    /// Probability that Eve intercepts a given qubit (ignored without Eve).
    pub eve_strength: f64,
    /// Independent bit-flip probability on Bob's observed bit.
    pub channel_noise: f64,
    /// Fraction of sifted bits revealed publicly for QBER estimation.
    pub sample_fraction: f64,
    /// Abort bound: a QBER above this rejects the key.
    pub qber_threshold: f64,
    /// Reproducibility key.
    pub seed: u64,
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            n_bits: 1000,
            eve_present: false,
            eve_strength: 0.5,
            channel_noise: 0.0,
            sample_fraction: 0.5,
            qber_threshold: 0.11,
            seed: 42,
        }
    }
}

fn in_unit_interval(x: f64) -> bool {
    (0.0..=1.0).contains(&x)
}

impl SimulationParameters {
    /// Check every field against its allowed range. NaN is always rejected.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.n_bits == 0 {
            return Err(ValidationError::ZeroBits);
        }
        if !in_unit_interval(self.eve_strength) {
            return Err(ValidationError::EveStrength(self.eve_strength));
        }
        if !in_unit_interval(self.channel_noise) {
            return Err(ValidationError::ChannelNoise(self.channel_noise));
        }
        if !(self.sample_fraction > 0.0 && self.sample_fraction <= 1.0) {
            return Err(ValidationError::SampleFraction(self.sample_fraction));
        }
        if !in_unit_interval(self.qber_threshold) {
            return Err(ValidationError::QberThreshold(self.qber_threshold));
        }
        Ok(())
    }

    /// Interception probability actually applied by the channel.
    pub fn effective_eve_strength(&self) -> f64 {
        if self.eve_present {
            self.eve_strength
        } else {
            0.0
        }
    }

    pub fn with_n_bits(mut self, n_bits: usize) -> Self {
        self.n_bits = n_bits;
        self
    }

    /// Put Eve on the channel with the given interception probability.
    pub fn with_eve(mut self, strength: f64) -> Self {
        self.eve_present = true;
        self.eve_strength = strength;
        self
    }

    pub fn without_eve(mut self) -> Self {
        self.eve_present = false;
        self
    }

    pub fn with_channel_noise(mut self, noise: f64) -> Self {
        self.channel_noise = noise;
        self
    }

    pub fn with_sample_fraction(mut self, fraction: f64) -> Self {
        self.sample_fraction = fraction;
        self
    }

    pub fn with_qber_threshold(mut self, threshold: f64) -> Self {
        self.qber_threshold = threshold;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(SimulationParameters::default().validate(), Ok(()));
    }

    #[test]
    fn zero_bits_rejected() {
        let params = SimulationParameters::default().with_n_bits(0);
        assert_eq!(params.validate(), Err(ValidationError::ZeroBits));
    }

    #[test]
    fn sample_fraction_bounds() {
        let base = SimulationParameters::default();
        assert_eq!(
            base.clone().with_sample_fraction(1.5).validate(),
            Err(ValidationError::SampleFraction(1.5))
        );
        assert_eq!(
            base.clone().with_sample_fraction(0.0).validate(),
            Err(ValidationError::SampleFraction(0.0))
        );
        assert!(base.clone().with_sample_fraction(1.0).validate().is_ok());
        assert!(base.with_sample_fraction(f64::NAN).validate().is_err());
    }

    #[test]
    fn probability_fields_bounded() {
        let base = SimulationParameters::default();
        assert_eq!(
            base.clone().with_eve(1.2).validate(),
            Err(ValidationError::EveStrength(1.2))
        );
        assert_eq!(
            base.clone().with_channel_noise(-0.1).validate(),
            Err(ValidationError::ChannelNoise(-0.1))
        );
        assert_eq!(
            base.clone().with_qber_threshold(2.0).validate(),
            Err(ValidationError::QberThreshold(2.0))
        );
        assert!(base.with_eve(1.0).with_channel_noise(1.0).validate().is_ok());
    }

    #[test]
    fn strength_is_validated_even_without_eve() {
        let mut params = SimulationParameters::default();
        params.eve_strength = f64::NAN;
        assert!(!params.eve_present);
        assert!(params.validate().is_err());
    }

    #[test]
    fn effective_strength_follows_presence() {
        let params = SimulationParameters::default().with_eve(0.7);
        assert_eq!(params.effective_eve_strength(), 0.7);
        assert_eq!(params.without_eve().effective_eve_strength(), 0.0);
    }

    #[test]
    fn deserializes_partial_toml() {
        let params: SimulationParameters = toml::from_str("n_bits = 64\nseed = 7\n").unwrap();
        assert_eq!(params.n_bits, 64);
        assert_eq!(params.seed, 7);
        assert_eq!(params.qber_threshold, 0.11);
    }
}
