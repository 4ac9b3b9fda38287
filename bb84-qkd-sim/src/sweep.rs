//! QBER as a function of eavesdropping intensity.
//!
//! Each point of the curve fixes `n_bits`, `channel_noise` and
//! `sample_fraction` from the base parameters, forces Eve onto the channel
//! and varies only `eve_strength`. Every (point, trial) pair runs with its own
//! generator seeded by [`point_seed`], so points share no RNG state and the
//! curve is identical whether evaluated sequentially or in parallel.

use log::info;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::params::SimulationParameters;
use crate::simulation::run_validated;

/// Upper bound on curve resolution.
pub const MAX_STEPS: usize = 1001;
/// Upper bound on trials per point; keeps derived seeds collision-free.
pub const MAX_TRIALS: usize = 1000;

const POINT_SEED_STRIDE: u64 = 1_000_003;
const TRIAL_SEED_STRIDE: u64 = 7919;

/// Strength range and averaging policy for a sweep.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub min_strength: f64,
    pub max_strength: f64,
    /// Number of evenly spaced strengths, endpoints included.
    pub steps: usize,
    /// Independent runs averaged per strength.
    pub trials: usize,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            min_strength: 0.0,
            max_strength: 1.0,
            steps: 11,
            trials: 1,
        }
    }
}

impl SweepConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let (min, max) = (self.min_strength, self.max_strength);
        if !(0.0 <= min && min <= max && max <= 1.0) {
            return Err(ValidationError::StrengthRange { min, max });
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ValidationError::SweepSteps {
                got: self.steps,
                max: MAX_STEPS,
            });
        }
        if self.trials == 0 || self.trials > MAX_TRIALS {
            return Err(ValidationError::SweepTrials {
                got: self.trials,
                max: MAX_TRIALS,
            });
        }
        Ok(())
    }

    /// The strengths visited, ascending. A single step yields `min_strength`.
    pub fn strengths(&self) -> Vec<f64> {
        if self.steps <= 1 {
            return vec![self.min_strength];
        }
        let span = self.max_strength - self.min_strength;
        let last = (self.steps - 1) as f64;
        (0..self.steps)
            .map(|k| {
                if k + 1 == self.steps {
                    self.max_strength
                } else {
                    self.min_strength + span * k as f64 / last
                }
            })
            .collect()
    }

    pub fn with_range(mut self, min_strength: f64, max_strength: f64) -> Self {
        self.min_strength = min_strength;
        self.max_strength = max_strength;
        self
    }

    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }
}

/// One point of the curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub eve_strength: f64,
    /// Mean QBER over the trials that produced an estimate.
    pub qber: Option<f64>,
    /// Population standard deviation over the same trials (0 for one trial).
    pub std_dev: f64,
    pub trials: usize,
    /// Trials with a non-empty public sample.
    pub defined_trials: usize,
}

/// Ordered QBER-vs-strength curve.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SweepCurve {
    points: Vec<SweepPoint>,
}

impl SweepCurve {
    pub fn points(&self) -> &[SweepPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// `(eve_strength, qber)` pairs for plotting.
    pub fn pairs(&self) -> Vec<(f64, Option<f64>)> {
        self.points.iter().map(|p| (p.eve_strength, p.qber)).collect()
    }
}

/// Seed for trial `trial` at curve point `point`, derived from the base seed.
pub fn point_seed(base: u64, point: usize, trial: usize) -> u64 {
    base.wrapping_add((point as u64).wrapping_mul(POINT_SEED_STRIDE))
        .wrapping_add((trial as u64).wrapping_mul(TRIAL_SEED_STRIDE))
}

/// Expected sifted QBER for intercept-resend at `eve_strength` plus
/// independent flips at `channel_noise`.
///
/// Eve picks the wrong basis half the time and then garbles the bit half the
/// time, so interception alone costs `eve_strength / 4`. Noise flips a bit
/// whether or not Eve already did.
pub fn theoretical_qber(eve_strength: f64, channel_noise: f64) -> f64 {
    let e = 0.25 * eve_strength;
    e * (1.0 - channel_noise) + (1.0 - e) * channel_noise
}

fn evaluate_point(base: &SimulationParameters, cfg: &SweepConfig, point: usize, strength: f64) -> SweepPoint {
    let estimates: Vec<f64> = (0..cfg.trials)
        .filter_map(|trial| {
            let params = base
                .clone()
                .with_eve(strength)
                .with_seed(point_seed(base.seed, point, trial));
            run_validated(&params).qber()
        })
        .collect();

    let defined_trials = estimates.len();
    let (qber, std_dev) = if defined_trials == 0 {
        (None, 0.0)
    } else {
        let mean = estimates.iter().sum::<f64>() / defined_trials as f64;
        let variance = estimates.iter().map(|&q| (q - mean).powi(2)).sum::<f64>()
            / defined_trials as f64;
        (Some(mean), variance.sqrt())
    };

    SweepPoint {
        eve_strength: strength,
        qber,
        std_dev,
        trials: cfg.trials,
        defined_trials,
    }
}

#[cfg(feature = "parallel")]
fn evaluate_all(base: &SimulationParameters, cfg: &SweepConfig, strengths: &[f64]) -> Vec<SweepPoint> {
    use rayon::prelude::*;

    strengths
        .par_iter()
        .enumerate()
        .map(|(k, &s)| evaluate_point(base, cfg, k, s))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn evaluate_all(base: &SimulationParameters, cfg: &SweepConfig, strengths: &[f64]) -> Vec<SweepPoint> {
    strengths
        .iter()
        .enumerate()
        .map(|(k, &s)| evaluate_point(base, cfg, k, s))
        .collect()
}

/// Sweep with the default range (0.0..=1.0, 11 steps, one trial each).
pub fn sweep_eve(params: &SimulationParameters) -> Result<SweepCurve, ValidationError> {
    sweep_eve_with(params, &SweepConfig::default())
}

/// Sweep `eve_strength` over `cfg`, holding everything else in `params` fixed.
pub fn sweep_eve_with(
    params: &SimulationParameters,
    cfg: &SweepConfig,
) -> Result<SweepCurve, ValidationError> {
    params.validate()?;
    cfg.validate()?;

    let strengths = cfg.strengths();
    let points = evaluate_all(params, cfg, &strengths);

    info!(
        "sweep: {} points x {} trials, n_bits={}, noise={}",
        points.len(),
        cfg.trials,
        params.n_bits,
        params.channel_noise
    );

    Ok(SweepCurve { points })
}
