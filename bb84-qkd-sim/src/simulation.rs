//! One BB84 run, end to end.
//!
//! The pipeline:
//! 1. Seed a `RandomSource` from `params.seed`
//! 2. Draw Alice's bits, Alice's bases, Bob's bases
//! 3. Send every qubit through the channel (Eve + noise)
//! 4. Sift on matching bases
//! 5. Reveal a public sample and estimate the QBER
//! 6. Apply the threshold

use log::{info, warn};
use serde::Serialize;

use crate::bb84_states::Basis;
use crate::channel::ChannelSimulator;
use crate::decision::{decide, Decision};
use crate::errors::ValidationError;
use crate::params::SimulationParameters;
use crate::qber::estimate_qber;
use crate::random_source::RandomSource;
use crate::sifting::sift;
use crate::sweep::{sweep_eve_with, SweepConfig, SweepCurve};

/// Immutable record of a finished run. Every field is populated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunResult {
    params: SimulationParameters,
    alice_bits: Vec<bool>,
    alice_bases: Vec<Basis>,
    bob_bases: Vec<Basis>,
    bob_bits: Vec<bool>,
    sift_idx: Vec<usize>,
    sample_positions: Vec<usize>,
    mismatches: usize,
    qber: Option<f64>,
    decision: Decision,
    intercepted: usize,
}

impl RunResult {
    pub fn params(&self) -> &SimulationParameters {
        &self.params
    }

    pub fn alice_bits(&self) -> &[bool] {
        &self.alice_bits
    }

    pub fn alice_bases(&self) -> &[Basis] {
        &self.alice_bases
    }

    pub fn bob_bases(&self) -> &[Basis] {
        &self.bob_bases
    }

    pub fn bob_bits(&self) -> &[bool] {
        &self.bob_bits
    }

    /// Indices where the announced bases agree, ascending.
    pub fn sift_idx(&self) -> &[usize] {
        &self.sift_idx
    }

    /// Sifted indices revealed for the error estimate, ascending.
    pub fn sample_positions(&self) -> &[usize] {
        &self.sample_positions
    }

    pub fn mismatches(&self) -> usize {
        self.mismatches
    }

    /// `None` when nothing was sampled; check before formatting.
    pub fn qber(&self) -> Option<f64> {
        self.qber
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Qubits Eve measured and re-sent.
    pub fn intercepted(&self) -> usize {
        self.intercepted
    }

    pub fn n_bits(&self) -> usize {
        self.alice_bits.len()
    }

    pub fn sifted_len(&self) -> usize {
        self.sift_idx.len()
    }

    pub fn sample_len(&self) -> usize {
        self.sample_positions.len()
    }

    /// Per-position basis agreement (`alice_bases[i] == bob_bases[i]`).
    pub fn basis_matches(&self) -> Vec<bool> {
        self.alice_bases
            .iter()
            .zip(&self.bob_bases)
            .map(|(a, b)| a == b)
            .collect()
    }

    /// Fraction of positions that survived sifting.
    pub fn match_rate(&self) -> f64 {
        self.sift_idx.len() as f64 / self.n_bits() as f64
    }

    /// Alice's bits at the sifted positions.
    pub fn sifted_key(&self) -> Vec<bool> {
        self.sift_idx.iter().map(|&i| self.alice_bits[i]).collect()
    }

    /// Alice's sifted bits with the publicly revealed sample removed.
    pub fn remaining_key(&self) -> Vec<bool> {
        // both index lists are ascending
        let mut revealed = self.sample_positions.iter().peekable();
        self.sift_idx
            .iter()
            .filter(|&&i| {
                if revealed.peek() == Some(&&i) {
                    revealed.next();
                    false
                } else {
                    true
                }
            })
            .map(|&i| self.alice_bits[i])
            .collect()
    }
}

/// Run the BB84 pipeline once.
///
/// Fails only on invalid parameters; the check happens before any random
/// draw. A run with nothing sampled is not an error: it comes back with
/// `qber() == None` and `Decision::Inconclusive`.
pub fn run_simulation(params: &SimulationParameters) -> Result<RunResult, ValidationError> {
    params.validate()?;
    Ok(run_validated(params))
}

/// Pipeline body for parameters that already passed `validate`.
pub(crate) fn run_validated(params: &SimulationParameters) -> RunResult {
    let n = params.n_bits;
    let mut rng = RandomSource::from_seed(params.seed);

    let alice_bits = rng.bits(n);
    let alice_bases = rng.bases(n);
    let bob_bases = rng.bases(n);

    let channel = ChannelSimulator::new(params.effective_eve_strength(), params.channel_noise);
    let transmission = channel.transmit(&alice_bits, &alice_bases, &bob_bases, &mut rng);

    let sift_idx = sift(&alice_bases, &bob_bases)
        .unwrap_or_else(|e| panic!("basis sequences diverged inside the engine: {}", e));

    let estimate = estimate_qber(
        &alice_bits,
        &transmission.bob_bits,
        &sift_idx,
        params.sample_fraction,
        &mut rng,
    );
    let decision = decide(estimate.qber, params.qber_threshold);

    match estimate.qber {
        Some(q) => info!(
            "run seed={} n={}: sifted={} sampled={} qber={:.4} -> {}",
            params.seed,
            n,
            sift_idx.len(),
            estimate.sample_positions.len(),
            q,
            decision
        ),
        None => warn!(
            "run seed={} n={}: sifted={} sampled=0, qber undefined -> {}",
            params.seed,
            n,
            sift_idx.len(),
            decision
        ),
    }

    RunResult {
        params: params.clone(),
        alice_bits,
        alice_bases,
        bob_bases,
        bob_bits: transmission.bob_bits,
        sift_idx,
        sample_positions: estimate.sample_positions,
        mismatches: estimate.mismatches,
        qber: estimate.qber,
        decision,
        intercepted: transmission.intercepted,
    }
}

/// Actions requested by the front end for one refresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Commands {
    /// Run a single simulation.
    pub run: bool,
    /// Trace the QBER-vs-eavesdropping curve.
    pub sweep: bool,
}

/// Everything computed for one set of commands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub run: Option<RunResult>,
    pub curve: Option<SweepCurve>,
}

/// Validate once, then perform whichever commands are set.
pub fn execute(
    params: &SimulationParameters,
    cmds: &Commands,
    sweep: &SweepConfig,
) -> Result<Session, ValidationError> {
    params.validate()?;
    if cmds.sweep {
        sweep.validate()?;
    }

    let run = cmds.run.then(|| run_validated(params));
    let curve = if cmds.sweep {
        Some(sweep_eve_with(params, sweep)?)
    } else {
        None
    };

    Ok(Session { run, curve })
}
