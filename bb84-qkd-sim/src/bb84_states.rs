use serde::{Deserialize, Serialize};
use std::fmt;

use crate::random_source::RandomSource;

/// Polarization state of a single BB84 qubit at the classical-outcome level.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum BB84State {
    QubitZero,
    QubitOne,
    QubitPlus,  // Represents the |+> state
    QubitMinus, // Represents the |-> state
}

/// Encoding/measurement basis announced during reconciliation.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Basis {
    /// |0> / |1>
    Rectilinear,
    /// |+> / |->
    Diagonal,
}

impl Basis {
    pub fn other(self) -> Self {
        match self {
            Basis::Rectilinear => Basis::Diagonal,
            Basis::Diagonal => Basis::Rectilinear,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Basis::Rectilinear => '+',
            Basis::Diagonal => 'x',
        }
    }
}

impl fmt::Display for Basis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Basis::Rectilinear => "rectilinear",
            Basis::Diagonal => "diagonal",
        })
    }
}

impl BB84State {
    /// The basis this state was prepared in.
    pub fn basis(self) -> Basis {
        match self {
            BB84State::QubitZero | BB84State::QubitOne => Basis::Rectilinear,
            BB84State::QubitPlus | BB84State::QubitMinus => Basis::Diagonal,
        }
    }

    /// The bit value encoded in this state.
    pub fn bit(self) -> bool {
        matches!(self, BB84State::QubitOne | BB84State::QubitPlus)
    }
}

/// Encode `bit` in `basis`.
pub fn prepare(bit: bool, basis: Basis) -> BB84State {
    match (bit, basis) {
        (false, Basis::Rectilinear) => BB84State::QubitZero,
        (true, Basis::Rectilinear) => BB84State::QubitOne,
        (true, Basis::Diagonal) => BB84State::QubitPlus,
        (false, Basis::Diagonal) => BB84State::QubitMinus,
    }
}

/// Measure `state` in `basis`.
///
/// A matching basis recovers the encoded bit deterministically. A
/// conjugate basis collapses to a uniform outcome, drawn from `rng`.
pub fn measure(state: BB84State, basis: Basis, rng: &mut RandomSource) -> bool {
    if state.basis() == basis {
        state.bit()
    } else {
        rng.bit()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prepare_covers_all_states() {
        let states = [
            prepare(false, Basis::Rectilinear),
            prepare(true, Basis::Rectilinear),
            prepare(true, Basis::Diagonal),
            prepare(false, Basis::Diagonal),
        ];
        assert_eq!(
            states,
            [
                BB84State::QubitZero,
                BB84State::QubitOne,
                BB84State::QubitPlus,
                BB84State::QubitMinus
            ]
        );
    }

    #[test]
    fn prepared_state_reports_bit_and_basis() {
        for &basis in &[Basis::Rectilinear, Basis::Diagonal] {
            for &bit in &[false, true] {
                let state = prepare(bit, basis);
                assert_eq!(state.bit(), bit);
                assert_eq!(state.basis(), basis);
            }
        }
    }

    #[test]
    fn matching_basis_measurement_is_deterministic() {
        let mut rng = RandomSource::from_seed(7);
        let test_cases = vec![
            (BB84State::QubitZero, Basis::Rectilinear, false),
            (BB84State::QubitOne, Basis::Rectilinear, true),
            (BB84State::QubitPlus, Basis::Diagonal, true),
            (BB84State::QubitMinus, Basis::Diagonal, false),
        ];
        for (state, basis, expected) in test_cases {
            for _ in 0..20 {
                assert_eq!(
                    measure(state, basis, &mut rng),
                    expected,
                    "Measurement of {:?} in {:?}",
                    state,
                    basis
                );
            }
        }
    }

    #[test]
    fn conjugate_basis_measurement_is_balanced() {
        let mut rng = RandomSource::from_seed(11);
        let trials = 20_000;
        let ones = (0..trials)
            .filter(|_| measure(BB84State::QubitZero, Basis::Diagonal, &mut rng))
            .count();
        let ratio = ones as f64 / trials as f64;
        assert!((ratio - 0.5).abs() < 0.02, "ratio = {}", ratio);
    }

    #[test]
    fn basis_other_is_involution() {
        assert_eq!(Basis::Rectilinear.other(), Basis::Diagonal);
        assert_eq!(Basis::Diagonal.other().other(), Basis::Diagonal);
    }
}
