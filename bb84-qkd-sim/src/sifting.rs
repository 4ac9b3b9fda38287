use crate::bb84_states::Basis;
use crate::errors::InvariantViolation;

/// Basis reconciliation: indices where Alice and Bob announced the same basis,
/// in ascending order.
pub fn sift(alice_bases: &[Basis], bob_bases: &[Basis]) -> Result<Vec<usize>, InvariantViolation> {
    if alice_bases.len() != bob_bases.len() {
        return Err(InvariantViolation::LengthMismatch {
            left: alice_bases.len(),
            right: bob_bases.len(),
        });
    }

    Ok(alice_bases
        .iter()
        .zip(bob_bases)
        .enumerate()
        .filter(|(_, (a, b))| a == b)
        .map(|(i, _)| i)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use Basis::{Diagonal as X, Rectilinear as R};

    #[test]
    fn keeps_matching_positions_in_order() {
        let alice = [R, X, X, R, X];
        let bob = [R, R, X, X, X];
        assert_eq!(sift(&alice, &bob), Ok(vec![0, 2, 4]));
    }

    #[test]
    fn no_matches_is_empty_not_error() {
        assert_eq!(sift(&[R, R], &[X, X]), Ok(vec![]));
        assert_eq!(sift(&[], &[]), Ok(vec![]));
    }

    #[test]
    fn length_mismatch_reported() {
        assert_eq!(
            sift(&[R, X, R], &[R]),
            Err(InvariantViolation::LengthMismatch { left: 3, right: 1 })
        );
    }
}
