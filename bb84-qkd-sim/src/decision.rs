use serde::Serialize;
use std::fmt;

/// Security verdict for one run.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Decision {
    /// QBER at or below the threshold: keep the key.
    Accept,
    /// QBER above the threshold: abort, the channel is compromised or too noisy.
    Reject,
    /// No sample to judge from.
    Inconclusive,
}

impl Decision {
    pub fn as_str(self) -> &'static str {
        match self {
            Decision::Accept => "Accept",
            Decision::Reject => "Reject",
            Decision::Inconclusive => "Inconclusive",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only place the security threshold is applied.
pub fn decide(qber: Option<f64>, threshold: f64) -> Decision {
    match qber {
        None => Decision::Inconclusive,
        Some(q) if q > threshold => Decision::Reject,
        Some(_) => Decision::Accept,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive_for_accept() {
        assert_eq!(decide(Some(0.11), 0.11), Decision::Accept);
        assert_eq!(decide(Some(0.0), 0.0), Decision::Accept);
        assert_eq!(decide(Some(0.1100001), 0.11), Decision::Reject);
    }

    #[test]
    fn undefined_qber_is_inconclusive() {
        assert_eq!(decide(None, 0.11), Decision::Inconclusive);
        assert_eq!(decide(None, 1.0), Decision::Inconclusive);
    }

    #[test]
    fn display_names() {
        assert_eq!(Decision::Accept.to_string(), "Accept");
        assert_eq!(Decision::Reject.to_string(), "Reject");
        assert_eq!(Decision::Inconclusive.to_string(), "Inconclusive");
    }
}
