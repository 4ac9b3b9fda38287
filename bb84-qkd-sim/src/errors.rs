use std::path::PathBuf;
use thiserror::Error;

/// Rejected simulation or sweep parameters. Raised before any work starts.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("n_bits must be positive")]
    ZeroBits,

    #[error("eve_strength must be within [0, 1], got {0}")]
    EveStrength(f64),

    #[error("channel_noise must be within [0, 1], got {0}")]
    ChannelNoise(f64),

    #[error("sample_fraction must be within (0, 1], got {0}")]
    SampleFraction(f64),

    #[error("qber_threshold must be within [0, 1], got {0}")]
    QberThreshold(f64),

    #[error("sweep strength range must satisfy 0 <= min <= max <= 1, got [{min}, {max}]")]
    StrengthRange { min: f64, max: f64 },

    #[error("sweep step count must be within [1, {max}], got {got}")]
    SweepSteps { got: usize, max: usize },

    #[error("trials per sweep point must be within [1, {max}], got {got}")]
    SweepTrials { got: usize, max: usize },
}

/// Internal consistency failure inside the engine. Signals a bug, not bad input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("sequence length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}
