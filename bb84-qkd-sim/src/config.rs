//! TOML configuration file.
//!
//! ```toml
//! [simulation]
//! n_bits = 2000
//! eve_present = true
//! eve_strength = 0.5
//!
//! [sweep]
//! steps = 5
//! trials = 10
//! ```
//!
//! Missing tables and keys fall back to their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ConfigError;
use crate::params::SimulationParameters;
use crate::sweep::SweepConfig;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub simulation: SimulationParameters,
    pub sweep: SweepConfig,
}

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })?;
        config.simulation.validate()?;
        config.sweep.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ValidationError;
    use std::io::Write;

    #[test]
    fn empty_document_is_default() {
        let cfg = AppConfig::from_toml_str("", Path::new("inline")).unwrap();
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn partial_tables_merge_with_defaults() {
        let text = "[simulation]\nn_bits = 2000\neve_present = true\n\n[sweep]\nsteps = 5\ntrials = 10\n";
        let cfg = AppConfig::from_toml_str(text, Path::new("inline")).unwrap();
        assert_eq!(cfg.simulation.n_bits, 2000);
        assert!(cfg.simulation.eve_present);
        assert_eq!(cfg.simulation.seed, 42);
        assert_eq!(cfg.sweep.steps, 5);
        assert_eq!(cfg.sweep.trials, 10);
        assert_eq!(cfg.sweep.max_strength, 1.0);
    }

    #[test]
    fn out_of_range_values_rejected() {
        let err = AppConfig::from_toml_str("[simulation]\nsample_fraction = 1.5\n", Path::new("inline"))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid(ValidationError::SampleFraction(f)) if f == 1.5
        ));
    }

    #[test]
    fn malformed_toml_rejected() {
        let err = AppConfig::from_toml_str("[simulation\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn loads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[simulation]\nseed = 7\nchannel_noise = 0.02").unwrap();
        let cfg = AppConfig::load(file.path()).unwrap();
        assert_eq!(cfg.simulation.seed, 7);
        assert_eq!(cfg.simulation.channel_noise, 0.02);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = AppConfig::load(Path::new("/nonexistent/bb84.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
