//! Optional TOML configuration.
//!
//! Every key may be omitted; missing keys take the defaults below.
//!
//! ```toml
//! output_dir = "quotes"
//! notice_ttl_secs = 3
//!
//! [fee_schedule]
//! nbt_rate = "0.02564"
//! vat_rate = "0.18"
//!
//! [logging]
//! level = "debug"
//! file = "motor-quote.log"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use quote_core::{FeeSchedule, FeeScheduleError};
use serde::Deserialize;
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid fee schedule: {0}")]
    FeeSchedule(#[from] FeeScheduleError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Filter directive, e.g. `debug` or `quote_core=trace`.
    pub level: Option<String>,
    /// Log file to append to, in addition to stderr.
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Directory exports are written into.
    pub output_dir: PathBuf,
    /// Seconds a notice stays up before it is dismissed.
    pub notice_ttl_secs: u64,
    pub fee_schedule: FeeSchedule,
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("quotes"),
            notice_ttl_secs: 3,
            fee_schedule: FeeSchedule::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Parses and validates configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text)?;
        config.fee_schedule.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Loads `path` when given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn notice_ttl(&self) -> Duration {
        Duration::from_secs(self.notice_ttl_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    // =========================================================================
    // Defaults
    // =========================================================================

    #[test]
    fn empty_file_is_all_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("quotes"));
        assert_eq!(config.notice_ttl(), Duration::from_secs(3));
        assert_eq!(config.logging.level, None);
    }

    #[test]
    fn load_or_default_without_path() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }

    // =========================================================================
    // Overrides
    // =========================================================================

    #[test]
    fn partial_fee_schedule_keeps_other_defaults() {
        let text = r#"
output_dir = "out/quotes"
notice_ttl_secs = 5

[fee_schedule]
nbt_rate = "0.025"
policy_fee = "1250"

[logging]
level = "debug"
file = "motor-quote.log"
"#;

        let config = AppConfig::from_toml_str(text).unwrap();

        assert_eq!(config.output_dir, PathBuf::from("out/quotes"));
        assert_eq!(config.notice_ttl_secs, 5);
        assert_eq!(config.fee_schedule.nbt_rate, dec!(0.025));
        assert_eq!(config.fee_schedule.policy_fee, dec!(1250));
        assert_eq!(config.fee_schedule.vat_rate, dec!(0.18));
        assert_eq!(config.logging.level.as_deref(), Some("debug"));
        assert_eq!(config.logging.file, Some(PathBuf::from("motor-quote.log")));
    }

    // =========================================================================
    // Errors
    // =========================================================================

    #[test]
    fn out_of_range_rate_is_rejected() {
        let text = "[fee_schedule]\nvat_rate = \"18\"\n";

        let err = AppConfig::from_toml_str(text).unwrap_err();

        assert!(matches!(
            err,
            ConfigError::FeeSchedule(FeeScheduleError::InvalidRate { name: "vat_rate", .. })
        ));
    }

    #[test]
    fn unknown_key_is_a_parse_error() {
        let err = AppConfig::from_toml_str("output_directory = \"x\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn misspelled_fee_schedule_key_is_a_parse_error() {
        let err = AppConfig::from_toml_str("[fee_schedule]\nnbt = \"0.025\"\n").unwrap_err();

        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = AppConfig::load(Path::new("/no/such/motor-quote.toml")).unwrap_err();

        match err {
            ConfigError::Read { path, .. } => {
                assert_eq!(path, PathBuf::from("/no/such/motor-quote.toml"))
            }
            other => panic!("expected Read error, got {other:?}"),
        }
    }
}
