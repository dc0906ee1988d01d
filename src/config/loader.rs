//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::RateTable;

use super::types::{EngineConfig, EngineMetadata, ProrationPolicy, RatesConfig};

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/magni/
/// ├── engine.yaml   # Metadata
/// ├── policy.yaml   # Proration policy
/// └── rates.yaml    # Rate table
/// ```
///
/// # Example
///
/// ```no_run
/// use allowance_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/magni")?;
/// println!("Entitlement: {} off-days", loader.policy().off_day_entitlement);
/// # Ok::<(), allowance_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Fails with `ConfigNotFound` when a file is missing,
    /// `ConfigParseError` when a file is not valid YAML for its type, and
    /// `InvalidPolicy` when the policy does not validate.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<EngineMetadata>(&path.join("engine.yaml"))?;

        let policy = Self::load_yaml::<ProrationPolicy>(&path.join("policy.yaml"))?;
        policy.validate()?;

        let rates_path = path.join("rates.yaml");
        let rate_table = RateTable::new(Self::load_yaml::<RatesConfig>(&rates_path)?.rates);
        if rate_table.is_empty() {
            return Err(EngineError::ConfigParseError {
                path: rates_path.display().to_string(),
                message: "rate table is empty".to_string(),
            });
        }

        debug!(
            organization = %metadata.organization,
            version = %metadata.version,
            rules = rate_table.rules.len(),
            "Loaded allowance configuration"
        );

        Ok(Self {
            config: EngineConfig::new(metadata, policy, rate_table),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the configuration metadata.
    pub fn metadata(&self) -> &EngineMetadata {
        self.config.metadata()
    }

    /// Returns the proration policy.
    pub fn policy(&self) -> &ProrationPolicy {
        self.config.policy()
    }

    /// Returns the configured rate table.
    pub fn rate_table(&self) -> &RateTable {
        self.config.rate_table()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{StatusCategory, TenureBand};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    const SINGLE_RATE: &str =
        "rates:\n  - department: AM\n    band: {kind: flat}\n    base: \"1\"\n    per_day: \"1\"\n";

    fn config_path() -> &'static str {
        "./config/magni"
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn write_config_dir(name: &str, policy: &str, rates: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "allowance-engine-{}-{}",
            name,
            uuid::Uuid::new_v4()
        ));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("engine.yaml"),
            "organization: Test\nallowance: Meal Allowance\nversion: test\n",
        )
        .unwrap();
        fs::write(dir.join("policy.yaml"), policy).unwrap();
        fs::write(dir.join("rates.yaml"), rates).unwrap();
        dir
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().organization, "Magni Group");
        assert_eq!(loader.metadata().allowance, "Meal Allowance");
    }

    #[test]
    fn test_policy_loaded_correctly() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let policy = loader.policy();

        assert_eq!(policy.off_day_entitlement, 4);
        assert_eq!(policy.absence_penalty_per_day, dec("50000"));
        assert!(policy.deductible.contains(&StatusCategory::UnpaidLeave));
        assert!(!policy.deductible.contains(&StatusCategory::Absence));
    }

    #[test]
    fn test_rate_table_has_flat_and_banded_rules() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let rules = &loader.rate_table().rules;

        assert!(
            rules
                .iter()
                .any(|r| r.department == "AM" && r.band == TenureBand::Flat)
        );
        assert!(rules.iter().any(|r| r.department == "CS-DP-WD"
            && r.band == TenureBand::Banded { min_months: 36 }));
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("engine.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_invalid_policy_is_rejected() {
        let dir = write_config_dir(
            "bad-policy",
            "absence_penalty_per_day: \"50000\"\ndeductible: [sick, absence]\n",
            SINGLE_RATE,
        );

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::InvalidPolicy { .. })));
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_empty_rate_table_is_rejected() {
        let dir = write_config_dir(
            "empty-rates",
            "absence_penalty_per_day: \"50000\"\n",
            "rates: []\n",
        );

        let result = ConfigLoader::load(&dir);
        match result {
            Err(EngineError::ConfigParseError { path, message }) => {
                assert!(path.contains("rates.yaml"));
                assert!(message.contains("empty"));
            }
            _ => panic!("Expected ConfigParseError"),
        }
        fs::remove_dir_all(dir).ok();
    }

    #[test]
    fn test_malformed_yaml_is_a_parse_error() {
        let dir = write_config_dir("malformed", "absence_penalty_per_day: [", "rates: []\n");

        let result = ConfigLoader::load(&dir);
        assert!(matches!(result, Err(EngineError::ConfigParseError { .. })));
        fs::remove_dir_all(dir).ok();
    }
}
