use crate::core::ConfigProvider;
use crate::utils::error::{PricerError, Result};
use crate::utils::validation::{
    validate_positive_number, validate_range, validate_socket_addr, validate_source_location,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_REFERENCE_SOURCE: &str =
    "https://raw.githubusercontent.com/meander02/dtaset/main/cubic_zirconia.csv";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub reference: ReferenceConfig,
    pub model: ModelConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConfig {
    pub source: String,
    pub required: bool,
    pub timeout_seconds: u64,
}

impl Default for ReferenceConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_REFERENCE_SOURCE.to_string(),
            required: true,
            timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub n_estimators: usize,
    pub max_depth: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_depth: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

impl TomlConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PricerError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PricerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PricerError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_socket_addr("server.bind", &self.server.bind)?;
        validate_source_location("reference.source", &self.reference.source)?;
        validate_range("reference.timeout_seconds", self.reference.timeout_seconds, 1, 600)?;
        validate_positive_number("model.n_estimators", self.model.n_estimators, 1)?;
        if let Some(depth) = self.model.max_depth {
            validate_positive_number("model.max_depth", depth, 1)?;
        }
        Ok(())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.json
    }
}

impl ConfigProvider for TomlConfig {
    fn bind_address(&self) -> &str {
        &self.server.bind
    }

    fn reference_source(&self) -> &str {
        &self.reference.source
    }

    fn reference_required(&self) -> bool {
        self.reference.required
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.reference.timeout_seconds
    }

    fn n_estimators(&self) -> usize {
        self.model.n_estimators
    }

    fn max_depth(&self) -> Option<usize> {
        self.model.max_depth
    }

    fn seed(&self) -> Option<u64> {
        self.model.seed
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();

        assert_eq!(config.bind_address(), DEFAULT_BIND);
        assert_eq!(config.reference_source(), DEFAULT_REFERENCE_SOURCE);
        assert!(config.reference_required());
        assert_eq!(config.request_timeout_seconds(), 30);
        assert_eq!(config.n_estimators(), 100);
        assert_eq!(config.max_depth(), None);
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[server]
bind = "0.0.0.0:8080"

[reference]
source = "./data/cubic_zirconia.csv"
required = false
timeout_seconds = 10

[model]
n_estimators = 20
max_depth = 4
seed = 11

[logging]
json = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.bind_address(), "0.0.0.0:8080");
        assert_eq!(config.reference_source(), "./data/cubic_zirconia.csv");
        assert!(!config.reference_required());
        assert_eq!(config.request_timeout_seconds(), 10);
        assert_eq!(config.n_estimators(), 20);
        assert_eq!(config.max_depth(), Some(4));
        assert_eq!(config.seed(), Some(11));
        assert!(config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GEM_PRICER_TEST_SOURCE", "https://data.example.com/gems.csv");

        let toml_content = r#"
[reference]
source = "${GEM_PRICER_TEST_SOURCE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.reference.source, "https://data.example.com/gems.csv");

        std::env::remove_var("GEM_PRICER_TEST_SOURCE");
    }

    #[test]
    fn test_config_validation() {
        let bad_bind = TomlConfig::from_toml_str("[server]\nbind = \"nowhere\"\n").unwrap();
        assert!(bad_bind.validate().is_err());

        let bad_url = TomlConfig::from_toml_str("[reference]\nsource = \"https://\"\n").unwrap();
        assert!(bad_url.validate().is_err());

        let no_trees = TomlConfig::from_toml_str("[model]\nn_estimators = 0\n").unwrap();
        assert!(no_trees.validate().is_err());

        let zero_depth = TomlConfig::from_toml_str("[model]\nmax_depth = 0\n").unwrap();
        assert!(zero_depth.validate().is_err());

        let slow = TomlConfig::from_toml_str("[reference]\ntimeout_seconds = 0\n").unwrap();
        assert!(slow.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_rejected() {
        let err = TomlConfig::from_toml_str("[server\nbind = 1").unwrap_err();
        assert!(matches!(err, PricerError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[model]\nn_estimators = 7\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.n_estimators(), 7);
    }
}
