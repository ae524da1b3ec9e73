use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, Parser)]
#[command(name = "gem-pricer")]
#[command(about = "Gemstone price prediction service")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Address to listen on (default 127.0.0.1:5000)
    #[arg(long)]
    pub bind: Option<String>,

    /// URL or path of the reference CSV dataset
    #[arg(long)]
    pub reference_source: Option<String>,

    /// Start with an empty reference table if the dataset cannot be loaded
    #[arg(long)]
    pub allow_missing_reference: bool,

    #[arg(long)]
    pub n_estimators: Option<usize>,

    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Seed for model fitting
    #[arg(long)]
    pub seed: Option<u64>,

    /// Reference download timeout in seconds
    #[arg(long)]
    pub request_timeout: Option<u64>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the file named by `--config` (or defaults) and applies flag overrides.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(bind) = &self.bind {
            config.server.bind = bind.clone();
        }
        if let Some(source) = &self.reference_source {
            config.reference.source = source.clone();
        }
        if self.allow_missing_reference {
            config.reference.required = false;
        }
        if let Some(timeout) = self.request_timeout {
            config.reference.timeout_seconds = timeout;
        }
        if let Some(n) = self.n_estimators {
            config.model.n_estimators = n;
        }
        if self.max_depth.is_some() {
            config.model.max_depth = self.max_depth;
        }
        if self.seed.is_some() {
            config.model.seed = self.seed;
        }
        if self.json_logs {
            config.logging.json = true;
        }
    }
}
