// Configuration for Ignition Verify
//
// This module handles configuration for the verification script generator.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings for a verification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifyConfig {
    /// Network name passed to the verifier
    pub network: String,

    /// Chain the deployment ran against, selects `chain-<id>` under the deployments directory
    pub chain_id: u64,

    /// Directory holding the per-chain deployment folders
    pub deployments_dir: PathBuf,

    /// Explicit journal path, overrides the chain lookup
    #[serde(skip_serializing_if = "Option::is_none")]
    pub journal: Option<PathBuf>,

    /// Where the verification script is written
    pub output: PathBuf,

    /// Command prefix for every line, e.g. `pnpm exec hardhat`
    pub launcher: String,
}

impl Default for VerifyConfig {
    fn default() -> Self {
        Self {
            network: "zetachain".to_string(),
            chain_id: 7000,
            deployments_dir: PathBuf::from("ignition").join("deployments"),
            journal: None,
            output: PathBuf::from("verify.bash"),
            launcher: String::new(),
        }
    }
}

impl VerifyConfig {
    /// Journal location for this configuration
    pub fn journal_path(&self) -> PathBuf {
        match &self.journal {
            Some(path) => path.clone(),
            None => self
                .deployments_dir
                .join(format!("chain-{}", self.chain_id))
                .join("journal.jsonl"),
        }
    }
}

/// Configuration manager for Ignition Verify
pub struct ConfigManager;

impl ConfigManager {
    /// Load configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<VerifyConfig> {
        let path = path.as_ref();
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration {}", path.display()))?;
        let config = serde_json::from_str(&config_str)
            .with_context(|| format!("Invalid configuration {}", path.display()))?;
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(config: &VerifyConfig, path: P) -> Result<()> {
        let config_str = serde_json::to_string_pretty(config)?;
        fs::write(path, config_str)?;
        Ok(())
    }

    /// Create a builder for configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for creating configurations
#[derive(Default)]
pub struct ConfigBuilder {
    config: VerifyConfig,
}

impl ConfigBuilder {
    /// Start from an existing configuration
    pub fn from_config(config: VerifyConfig) -> Self {
        Self { config }
    }

    pub fn network(mut self, value: impl Into<String>) -> Self {
        self.config.network = value.into();
        self
    }

    pub fn chain_id(mut self, value: u64) -> Self {
        self.config.chain_id = value;
        self
    }

    pub fn deployments_dir(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.deployments_dir = value.into();
        self
    }

    /// Read this journal instead of the one under the deployments directory
    pub fn journal(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.journal = Some(value.into());
        self
    }

    pub fn output(mut self, value: impl Into<PathBuf>) -> Self {
        self.config.output = value.into();
        self
    }

    pub fn launcher(mut self, value: impl Into<String>) -> Self {
        self.config.launcher = value.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> VerifyConfig {
        self.config
    }
}
