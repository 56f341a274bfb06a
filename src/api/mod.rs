// Ignition Verify API Module
//
// This module ties the journal reader, the correlator and the command
// synthesizer into a single run.

mod config;
mod manifest;

pub use config::*;
pub use manifest::*;

use crate::correlator::{correlate, DeploymentRecords};
use crate::journal::JournalReader;
use crate::synth::CommandSynthesizer;
use common::JournalResult;
use log::info;
use std::path::PathBuf;

/// Main API for Ignition Verify
///
/// # Examples
///
/// ```no_run
/// use ignition_verify::api::{ConfigManager, IgnitionVerify};
///
/// let config = ConfigManager::builder()
///     .journal("ignition/deployments/chain-7000/journal.jsonl")
///     .output("verify.bash")
///     .build();
///
/// let summary = IgnitionVerify::with_config(config).run().unwrap();
/// println!("{} verification commands written", summary.commands);
/// ```
pub struct IgnitionVerify {
    /// Configuration for the run
    config: VerifyConfig,
}

/// What a completed run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Distinct deployment units in the journal
    pub records: usize,
    /// Verification commands written
    pub commands: usize,
    /// Script location
    pub output: PathBuf,
}

impl IgnitionVerify {
    /// Create a new instance with default configuration
    pub fn new() -> Self {
        Self {
            config: VerifyConfig::default(),
        }
    }

    /// Create a new instance with custom configuration
    pub fn with_config(config: VerifyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &VerifyConfig {
        &self.config
    }

    /// Read and correlate the configured journal
    pub fn load_records(&self) -> JournalResult<DeploymentRecords> {
        let reader = JournalReader::new(self.config.journal_path());
        info!("Reading journal {}", reader.path().display());
        let entries = reader.read()?;
        Ok(correlate(entries))
    }

    pub fn synthesizer(&self) -> CommandSynthesizer {
        CommandSynthesizer::new(self.config.network.clone()).with_launcher(self.config.launcher.clone())
    }

    /// Produce the manifest in the requested format without writing it
    pub fn render(&self, format: ManifestFormat) -> anyhow::Result<String> {
        let records = self.load_records()?;
        let rendered = match format {
            ManifestFormat::Script => self.synthesizer().synthesize(&records)?,
            ManifestFormat::Json => ManifestWriter::records_to_json(&records)?,
        };
        Ok(rendered)
    }

    /// Generate the verification script and write it to the configured output.
    ///
    /// Nothing is written unless every step succeeds.
    pub fn run(&self) -> JournalResult<RunSummary> {
        let records = self.load_records()?;
        let synthesizer = self.synthesizer();
        let commands = synthesizer.commands(&records)?;
        let script = synthesizer.render(&commands);

        ManifestWriter::write(&self.config.output, &script)?;
        info!(
            "Wrote {} verification commands for {} deployments to {}",
            commands.len(),
            records.len(),
            self.config.output.display()
        );

        Ok(RunSummary {
            records: records.len(),
            commands: commands.len(),
            output: self.config.output.clone(),
        })
    }
}

impl Default for IgnitionVerify {
    fn default() -> Self {
        Self::new()
    }
}
