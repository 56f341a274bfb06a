// Verification command synthesis
//
// Turns correlated deployment records into explorer verification commands,
// one per successful deployment, in first-seen order.

mod escape;

pub use escape::{constructor_args_token, double_quote};

use crate::correlator::{DeploymentRecord, DeploymentRecords};
use common::{ExecutionResult, JournalError, JournalResult};
use log::info;

/// One verification command for a deployed contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyCommand {
    pub future_id: String,
    pub contract_name: String,
    pub address: String,
    /// Pre-rendered constructor argument token, empty when there are none
    pub args_token: String,
}

impl VerifyCommand {
    /// Render the command as a single script line, without the newline
    pub fn render(&self, network: &str, launcher: &str) -> String {
        let prefix = if launcher.is_empty() {
            String::new()
        } else {
            format!("{} ", launcher)
        };
        format!(
            "{}verify {} {} --network {} --verbose # {} {}",
            prefix, self.address, self.args_token, network, self.future_id, self.contract_name
        )
    }
}

/// Builds the verification script for a deployment
#[derive(Debug, Clone)]
pub struct CommandSynthesizer {
    network: String,
    launcher: String,
}

impl CommandSynthesizer {
    pub fn new(network: impl Into<String>) -> Self {
        Self {
            network: network.into(),
            launcher: String::new(),
        }
    }

    /// Prefix every command, e.g. with `pnpm exec hardhat`
    pub fn with_launcher(mut self, launcher: impl Into<String>) -> Self {
        self.launcher = launcher.into().trim().to_string();
        self
    }

    /// Collect one command per successful deployment.
    ///
    /// Unfinished deployments are skipped. A failed deployment, or a completed
    /// one that was never initialized, aborts the whole synthesis.
    pub fn commands(&self, records: &DeploymentRecords) -> JournalResult<Vec<VerifyCommand>> {
        let mut commands = Vec::with_capacity(records.len());
        for (future_id, record) in records {
            if let Some(command) = command_for(future_id, record)? {
                commands.push(command);
            }
        }
        Ok(commands)
    }

    /// Render the full script, one newline-terminated command per line
    pub fn synthesize(&self, records: &DeploymentRecords) -> JournalResult<String> {
        let commands = self.commands(records)?;
        Ok(self.render(&commands))
    }

    pub fn render(&self, commands: &[VerifyCommand]) -> String {
        let mut output = String::new();
        for command in commands {
            output.push_str(&command.render(&self.network, &self.launcher));
            output.push('\n');
        }
        output
    }
}

fn command_for(future_id: &str, record: &DeploymentRecord) -> JournalResult<Option<VerifyCommand>> {
    let Some(complete) = &record.complete else {
        info!("Skipping {}: deployment has not completed", future_id);
        return Ok(None);
    };

    let address = match &complete.result {
        ExecutionResult::Success { address } => address,
        ExecutionResult::Failure { outcome } => {
            return Err(JournalError::DeploymentFailed {
                future_id: future_id.to_string(),
                outcome: outcome.clone(),
            })
        }
    };

    let Some(init) = &record.initialize else {
        return Err(JournalError::MalformedRecord {
            future_id: future_id.to_string(),
            reason: "completed without an initialize event".to_string(),
        });
    };

    Ok(Some(VerifyCommand {
        future_id: future_id.to_string(),
        contract_name: init.contract_name.clone(),
        address: address.clone(),
        args_token: constructor_args_token(&init.constructor_args),
    }))
}
