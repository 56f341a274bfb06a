// Ignition Verify CLI
//
// Generates explorer verification commands from a deployment journal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ignition_verify::api::{ConfigBuilder, ConfigManager, IgnitionVerify, ManifestFormat, VerifyConfig};
use std::path::PathBuf;

/// Ignition Verify - verification scripts from deployment journals
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the commands that read a journal
#[derive(clap::Args)]
struct JournalArgs {
    /// Path to the journal, defaults to <deployments-dir>/chain-<chain-id>/journal.jsonl
    #[arg(short, long)]
    journal: Option<PathBuf>,

    /// Directory holding the per-chain deployment folders
    #[arg(long)]
    deployments_dir: Option<PathBuf>,

    /// Chain id of the deployment
    #[arg(long)]
    chain_id: Option<u64>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the verification script for a deployment
    Generate {
        #[command(flatten)]
        journal: JournalArgs,

        /// Output script path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Network name passed to the verifier
        #[arg(short, long)]
        network: Option<String>,

        /// Prefix for every command, e.g. "pnpm exec hardhat"
        #[arg(long)]
        launcher: Option<String>,

        /// Print the script instead of writing it
        #[arg(long)]
        stdout: bool,
    },

    /// Print the correlated deployment records as JSON
    Inspect {
        #[command(flatten)]
        journal: JournalArgs,
    },

    /// Generate a default configuration file
    Config {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn load_config(args: &JournalArgs) -> Result<ConfigBuilder> {
    let config = match &args.config {
        Some(path) => ConfigManager::load_from_file(path).context("Failed to load configuration")?,
        None => VerifyConfig::default(),
    };

    let mut builder = ConfigBuilder::from_config(config);
    if let Some(journal) = &args.journal {
        builder = builder.journal(journal);
    }
    if let Some(dir) = &args.deployments_dir {
        builder = builder.deployments_dir(dir);
    }
    if let Some(chain_id) = args.chain_id {
        builder = builder.chain_id(chain_id);
    }
    Ok(builder)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { journal, output, network, launcher, stdout } => {
            let mut builder = load_config(&journal)?;
            if let Some(output) = output {
                builder = builder.output(output);
            }
            if let Some(network) = network {
                builder = builder.network(network);
            }
            if let Some(launcher) = launcher {
                builder = builder.launcher(launcher);
            }
            let verifier = IgnitionVerify::with_config(builder.build());

            if stdout {
                let script = verifier
                    .render(ManifestFormat::Script)
                    .context("Failed to generate verification script")?;
                print!("{}", script);
            } else {
                let summary = verifier.run().context("Failed to generate verification script")?;
                println!(
                    "Wrote {} verification commands ({} deployments) to {}",
                    summary.commands,
                    summary.records,
                    summary.output.display()
                );
            }
            Ok(())
        }
        Commands::Inspect { journal } => {
            let verifier = IgnitionVerify::with_config(load_config(&journal)?.build());
            let json = verifier
                .render(ManifestFormat::Json)
                .context("Failed to read deployment records")?;
            println!("{}", json);
            Ok(())
        }
        Commands::Config { output } => {
            let config = VerifyConfig::default();
            ConfigManager::save_to_file(&config, &output).context("Failed to save configuration")?;
            println!("Default configuration saved to {:?}", output);
            Ok(())
        }
    }
}
