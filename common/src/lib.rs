pub mod types;

pub use types::*;

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reconciling a deployment journal
#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Journal not found at {}: {source}", path.display())]
    MissingJournal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed event on journal line {line}: {reason}")]
    MalformedEvent { line: usize, reason: String },
    #[error("Malformed deployment record {future_id}: {reason}")]
    MalformedRecord { future_id: String, reason: String },
    #[error("Deployment {future_id} did not succeed (result: {outcome})")]
    DeploymentFailed { future_id: String, outcome: String },
    #[error("Failed to write manifest to {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type JournalResult<T> = Result<T, JournalError>;
