pub mod api;
pub mod correlator;
pub mod journal;
pub mod synth;

pub use api::{ConfigManager, IgnitionVerify, ManifestFormat, RunSummary, VerifyConfig};
pub use common::{JournalError, JournalEvent, JournalResult};
pub use correlator::{correlate, DeploymentRecord, DeploymentRecords, EventCorrelator};
pub use journal::{JournalEntry, JournalReader};
pub use synth::{CommandSynthesizer, VerifyCommand};
