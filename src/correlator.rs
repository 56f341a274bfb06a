// Event correlation
//
// Folds journal events into one `DeploymentRecord` per future, keyed in the
// order each future was first seen.

use crate::journal::JournalEntry;
use common::{CompleteEvent, InitializeEvent, JournalEvent};
use indexmap::IndexMap;
use log::debug;
use serde::Serialize;

/// Correlated lifecycle of one deployment unit
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeploymentRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initialize: Option<InitializeEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub complete: Option<CompleteEvent>,
}

impl DeploymentRecord {
    /// Whether the deployment reached a terminal state
    pub fn is_finished(&self) -> bool {
        self.complete.is_some()
    }
}

/// Records keyed by future id, in first-seen order
pub type DeploymentRecords = IndexMap<String, DeploymentRecord>;

/// Single-pass correlator over journal events
#[derive(Debug, Default)]
pub struct EventCorrelator {
    records: DeploymentRecords,
    skipped: usize,
}

impl EventCorrelator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event. Later events of the same phase replace earlier ones.
    pub fn apply(&mut self, event: JournalEvent) {
        match event {
            JournalEvent::Initialize(init) => {
                debug!("Initialize {} ({})", init.future_id, init.contract_name);
                let future_id = init.future_id.clone();
                self.record_mut(future_id).initialize = Some(init);
            }
            JournalEvent::Complete(complete) => {
                debug!("Complete {} ({})", complete.future_id, complete.result.outcome());
                let future_id = complete.future_id.clone();
                self.record_mut(future_id).complete = Some(complete);
            }
            other => {
                debug!("Ignoring {} ({})", other.kind(), other.future_id().unwrap_or("-"));
                self.skipped += 1;
            }
        }
    }

    fn record_mut(&mut self, future_id: String) -> &mut DeploymentRecord {
        self.records.entry(future_id).or_default()
    }

    /// Number of events ignored because their type is not a deployment phase
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn finish(self) -> DeploymentRecords {
        debug!(
            "Correlated {} deployment records ({} other events ignored)",
            self.records.len(),
            self.skipped
        );
        self.records
    }
}

/// Correlate a full journal in order
pub fn correlate<I>(entries: I) -> DeploymentRecords
where
    I: IntoIterator<Item = JournalEntry>,
{
    let mut correlator = EventCorrelator::new();
    for entry in entries {
        correlator.apply(entry.event);
    }
    correlator.finish()
}
