// Deployment journal reader
//
// Loads an append-only `journal.jsonl` and parses every line into a
// `JournalEvent`, keeping file order.

use common::{JournalError, JournalEvent, JournalResult};
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::{self, Utf8Error};

/// A parsed journal line together with its 1-based line number
#[derive(Debug, Clone, PartialEq)]
pub struct JournalEntry {
    pub line: usize,
    pub event: JournalEvent,
}

/// Reader for newline-delimited deployment journals
pub struct JournalReader {
    path: PathBuf,
}

impl JournalReader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the journal and parse every non-blank line
    pub fn read(&self) -> JournalResult<Vec<JournalEntry>> {
        let contents = fs::read(&self.path).map_err(|source| JournalError::MissingJournal {
            path: self.path.clone(),
            source,
        })?;

        let entries = parse_journal(&contents)?;
        debug!("Parsed {} journal entries from {}", entries.len(), self.path.display());
        Ok(entries)
    }
}

/// Split raw journal bytes into trimmed, non-blank lines with their line numbers.
///
/// Lines are decoded one at a time so that invalid UTF-8 is attributed to the
/// line that carries it.
pub fn journal_lines(contents: &[u8]) -> impl Iterator<Item = (usize, Result<&str, Utf8Error>)> {
    contents
        .split(|byte| *byte == b'\n')
        .enumerate()
        .map(|(index, raw)| (index + 1, str::from_utf8(raw).map(str::trim_end)))
        .filter(|(_, line)| !matches!(line, Ok(text) if text.is_empty()))
}

/// Parse journal contents. The first malformed line aborts the whole parse.
pub fn parse_journal(contents: &[u8]) -> JournalResult<Vec<JournalEntry>> {
    journal_lines(contents)
        .map(|(line, text)| {
            let text = text.map_err(|err| JournalError::MalformedEvent {
                line,
                reason: format!("invalid UTF-8: {}", err),
            })?;
            JournalEvent::parse(text)
                .map(|event| JournalEntry { line, event })
                .map_err(|err| JournalError::MalformedEvent {
                    line,
                    reason: err.to_string(),
                })
        })
        .collect()
}
