//! Typed per-entry batch results.
//!
//! Replaces print-and-forget error handling with a report the caller
//! can inspect: every attempted entry is present exactly once, either
//! as a written path or as the error that stopped it.

use std::path::PathBuf;

use bookplate_core::id::ImageId;

use crate::driver::GenerateError;

/// Outcome of one prompt-table entry.
#[derive(Debug)]
pub struct EntryOutcome {
    /// The entry's identifier.
    pub id: ImageId,
    /// Written file path on success, the terminal error otherwise.
    pub result: Result<PathBuf, GenerateError>,
}

/// Aggregated results for a whole batch run, in table order.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl BatchReport {
    /// Number of entries attempted.
    pub fn attempted(&self) -> usize {
        self.outcomes.len()
    }

    /// Successfully written files, in table order.
    pub fn succeeded(&self) -> Vec<(&ImageId, &PathBuf)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(|p| (&o.id, p)))
            .collect()
    }

    /// Failed entries with their errors, in table order.
    pub fn failed(&self) -> Vec<(&ImageId, &GenerateError)> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().err().map(|e| (&o.id, e)))
            .collect()
    }

    /// True when every attempted entry produced a file.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}
