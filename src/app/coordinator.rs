//! Lookup coordinator - sequence numbers and stale-result filtering
//!
//! Every submission gets a fresh, strictly increasing id. Only the most recent
//! submission is pending; a completion carrying any other id belongs to a
//! superseded lookup and is discarded, so a slow answer for an older term can
//! never overwrite the answer for the newer one.

use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::Outcome;

/// The lookup currently in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingLookup {
    pub id: u64,
    pub word: String,
}

/// Why a submission was not sent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejected {
    /// Nothing to look up
    Blank,
    /// The same term is already in flight
    Duplicate,
}

/// An outcome accepted for display
#[derive(Debug, Clone)]
pub struct Delivered {
    pub word: String,
    pub outcome: Outcome,
    pub time_ms: u64,
}

/// Issues lookups and accepts only the completion of the latest one
#[derive(Debug)]
pub struct LookupCoordinator {
    next_id: u64,
    pending: Option<PendingLookup>,
}

impl Default for LookupCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

impl LookupCoordinator {
    pub fn new() -> Self {
        LookupCoordinator {
            next_id: 1,
            pending: None,
        }
    }

    /// The lookup whose outcome will be shown, if any
    pub fn pending(&self) -> Option<&PendingLookup> {
        self.pending.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.pending.is_some()
    }

    /// Start a lookup for `word`, superseding whatever is in flight
    pub fn submit(&mut self, word: &str) -> Result<NetworkCommand, Rejected> {
        let word = word.trim();
        if word.is_empty() {
            return Err(Rejected::Blank);
        }

        if let Some(pending) = &self.pending {
            if pending.word == word {
                tracing::debug!(id = pending.id, word, "Lookup already in flight");
                return Err(Rejected::Duplicate);
            }
            tracing::info!(id = pending.id, word = %pending.word, "Lookup superseded");
        }

        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some(PendingLookup {
            id,
            word: word.to_string(),
        });

        tracing::info!(id, word, "Lookup submitted");

        Ok(NetworkCommand::Lookup {
            id,
            word: word.to_string(),
        })
    }

    /// Accept a completion if it belongs to the latest submission
    ///
    /// Returns `None` for superseded or unknown ids. The pending slot is
    /// cleared on acceptance, so a second completion for the same id is
    /// ignored too.
    pub fn complete(&mut self, response: NetworkResponse) -> Option<Delivered> {
        let NetworkResponse::Completed {
            id,
            word,
            outcome,
            time_ms,
        } = response;

        match &self.pending {
            Some(pending) if pending.id == id => {
                self.pending = None;
                tracing::info!(id, word = %word, outcome = outcome.kind(), "Outcome delivered");
                Some(Delivered {
                    word,
                    outcome,
                    time_ms,
                })
            }
            _ => {
                tracing::debug!(id, word = %word, "Discarding stale outcome");
                None
            }
        }
    }
}
