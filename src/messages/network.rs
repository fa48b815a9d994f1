//! Network messages - communication between App and Network layers

use crate::models::Outcome;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Look up a word; `id` is the coordinator's sequence number
    Lookup { id: u64, word: String },

    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A lookup reached its terminal state
    Completed {
        id: u64,
        word: String,
        outcome: Outcome,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Completed { id, .. } => *id,
        }
    }
}
