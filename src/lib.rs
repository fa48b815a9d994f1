//! # Webster TUI
//!
//! A terminal dictionary backed by the Merriam-Webster Collegiate API.
//!
//! ## Features
//! - Structured definitions with sense labels and verb/label categories
//! - Spelling suggestions when a word has no direct match
//! - Overlapping lookups: only the latest search is ever shown
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (State machine + lookup coordinator)
//! - Network Layer (Tokio runtime, one task per lookup)

pub mod config;
pub mod constants;
pub mod decoder;
pub mod error;
pub mod format;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use models::{Definitions, Entry, Outcome, Sense, SenseCategory, Suggestions};
pub use decoder::{decode, Decoded};
pub use error::{LookupError, SchemaError, TransportError};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, LookupCoordinator};
pub use network::{NetworkActor, TransportClient};
