//! App layer - central state management and command processing
//!
//! The App actor receives UI events and lookup outcomes,
//! updates state, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod coordinator;

pub use state::AppState;
pub use actor::AppActor;
pub use coordinator::LookupCoordinator;
