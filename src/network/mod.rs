//! Network layer - dictionary API requests
//!
//! The Network actor receives lookup commands and sends back outcomes.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::{Fetch, TransportClient};
