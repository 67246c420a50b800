//! Network layer - HTTP request execution against the address service
//!
//! The Network actor receives commands and sends back one response per command.

pub mod actor;
pub mod client;

pub use actor::NetworkActor;
pub use client::ApiClient;
