//! # addrwatch
//!
//! A terminal client for a wallet-address tracking service.
//!
//! ## Features
//! - Track addresses and see their balances
//! - Trigger a sync of an address against the service's data source
//! - Browse the transaction history of the selected address
//! - Transient status line for the latest operation
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (single owner of all stores)
//! - Network Layer (Tokio runtime)

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod messages;
pub mod models;
pub mod network;
pub mod ui;

// Re-export commonly used types
pub use app::{AddressStore, AppActor, AppState, StatusSignal, TransactionState, TransactionStore};
pub use config::Config;
pub use error::{normalize_error, TransportError};
pub use messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
pub use models::{Address, StatusKind, StatusMessage, Transaction, TxType};
pub use network::{ApiClient, NetworkActor};
