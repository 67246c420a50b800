//! App layer - central state management and command processing
//!
//! The App actor receives UI events and network responses,
//! updates the stores, and emits network commands and render state.

pub mod state;
pub mod actor;
pub mod commands;
pub mod status;
pub mod addresses;
pub mod transactions;

pub use state::AppState;
pub use actor::AppActor;
pub use status::StatusSignal;
pub use addresses::AddressStore;
pub use transactions::{TransactionState, TransactionStore};
