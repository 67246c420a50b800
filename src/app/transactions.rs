//! Transaction store - history of the one selected address

use crate::error::{normalize_error, TransportError};
use crate::messages::NetworkCommand;
use crate::models::Transaction;

/// What the transaction panel currently shows
#[derive(Clone, Debug, Default, PartialEq)]
pub enum TransactionState {
    /// No address selected
    #[default]
    Idle,
    Loading { address: String, request_id: u64 },
    Loaded { address: String, items: Vec<Transaction> },
    Errored { address: String, message: String },
}

impl TransactionState {
    /// Address this state is scoped to
    pub fn address(&self) -> Option<&str> {
        match self {
            TransactionState::Idle => None,
            TransactionState::Loading { address, .. }
            | TransactionState::Loaded { address, .. }
            | TransactionState::Errored { address, .. } => Some(address),
        }
    }
}

#[derive(Debug, Default)]
pub struct TransactionStore {
    state: TransactionState,
}

impl TransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &TransactionState {
        &self.state
    }

    /// Start loading history for `address`, or go idle for `None`.
    ///
    /// Any load still in flight is superseded: its response will no longer
    /// match and gets dropped in [`TransactionStore::on_loaded`].
    pub fn load_for(&mut self, address: Option<&str>, request_id: u64) -> Option<NetworkCommand> {
        match address {
            None => {
                self.state = TransactionState::Idle;
                None
            }
            Some(address) => {
                self.state = TransactionState::Loading {
                    address: address.to_string(),
                    request_id,
                };
                Some(NetworkCommand::ListTransactions {
                    id: request_id,
                    address: address.to_string(),
                })
            }
        }
    }

    /// Apply a response. Returns false if it was stale and discarded.
    pub fn on_loaded(
        &mut self,
        request_id: u64,
        address: &str,
        result: Result<Vec<Transaction>, TransportError>,
    ) -> bool {
        let current = match &self.state {
            TransactionState::Loading { address: a, request_id: id } if *id == request_id && a == address => {
                a.clone()
            }
            _ => {
                tracing::debug!(request_id, address, "Discarding stale transaction response");
                return false;
            }
        };

        self.state = match result {
            Ok(items) => TransactionState::Loaded { address: current, items },
            Err(e) => TransactionState::Errored {
                address: current,
                message: normalize_error(&e),
            },
        };
        true
    }
}
