//! Network messages - communication between App and Network layers

use crate::error::TransportError;
use crate::models::{Address, Transaction};

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone, PartialEq)]
pub enum NetworkCommand {
    /// `GET /addresses`
    ListAddresses { id: u64 },
    /// `POST /addresses`
    AddAddress { id: u64, address: String },
    /// `DELETE /addresses/{address}`
    RemoveAddress { id: u64, address: String },
    /// `POST /sync/{address}`
    SyncAddress { id: u64, address: String },
    /// `GET /transactions/{address}`
    ListTransactions { id: u64, address: String },
    /// Shutdown the network actor
    Shutdown,
}

impl NetworkCommand {
    /// Short operation name for logging
    pub fn name(&self) -> &'static str {
        match self {
            NetworkCommand::ListAddresses { .. } => "list_addresses",
            NetworkCommand::AddAddress { .. } => "add_address",
            NetworkCommand::RemoveAddress { .. } => "remove_address",
            NetworkCommand::SyncAddress { .. } => "sync_address",
            NetworkCommand::ListTransactions { .. } => "list_transactions",
            NetworkCommand::Shutdown => "shutdown",
        }
    }
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    Addresses {
        id: u64,
        result: Result<Vec<Address>, TransportError>,
    },
    AddressAdded {
        id: u64,
        address: String,
        result: Result<(), TransportError>,
    },
    AddressRemoved {
        id: u64,
        address: String,
        result: Result<(), TransportError>,
    },
    AddressSynced {
        id: u64,
        address: String,
        result: Result<(), TransportError>,
    },
    Transactions {
        id: u64,
        address: String,
        result: Result<Vec<Transaction>, TransportError>,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::Addresses { id, .. } => *id,
            NetworkResponse::AddressAdded { id, .. } => *id,
            NetworkResponse::AddressRemoved { id, .. } => *id,
            NetworkResponse::AddressSynced { id, .. } => *id,
            NetworkResponse::Transactions { id, .. } => *id,
        }
    }

    pub fn is_ok(&self) -> bool {
        match self {
            NetworkResponse::Addresses { result, .. } => result.is_ok(),
            NetworkResponse::AddressAdded { result, .. }
            | NetworkResponse::AddressRemoved { result, .. }
            | NetworkResponse::AddressSynced { result, .. } => result.is_ok(),
            NetworkResponse::Transactions { result, .. } => result.is_ok(),
        }
    }
}
