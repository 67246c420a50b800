//! Address store - the tracked addresses, the selection and the add input

use std::collections::HashMap;
use std::time::Duration;

use crate::app::state::RequestIds;
use crate::app::status::{StatusSignal, StatusToken};
use crate::error::{normalize_error, TransportError};
use crate::messages::NetworkCommand;
use crate::models::{Address, StatusMessage};

/// Authoritative list of tracked addresses.
///
/// Operations only record what they started and hand back the command to
/// send. Nothing here serializes overlapping requests: whichever reload
/// answers last defines the list.
#[derive(Debug)]
pub struct AddressStore {
    addresses: Vec<Address>,
    selected: Option<String>,
    highlighted: usize,
    pub input: String,
    pending_reloads: HashMap<u64, StatusToken>,
    success_clear_delay: Duration,
}

impl AddressStore {
    pub fn new(success_clear_delay: Duration) -> Self {
        AddressStore {
            addresses: Vec::new(),
            selected: None,
            highlighted: 0,
            input: String::new(),
            pending_reloads: HashMap::new(),
            success_clear_delay,
        }
    }

    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn highlighted_address(&self) -> Option<&str> {
        self.addresses
            .get(self.highlighted)
            .map(|a| a.address.as_str())
    }

    pub fn highlight_next(&mut self) {
        if !self.addresses.is_empty() {
            self.highlighted = (self.highlighted + 1) % self.addresses.len();
        }
    }

    pub fn highlight_prev(&mut self) {
        if !self.addresses.is_empty() {
            self.highlighted = self
                .highlighted
                .checked_sub(1)
                .unwrap_or(self.addresses.len() - 1);
        }
    }

    /// Select an address from the loaded set. Unknown addresses are ignored.
    /// Returns true if the selection changed.
    pub fn select(&mut self, address: Option<&str>) -> bool {
        let next = match address {
            Some(a) if self.contains(a) => Some(a.to_string()),
            Some(_) => return false,
            None => None,
        };
        if next == self.selected {
            return false;
        }
        self.selected = next;
        true
    }

    fn contains(&self, address: &str) -> bool {
        self.addresses.iter().any(|a| a.address == address)
    }

    // ========================
    // Operations
    // ========================

    pub fn reload(&mut self, id: u64, status: &mut StatusSignal) -> NetworkCommand {
        let token = status.set(StatusMessage::in_progress("Loading addresses…"));
        self.pending_reloads.insert(id, token);
        NetworkCommand::ListAddresses { id }
    }

    /// Start adding `input`. Blank input issues nothing.
    pub fn add(&mut self, input: &str, id: u64, status: &mut StatusSignal) -> Option<NetworkCommand> {
        let address = input.trim();
        if address.is_empty() {
            tracing::debug!("Ignoring blank address input");
            return None;
        }
        status.set(StatusMessage::in_progress("Adding…"));
        Some(NetworkCommand::AddAddress {
            id,
            address: address.to_string(),
        })
    }

    pub fn remove(&mut self, address: &str, id: u64, status: &mut StatusSignal) -> NetworkCommand {
        status.set(StatusMessage::in_progress("Removing…"));
        NetworkCommand::RemoveAddress {
            id,
            address: address.to_string(),
        }
    }

    pub fn sync(&mut self, address: &str, id: u64, status: &mut StatusSignal) -> NetworkCommand {
        status.set(StatusMessage::in_progress("Syncing…"));
        NetworkCommand::SyncAddress {
            id,
            address: address.to_string(),
        }
    }

    // ========================
    // Responses
    // ========================

    /// Replace the list wholesale on success. A failed reload keeps the old
    /// list and leaves its error visible until the next status replaces it.
    pub fn on_reloaded(
        &mut self,
        id: u64,
        result: Result<Vec<Address>, TransportError>,
        status: &mut StatusSignal,
    ) {
        let token = self.pending_reloads.remove(&id);
        // a hung older reload never gets its own answer
        self.pending_reloads.retain(|&pending, _| pending > id);
        match result {
            Ok(addresses) => {
                let highlighted = self.highlighted_address().map(str::to_string);
                self.addresses = addresses;
                self.highlighted = highlighted
                    .and_then(|h| self.addresses.iter().position(|a| a.address == h))
                    .unwrap_or_else(|| self.highlighted.min(self.addresses.len().saturating_sub(1)));

                if let Some(selected) = self.selected.clone() {
                    if !self.contains(&selected) {
                        tracing::info!(address = %selected, "Selected address no longer tracked");
                        self.selected = None;
                    }
                }
                if let Some(token) = token {
                    status.clear_if(token);
                }
            }
            Err(e) => {
                status.set(StatusMessage::error(format!("Error: {}", normalize_error(&e))));
            }
        }
    }

    pub fn on_added(
        &mut self,
        result: Result<(), TransportError>,
        status: &mut StatusSignal,
        ids: &mut RequestIds,
    ) -> Vec<NetworkCommand> {
        match result {
            Ok(()) => {
                self.input.clear();
                vec![self.reload(ids.next(), status)]
            }
            Err(e) => {
                status.set(StatusMessage::error(format!("Error: {}", normalize_error(&e))));
                Vec::new()
            }
        }
    }

    pub fn on_removed(
        &mut self,
        address: &str,
        result: Result<(), TransportError>,
        status: &mut StatusSignal,
        ids: &mut RequestIds,
    ) -> Vec<NetworkCommand> {
        match result {
            Ok(()) => {
                if self.selected.as_deref() == Some(address) {
                    self.selected = None;
                }
                vec![self.reload(ids.next(), status)]
            }
            Err(e) => {
                status.set(StatusMessage::error(format!("Error: {}", normalize_error(&e))));
                Vec::new()
            }
        }
    }

    /// On success: reload, keep the selection as it is, then show a
    /// success status that clears itself.
    pub fn on_synced(
        &mut self,
        address: &str,
        result: Result<(), TransportError>,
        status: &mut StatusSignal,
        ids: &mut RequestIds,
    ) -> Vec<NetworkCommand> {
        match result {
            Ok(()) => {
                let reload = self.reload(ids.next(), status);
                tracing::info!(address, "Address synced");
                status.set_with_auto_clear(StatusMessage::success("Synced ✓"), self.success_clear_delay);
                vec![reload]
            }
            Err(e) => {
                status.set(StatusMessage::error(format!(
                    "Sync failed: {}",
                    normalize_error(&e)
                )));
                Vec::new()
            }
        }
    }
}
