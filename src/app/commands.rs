//! Command handlers - business logic for processing UI events and responses

use crate::app::transactions::TransactionState;
use crate::app::AppState;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }

    // ========================
    // Input editing
    // ========================

    pub fn start_editing(&mut self) {
        self.active_panel = Panel::Input;
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.addresses.input.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        let input = &self.addresses.input;
        if self.cursor_position > 0 {
            self.cursor_position = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        let input = &self.addresses.input;
        if self.cursor_position < input.len() {
            self.cursor_position = input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(input.len());
        }
    }

    pub fn enter_char(&mut self, c: char) {
        let input = &mut self.addresses.input;
        if self.cursor_position <= input.len() {
            input.insert(self.cursor_position, c);
            self.cursor_position += c.len_utf8();
        }
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let input = &mut self.addresses.input;
            let prev_pos = input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
            input.remove(prev_pos);
            self.cursor_position = prev_pos;
        }
    }

    // ========================
    // Address list
    // ========================

    pub fn highlight_next(&mut self) {
        self.addresses.highlight_next();
    }

    pub fn highlight_prev(&mut self) {
        self.addresses.highlight_prev();
    }

    pub fn scroll_up(&mut self) {
        self.tx_scroll = self.tx_scroll.saturating_sub(1);
    }

    /// Scroll one row down, stopping at the last loaded transaction
    pub fn scroll_down(&mut self) {
        let last = match self.transactions.state() {
            TransactionState::Loaded { items, .. } => items.len().saturating_sub(1),
            _ => 0,
        };
        self.tx_scroll = (self.tx_scroll + 1).min(last);
    }

    // ========================
    // Store operations
    // ========================

    pub fn reload_addresses(&mut self) -> NetworkCommand {
        let id = self.ids.next();
        self.addresses.reload(id, &mut self.status)
    }

    pub fn submit_address(&mut self) -> Option<NetworkCommand> {
        self.stop_editing();
        let input = self.addresses.input.clone();
        let id = self.ids.next();
        self.addresses.add(&input, id, &mut self.status)
    }

    pub fn remove_highlighted(&mut self) -> Option<NetworkCommand> {
        let address = self.addresses.highlighted_address()?.to_string();
        let id = self.ids.next();
        Some(self.addresses.remove(&address, id, &mut self.status))
    }

    pub fn sync_highlighted(&mut self) -> Option<NetworkCommand> {
        let address = self.addresses.highlighted_address()?.to_string();
        let id = self.ids.next();
        Some(self.addresses.sync(&address, id, &mut self.status))
    }

    pub fn view_highlighted(&mut self) -> Option<NetworkCommand> {
        let address = self.addresses.highlighted_address()?.to_string();
        self.select(Some(&address))
    }

    /// Change the selection and load its transactions if it actually changed
    pub fn select(&mut self, address: Option<&str>) -> Option<NetworkCommand> {
        if !self.addresses.select(address) {
            return None;
        }
        self.load_selected_transactions()
    }

    fn load_selected_transactions(&mut self) -> Option<NetworkCommand> {
        self.tx_scroll = 0;
        let id = self.ids.next();
        let selected = self.addresses.selected().map(str::to_string);
        self.transactions.load_for(selected.as_deref(), id)
    }

    // ========================
    // Network responses
    // ========================

    /// Apply a response and return the follow-up commands it triggers
    pub fn handle_response(&mut self, response: NetworkResponse) -> Vec<NetworkCommand> {
        let selected_before = self.addresses.selected().map(str::to_string);

        let mut commands = match response {
            NetworkResponse::Addresses { id, result } => {
                self.addresses.on_reloaded(id, result, &mut self.status);
                Vec::new()
            }
            NetworkResponse::AddressAdded { result, .. } => {
                let commands = self.addresses.on_added(result, &mut self.status, &mut self.ids);
                self.cursor_position = self.cursor_position.min(self.addresses.input.len());
                commands
            }
            NetworkResponse::AddressRemoved { address, result, .. } => {
                self.addresses
                    .on_removed(&address, result, &mut self.status, &mut self.ids)
            }
            NetworkResponse::AddressSynced { address, result, .. } => {
                let synced = result.is_ok();
                let mut commands = self
                    .addresses
                    .on_synced(&address, result, &mut self.status, &mut self.ids);
                // fresh history for the address on screen
                if synced && self.addresses.selected() == Some(address.as_str()) {
                    commands.extend(self.load_selected_transactions());
                }
                commands
            }
            NetworkResponse::Transactions { id, address, result } => {
                self.transactions.on_loaded(id, &address, result);
                Vec::new()
            }
        };

        if self.addresses.selected() != selected_before.as_deref() {
            commands.extend(self.load_selected_transactions());
        }
        commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TransportError;
    use crate::models::{Address, Transaction};

    fn loaded_state(addresses: &[&str]) -> AppState {
        let mut state = AppState::default();
        let id = match state.reload_addresses() {
            NetworkCommand::ListAddresses { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        let result = Ok(addresses.iter().map(|a| Address::new(*a, "0.5")).collect());
        assert!(state.handle_response(NetworkResponse::Addresses { id, result }).is_empty());
        state
    }

    fn tx_id(cmd: &NetworkCommand) -> u64 {
        match cmd {
            NetworkCommand::ListTransactions { id, .. } => *id,
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_typing_and_submitting() {
        let mut state = loaded_state(&[]);
        state.start_editing();
        for c in "1A1z".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.delete_char();
        assert_eq!(state.addresses.input, "1Az");

        let cmd = state.submit_address().unwrap();
        assert!(matches!(cmd, NetworkCommand::AddAddress { ref address, .. } if address == "1Az"));
        assert_eq!(state.input_mode, InputMode::Normal);

        let follow = state.handle_response(NetworkResponse::AddressAdded {
            id: 2,
            address: "1Az".into(),
            result: Ok(()),
        });
        assert_eq!(follow.len(), 1);
        assert!(matches!(follow[0], NetworkCommand::ListAddresses { .. }));
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_view_highlighted_loads_transactions() {
        let mut state = loaded_state(&["1A1zP1"]);
        let cmd = state.view_highlighted().unwrap();
        assert!(matches!(cmd, NetworkCommand::ListTransactions { ref address, .. } if address == "1A1zP1"));
        // selecting the same address again issues nothing
        assert!(state.view_highlighted().is_none());
    }

    #[test]
    fn test_removing_selected_goes_idle() {
        let mut state = loaded_state(&["A", "B"]);
        let cmd = state.view_highlighted().unwrap();
        state.handle_response(NetworkResponse::Transactions {
            id: tx_id(&cmd),
            address: "A".into(),
            result: Ok(vec![]),
        });

        let follow = state.handle_response(NetworkResponse::AddressRemoved {
            id: 10,
            address: "A".into(),
            result: Ok(()),
        });
        assert_eq!(follow.len(), 1);
        assert!(state.addresses.selected().is_none());
        assert_eq!(state.transactions.state(), &TransactionState::Idle);
    }

    #[test]
    fn test_switching_selection_discards_late_response() {
        let mut state = loaded_state(&["A", "B"]);
        let first = state.view_highlighted().unwrap();
        state.highlight_next();
        let second = state.view_highlighted().unwrap();

        let txs: Vec<Transaction> = serde_json::from_str(
            r#"[{"tx_hash":"b1","timestamp":"2024-01-01T00:00:00Z","type":"outgoing","amount":"0.1"}]"#,
        )
        .unwrap();
        state.handle_response(NetworkResponse::Transactions {
            id: tx_id(&second),
            address: "B".into(),
            result: Ok(txs.clone()),
        });
        state.handle_response(NetworkResponse::Transactions {
            id: tx_id(&first),
            address: "A".into(),
            result: Err(TransportError::Network("late".into())),
        });

        assert_eq!(
            state.transactions.state(),
            &TransactionState::Loaded { address: "B".into(), items: txs }
        );
    }

    #[test]
    fn test_sync_of_selected_refreshes_transactions() {
        let mut state = loaded_state(&["A"]);
        state.view_highlighted().unwrap();
        state.sync_highlighted().unwrap();
        let follow = state.handle_response(NetworkResponse::AddressSynced {
            id: 5,
            address: "A".into(),
            result: Ok(()),
        });
        assert_eq!(follow.len(), 2);
        assert!(matches!(follow[0], NetworkCommand::ListAddresses { .. }));
        assert!(matches!(follow[1], NetworkCommand::ListTransactions { ref address, .. } if address == "A"));
        assert_eq!(state.status.current().unwrap().text, "Synced ✓");
    }

    #[test]
    fn test_actions_on_empty_list_do_nothing() {
        let mut state = loaded_state(&[]);
        assert!(state.remove_highlighted().is_none());
        assert!(state.sync_highlighted().is_none());
        assert!(state.view_highlighted().is_none());
        assert!(state.status.current().is_none());
    }

    #[test]
    fn test_scroll_stops_at_last_transaction() {
        let mut state = loaded_state(&["A"]);
        let cmd = state.view_highlighted().unwrap();
        let txs: Vec<Transaction> = serde_json::from_str(
            r#"[{"tx_hash":"a1","timestamp":"2024-01-01T00:00:00Z","type":"incoming","amount":"1"},
                {"tx_hash":"a2","timestamp":"2024-01-02T00:00:00Z","type":"outgoing","amount":"0.2"}]"#,
        )
        .unwrap();
        state.handle_response(NetworkResponse::Transactions {
            id: tx_id(&cmd),
            address: "A".into(),
            result: Ok(txs),
        });

        for _ in 0..20 {
            state.scroll_down();
        }
        assert_eq!(state.tx_scroll, 1);
        state.scroll_up();
        assert_eq!(state.tx_scroll, 0);
    }

    #[test]
    fn test_scroll_without_loaded_history_stays_put() {
        let mut state = loaded_state(&["A"]);
        state.scroll_down();
        assert_eq!(state.tx_scroll, 0);
    }
}
