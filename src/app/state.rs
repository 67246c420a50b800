//! App state - pure data structure with no I/O logic

use std::time::Duration;

use crate::app::addresses::AddressStore;
use crate::app::status::StatusSignal;
use crate::app::transactions::TransactionStore;
use crate::config::Config;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;

/// Monotonic request id source. Ids double as generation numbers for
/// discarding stale responses.
#[derive(Debug, Default)]
pub struct RequestIds(u64);

impl RequestIds {
    pub fn next(&mut self) -> u64 {
        self.0 += 1;
        self.0
    }
}

/// Main application state - pure data, no I/O
pub struct AppState {
    pub api_url: String,

    // Stores
    pub addresses: AddressStore,
    pub transactions: TransactionStore,
    pub status: StatusSignal,
    pub ids: RequestIds,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub tx_scroll: usize,
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        Self::with_clear_delay(&config.api_url, config.status_clear_delay())
    }

    pub fn with_clear_delay(api_url: &str, success_clear_delay: Duration) -> Self {
        AppState {
            api_url: api_url.to_string(),
            addresses: AddressStore::new(success_clear_delay),
            transactions: TransactionStore::new(),
            status: StatusSignal::new(),
            ids: RequestIds::default(),
            active_panel: Panel::Addresses,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            tx_scroll: 0,
            show_help: false,
        }
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            api_url: self.api_url.clone(),
            addresses: self.addresses.addresses().to_vec(),
            highlighted: self.addresses.highlighted(),
            selected: self.addresses.selected().map(str::to_string),
            input: self.addresses.input.clone(),
            status: self.status.current().cloned(),
            transactions: self.transactions.state().clone(),
            tx_scroll: self.tx_scroll,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            cursor_position: self.cursor_position,
            show_help: self.show_help,
        }
    }
}
