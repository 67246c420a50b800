//! Render state - data structure sent from App layer to UI for rendering

use crate::app::transactions::TransactionState;
use crate::constants::DEFAULT_API_URL;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{Address, StatusMessage};

/// Complete state needed by the UI to render
#[derive(Debug, Clone)]
pub struct RenderState {
    pub api_url: String,

    // Address panel
    pub addresses: Vec<Address>,
    pub highlighted: usize,
    pub selected: Option<String>,
    pub input: String,
    pub status: Option<StatusMessage>,

    // Transaction panel
    pub transactions: TransactionState,
    pub tx_scroll: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub show_help: bool,
}

impl Default for RenderState {
    fn default() -> Self {
        RenderState {
            api_url: String::from(DEFAULT_API_URL),
            addresses: Vec::new(),
            highlighted: 0,
            selected: None,
            input: String::new(),
            status: None,
            transactions: TransactionState::Idle,
            tx_scroll: 0,
            active_panel: Panel::Addresses,
            input_mode: InputMode::Normal,
            cursor_position: 0,
            show_help: false,
        }
    }
}
