//! App actor - message loop processing UI events, network responses and the status timer

use tokio::sync::mpsc;
use tokio::time::Instant;

use crate::app::state::AppState;
use crate::config::Config;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that owns every store and is their only writer
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        config: &Config,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state: AppState::new(config),
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Initial load, like opening the page
        let cmd = self.state.reload_addresses();
        self.send(cmd);
        self.render();

        loop {
            let deadline = self.state.status.deadline();

            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    self.render();
                }
                Some(response) = net_rx.recv() => {
                    tracing::debug!(id = response.id(), "Applying response");
                    for cmd in self.state.handle_response(response) {
                        self.send(cmd);
                    }
                    self.render();
                }
                _ = tokio::time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if self.state.status.expire(Instant::now()) {
                        self.render();
                    }
                }
                else => break,
            }
        }
    }

    fn send(&self, cmd: NetworkCommand) {
        tracing::info!(op = cmd.name(), "Issuing request");
        let _ = self.network_tx.send(cmd);
    }

    fn render(&self) {
        let _ = self.render_tx.send(self.state.to_render_state());
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        let cmd = match event {
            // Panel navigation
            UiEvent::NextPanel => {
                self.state.next_panel();
                None
            }
            UiEvent::PrevPanel => {
                self.state.prev_panel();
                None
            }

            // Input editing
            UiEvent::StartEditing => {
                self.state.start_editing();
                None
            }
            UiEvent::StopEditing => {
                self.state.stop_editing();
                None
            }
            UiEvent::CharInput(c) => {
                self.state.enter_char(c);
                None
            }
            UiEvent::Backspace => {
                self.state.delete_char();
                None
            }
            UiEvent::CursorLeft => {
                self.state.move_cursor_left();
                None
            }
            UiEvent::CursorRight => {
                self.state.move_cursor_right();
                None
            }
            UiEvent::SubmitAddress => self.state.submit_address(),

            // Address list
            UiEvent::HighlightNext => {
                self.state.highlight_next();
                None
            }
            UiEvent::HighlightPrev => {
                self.state.highlight_prev();
                None
            }
            UiEvent::ViewHighlighted => self.state.view_highlighted(),
            UiEvent::SyncHighlighted => self.state.sync_highlighted(),
            UiEvent::RemoveHighlighted => self.state.remove_highlighted(),
            UiEvent::Reload => Some(self.state.reload_addresses()),

            // Transaction table
            UiEvent::ScrollUp => {
                self.state.scroll_up();
                None
            }
            UiEvent::ScrollDown => {
                self.state.scroll_down();
                None
            }

            // Popups
            UiEvent::ToggleHelp => {
                self.state.toggle_help();
                None
            }
            UiEvent::CloseHelp => {
                self.state.close_help();
                None
            }

            // System
            UiEvent::Quit => return true,
        };

        if let Some(cmd) = cmd {
            self.send(cmd);
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Address, StatusKind};
    use std::time::Duration;

    struct Harness {
        ui_tx: mpsc::UnboundedSender<UiEvent>,
        resp_tx: mpsc::UnboundedSender<NetworkResponse>,
        cmd_rx: mpsc::UnboundedReceiver<NetworkCommand>,
        render_rx: mpsc::UnboundedReceiver<RenderState>,
    }

    fn spawn_actor() -> Harness {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (resp_tx, resp_rx) = mpsc::unbounded_channel();
        let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        let actor = AppActor::new(&Config::default(), cmd_tx, render_tx);
        tokio::spawn(actor.run(ui_rx, resp_rx));
        Harness { ui_tx, resp_tx, cmd_rx, render_rx }
    }

    #[tokio::test(start_paused = true)]
    async fn test_sync_success_clears_after_delay() {
        let mut h = spawn_actor();

        // initial load
        let id = match h.cmd_rx.recv().await.unwrap() {
            NetworkCommand::ListAddresses { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        let render = h.render_rx.recv().await.unwrap();
        assert_eq!(render.status.unwrap().text, "Loading addresses…");

        h.resp_tx
            .send(NetworkResponse::Addresses {
                id,
                result: Ok(vec![Address::new("1A1zP1", "0.5")]),
            })
            .unwrap();
        let render = h.render_rx.recv().await.unwrap();
        assert_eq!(render.addresses.len(), 1);
        assert!(render.status.is_none());

        h.ui_tx.send(UiEvent::SyncHighlighted).unwrap();
        let sync_id = match h.cmd_rx.recv().await.unwrap() {
            NetworkCommand::SyncAddress { id, address } => {
                assert_eq!(address, "1A1zP1");
                id
            }
            other => panic!("unexpected command: {:?}", other),
        };
        let render = h.render_rx.recv().await.unwrap();
        assert_eq!(render.status.unwrap().text, "Syncing…");

        h.resp_tx
            .send(NetworkResponse::AddressSynced {
                id: sync_id,
                address: "1A1zP1".into(),
                result: Ok(()),
            })
            .unwrap();
        assert!(matches!(
            h.cmd_rx.recv().await.unwrap(),
            NetworkCommand::ListAddresses { .. }
        ));
        let render = h.render_rx.recv().await.unwrap();
        let status = render.status.unwrap();
        assert_eq!(status.text, "Synced ✓");
        assert_eq!(status.kind, StatusKind::Success);

        let started = Instant::now();
        let render = h.render_rx.recv().await.unwrap();
        assert!(render.status.is_none());
        assert!(started.elapsed() >= Duration::from_millis(800));
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_status_survives_old_timer() {
        let mut h = spawn_actor();
        let id = match h.cmd_rx.recv().await.unwrap() {
            NetworkCommand::ListAddresses { id } => id,
            other => panic!("unexpected command: {:?}", other),
        };
        h.render_rx.recv().await.unwrap();
        h.resp_tx
            .send(NetworkResponse::Addresses {
                id,
                result: Ok(vec![Address::new("A", "1")]),
            })
            .unwrap();
        h.render_rx.recv().await.unwrap();

        h.resp_tx
            .send(NetworkResponse::AddressSynced {
                id: 99,
                address: "A".into(),
                result: Ok(()),
            })
            .unwrap();
        h.render_rx.recv().await.unwrap();

        // a new operation replaces the success message before it expires
        tokio::time::sleep(Duration::from_millis(400)).await;
        h.ui_tx.send(UiEvent::RemoveHighlighted).unwrap();
        let render = h.render_rx.recv().await.unwrap();
        assert_eq!(render.status.unwrap().text, "Removing…");

        tokio::time::sleep(Duration::from_secs(2)).await;
        h.ui_tx.send(UiEvent::ToggleHelp).unwrap();
        let render = h.render_rx.recv().await.unwrap();
        assert!(render.show_help);
        assert_eq!(render.status.unwrap().text, "Removing…");
    }

    #[tokio::test]
    async fn test_quit_shuts_down_network() {
        let mut h = spawn_actor();
        h.cmd_rx.recv().await.unwrap();
        h.ui_tx.send(UiEvent::Quit).unwrap();
        assert_eq!(h.cmd_rx.recv().await.unwrap(), NetworkCommand::Shutdown);
    }
}
