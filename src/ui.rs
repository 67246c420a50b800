//! View - draws the address panel and the transaction table from a RenderState

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::app::transactions::TransactionState;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{StatusKind, Transaction, TxType};

pub fn draw(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title bar
            Constraint::Min(0),    // Panels
            Constraint::Length(1), // Key hints
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    draw_address_panel(f, state, panels[0]);
    draw_transactions(f, state, panels[1]);
    draw_key_hints(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    use crate::constants::{APP_NAME, APP_VERSION};

    let title = Line::from(vec![
        Span::styled(
            format!(" {} {} ", APP_NAME, APP_VERSION),
            Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
        ),
        Span::styled(format!(" {}", state.api_url), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn border_style(focused: bool, editing: bool) -> Style {
    if focused && editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_address_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Input
            Constraint::Length(1), // Status line
            Constraint::Min(3),    // Address list
        ])
        .split(area);

    // Input
    let input_focused = state.active_panel == Panel::Input;
    let editing = state.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(input_focused, editing))
        .title(" Add address (a:edit Enter:add) ");
    let input = if state.input.is_empty() && !editing {
        Paragraph::new("Enter BTC address").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.input.as_str())
    };
    f.render_widget(input.block(input_block), chunks[0]);

    if input_focused && editing {
        let area = chunks[0];
        let max_x = area.x + area.width.saturating_sub(2);
        let cursor_col = state.input[..state.cursor_position.min(state.input.len())]
            .chars()
            .count() as u16;
        let cursor_x = (area.x + cursor_col + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }

    // Status line
    if let Some(status) = &state.status {
        let line = Paragraph::new(format!(" {}", status.text))
            .style(Style::default().fg(status_color(status.kind)));
        f.render_widget(line, chunks[1]);
    }

    // Address list
    let list_focused = state.active_panel == Panel::Addresses;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(list_focused, false))
        .title(format!(" Addresses ({}) ", state.addresses.len()));

    if state.addresses.is_empty() {
        let empty = Paragraph::new("No addresses yet")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, chunks[2]);
        return;
    }

    let items: Vec<ListItem> = state
        .addresses
        .iter()
        .map(|a| {
            let is_selected = state.selected.as_deref() == Some(a.address.as_str());
            let marker = if is_selected { "▶ " } else { "  " };
            let mut detail = vec![
                Span::raw("  Balance: "),
                Span::styled(format!("{} BTC", a.balance), Style::default().fg(Color::Green)),
            ];
            if let Some(synced) = a.last_synced {
                detail.push(Span::styled(
                    format!("  synced {}", format_timestamp(&synced)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let address_style = if is_selected {
                Style::default().fg(Color::Cyan).bold()
            } else {
                Style::default()
            };
            ListItem::new(vec![
                Line::from(vec![Span::raw(marker), Span::styled(a.address.clone(), address_style)]),
                Line::from(detail),
            ])
        })
        .collect();

    let highlight_style = if list_focused {
        Style::default().bg(Color::DarkGray).bold()
    } else {
        Style::default()
    };

    let list = List::new(items).block(block).highlight_style(highlight_style);
    let mut list_state = ListState::default();
    list_state.select(Some(state.highlighted));
    f.render_stateful_widget(list, chunks[2], &mut list_state);
}

fn draw_transactions(f: &mut Frame, state: &RenderState, area: Rect) {
    let focused = state.active_panel == Panel::Transactions;
    let title = match state.transactions.address() {
        Some(address) => format!(" Transactions: {} ", address),
        None => String::from(" Transactions "),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused, false))
        .title(title);

    let placeholder = |text: String, color: Color| {
        Paragraph::new(text)
            .style(Style::default().fg(color))
            .block(block.clone())
            .wrap(Wrap { trim: false })
    };

    match &state.transactions {
        TransactionState::Idle => f.render_widget(
            placeholder("Select an address to view transactions.".into(), Color::DarkGray),
            area,
        ),
        TransactionState::Loading { .. } => {
            f.render_widget(placeholder("Loading transactions…".into(), Color::DarkGray), area)
        }
        TransactionState::Errored { message, .. } => {
            f.render_widget(placeholder(format!("Error: {}", message), Color::Red), area)
        }
        TransactionState::Loaded { items, .. } if items.is_empty() => {
            f.render_widget(placeholder("No transactions".into(), Color::DarkGray), area)
        }
        TransactionState::Loaded { items, .. } => {
            let scroll = state.tx_scroll.min(items.len().saturating_sub(1));
            let header = Row::new(vec!["Time (UTC)", "Type", "Amount (BTC)", "Tx Hash"])
                .style(Style::default().fg(Color::Yellow).bold());
            let table = Table::new(
                transaction_rows(&items[scroll..]),
                [
                    Constraint::Length(24),
                    Constraint::Length(9),
                    Constraint::Length(14),
                    Constraint::Min(10),
                ],
            )
            .header(header)
            .block(block.clone().title_bottom(
                Line::from(format!(" {} tx ", items.len())).right_aligned(),
            ));
            f.render_widget(table, area);
        }
    }
}

/// One table row per transaction
pub fn transaction_rows(items: &[Transaction]) -> Vec<Row<'static>> {
    items
        .iter()
        .map(|t| {
            Row::new(vec![
                Cell::from(format_timestamp(&t.timestamp)),
                Cell::from(t.kind.as_str().to_string())
                    .style(Style::default().fg(tx_type_color(t.kind))),
                Cell::from(Line::from(t.amount.clone()).right_aligned()),
                Cell::from(t.tx_hash.clone()).style(Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect()
}

fn draw_key_hints(f: &mut Frame, state: &RenderState, area: Rect) {
    let hints = if state.input_mode == InputMode::Editing {
        " Enter:add | Esc:stop editing | arrows:move "
    } else {
        match state.active_panel {
            Panel::Addresses => " ↑/↓:move | Enter:view | s:sync | d:remove | r:reload | a:add | Tab:panel | ?:help | q:quit ",
            Panel::Transactions => " ↑/↓:scroll | r:reload | a:add | Tab:panel | ?:help | q:quit ",
            Panel::Input => " e:edit | r:reload | Tab:panel | ?:help | q:quit ",
        }
    };

    let bar = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 ADDRWATCH - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch panels
   ↑ / ↓  (k / j)     Move in the address list / scroll transactions

 ADDRESSES
   a                  Edit the address input
   Enter              Add the typed address (while editing)
   Enter / v          View transactions of the highlighted address
   s                  Sync the highlighted address
   d                  Remove the highlighted address
   r                  Reload the address list

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// `2024-01-01 00:00:00 UTC`
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Status line color
pub fn status_color(kind: StatusKind) -> Color {
    match kind {
        StatusKind::InProgress => Color::Yellow,
        StatusKind::Success => Color::Green,
        StatusKind::Error => Color::Red,
    }
}

/// Transaction type color
pub fn tx_type_color(kind: TxType) -> Color {
    match kind {
        TxType::Incoming => Color::Green,
        TxType::Outgoing => Color::Red,
    }
}
