use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use ratatui::layout::Rect;

use crate::app::{App, View};
use crate::export::DEFAULT_EXPORT_PATH;
use crate::ui;

/// Poll for events with a timeout
pub fn poll_event(timeout: Duration) -> Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Handle a key event
pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    // If help is shown, any key closes it
    if app.show_help {
        app.show_help = false;
        return;
    }

    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Step through cards while the overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Home => app.select_first(),
            KeyCode::End => app.select_last(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.quit(),

        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),

        KeyCode::Char('1') => app.set_view(View::Services),
        KeyCode::Char('2') => app.set_view(View::Backups),

        // Navigation (up/down for cards, left/right for dashboards)
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::Left | KeyCode::Char('h') => app.prev_view(),
        KeyCode::Right | KeyCode::Char('l') => app.next_view(),
        KeyCode::PageUp => app.select_prev_n(10),
        KeyCode::PageDown => app.select_next_n(10),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        KeyCode::Enter => app.enter_detail(),
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char('t') => app.toggle_theme(),
        KeyCode::Char('?') => app.toggle_help(),

        KeyCode::Char('e') => {
            let export_path = PathBuf::from(DEFAULT_EXPORT_PATH);
            match app.export_state(&export_path) {
                Ok(()) => {
                    app.set_status_message(format!("Exported to {}", export_path.display()));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        _ => {}
    }
}

/// Handle mouse events
///
/// `table` is the screen area of the cards table, borders included.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, table: Rect) {
    match mouse.kind {
        MouseEventKind::ScrollUp => app.select_prev(),
        MouseEventKind::ScrollDown => app.select_next(),

        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            if let Some(index) = card_at(app, table, mouse.column, clicked_row) {
                app.select_row(index);
            }

            // Tab bar is row 1: " 1:Services " (0-12), " 2:Backups " (13-25)
            if clicked_row == 1 {
                if mouse.column < 13 {
                    app.set_view(View::Services);
                } else if mouse.column < 26 {
                    app.set_view(View::Backups);
                }
            }
        }

        MouseEventKind::Down(MouseButton::Right) => app.go_back(),

        _ => {}
    }
}

/// The card under a click, accounting for how far the table has scrolled.
fn card_at(app: &App, table: Rect, column: u16, row: u16) -> Option<usize> {
    // Below the top border and the header row
    let first_row = table.y + 2;
    let visible = ui::visible_rows(table);
    let inside_columns = column > table.x && column + 1 < table.right();
    if !inside_columns || row < first_row || usize::from(row - first_row) >= visible {
        return None;
    }

    let selected = match app.current_view {
        View::Services => app.services.selected,
        View::Backups => app.backups.selected,
    };
    Some(ui::table_offset(selected, visible) + usize::from(row - first_row))
}
