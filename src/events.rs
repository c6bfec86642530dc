use std::time::Duration;

use anyhow::Result;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::app::App;
use crate::data::Table;
use crate::ui::common::tab_at;

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

    // If detail overlay is shown, handle overlay-specific keys
    if app.show_detail_overlay {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Backspace | KeyCode::Char('q') => {
                app.close_overlay();
            }
            // Allow moving through rows while overlay is open
            KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => app.select_next(),
            KeyCode::Char(' ') => app.toggle_cursor_row(),
            KeyCode::Char(c) if app.has_hotkey(c) => app.run_hotkey(c),
            _ => {}
        }
        return;
    }

    // If filter input is active, handle text input
    if app.filter_active {
        handle_filter_input(app, key);
        return;
    }

    match key.code {
        // Quit
        KeyCode::Char('q') => app.quit(),

        // Table switching
        KeyCode::Tab => {
            if key.modifiers.contains(KeyModifiers::SHIFT) {
                app.prev_view();
            } else {
                app.next_view();
            }
        }
        KeyCode::BackTab => app.prev_view(),
        KeyCode::Char('1') => app.set_view(Table::Documents),
        KeyCode::Char('2') => app.set_view(Table::Roles),
        KeyCode::Char('3') => app.set_view(Table::Users),
        KeyCode::Char('4') => app.set_view(Table::Departments),

        // Rows and pages
        KeyCode::Up | KeyCode::Char('k') => app.select_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next(),
        KeyCode::PageUp => app.prev_page(),
        KeyCode::PageDown => app.next_page(),
        KeyCode::Home => app.select_first(),
        KeyCode::End => app.select_last(),

        // Column focus
        KeyCode::Left | KeyCode::Char('h') => app.focus_prev_column(),
        KeyCode::Right | KeyCode::Char('l') => app.focus_next_column(),

        // Sorting and column visibility
        KeyCode::Char('s') => app.toggle_sort(),
        KeyCode::Char('v') => app.toggle_focused_column(),

        // Selection
        KeyCode::Char(' ') => app.toggle_cursor_row(),
        KeyCode::Char('a') => {
            app.toggle_all_visible();
        }
        KeyCode::Char('x') => app.clear_selection(),

        // Enter detail overlay
        KeyCode::Enter => app.enter_detail(),

        // Go back (Esc and Backspace)
        KeyCode::Esc | KeyCode::Backspace => app.go_back(),

        // Reload
        KeyCode::Char('r') => app.request_reload(),

        // Help
        KeyCode::Char('?') => app.toggle_help(),

        // Filter (start typing to filter)
        KeyCode::Char('/') => app.start_filter(),

        // Clear filter
        KeyCode::Char('c') => {
            if !app.filter_text.is_empty() {
                app.clear_filter();
            }
        }

        // Export
        KeyCode::Char('e') => {
            let export_path = app.export_path();
            match app.export_selection(&export_path) {
                Ok(count) => {
                    app.set_status_message(format!(
                        "Exported {} rows to {}",
                        count,
                        export_path.display()
                    ));
                }
                Err(e) => {
                    app.set_status_message(format!("Export failed: {}", e));
                }
            }
        }

        // Row actions of the current table
        KeyCode::Char(c) if app.has_hotkey(c) => app.run_hotkey(c),

        _ => {}
    }
}

/// Handle key input while filter is active
fn handle_filter_input(app: &mut App, key: KeyEvent) {
    match key.code {
        // Confirm filter
        KeyCode::Enter => {
            app.filter_active = false;
        }

        // Cancel filter (keep text but exit input mode)
        KeyCode::Esc => {
            app.cancel_filter();
        }

        // Clear and exit
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.clear_filter();
        }

        // Backspace
        KeyCode::Backspace => {
            app.filter_pop();
            if app.filter_text.is_empty() {
                app.filter_active = false;
            }
        }

        // Type characters
        KeyCode::Char(c) => {
            app.filter_push(c);
        }

        _ => {}
    }
}

/// Handle mouse events
///
/// `content_start_row` is the screen row of the table header.
pub fn handle_mouse_event(app: &mut App, mouse: MouseEvent, content_start_row: u16) {
    match mouse.kind {
        // Scroll wheel
        MouseEventKind::ScrollUp => {
            app.select_prev();
        }
        MouseEventKind::ScrollDown => {
            app.select_next();
        }

        // Click to move the cursor
        MouseEventKind::Down(MouseButton::Left) => {
            let clicked_row = mouse.row;

            if clicked_row > content_start_row {
                let item_row = (clicked_row - content_start_row - 1) as usize;
                app.select_row(item_row);
            }

            // Tab clicks (row 1, after header)
            if clicked_row == 1 {
                if let Some(table) = tab_at(mouse.column) {
                    app.set_view(table);
                }
            }
        }

        // Right-click goes back
        MouseEventKind::Down(MouseButton::Right) => {
            app.go_back();
        }

        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PortalData;
    use crate::settings::{Settings, ThemeChoice};
    use crate::source::{ChannelSource, PortalSnapshot, ServiceCommand, ServiceHandle};
    use tokio::sync::mpsc;

    fn app() -> (App, mpsc::UnboundedReceiver<ServiceCommand>) {
        let (tx, source) = ChannelSource::create("test");
        tx.send(PortalSnapshot::new(1, PortalData::sample())).unwrap();
        let (service, commands) = ServiceHandle::channel();
        let settings = Settings {
            theme: ThemeChoice::Dark,
            page_size: 5,
            ..Settings::default()
        };
        let mut app = App::new(Box::new(source), settings, Some(service)).unwrap();
        app.refresh();
        (app, commands)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_number_keys_switch_tables() {
        let (mut app, _rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char('3')));
        assert_eq!(app.current_view, Table::Users);
        handle_key_event(&mut app, key(KeyCode::BackTab));
        assert_eq!(app.current_view, Table::Roles);
    }

    #[test]
    fn test_filter_mode_captures_keys() {
        let (mut app, _rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char('/')));
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(app.running);
        assert_eq!(app.filter_text, "q");
        handle_key_event(&mut app, key(KeyCode::Enter));
        assert!(!app.filter_active);
        handle_key_event(&mut app, key(KeyCode::Char('c')));
        assert!(app.filter_text.is_empty());
    }

    #[test]
    fn test_space_and_hotkey() {
        let (mut app, mut rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.view().selection().len(), 1);

        handle_key_event(&mut app, key(KeyCode::Char('y')));
        assert!(matches!(rx.try_recv(), Ok(ServiceCommand::Action { .. })));

        handle_key_event(&mut app, key(KeyCode::Char('x')));
        assert!(app.view().selection().is_empty());
    }

    #[test]
    fn test_help_swallows_next_key() {
        let (mut app, _rx) = app();
        handle_key_event(&mut app, key(KeyCode::Char('?')));
        assert!(app.show_help);
        handle_key_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.show_help);
        assert!(app.running);
    }

    #[test]
    fn test_mouse_click_selects_row_and_tab() {
        let (mut app, _rx) = app();
        handle_mouse_event(&mut app, click(5, 6), 3);
        assert_eq!(app.view().nav().cursor, 2);

        // Beyond the last row of the page: ignored
        handle_mouse_event(&mut app, click(5, 40), 3);
        assert_eq!(app.view().nav().cursor, 2);

        handle_mouse_event(&mut app, click(18, 1), 3);
        assert_eq!(app.current_view, Table::Roles);
    }
}
