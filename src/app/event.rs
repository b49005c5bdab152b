// Keyboard and mouse event handling
//
// This module contains the input handlers that translate terminal events
// into AppState control calls.

use super::{AppState, InputMode, PickerKind};
use crossterm::event::{KeyCode, MouseButton, MouseEvent, MouseEventKind};

/// Handle keyboard events and update application state
///
/// Returns `true` if the application should continue running,
/// `false` if it should exit.
///
/// # Key Bindings
/// - `q` - Quit
/// - `Esc` - Clear and close the search input, close the rack view, or quit
/// - Arrows, `h`/`j`/`k`/`l` - Move the map cursor (server cursor in the rack view)
/// - `Enter` - Open the rack under the cursor / choose the server under the cursor
/// - `Space` - Toggle the rack (or server, in the rack view) in the selection
/// - `c` / `C` - Clear rack / server selection
/// - `Tab`, `1`-`9` - Switch floor
/// - `[` / `]` - Lower bound down / up by one step
/// - `{` / `}` - Upper bound down / up by one step
/// - `r` - Reset the power range
/// - `/` - Edit the search term
/// - `t` - Toggle rack labels
/// - `g` - Toggle grid lines
/// - `m` - Toggle how rack and server selections combine
/// - `p` / `P` - Pick racks / servers from a checklist
pub fn handle_key_event(app: &mut AppState, key: KeyCode) -> bool {
    if let Some(picker) = app.picker.as_mut() {
        match key {
            KeyCode::Up | KeyCode::Char('k') => picker.move_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => picker.move_cursor(1),
            KeyCode::PageUp => picker.move_cursor(-10),
            KeyCode::PageDown => picker.move_cursor(10),
            KeyCode::Char(' ') => picker.toggle(),
            KeyCode::Enter => app.apply_picker(),
            KeyCode::Esc => app.cancel_picker(),
            _ => {}
        }
        return true;
    }

    if app.input_mode == InputMode::Search {
        match key {
            KeyCode::Enter => app.end_search(),
            KeyCode::Esc => {
                app.set_search("");
                app.end_search();
            }
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        }
        return true;
    }

    let in_rack_view = app.is_drill_down_open();
    match key {
        KeyCode::Char('q') | KeyCode::Char('Q') => {
            app.running = false;
        }
        KeyCode::Esc => {
            if in_rack_view {
                app.close_drill_down();
            } else {
                app.running = false;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            if in_rack_view {
                app.move_server_cursor(-1);
            } else {
                app.move_cursor(-1, 0);
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if in_rack_view {
                app.move_server_cursor(1);
            } else {
                app.move_cursor(1, 0);
            }
        }
        KeyCode::Left | KeyCode::Char('h') => app.move_cursor(0, -1),
        KeyCode::Right | KeyCode::Char('l') => app.move_cursor(0, 1),
        KeyCode::Enter => {
            if in_rack_view {
                if let Some(id) = app.server_at_cursor().map(|s| s.id.clone()) {
                    app.server_click(&id);
                }
            } else if let Some(id) = app.rack_at_cursor().map(|r| r.id.clone()) {
                app.rack_click(&id);
            }
        }
        KeyCode::Char(' ') => {
            if in_rack_view {
                if let Some(id) = app.server_at_cursor().map(|s| s.id.clone()) {
                    app.toggle_server_selection(&id);
                }
            } else if let Some(location) = app.rack_at_cursor().map(|r| r.location.clone()) {
                app.toggle_rack_selection(&location);
            }
        }
        KeyCode::Char('c') => app.clear_rack_selection(),
        KeyCode::Char('C') => app.clear_server_selection(),
        KeyCode::Tab => app.next_floor(),
        KeyCode::Char(c @ '1'..='9') => {
            let position = (c as u8 - b'1') as usize;
            app.switch_floor_at(position);
        }
        KeyCode::Char('[') => app.step_min(-1),
        KeyCode::Char(']') => app.step_min(1),
        KeyCode::Char('{') => app.step_max(-1),
        KeyCode::Char('}') => app.step_max(1),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset_power_range(),
        KeyCode::Char('/') => app.begin_search(),
        KeyCode::Char('t') | KeyCode::Char('T') => {
            app.view.labels_enabled = !app.view.labels_enabled;
        }
        KeyCode::Char('g') | KeyCode::Char('G') => {
            app.view.grid_lines_enabled = !app.view.grid_lines_enabled;
        }
        KeyCode::Char('m') | KeyCode::Char('M') => app.toggle_selection_mode(),
        KeyCode::Char('p') => app.open_picker(PickerKind::Racks),
        KeyCode::Char('P') => app.open_picker(PickerKind::Servers),
        _ => {}
    }
    app.running
}

/// Handle mouse events over the floor map and the slot diagram
///
/// Moving hovers the rack or server under the pointer, a left click opens the
/// rack or chooses the server, and the wheel scrolls the server cursor while
/// the rack view is open.
pub fn handle_mouse_event(app: &mut AppState, mouse: MouseEvent) {
    if let Some((x, y)) = app.cell_to_slot(mouse.column, mouse.row) {
        match mouse.kind {
            MouseEventKind::Moved => app.slot_pointer_at(x, y),
            MouseEventKind::Down(MouseButton::Left) => {
                app.slot_click_at(x, y);
            }
            _ => {}
        }
    }
    match mouse.kind {
        MouseEventKind::Moved => match app.cell_to_plan(mouse.column, mouse.row) {
            Some((x, y)) => app.pointer_at(x, y),
            None => app.pointer_leave(),
        },
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some((x, y)) = app.cell_to_plan(mouse.column, mouse.row) {
                app.click_at(x, y);
            }
        }
        MouseEventKind::ScrollDown if app.is_drill_down_open() => app.move_server_cursor(1),
        MouseEventKind::ScrollUp if app.is_drill_down_open() => app.move_server_cursor(-1),
        _ => {}
    }
}
