// UI rendering module
//
// This module contains all UI rendering components for rackmap.
// The main draw() function orchestrates rendering of all UI panels.

mod filter_bar;
mod floor_map;
mod header;
mod picker;
mod rack_view;
mod status_bar;

use crate::app::AppState;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use filter_bar::render_filter_bar;
use floor_map::render_floor_map;
use header::render_header;
use picker::render_picker;
use rack_view::render_rack_view;
use status_bar::render_status_bar;

/// Main UI drawing function
pub fn draw(f: &mut Frame, app: &mut AppState) {
    let size = f.area();

    // Main layout: header, filters, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header
            Constraint::Length(4), // Filter bar
            Constraint::Min(0),    // Body
            Constraint::Length(3), // Status bar
        ])
        .split(size);

    render_header(f, chunks[0], app);
    render_filter_bar(f, chunks[1], app);

    // Body: floor map + rack view
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(62), // Floor map
            Constraint::Percentage(38), // Rack view
        ])
        .split(chunks[2]);

    render_floor_map(f, body_chunks[0], app);
    render_rack_view(f, body_chunks[1], app);
    render_picker(f, body_chunks[0], app);

    render_status_bar(f, chunks[3], app);
}
