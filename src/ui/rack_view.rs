// Rack view rendering module
//
// Renders the drill-down panel: the open rack's readings and power gauge, a
// slot elevation next to the server list, and details for the chosen server.
//
// Data is extracted into a RackView first so the panel layout can be tested
// without a terminal.

use super::floor_map::{fill_offsets, fill_step};
use crate::app::AppState;
use crate::interaction::ServerTooltip;
use crate::model::{Rack, Server, ServerStatus};
use crate::theme::{
    status_color, utilization_color, AMBER, SELECTION_RED, SLATE, STEEL_BLUE,
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Rectangle},
        Block, BorderType, Borders, Gauge, List, ListItem, ListState, Paragraph,
    },
    Frame,
};

/// Gap between a slot's left edge and its badge, in slot units
const BADGE_INSET: f64 = 8.0;

// ============================================================================
// Rack View Model
// ============================================================================

/// One row of the server list
#[derive(Debug, Clone, PartialEq)]
pub struct ServerRow {
    pub label: String,
    pub status: ServerStatus,
    /// Model badge and its LED color
    pub badge: String,
    pub led: (u8, u8, u8),
    /// Chosen in the drill-down
    pub chosen: bool,
    /// Part of the multi-select
    pub in_selection: bool,
}

/// Everything the rack view shows, extracted from AppState
#[derive(Debug, Clone, PartialEq)]
pub struct RackView {
    pub title: String,
    pub readings: Vec<String>,
    /// Drawn power over the rack budget
    pub utilization: f64,
    pub gauge_label: String,
    pub rows: Vec<ServerRow>,
    pub cursor: usize,
    /// (label, value) pairs for the chosen server
    pub details: Vec<(String, String)>,
    /// Tooltip of the hovered server
    pub hover: Vec<String>,
    /// Shown instead of details when there is nothing to show
    pub hint: Option<&'static str>,
}

impl Default for RackView {
    fn default() -> Self {
        Self {
            title: "Rack View".to_string(),
            readings: Vec::new(),
            utilization: 0.0,
            gauge_label: String::new(),
            rows: Vec::new(),
            cursor: 0,
            details: Vec::new(),
            hover: Vec::new(),
            hint: Some("Press Enter or click a rack to open it"),
        }
    }
}

pub fn build_rack_view(app: &AppState) -> RackView {
    let Some(rack) = app.open_rack() else {
        return RackView::default();
    };

    let chosen = app.interaction.drill_down.selected_server();
    let slots = app.server_slots();
    let rows = rack
        .servers
        .iter()
        .zip(&slots)
        .map(|(server, slot)| ServerRow {
            label: format!("U{:<3}{}", server.position_u, server.name),
            status: server.status,
            badge: slot.badge.clone(),
            led: slot.led,
            chosen: chosen == Some(server.id.as_str()),
            in_selection: app.interaction.selection.is_server_selected(&server.id),
        })
        .collect();

    let utilization = rack.power_utilization();
    let mut view = RackView {
        title: format!("Rack {}", rack.location),
        readings: rack_readings(rack),
        utilization,
        gauge_label: format!(
            "{}W / {}W ({:.0}%)",
            rack.power_usage_watts,
            rack.max_power_watts,
            utilization * 100.0
        ),
        rows,
        cursor: app.server_cursor,
        details: Vec::new(),
        hover: app
            .hovered_server()
            .map(|s| ServerTooltip::from_server(s).lines())
            .unwrap_or_default(),
        hint: None,
    };

    match app.selected_server() {
        Some(server) => view.details = server_details(app, server),
        None => view.hint = Some("Select a server to view details"),
    }
    view
}

fn rack_readings(rack: &Rack) -> Vec<String> {
    vec![
        format!("Location: {}", rack.location),
        format!(
            "Temperature: {:.1}°C | Humidity: {:.0}%",
            rack.temperature_c, rack.humidity_pct
        ),
        format!("Servers: {}", rack.server_count()),
    ]
}

fn server_details(app: &AppState, server: &Server) -> Vec<(String, String)> {
    let catalog = app.plan().catalog();
    let model = match catalog.get(&server.model) {
        Some(m) => format!("{} ({}, {}U)", m.display_name, m.power_label(), m.rack_units),
        None => server.model.clone(),
    };
    let power = match catalog.utilization(server) {
        Some(u) => format!("{}W ({:.0}% of model max)", server.power_usage_watts, u * 100.0),
        None => format!("{}W", server.power_usage_watts),
    };

    [
        ("Name", server.name.clone()),
        ("Model", model),
        ("Vendor", server.manufacturer.clone()),
        ("Serial", server.serial_number.clone()),
        ("CPU", format!("{}x {} ({}%)", server.cpu_count, server.cpu_type, server.cpu_usage_pct)),
        ("RAM", format!("{}GB ({}% used)", server.ram_total_gb, server.ram_usage_pct)),
        ("Power", power),
        ("Position", format!("U{}", server.position_u)),
        ("Status", server.status.label().to_string()),
        ("Installed", server.install_date.to_string()),
        ("Serviced", server.last_maintenance_date.to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}

// ============================================================================
// Rendering
// ============================================================================

fn panel(title: String, color: Color) -> Block<'static> {
    Block::default()
        .title(vec![Span::styled(
            title,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )])
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(STEEL_BLUE))
}

pub fn render_rack_view(f: &mut Frame, area: Rect, app: &mut AppState) {
    let view = build_rack_view(app);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),  // Readings
            Constraint::Length(3),  // Power gauge
            Constraint::Min(6),     // Elevation + server list
            Constraint::Length(13), // Details
        ])
        .split(area);

    let readings: Vec<Line> = view
        .readings
        .iter()
        .map(|r| Line::from(Span::styled(format!(" {}", r), Style::default().fg(SLATE))))
        .collect();
    f.render_widget(
        Paragraph::new(readings).block(panel(format!("━ ▤ {} ", view.title), STEEL_BLUE)),
        chunks[0],
    );

    let gauge = Gauge::default()
        .block(panel(" ⚡ Power ".to_string(), AMBER))
        .gauge_style(Style::default().fg(utilization_color(view.utilization)))
        .ratio(view.utilization.clamp(0.0, 1.0))
        .label(view.gauge_label.clone());
    f.render_widget(gauge, chunks[1]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)])
        .split(chunks[2]);
    render_elevation(f, body[0], app);
    render_server_list(f, body[1], &view);
    render_details(f, chunks[3], &view);
}

/// Slot diagram of the open rack, one block per server in position order
fn render_elevation(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = panel(" Slots ".to_string(), SLATE);
    let inner = block.inner(area);
    app.slots_area = inner;
    let viewport = app.slot_viewport();
    let step = fill_step(&viewport, inner);
    let slots = app.server_slots();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([viewport.x, viewport.right()])
        .y_bounds([-viewport.bottom(), -viewport.y])
        .paint(move |ctx| {
            for slot in &slots {
                let b = &slot.bounds;
                for offset in fill_offsets(b.height, step) {
                    let y = b.y + offset;
                    ctx.draw(&CanvasLine {
                        x1: b.x,
                        y1: -y,
                        x2: b.right(),
                        y2: -y,
                        color: status_color(slot.status),
                    });
                }
            }
            ctx.layer();
            for slot in &slots {
                let (r, g, b) = slot.led;
                let (_, mid) = slot.bounds.center();
                ctx.print(
                    slot.bounds.x + BADGE_INSET,
                    -mid,
                    Line::from(vec![
                        Span::styled("● ", Style::default().fg(Color::Rgb(r, g, b))),
                        Span::styled(
                            slot.badge.clone(),
                            Style::default().fg(Color::Black).add_modifier(Modifier::BOLD),
                        ),
                    ]),
                );
            }
            for slot in slots.iter().filter(|s| s.selected) {
                ctx.draw(&Rectangle {
                    x: slot.bounds.x,
                    y: -slot.bounds.bottom(),
                    width: slot.bounds.width,
                    height: slot.bounds.height,
                    color: SELECTION_RED,
                });
            }
        });
    f.render_widget(canvas, area);
}

fn render_server_list(f: &mut Frame, area: Rect, view: &RackView) {
    let items: Vec<ListItem> = view
        .rows
        .iter()
        .map(|row| {
            let marker = if row.in_selection { "✓" } else { " " };
            let name_style = if row.chosen {
                Style::default().fg(SELECTION_RED).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(SLATE)
            };
            let (r, g, b) = row.led;
            ListItem::new(Line::from(vec![
                Span::styled("■ ", Style::default().fg(status_color(row.status))),
                Span::styled(marker, Style::default().fg(AMBER)),
                Span::styled(format!(" {}", row.label), name_style),
                Span::styled("  ● ", Style::default().fg(Color::Rgb(r, g, b))),
                Span::styled(row.badge.clone(), Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let title = format!(" Servers ({}) ", view.rows.len());
    let list = List::new(items)
        .block(panel(title, Color::Yellow))
        .highlight_style(Style::default().bg(Color::Rgb(47, 51, 77)));

    let mut state = ListState::default();
    if !view.rows.is_empty() {
        state.select(Some(view.cursor.min(view.rows.len() - 1)));
    }
    f.render_stateful_widget(list, area, &mut state);
}

fn render_details(f: &mut Frame, area: Rect, view: &RackView) {
    let mut lines = Vec::new();
    if let Some(hint) = view.hint {
        lines.push(Line::from(Span::styled(
            format!(" {}", hint),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    }
    for (label, value) in &view.details {
        lines.push(Line::from(vec![
            Span::raw(format!(" {:<10}", label)),
            Span::styled(value.clone(), Style::default().fg(Color::Cyan)),
        ]));
    }
    if !view.hover.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" ▸ {}", view.hover.join(" | ")),
            Style::default().fg(AMBER),
        )));
    }

    f.render_widget(
        Paragraph::new(lines).block(panel(" Server Details ".to_string(), Color::Cyan)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_closed_view() {
        let app = test_app();
        let view = build_rack_view(&app);
        assert_eq!(view, RackView::default());
        assert_eq!(view.title, "Rack View");
    }

    #[test]
    fn test_open_rack_without_server() {
        let mut app = test_app();
        app.rack_click("rack-1-1");
        let view = build_rack_view(&app);
        assert_eq!(view.title, "Rack 002-02B");
        assert_eq!(view.rows.len(), 4);
        assert_eq!(view.rows[0].label, "U1  SERVER-002-02B-1");
        assert_eq!(view.hint, Some("Select a server to view details"));
        assert!(view.details.is_empty());
        assert_eq!(view.gauge_label, "1100W / 2000W (55%)");
        assert!((view.utilization - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_chosen_server_details() {
        let mut app = test_app();
        app.rack_click("rack-1-1");
        app.server_click("SRV-002-02B-3");
        app.toggle_server_selection("SRV-002-02B-1");
        let view = build_rack_view(&app);

        assert_eq!(view.hint, None);
        assert!(view.rows[2].chosen);
        assert!(!view.rows[0].chosen);
        assert!(view.rows[0].in_selection);

        let detail = |key: &str| {
            view.details
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(detail("Name"), "SERVER-002-02B-3");
        assert_eq!(detail("Model"), "Dell PowerEdge R730 (750W-1100W, 2U)");
        assert_eq!(detail("Power"), "500W (45% of model max)");
        assert_eq!(detail("Position"), "U3");
        assert_eq!(detail("Installed"), "2021-03-14");
    }

    #[test]
    fn test_hovered_server_tooltip() {
        let mut app = test_app();
        app.rack_click("rack-0-0");
        app.move_server_cursor(1);
        let view = build_rack_view(&app);
        assert_eq!(view.cursor, 1);
        assert_eq!(view.hover[0], "Power: 500W");
        assert_eq!(view.hover[2], "RAM: 60% of 256GB");
    }

    #[test]
    fn test_render_open_rack() {
        let mut app = test_app();
        app.rack_click("rack-0-1");
        let backend = TestBackend::new(80, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_rack_view(f, f.area(), &mut app))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Rack 002-02A"));
        assert!(text.contains("Servers (3)"));
        assert!(text.contains("Select a server to view details"));
    }

    #[test]
    fn test_model_badges_are_drawn() {
        let mut app = test_app();
        app.rack_click("rack-0-1");
        let view = build_rack_view(&app);
        assert_eq!(view.rows[0].badge, "R730");
        assert_eq!(view.rows[0].led, (0, 255, 0));

        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_rack_view(f, f.area(), &mut app))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("R730"));
        assert!(buffer
            .content()
            .iter()
            .any(|c| c.symbol() == "●" && c.fg == Color::Rgb(0, 255, 0)));
        assert!(app.slots_area.width > 0);
    }
}
