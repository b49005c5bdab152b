// Header rendering module
//
// Renders the top bar: floor tabs on the first line, statistics for the
// visible racks on the second.

use crate::app::AppState;
use crate::stats::FloorSummary;
use crate::theme::{AMBER, SLATE, STEEL_BLUE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

/// "Racks: 3 | Servers: 45 | Total: 1500W | Avg/Rack: 500W"
pub fn stats_line(summary: &FloorSummary) -> String {
    format!(
        "Racks: {} | Servers: {} | Total: {} | Avg/Rack: {:.0}W",
        summary.rack_count,
        summary.server_count,
        format_watts(summary.total_power_watts),
        summary.avg_power_per_rack_watts
    )
}

/// Watts below 10 kW are shown as-is, larger totals in kW
pub fn format_watts(watts: u64) -> String {
    if watts < 10_000 {
        format!("{}W", watts)
    } else {
        format!("{:.1}kW", watts as f64 / 1000.0)
    }
}

pub fn render_header(f: &mut Frame, area: Rect, app: &AppState) {
    let mut tabs = vec![Span::styled(
        " rackmap ",
        Style::default()
            .fg(Color::Black)
            .bg(STEEL_BLUE)
            .add_modifier(Modifier::BOLD),
    )];
    for (idx, floor) in app.plan().floors().iter().enumerate() {
        let style = if idx == app.active_floor_index() {
            Style::default()
                .fg(AMBER)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(SLATE)
        };
        tabs.push(Span::raw("  "));
        tabs.push(Span::styled(format!("{}:{}", idx + 1, floor.name()), style));
    }

    let summary = app.summary();
    let stats_style = if summary.rack_count == 0 {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(SLATE)
    };

    let header_text = vec![
        Line::from(tabs),
        Line::from(vec![
            Span::styled(" ▣ ", Style::default().fg(STEEL_BLUE)),
            Span::styled(stats_line(&summary), stats_style),
            Span::styled(
                format!("   [source: {}]", app.source_label),
                Style::default().fg(Color::DarkGray),
            ),
        ]),
    ];

    let header = Paragraph::new(header_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(STEEL_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(header, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_line() {
        let summary = FloorSummary {
            rack_count: 3,
            server_count: 45,
            total_power_watts: 1500,
            avg_power_per_rack_watts: 500.0,
        };
        assert_eq!(
            stats_line(&summary),
            "Racks: 3 | Servers: 45 | Total: 1500W | Avg/Rack: 500W"
        );
    }

    #[test]
    fn test_stats_line_empty() {
        assert_eq!(
            stats_line(&FloorSummary::default()),
            "Racks: 0 | Servers: 0 | Total: 0W | Avg/Rack: 0W"
        );
    }

    #[test]
    fn test_format_watts() {
        assert_eq!(format_watts(9_999), "9999W");
        assert_eq!(format_watts(204_800), "204.8kW");
    }
}
