// Filter bar rendering module
//
// Renders the active filters: power range, search box, selection mode and one
// chip per selected rack or server.

use crate::app::config::POWER_SCALE;
use crate::app::{AppState, InputMode};
use crate::theme::{AMBER, SELECTION_RED, SLATE, STEEL_BLUE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Cells of the power-range track, excluding the brackets
const TRACK_WIDTH: usize = 28;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
    Rack,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chip {
    pub kind: ChipKind,
    pub text: String,
}

/// Chips for the current selection: racks first, then servers by name
pub fn selection_chips(app: &AppState) -> Vec<Chip> {
    let floor = app.active_floor();
    let racks = app
        .interaction
        .selection
        .rack_locations()
        .iter()
        .map(|loc| Chip {
            kind: ChipKind::Rack,
            text: loc.clone(),
        });
    let mut servers: Vec<Chip> = app
        .interaction
        .selection
        .server_ids()
        .iter()
        .map(|id| Chip {
            kind: ChipKind::Server,
            text: floor
                .server(id)
                .map_or_else(|| id.clone(), |(_, s)| s.name.clone()),
        })
        .collect();
    servers.sort_by(|a, b| a.text.cmp(&b.text));
    racks.chain(servers).collect()
}

/// Chips that fit in `width` cells, plus how many were left out
pub fn fit_chips(chips: &[Chip], width: usize) -> (&[Chip], usize) {
    let mut used = 0;
    for (idx, chip) in chips.iter().enumerate() {
        // "[text] "
        let w = chip.text.width() + 3;
        if used + w > width {
            return (&chips[..idx], chips.len() - idx);
        }
        used += w;
    }
    (chips, 0)
}

/// Text slider for the power range, e.g. `[····███████████·····]`
pub fn power_track(lo: u32, hi: u32) -> String {
    let span = POWER_SCALE.span().max(1) as f64;
    let cell = |w: u32| {
        (((POWER_SCALE.clamp(w) - POWER_SCALE.min_watts) as f64 / span) * (TRACK_WIDTH - 1) as f64)
            .round() as usize
    };
    let (a, b) = (cell(lo), cell(hi));
    let track: String = (0..TRACK_WIDTH)
        .map(|i| if (a..=b).contains(&i) { '█' } else { '·' })
        .collect();
    format!("[{}]", track)
}

pub fn render_filter_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let range = app.power_range();
    let editing = app.input_mode == InputMode::Search;

    let search_text = if editing {
        format!("{}▏", app.search)
    } else if app.search.is_empty() {
        "(press / to search)".to_string()
    } else {
        app.search.clone()
    };
    let search_style = if editing {
        Style::default().fg(Color::Black).bg(AMBER)
    } else if app.search.is_empty() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(AMBER)
    };

    let controls = Line::from(vec![
        Span::styled(" Power ", Style::default().fg(SLATE)),
        Span::styled(
            format!("{}W", range.min_watts),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(power_track(range.min_watts, range.max_watts), Style::default().fg(STEEL_BLUE)),
        Span::raw(" "),
        Span::styled(
            format!("{}W", range.max_watts),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Search: ", Style::default().fg(SLATE)),
        Span::styled(search_text, search_style),
        Span::styled("   Match: ", Style::default().fg(SLATE)),
        Span::styled(
            app.view.selection_mode.label(),
            Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
        ),
    ]);

    let chips = selection_chips(app);
    let available = area.width.saturating_sub(4) as usize;
    let (shown, hidden) = fit_chips(&chips, available.saturating_sub(12));
    let mut chip_spans = vec![Span::raw(" ")];
    if app.interaction.selection.is_empty() {
        chip_spans.push(Span::styled(
            "(no racks or servers selected)",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    for chip in shown {
        let color = match chip.kind {
            ChipKind::Rack => SELECTION_RED,
            ChipKind::Server => Color::Cyan,
        };
        chip_spans.push(Span::styled(
            format!("[{}]", chip.text),
            Style::default().fg(color),
        ));
        chip_spans.push(Span::raw(" "));
    }
    if hidden > 0 {
        chip_spans.push(Span::styled(
            format!("+{} more", hidden),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title = format!("━ ⚲ Filters ({} selected) ", chips.len());
    let bar = Paragraph::new(vec![controls, Line::from(chip_spans)]).block(
        Block::default()
            .title(vec![
                Span::styled(
                    title,
                    Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
                ),
                Span::styled("━━━━━━━", Style::default().fg(AMBER)),
            ])
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(AMBER)),
    );

    f.render_widget(bar, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;

    fn chip(kind: ChipKind, text: &str) -> Chip {
        Chip {
            kind,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_selection_chips_order_and_names() {
        let mut app = test_app();
        app.toggle_server_selection("SRV-002-02B-2");
        app.toggle_rack_selection("003-02A");
        app.toggle_server_selection("SRV-001-02A-1");
        app.toggle_rack_selection("001-02A");

        assert_eq!(
            selection_chips(&app),
            vec![
                chip(ChipKind::Rack, "001-02A"),
                chip(ChipKind::Rack, "003-02A"),
                chip(ChipKind::Server, "SERVER-001-02A-1"),
                chip(ChipKind::Server, "SERVER-002-02B-2"),
            ]
        );
    }

    #[test]
    fn test_fit_chips() {
        let chips = vec![
            chip(ChipKind::Rack, "001-02A"),
            chip(ChipKind::Rack, "002-02A"),
            chip(ChipKind::Rack, "003-02A"),
        ];
        // each chip takes 10 cells
        let (shown, hidden) = fit_chips(&chips, 25);
        assert_eq!(shown.len(), 2);
        assert_eq!(hidden, 1);

        let (shown, hidden) = fit_chips(&chips, 30);
        assert_eq!(shown.len(), 3);
        assert_eq!(hidden, 0);

        let (shown, hidden) = fit_chips(&[], 0);
        assert!(shown.is_empty());
        assert_eq!(hidden, 0);
    }

    #[test]
    fn test_power_track() {
        let full = power_track(100, 1500);
        assert_eq!(full.chars().filter(|c| *c == '█').count(), TRACK_WIDTH);

        let low = power_track(100, 100);
        assert_eq!(low.chars().nth(1), Some('█'));
        assert_eq!(low.chars().filter(|c| *c == '█').count(), 1);

        let high = power_track(1500, 1500);
        assert_eq!(high.chars().nth(TRACK_WIDTH), Some('█'));
    }
}
