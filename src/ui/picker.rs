// Selection picker overlay
//
// Checklist of every rack (by location) or server (by name) on the active
// floor, drawn over the floor map while the picker is open.

use crate::app::{AppState, Picker, PickerKind};
use crate::theme::{AMBER, SELECTION_RED, SLATE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState},
    Frame,
};

/// Centered box of at most `width` x `height` cells inside `area`
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn title(picker: &Picker) -> String {
    let what = match picker.kind {
        PickerKind::Racks => "Racks",
        PickerKind::Servers => "Servers",
    };
    format!(" ☰ Select {} ({} checked) ", what, picker.checked.len())
}

pub fn render_picker(f: &mut Frame, area: Rect, app: &AppState) {
    let Some(picker) = &app.picker else {
        return;
    };

    let accent = match picker.kind {
        PickerKind::Racks => SELECTION_RED,
        PickerKind::Servers => Color::Cyan,
    };
    let items: Vec<ListItem> = picker
        .options
        .iter()
        .map(|option| {
            let (mark, style) = if picker.is_checked(&option.value) {
                ("[x] ", Style::default().fg(accent).add_modifier(Modifier::BOLD))
            } else {
                ("[ ] ", Style::default().fg(SLATE))
            };
            ListItem::new(Line::from(vec![
                Span::styled(mark, style),
                Span::styled(option.label.clone(), style),
            ]))
        })
        .collect();

    let rect = centered_rect(area, 44, area.height.saturating_sub(4).max(8));
    let list = List::new(items)
        .block(
            Block::default()
                .title(Span::styled(
                    title(picker),
                    Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
                ))
                .title_bottom(Line::from(Span::styled(
                    " Space:Check  Enter:Apply  Esc:Cancel ",
                    Style::default().fg(Color::DarkGray),
                )))
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(AMBER))
                .style(Style::default().bg(Color::Rgb(36, 40, 59))),
        )
        .highlight_style(Style::default().bg(Color::Rgb(47, 51, 77)))
        .highlight_symbol("▸ ");

    let mut state = ListState::default();
    if !picker.options.is_empty() {
        state.select(Some(picker.cursor));
    }
    f.render_widget(Clear, rect);
    f.render_stateful_widget(list, rect, &mut state);
}
