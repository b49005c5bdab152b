// Status Bar rendering module
//
// Renders the bottom status bar with keyboard shortcuts and toggle indicators.
// Hints are added by priority until the bar is full; a pending notice replaces
// the lowest-priority hints.

use crate::app::{AppState, InputMode};
use crate::theme::{AMBER, MINT_GREEN, SLATE, STEEL_BLUE};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

struct Hint {
    priority: u8,
    key: &'static str,
    desc: &'static str,
}

fn hints(app: &AppState) -> Vec<Hint> {
    if app.picker.is_some() {
        return vec![
            Hint {
                priority: 1,
                key: "↑↓:",
                desc: "Move | ",
            },
            Hint {
                priority: 1,
                key: "Space:",
                desc: "Check | ",
            },
            Hint {
                priority: 1,
                key: "Enter:",
                desc: "Apply | ",
            },
            Hint {
                priority: 1,
                key: "Esc:",
                desc: "Cancel ",
            },
        ];
    }

    if app.input_mode == InputMode::Search {
        return vec![
            Hint {
                priority: 1,
                key: "Enter:",
                desc: "Done | ",
            },
            Hint {
                priority: 1,
                key: "Esc:",
                desc: "Clear | ",
            },
            Hint {
                priority: 1,
                key: "Bksp:",
                desc: "Erase ",
            },
        ];
    }

    let (enter, space, esc) = if app.is_drill_down_open() {
        ("Choose | ", "Pick server | ", "Close | ")
    } else {
        ("Open | ", "Pick rack | ", "Quit | ")
    };
    vec![
        Hint {
            priority: 1,
            key: "Q:",
            desc: "Quit | ",
        },
        Hint {
            priority: 1,
            key: "Esc:",
            desc: esc,
        },
        Hint {
            priority: 1,
            key: "↑↓←→:",
            desc: "Move | ",
        },
        Hint {
            priority: 1,
            key: "Enter:",
            desc: enter,
        },
        Hint {
            priority: 2,
            key: "Space:",
            desc: space,
        },
        Hint {
            priority: 2,
            key: "[]{}:",
            desc: "Power | ",
        },
        Hint {
            priority: 2,
            key: "/:",
            desc: "Search | ",
        },
        Hint {
            priority: 2,
            key: "Tab:",
            desc: "Floor | ",
        },
        Hint {
            priority: 3,
            key: "c/C:",
            desc: "Clear | ",
        },
        Hint {
            priority: 3,
            key: "r:",
            desc: "Reset | ",
        },
        Hint {
            priority: 3,
            key: "p/P:",
            desc: "Pick | ",
        },
        Hint {
            priority: 3,
            key: "m:",
            desc: "Match | ",
        },
    ]
}

/// Columns left for hints once borders, icon, toggles and the notice are placed
fn hint_budget(bar_width: u16, notice: Option<&str>) -> usize {
    let available = bar_width.saturating_sub(4 + 22) as usize;
    match notice {
        Some(notice) => available.saturating_sub(notice.width() + 1),
        None => available,
    }
}

pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let available_width = hint_budget(area.width, app.notice.as_deref());

    let mut spans = vec![Span::styled(" ▣ ", Style::default().fg(STEEL_BLUE))];

    if let Some(notice) = &app.notice {
        let text = format!("{} ", notice);
        spans.push(Span::styled(
            text,
            Style::default().fg(AMBER).add_modifier(Modifier::BOLD),
        ));
    }

    let hints = hints(app);
    let mut current_length = 0;

    // Process hints by priority
    for priority in 1..=3 {
        for hint in hints.iter().filter(|h| h.priority == priority) {
            let hint_length = hint.key.width() + hint.desc.width();
            if current_length + hint_length <= available_width {
                spans.push(Span::styled(
                    hint.key,
                    Style::default().fg(STEEL_BLUE).add_modifier(Modifier::BOLD),
                ));
                spans.push(Span::raw(hint.desc));
                current_length += hint_length;
            }
        }
    }

    spans.push(Span::raw(" "));
    spans.extend(build_toggle_indicators(app));

    let status_bar = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(STEEL_BLUE)),
        )
        .alignment(Alignment::Left);

    f.render_widget(status_bar, area);
}

fn indicator(key: &'static str, on: bool) -> Vec<Span<'static>> {
    let (state, color) = if on { ("ON", MINT_GREEN) } else { ("OFF", SLATE) };
    vec![
        Span::styled(format!("[{}:", key), Style::default().fg(SLATE)),
        Span::styled(state, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled("] ", Style::default().fg(SLATE)),
    ]
}

/// Build toggle status indicator spans for the status bar
/// Shows [t:ON/OFF] [g:ON/OFF] [m:any/all]
pub fn build_toggle_indicators(app: &AppState) -> Vec<Span<'static>> {
    let mut spans = indicator("t", app.view.labels_enabled);
    spans.extend(indicator("g", app.view.grid_lines_enabled));
    spans.push(Span::styled("[m:", Style::default().fg(SLATE)));
    spans.push(Span::styled(
        app.view.selection_mode.label(),
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ));
    spans.push(Span::styled("]", Style::default().fg(SLATE)));
    spans
}
