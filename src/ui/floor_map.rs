// Floor map rendering module
//
// Draws the visible racks of the active floor on a Braille canvas, colored by
// power draw, with selection outlines, optional labels and grid lines, and the
// hover tooltip as an overlay.
//
// Plan coordinates grow downwards while the canvas grows upwards, so every y
// is negated when painting.

use crate::app::{AppState, RackCell};
use crate::layout::Bounds;
use crate::theme::{fill_color, GRID_LINE, SELECTION_RED, SLATE, STEEL_BLUE};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Line as CanvasLine, Rectangle},
        Block, BorderType, Borders, Clear, Paragraph,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

/// Spacing of the background grid in plan units
const GRID_STEP: f64 = 10.0;

/// Braille dots per terminal row
const DOTS_PER_ROW: f64 = 4.0;

/// Upper bound on fill strokes per box
const MAX_FILL_STROKES: f64 = 512.0;

/// Terminal cell under plan point (x, y), if it falls inside `area`
pub fn plan_to_cell(area: Rect, viewport: &Bounds, x: f64, y: f64) -> Option<(u16, u16)> {
    if area.width == 0 || area.height == 0 || viewport.width <= 0.0 || viewport.height <= 0.0 {
        return None;
    }
    let fx = (x - viewport.x) / viewport.width * area.width as f64;
    let fy = (y - viewport.y) / viewport.height * area.height as f64;
    if !(0.0..area.width as f64).contains(&fx) || !(0.0..area.height as f64).contains(&fy) {
        return None;
    }
    Some((area.x + fx as u16, area.y + fy as u16))
}

/// Vertical distance between fill lines so that every dot row is covered
pub fn fill_step(viewport: &Bounds, area: Rect) -> f64 {
    if area.height == 0 {
        return viewport.height.max(1.0);
    }
    viewport.height / (area.height as f64 * DOTS_PER_ROW)
}

/// Offsets from the top of a `height` tall box at which fill strokes go
pub fn fill_offsets(height: f64, step: f64) -> impl Iterator<Item = f64> {
    let step = if step > 0.0 && step.is_finite() {
        step
    } else {
        height.max(1.0)
    };
    let strokes = (height / step).floor().clamp(0.0, MAX_FILL_STROKES) as usize;
    (0..=strokes).map(move |i| i as f64 * step)
}

/// Whether `label` fits inside a rack of `rack_width` plan units
pub fn label_fits(label: &str, rack_width: f64, viewport: &Bounds, area: Rect) -> bool {
    if viewport.width <= 0.0 {
        return false;
    }
    let cells = rack_width / viewport.width * area.width as f64;
    label.width() as f64 <= cells
}

/// Where to put a `width` x `height` box anchored at `cell`, kept inside `area`
pub fn overlay_rect(area: Rect, cell: (u16, u16), width: u16, height: u16) -> Option<Rect> {
    if width > area.width || height > area.height {
        return None;
    }
    let x = cell.0.min(area.x + area.width - width).max(area.x);
    let y = cell.1.min(area.y + area.height - height).max(area.y);
    Some(Rect::new(x, y, width, height))
}

pub fn render_floor_map(f: &mut Frame, area: Rect, app: &mut AppState) {
    let block = Block::default()
        .title(vec![
            Span::styled(
                format!("━ ▦ {} ", app.active_floor().name()),
                Style::default().fg(STEEL_BLUE).add_modifier(Modifier::BOLD),
            ),
            Span::styled("━━━━━━", Style::default().fg(STEEL_BLUE)),
        ])
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(STEEL_BLUE));
    let inner = block.inner(area);
    app.map_area = inner;

    let viewport = app.map_viewport();
    let cells = app.rack_cells();
    let step = fill_step(&viewport, inner);
    let grid_lines = app.view.grid_lines_enabled;
    let labels: Vec<bool> = cells
        .iter()
        .map(|c| app.view.labels_enabled && label_fits(&c.label, c.bounds.width, &viewport, inner))
        .collect();
    let is_empty = cells.is_empty();

    let canvas = Canvas::default()
        .block(block)
        .marker(Marker::Braille)
        .x_bounds([viewport.x, viewport.right()])
        .y_bounds([-viewport.bottom(), -viewport.y])
        .paint(move |ctx| {
            if grid_lines {
                draw_grid(ctx, &viewport);
                ctx.layer();
            }

            for cell in &cells {
                fill_rack(ctx, cell, step);
            }
            ctx.layer();

            for (cell, show_label) in cells.iter().zip(&labels) {
                let outline = if cell.selected {
                    Some(SELECTION_RED)
                } else if cell.hovered {
                    Some(Color::White)
                } else {
                    None
                };
                if let Some(color) = outline {
                    ctx.draw(&Rectangle {
                        x: cell.bounds.x,
                        y: -cell.bounds.bottom(),
                        width: cell.bounds.width,
                        height: cell.bounds.height,
                        color,
                    });
                }
                if *show_label {
                    ctx.print(
                        cell.bounds.x,
                        -cell.bounds.y,
                        Span::styled(cell.label.clone(), Style::default().fg(Color::White)),
                    );
                }
            }

            if is_empty {
                let (_, cy) = viewport.center();
                ctx.print(
                    viewport.x + 2.0,
                    -cy,
                    Span::styled(
                        "No racks match the current filters",
                        Style::default().fg(SLATE).add_modifier(Modifier::ITALIC),
                    ),
                );
            }
        });

    f.render_widget(canvas, area);

    render_tooltip(f, inner, app);
}

/// Grid line positions across `[start, start + span]`, `GRID_STEP` apart,
/// widened so at most `MAX_FILL_STROKES` lines are drawn
fn grid_positions(start: f64, span: f64) -> impl Iterator<Item = f64> {
    let step = GRID_STEP.max(span / MAX_FILL_STROKES);
    let first = (start / step).ceil() * step;
    fill_offsets(start + span - first, step).map(move |offset| first + offset)
}

fn draw_grid(ctx: &mut ratatui::widgets::canvas::Context<'_>, viewport: &Bounds) {
    for x in grid_positions(viewport.x, viewport.width) {
        ctx.draw(&CanvasLine {
            x1: x,
            y1: -viewport.y,
            x2: x,
            y2: -viewport.bottom(),
            color: GRID_LINE,
        });
    }
    for y in grid_positions(viewport.y, viewport.height) {
        ctx.draw(&CanvasLine {
            x1: viewport.x,
            y1: -y,
            x2: viewport.right(),
            y2: -y,
            color: GRID_LINE,
        });
    }
}

fn fill_rack(ctx: &mut ratatui::widgets::canvas::Context<'_>, cell: &RackCell, step: f64) {
    let color = fill_color(cell.color);
    let bounds = &cell.bounds;
    for offset in fill_offsets(bounds.height, step) {
        let y = bounds.y + offset;
        ctx.draw(&CanvasLine {
            x1: bounds.x,
            y1: -y,
            x2: bounds.right(),
            y2: -y,
            color,
        });
    }
}

fn render_tooltip(f: &mut Frame, inner: Rect, app: &AppState) {
    let Some((lines, (x, y))) = app.rack_tooltip() else {
        return;
    };
    let viewport = app.map_viewport();
    // the anchor may sit right of the map; pin to the edge instead of hiding
    let x = x.min(viewport.right() - viewport.width * 0.01);
    let Some(cell) = plan_to_cell(inner, &viewport, x, y) else {
        return;
    };

    let width = lines.iter().map(|l| l.width()).max().unwrap_or(0) as u16 + 4;
    let height = lines.len() as u16 + 2;
    let Some(rect) = overlay_rect(inner, cell, width, height) else {
        return;
    };

    let text: Vec<Line> = lines
        .into_iter()
        .map(|l| Line::from(Span::styled(format!(" {}", l), Style::default().fg(Color::White))))
        .collect();
    let tooltip = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(SLATE))
            .style(Style::default().bg(Color::Rgb(36, 40, 59))),
    );
    f.render_widget(Clear, rect);
    f.render_widget(tooltip, rect);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use ratatui::{backend::TestBackend, Terminal};

    const VIEWPORT: Bounds = Bounds {
        x: 40.0,
        y: 40.0,
        width: 88.0,
        height: 52.0,
    };

    #[test]
    fn test_plan_to_cell() {
        let area = Rect::new(2, 3, 88, 52);
        assert_eq!(plan_to_cell(area, &VIEWPORT, 40.0, 40.0), Some((2, 3)));
        assert_eq!(plan_to_cell(area, &VIEWPORT, 80.5, 75.5), Some((42, 38)));
        assert_eq!(plan_to_cell(area, &VIEWPORT, 128.0, 50.0), None);
        assert_eq!(plan_to_cell(area, &VIEWPORT, 39.0, 50.0), None);
        assert_eq!(plan_to_cell(Rect::default(), &VIEWPORT, 50.0, 50.0), None);
    }

    #[test]
    fn test_plan_to_cell_inverts_cell_to_plan() {
        let mut app = test_app();
        app.map_area = Rect::new(1, 1, 60, 30);
        let viewport = app.map_viewport();
        for (col, row) in [(1, 1), (30, 15), (60, 30)] {
            let (x, y) = app.cell_to_plan(col, row).unwrap();
            assert_eq!(plan_to_cell(app.map_area, &viewport, x, y), Some((col, row)));
        }
    }

    #[test]
    fn test_fill_step_covers_dot_rows() {
        let area = Rect::new(0, 0, 88, 13);
        assert_eq!(fill_step(&VIEWPORT, area), 1.0);
    }

    #[test]
    fn test_fill_offsets_always_terminate() {
        let offsets: Vec<f64> = fill_offsets(12.0, 4.0).collect();
        assert_eq!(offsets, vec![0.0, 4.0, 8.0, 12.0]);
        // a step too small to advance is capped instead of looping
        assert_eq!(fill_offsets(1.0e300, 1.0).count(), 513);
        assert_eq!(fill_offsets(12.0, 0.0).count(), 2);
        assert_eq!(fill_offsets(f64::NAN, 1.0).count(), 1);
    }

    #[test]
    fn test_grid_positions() {
        let xs: Vec<f64> = grid_positions(5.0, 30.0).collect();
        assert_eq!(xs, vec![10.0, 20.0, 30.0]);
        assert!(grid_positions(0.0, 1.0e9).count() <= 513);
    }

    #[test]
    fn test_label_fits() {
        // 18 units of 88 over 88 cells: 18 cells
        let area = Rect::new(0, 0, 88, 52);
        assert!(label_fits("001-02A", 18.0, &VIEWPORT, area));
        let narrow = Rect::new(0, 0, 30, 52);
        assert!(!label_fits("001-02A", 18.0, &VIEWPORT, narrow));
    }

    #[test]
    fn test_overlay_rect_stays_inside() {
        let area = Rect::new(10, 10, 40, 20);
        assert_eq!(
            overlay_rect(area, (12, 12), 10, 4),
            Some(Rect::new(12, 12, 10, 4))
        );
        assert_eq!(
            overlay_rect(area, (45, 28), 10, 4),
            Some(Rect::new(40, 26, 10, 4))
        );
        assert_eq!(overlay_rect(area, (12, 12), 41, 4), None);
    }

    #[test]
    fn test_render_records_map_area_and_tooltip() {
        let mut app = test_app();
        app.move_cursor(0, 1);
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_floor_map(f, f.area(), &mut app))
            .unwrap();
        assert_eq!(app.map_area, Rect::new(1, 1, 98, 38));

        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Location: 002-02A"));
        assert!(text.contains("Floor 1"));
    }

    #[test]
    fn test_render_empty_floor_message() {
        let mut app = test_app();
        app.set_search("no such server");
        let backend = TestBackend::new(100, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_floor_map(f, f.area(), &mut app))
            .unwrap();
        let buffer = terminal.backend().buffer().clone();
        let text: String = buffer.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("No racks match the current filters"));
    }
}
