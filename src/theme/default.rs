// Theme functions
//
// Mapping from domain values (server status, power fill, utilization) to
// terminal colors.

use ratatui::style::Color;

use super::{
    AMBER, FLOOR_BG, MINT_GREEN, SELECTION_RED, STATUS_ACTIVE, STATUS_ERROR,
    STATUS_MAINTENANCE, STATUS_WARNING,
};
use crate::layout::Rgba;
use crate::model::ServerStatus;

/// Fill color of a server slot
pub fn status_color(status: ServerStatus) -> Color {
    match status {
        ServerStatus::Active => STATUS_ACTIVE,
        ServerStatus::Warning => STATUS_WARNING,
        ServerStatus::Error => STATUS_ERROR,
        ServerStatus::Maintenance => STATUS_MAINTENANCE,
    }
}

/// Terminal color for a translucent rack fill, composited over the floor
pub fn fill_color(fill: Rgba) -> Color {
    let (r, g, b) = fill.blend_over(FLOOR_BG);
    Color::Rgb(r, g, b)
}

/// Gauge color for a utilization fraction
///
/// Color coding:
/// - Green (MINT_GREEN): below 60%
/// - Orange (AMBER): 60% to 85%
/// - Red (SELECTION_RED): above 85%
pub fn utilization_color(fraction: f64) -> Color {
    if fraction > 0.85 {
        SELECTION_RED
    } else if fraction >= 0.6 {
        AMBER
    } else {
        MINT_GREEN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::power_color;
    use crate::model::PowerRange;

    #[test]
    fn test_status_colors() {
        assert_eq!(status_color(ServerStatus::Active), Color::Rgb(16, 185, 129));
        assert_eq!(status_color(ServerStatus::Warning), Color::Rgb(245, 158, 11));
        assert_eq!(status_color(ServerStatus::Error), Color::Rgb(239, 68, 68));
        assert_eq!(
            status_color(ServerStatus::Maintenance),
            Color::Rgb(107, 114, 128)
        );
    }

    #[test]
    fn test_fill_color_blends_over_floor() {
        let opaque = Rgba {
            r: 255,
            g: 0,
            b: 0,
            a: 1.0,
        };
        assert_eq!(fill_color(opaque), Color::Rgb(255, 0, 0));

        let clear = Rgba { a: 0.0, ..opaque };
        assert_eq!(fill_color(clear), Color::Rgb(26, 27, 38));

        // hotter racks come out redder
        let scale = PowerRange::new(100, 1500);
        let (Color::Rgb(cool_r, _, _), Color::Rgb(hot_r, _, _)) = (
            fill_color(power_color(200, &scale)),
            fill_color(power_color(1400, &scale)),
        ) else {
            panic!("expected rgb colors");
        };
        assert!(hot_r > cool_r);
    }

    #[test]
    fn test_utilization_bands() {
        assert_eq!(utilization_color(0.1), MINT_GREEN);
        assert_eq!(utilization_color(0.6), AMBER);
        assert_eq!(utilization_color(0.9), SELECTION_RED);
    }
}
