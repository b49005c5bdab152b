// Floor layout engine
//
// Pure geometry for the floor map: the grid configuration, grid anchors and
// location codes for rack positions, the power-to-color encoding, hit-testing, and slot geometry for
// the rack drill-down. Coordinates are in floor-plan units with the origin at
// the top-left corner and y growing downwards.

use crate::model::{PowerRange, Rack, Watts};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest number of grid rows (one letter per row, A-Z)
pub const MAX_GRID_ROWS: u16 = 26;

/// Largest number of grid columns (three-digit column numbers)
pub const MAX_GRID_COLS: u16 = 999;

/// Largest absolute value of any grid origin, stride or rack size
pub const MAX_COORDINATE: f64 = 1.0e6;

/// Opacity of rack fills on the floor map
pub const RACK_ALPHA: f32 = 0.6;

/// Gap between a rack's right edge and its tooltip
pub const TOOLTIP_OFFSET: f64 = 10.0;

// Drill-down slot geometry (one slot per server, top to bottom)
const SLOT_ORIGIN_X: f64 = 50.0;
const SLOT_ORIGIN_Y: f64 = 50.0;
const SLOT_STRIDE: f64 = 45.0;
const SLOT_WIDTH: f64 = 300.0;
const SLOT_HEIGHT_PER_U: f64 = 20.0;

/// Axis-aligned rectangle in floor-plan units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Edges are inclusive so a pointer on the outline still hits
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x <= self.right() && y >= self.y && y <= self.bottom()
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same rectangle up to `tolerance` on every edge
    pub fn approx_eq(&self, other: &Bounds, tolerance: f64) -> bool {
        (self.x - other.x).abs() <= tolerance
            && (self.y - other.y).abs() <= tolerance
            && (self.width - other.width).abs() <= tolerance
            && (self.height - other.height).abs() <= tolerance
    }
}

/// One rack position produced by the layout
#[derive(Debug, Clone, PartialEq)]
pub struct RackAnchor {
    pub row: u16,
    pub col: u16,
    pub location: String,
    pub bounds: Bounds,
}

/// RGBA color as used by the floor map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Composite over an opaque background
    pub fn blend_over(&self, background: (u8, u8, u8)) -> (u8, u8, u8) {
        let a = self.a.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (fg as f32 * a + bg as f32 * (1.0 - a)).round() as u8;
        (
            mix(self.r, background.0),
            mix(self.g, background.1),
            mix(self.b, background.2),
        )
    }
}

// ============================================================================
// Grid
// ============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid rows must be between 1 and 26, got {0}")]
    Rows(u16),

    #[error("grid columns must be between 1 and 999, got {0}")]
    Cols(u16),

    #[error("{name} must be a finite number within ±1e6, got {value}")]
    OutOfRange { name: &'static str, value: f64 },

    #[error("{name} must be a positive number, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("rack size {width}x{height} does not fit the {col_stride}x{row_stride} grid pitch")]
    Overlap {
        width: f64,
        height: f64,
        col_stride: f64,
        row_stride: f64,
    },
}

/// Geometry of the rack grid in floor-plan units
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GridConfig {
    pub rows: u16,
    pub cols: u16,
    pub origin_x: f64,
    pub origin_y: f64,
    pub row_stride: f64,
    pub col_stride: f64,
    pub rack_width: f64,
    pub rack_height: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 16,
            cols: 16,
            origin_x: 50.0,
            origin_y: 50.0,
            row_stride: 20.0,
            col_stride: 25.0,
            rack_width: 18.0,
            rack_height: 12.0,
        }
    }
}

impl GridConfig {
    /// Check that every cell gets a distinct code and racks do not overlap
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.rows > MAX_GRID_ROWS {
            return Err(ConfigError::Rows(self.rows));
        }
        if self.cols == 0 || self.cols > MAX_GRID_COLS {
            return Err(ConfigError::Cols(self.cols));
        }
        for (name, value) in [
            ("origin x", self.origin_x),
            ("origin y", self.origin_y),
            ("row stride", self.row_stride),
            ("column stride", self.col_stride),
            ("rack width", self.rack_width),
            ("rack height", self.rack_height),
        ] {
            if !(value.abs() <= MAX_COORDINATE) {
                return Err(ConfigError::OutOfRange { name, value });
            }
        }
        for (name, value) in [
            ("row stride", self.row_stride),
            ("column stride", self.col_stride),
            ("rack width", self.rack_width),
            ("rack height", self.rack_height),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.rack_width > self.col_stride || self.rack_height > self.row_stride {
            return Err(ConfigError::Overlap {
                width: self.rack_width,
                height: self.rack_height,
                col_stride: self.col_stride,
                row_stride: self.row_stride,
            });
        }
        Ok(())
    }

    pub fn contains_cell(&self, row: u16, col: u16) -> bool {
        row < self.rows && col < self.cols
    }

    /// Location code of the last cell, e.g. "016-02P"
    pub fn last_location(&self) -> String {
        location_code(self.rows.saturating_sub(1), self.cols.saturating_sub(1))
    }
}

// ============================================================================
// Rack placement
// ============================================================================

/// Site address for a grid cell: `{col+1:03}-02{row letter}`
///
/// Row 0 is `A`. Grids are limited to 26 rows by `GridConfig::validate`;
/// rows past `Z` continue along the character table so codes stay unique.
pub fn location_code(row: u16, col: u16) -> String {
    let letter = char::from_u32('A' as u32 + row as u32).unwrap_or('?');
    format!("{:03}-02{}", col as u32 + 1, letter)
}

/// Anchor for a single grid cell
pub fn anchor(grid: &GridConfig, row: u16, col: u16) -> RackAnchor {
    RackAnchor {
        row,
        col,
        location: location_code(row, col),
        bounds: Bounds {
            x: grid.origin_x + col as f64 * grid.col_stride,
            y: grid.origin_y + row as f64 * grid.row_stride,
            width: grid.rack_width,
            height: grid.rack_height,
        },
    }
}

/// Anchors for every cell of the grid, row-major
pub fn layout(grid: &GridConfig) -> Vec<RackAnchor> {
    let mut anchors = Vec::with_capacity(grid.rows as usize * grid.cols as usize);
    for row in 0..grid.rows {
        for col in 0..grid.cols {
            anchors.push(anchor(grid, row, col));
        }
    }
    anchors
}

/// Red/green encoding of a power reading on a fixed scale
///
/// The minimum of the scale is pure green, the maximum pure red. Readings
/// outside the scale are clamped first. A degenerate scale yields the midpoint.
pub fn power_color(watts: Watts, scale: &PowerRange) -> Rgba {
    let span = scale.span();
    let (hot, cold) = if span == 0 {
        (0.5, 0.5)
    } else {
        let p = scale.clamp(watts);
        (
            (p - scale.min_watts) as f64 / span as f64,
            (scale.max_watts - p) as f64 / span as f64,
        )
    };
    Rgba {
        r: (hot * 255.0).round() as u8,
        g: (cold * 255.0).round() as u8,
        b: 0,
        a: RACK_ALPHA,
    }
}

pub fn rack_bounds(rack: &Rack) -> Bounds {
    Bounds {
        x: rack.x,
        y: rack.y,
        width: rack.width,
        height: rack.height,
    }
}

/// First rack whose rectangle contains the point
pub fn rack_at<'a, I>(racks: I, x: f64, y: f64) -> Option<&'a Rack>
where
    I: IntoIterator<Item = &'a Rack>,
{
    racks
        .into_iter()
        .find(|rack| rack_bounds(rack).contains(x, y))
}

/// Where a rack's tooltip is pinned: just right of the rack, top aligned
pub fn tooltip_anchor(rack: &Rack) -> (f64, f64) {
    (rack.x + rack.width + TOOLTIP_OFFSET, rack.y)
}

/// Geometry of the `index`-th server slot in the rack view
pub fn server_slot(index: usize, rack_units: u8) -> Bounds {
    Bounds {
        x: SLOT_ORIGIN_X,
        y: SLOT_ORIGIN_Y + index as f64 * SLOT_STRIDE,
        width: SLOT_WIDTH,
        height: rack_units.max(1) as f64 * SLOT_HEIGHT_PER_U,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::rack;
    use proptest::prelude::*;
    use std::collections::HashSet;

    const SCALE: PowerRange = PowerRange::new(100, 1500);

    #[test]
    fn test_default_grid_is_valid() {
        let grid = GridConfig::default();
        assert_eq!(grid.validate(), Ok(()));
        assert_eq!(grid.last_location(), "016-02P");
        assert!(grid.contains_cell(15, 15));
        assert!(!grid.contains_cell(16, 0));
    }

    #[test]
    fn test_grid_row_limits() {
        let grid = GridConfig {
            rows: 27,
            ..GridConfig::default()
        };
        assert_eq!(grid.validate(), Err(ConfigError::Rows(27)));

        let grid = GridConfig {
            rows: 0,
            ..GridConfig::default()
        };
        assert_eq!(grid.validate(), Err(ConfigError::Rows(0)));

        let grid = GridConfig {
            rows: 26,
            ..GridConfig::default()
        };
        assert!(grid.validate().is_ok());
        assert_eq!(grid.last_location(), "016-02Z");
    }

    #[test]
    fn test_grid_col_limits() {
        let grid = GridConfig {
            cols: 1000,
            ..GridConfig::default()
        };
        assert_eq!(grid.validate(), Err(ConfigError::Cols(1000)));
    }

    #[test]
    fn test_grid_rejects_non_positive_stride() {
        let grid = GridConfig {
            row_stride: 0.0,
            ..GridConfig::default()
        };
        assert!(matches!(
            grid.validate(),
            Err(ConfigError::NonPositive { name: "row stride", .. })
        ));
    }

    #[test]
    fn test_grid_rejects_unbounded_coordinates() {
        let grid = GridConfig {
            rack_width: f64::NAN,
            ..GridConfig::default()
        };
        assert!(matches!(
            grid.validate(),
            Err(ConfigError::OutOfRange { name: "rack width", .. })
        ));

        let grid = GridConfig {
            origin_y: 1.0e300,
            ..GridConfig::default()
        };
        assert!(matches!(
            grid.validate(),
            Err(ConfigError::OutOfRange { name: "origin y", .. })
        ));
    }

    #[test]
    fn test_grid_rejects_overlapping_racks() {
        let grid = GridConfig {
            rack_width: 30.0,
            ..GridConfig::default()
        };
        assert!(matches!(grid.validate(), Err(ConfigError::Overlap { .. })));
    }

    #[test]
    fn test_grid_deserializes_with_defaults() {
        let grid: GridConfig = serde_json::from_str(r#"{ "rows": 4, "colStride": 30.0 }"#).unwrap();
        assert_eq!(grid.rows, 4);
        assert_eq!(grid.col_stride, 30.0);
        assert_eq!(grid.cols, 16);
        assert_eq!(grid.rack_width, 18.0);
    }

    #[test]
    fn test_location_code_format() {
        assert_eq!(location_code(0, 0), "001-02A");
        assert_eq!(location_code(1, 4), "005-02B");
        assert_eq!(location_code(15, 15), "016-02P");
        assert_eq!(location_code(25, 998), "999-02Z");
    }

    #[test]
    fn test_default_grid_layout() {
        let grid = GridConfig::default();
        let anchors = layout(&grid);
        assert_eq!(anchors.len(), 256);

        let first = &anchors[0];
        assert_eq!(first.location, "001-02A");
        assert_eq!(first.bounds, Bounds { x: 50.0, y: 50.0, width: 18.0, height: 12.0 });

        // Row-major: index 17 is row 1, col 1
        let a = &anchors[17];
        assert_eq!((a.row, a.col), (1, 1));
        assert_eq!(a.bounds.x, 75.0);
        assert_eq!(a.bounds.y, 70.0);

        let last = anchors.last().unwrap();
        assert_eq!(last.location, "016-02P");
        assert_eq!(last.bounds.x, 50.0 + 15.0 * 25.0);
        assert_eq!(last.bounds.y, 50.0 + 15.0 * 20.0);
    }

    #[test]
    fn test_layout_is_deterministic() {
        let grid = GridConfig {
            rows: 5,
            cols: 7,
            origin_x: 10.0,
            origin_y: 4.0,
            row_stride: 8.0,
            col_stride: 9.5,
            ..GridConfig::default()
        };
        assert_eq!(layout(&grid), layout(&grid));
    }

    #[test]
    fn test_power_color_endpoints() {
        let low = power_color(100, &SCALE);
        assert_eq!((low.r, low.g, low.b), (0, 255, 0));
        let high = power_color(1500, &SCALE);
        assert_eq!((high.r, high.g, high.b), (255, 0, 0));
        assert_eq!(high.a, RACK_ALPHA);
    }

    #[test]
    fn test_power_color_matches_linear_formula() {
        // (800 - 100) / 1400 * 255 = 127.5 -> 128, (1500 - 800) / 1400 * 255 -> 128
        let mid = power_color(800, &SCALE);
        assert_eq!((mid.r, mid.g), (128, 128));
        // (450 - 100) / 1400 * 255 = 63.75 -> 64, (1500 - 450) / 1400 * 255 = 191.25 -> 191
        let c = power_color(450, &SCALE);
        assert_eq!((c.r, c.g), (64, 191));
    }

    #[test]
    fn test_power_color_clamps_out_of_scale() {
        assert_eq!(power_color(0, &SCALE), power_color(100, &SCALE));
        assert_eq!(power_color(9000, &SCALE), power_color(1500, &SCALE));
    }

    #[test]
    fn test_power_color_degenerate_scale() {
        let flat = PowerRange::new(500, 500);
        let c = power_color(500, &flat);
        assert_eq!((c.r, c.g), (128, 128));
    }

    #[test]
    fn test_blend_over_black() {
        let c = power_color(1500, &SCALE);
        assert_eq!(c.blend_over((0, 0, 0)), (153, 0, 0));
    }

    #[test]
    fn test_rack_at_hit_testing() {
        let racks = vec![rack(0, 0, 300, 0), rack(0, 1, 400, 0), rack(1, 0, 500, 0)];
        assert_eq!(rack_at(&racks, 55.0, 55.0).unwrap().id, "rack-0-0");
        assert_eq!(rack_at(&racks, 75.0, 50.0).unwrap().id, "rack-0-1");
        assert_eq!(rack_at(&racks, 68.0, 62.0).unwrap().id, "rack-0-0");
        assert_eq!(rack_at(&racks, 60.0, 75.0).unwrap().id, "rack-1-0");
        // Gap between columns
        assert!(rack_at(&racks, 70.0, 55.0).is_none());
        assert!(rack_at(&racks, 0.0, 0.0).is_none());
    }

    #[test]
    fn test_tooltip_anchor_right_of_rack() {
        let r = rack(2, 3, 300, 0);
        assert_eq!(tooltip_anchor(&r), (50.0 + 75.0 + 18.0 + 10.0, 90.0));
    }

    #[test]
    fn test_server_slot_geometry() {
        let first = server_slot(0, 2);
        assert_eq!(first, Bounds { x: 50.0, y: 50.0, width: 300.0, height: 40.0 });
        let third = server_slot(2, 1);
        assert_eq!(third.y, 140.0);
        assert_eq!(third.height, 20.0);
        // Zero-height models still get a visible slot
        assert_eq!(server_slot(0, 0).height, 20.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Every cell of a grid gets a distinct location code
        #[test]
        fn prop_location_code_injective(rows in 1u16..=26, cols in 1u16..=120) {
            let mut seen = HashSet::new();
            for row in 0..rows {
                for col in 0..cols {
                    prop_assert!(seen.insert(location_code(row, col)));
                }
            }
        }

        /// Red never decreases and green never increases with power
        #[test]
        fn prop_power_color_monotonic(p1 in 0u32..2000, p2 in 0u32..2000) {
            let (lo, hi) = if p1 <= p2 { (p1, p2) } else { (p2, p1) };
            let a = power_color(lo, &SCALE);
            let b = power_color(hi, &SCALE);
            prop_assert!(a.r <= b.r);
            prop_assert!(a.g >= b.g);
            prop_assert_eq!(a.b, 0);
        }
    }
}
