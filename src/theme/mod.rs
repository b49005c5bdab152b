// Theme module - Color constants and theme re-exports
//
// This module provides the color palette for rackmap's panels. Rack fills come
// from the power scale in `layout::power_color`; everything else (borders,
// text, server status) is defined here.

pub mod default;

use ratatui::style::Color;

/// Primary accent color - used for borders, titles, the map cursor
/// RGB: (122, 162, 247)
pub const STEEL_BLUE: Color = Color::Rgb(122, 162, 247);

/// Warning indicator - used for the search box and notices
/// RGB: (255, 158, 100)
pub const AMBER: Color = Color::Rgb(255, 158, 100);

/// Selection outline - selected racks and servers
/// RGB: (239, 68, 68)
pub const SELECTION_RED: Color = Color::Rgb(239, 68, 68);

/// Healthy indicator - low utilization gauges
/// RGB: (158, 206, 106)
pub const MINT_GREEN: Color = Color::Rgb(158, 206, 106);

/// Neutral text
/// RGB: (169, 177, 214)
pub const SLATE: Color = Color::Rgb(169, 177, 214);

/// Background behind the map; translucent rack fills are blended over it
pub const FLOOR_BG: (u8, u8, u8) = (26, 27, 38);

/// Grid line color on the floor map
pub const GRID_LINE: Color = Color::Rgb(59, 66, 97);

// Server status colors
pub const STATUS_ACTIVE: Color = Color::Rgb(0x10, 0xb9, 0x81);
pub const STATUS_WARNING: Color = Color::Rgb(0xf5, 0x9e, 0x0b);
pub const STATUS_ERROR: Color = Color::Rgb(0xef, 0x44, 0x44);
pub const STATUS_MAINTENANCE: Color = Color::Rgb(0x6b, 0x72, 0x80);

// Re-export theme functions for convenient access
pub use default::*;
