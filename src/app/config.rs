// Application configuration types
//
// This module contains configuration structs and constants for:
// - Power-range control and polling
// - Synthetic source defaults
// - Map view toggles

use crate::filter::SelectionMode;
use crate::model::Watts;
use std::time::Duration;

pub use crate::layout::GridConfig;
pub use crate::model::{MAX_POWER_W, MIN_POWER_W, POWER_SCALE};

// ============================================================================
// Constants
// ============================================================================

/// Power-range adjustment step in watts
pub const POWER_STEP_W: Watts = 50;

/// Per-rack power budget used by the synthetic source
pub const RACK_BUDGET_W: Watts = 2000;

/// Input poll timeout; the loop redraws at least this often
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Default seed for the synthetic source
pub const DEFAULT_SEED: u64 = 42;

/// Default number of synthetic floors
pub const DEFAULT_FLOORS: u32 = 2;

// ============================================================================
// Configuration Structs
// ============================================================================

/// Visual settings for the floor map
/// Controls labels, grid lines and how selections combine
#[derive(Debug, Clone)]
pub struct ViewSettings {
    /// Show location labels under racks (toggle with 't' key)
    pub labels_enabled: bool,

    /// Draw the background grid (toggle with 'g' key)
    pub grid_lines_enabled: bool,

    /// Rack/server selection combination (toggle with 'm' key)
    pub selection_mode: SelectionMode,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            labels_enabled: true,
            grid_lines_enabled: true,
            selection_mode: SelectionMode::Either,
        }
    }
}
