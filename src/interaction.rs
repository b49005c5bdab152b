// Selection and interaction state machine
//
// Three independent pieces of session state:
// - HoverState: the tooltip for the rack under the pointer
// - DrillDown: the rack opened for detail and the server chosen inside it
// - MultiSelect: explicit rack and server selections feeding the filter
//
// Entities are never mutated; every state refers to racks and servers by id.

use crate::layout::tooltip_anchor;
use crate::model::{Rack, Server, ServerStatus, Watts};
use std::collections::BTreeSet;

/// Tooltip content for a rack, derived from the rack alone
#[derive(Debug, Clone, PartialEq)]
pub struct RackTooltip {
    pub location: String,
    pub power_watts: Watts,
    pub max_power_watts: Watts,
    pub temperature_c: f64,
    pub server_count: usize,
}

impl RackTooltip {
    pub fn from_rack(rack: &Rack) -> Self {
        Self {
            location: rack.location.clone(),
            power_watts: rack.power_usage_watts,
            max_power_watts: rack.max_power_watts,
            temperature_c: rack.temperature_c,
            server_count: rack.servers.len(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Location: {}", self.location),
            format!("Power: {}W / {}W", self.power_watts, self.max_power_watts),
            format!("Temperature: {}°C", self.temperature_c),
            format!("Servers: {}", self.server_count),
        ]
    }
}

/// Tooltip content for a server in the rack view
#[derive(Debug, Clone, PartialEq)]
pub struct ServerTooltip {
    pub power_watts: Watts,
    pub cpu_usage_pct: u8,
    pub ram_usage_pct: u8,
    pub ram_total_gb: u32,
    pub status: ServerStatus,
}

impl ServerTooltip {
    pub fn from_server(server: &Server) -> Self {
        Self {
            power_watts: server.power_usage_watts,
            cpu_usage_pct: server.cpu_usage_pct,
            ram_usage_pct: server.ram_usage_pct,
            ram_total_gb: server.ram_total_gb,
            status: server.status,
        }
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("Power: {}W", self.power_watts),
            format!("CPU: {}%", self.cpu_usage_pct),
            format!("RAM: {}% of {}GB", self.ram_usage_pct, self.ram_total_gb),
            format!("Status: {}", self.status.label()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    ShowingTooltip {
        rack_id: String,
        tooltip: RackTooltip,
        /// Floor-plan coordinates the tooltip is pinned to
        position: (f64, f64),
    },
}

impl HoverState {
    pub fn rack_id(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::ShowingTooltip { rack_id, .. } => Some(rack_id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DrillDown {
    #[default]
    Closed,
    Open {
        rack_id: String,
        selected_server: Option<String>,
        hovered_server: Option<String>,
    },
}

impl DrillDown {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open { .. })
    }

    pub fn rack_id(&self) -> Option<&str> {
        match self {
            Self::Closed => None,
            Self::Open { rack_id, .. } => Some(rack_id),
        }
    }

    pub fn selected_server(&self) -> Option<&str> {
        match self {
            Self::Open {
                selected_server, ..
            } => selected_server.as_deref(),
            Self::Closed => None,
        }
    }

    pub fn hovered_server(&self) -> Option<&str> {
        match self {
            Self::Open { hovered_server, .. } => hovered_server.as_deref(),
            Self::Closed => None,
        }
    }
}

/// Explicit selections, toggled by membership
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MultiSelect {
    rack_locations: BTreeSet<String>,
    server_ids: BTreeSet<String>,
}

impl MultiSelect {
    /// Toggle a rack location, returning whether it is now selected
    pub fn toggle_rack(&mut self, location: &str) -> bool {
        toggle(&mut self.rack_locations, location)
    }

    /// Toggle a server id, returning whether it is now selected
    pub fn toggle_server(&mut self, server_id: &str) -> bool {
        toggle(&mut self.server_ids, server_id)
    }

    pub fn set_racks<I: IntoIterator<Item = String>>(&mut self, locations: I) {
        self.rack_locations = locations.into_iter().collect();
    }

    pub fn set_servers<I: IntoIterator<Item = String>>(&mut self, ids: I) {
        self.server_ids = ids.into_iter().collect();
    }

    pub fn clear_racks(&mut self) {
        self.rack_locations.clear();
    }

    pub fn clear_servers(&mut self) {
        self.server_ids.clear();
    }

    pub fn rack_locations(&self) -> &BTreeSet<String> {
        &self.rack_locations
    }

    pub fn server_ids(&self) -> &BTreeSet<String> {
        &self.server_ids
    }

    pub fn is_rack_selected(&self, location: &str) -> bool {
        self.rack_locations.contains(location)
    }

    pub fn is_server_selected(&self, server_id: &str) -> bool {
        self.server_ids.contains(server_id)
    }

    pub fn is_empty(&self) -> bool {
        self.rack_locations.is_empty() && self.server_ids.is_empty()
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) -> bool {
    if set.remove(value) {
        false
    } else {
        set.insert(value.to_string());
        true
    }
}

/// All interaction state of a session
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interaction {
    pub hover: HoverState,
    pub drill_down: DrillDown,
    pub selection: MultiSelect,
}

impl Interaction {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer entered a rack: show its tooltip
    pub fn pointer_enter(&mut self, rack: &Rack) {
        if self.hover.rack_id() == Some(rack.id.as_str()) {
            return;
        }
        self.hover = HoverState::ShowingTooltip {
            rack_id: rack.id.clone(),
            tooltip: RackTooltip::from_rack(rack),
            position: tooltip_anchor(rack),
        };
    }

    /// Pointer left whatever rack it was over
    pub fn pointer_leave(&mut self) {
        self.hover = HoverState::Idle;
    }

    /// Rack clicked: open it with no server chosen
    pub fn open_rack(&mut self, rack: &Rack) {
        tracing::debug!(rack = %rack.location, "Drill-down opened");
        self.drill_down = DrillDown::Open {
            rack_id: rack.id.clone(),
            selected_server: None,
            hovered_server: None,
        };
    }

    /// Server clicked inside the open rack
    ///
    /// Returns `false` (and changes nothing) when no rack is open, `rack` is
    /// not the open one, or the server is not mounted in it.
    pub fn click_server(&mut self, rack: &Rack, server_id: &str) -> bool {
        match &mut self.drill_down {
            DrillDown::Open {
                rack_id,
                selected_server,
                ..
            } if *rack_id == rack.id && rack.servers.iter().any(|s| s.id == server_id) => {
                *selected_server = Some(server_id.to_string());
                true
            }
            _ => false,
        }
    }

    /// Pointer over a server row in the rack view (`None` when it leaves)
    pub fn hover_server(&mut self, server_id: Option<&str>) {
        if let DrillDown::Open { hovered_server, .. } = &mut self.drill_down {
            *hovered_server = server_id.map(str::to_string);
        }
    }

    /// Close the rack view, dropping any server choice
    pub fn close_drill_down(&mut self) {
        if self.drill_down.is_open() {
            tracing::debug!("Drill-down closed");
        }
        self.drill_down = DrillDown::Closed;
    }

    /// Forget everything tied to the previous floor
    pub fn reset_for_floor_switch(&mut self) {
        *self = Self::default();
    }
}
