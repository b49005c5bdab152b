// Entity model
//
// Floors, racks and servers as supplied by a data source, plus the
// server-model catalog. Records are immutable once a FloorPlan is built;
// selection state lives in the interaction module and never on the entities.

pub mod catalog;
pub mod plan;

pub use catalog::Catalog;
pub use plan::{FloorPlan, IndexedFloor};

use crate::layout::GridConfig;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Power in watts
pub type Watts = u32;

/// Lowest rack draw on the color scale and the power-range control
pub const MIN_POWER_W: Watts = 100;

/// Highest rack draw on the color scale and the power-range control
pub const MAX_POWER_W: Watts = 1500;

/// Scale every rack reading must fall on; shared by the map and the filter
pub const POWER_SCALE: PowerRange = PowerRange::new(MIN_POWER_W, MAX_POWER_W);

/// Inclusive power interval in watts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PowerRange {
    pub min_watts: Watts,
    pub max_watts: Watts,
}

impl PowerRange {
    pub const fn new(min_watts: Watts, max_watts: Watts) -> Self {
        Self {
            min_watts,
            max_watts,
        }
    }

    pub fn contains(&self, watts: Watts) -> bool {
        self.min_watts <= watts && watts <= self.max_watts
    }

    /// Clamp a reading into the range. A reversed range clamps to `min_watts`.
    pub fn clamp(&self, watts: Watts) -> Watts {
        watts.min(self.max_watts).max(self.min_watts)
    }

    pub fn span(&self) -> Watts {
        self.max_watts.saturating_sub(self.min_watts)
    }
}

/// Server health as reported by the inventory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ServerStatus {
    Active,
    Maintenance,
    Warning,
    Error,
}

impl ServerStatus {
    pub const ALL: [ServerStatus; 4] = [
        ServerStatus::Active,
        ServerStatus::Maintenance,
        ServerStatus::Warning,
        ServerStatus::Error,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Maintenance => "Maintenance",
            Self::Warning => "Warning",
            Self::Error => "Error",
        }
    }
}

/// A single server mounted in a rack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    pub id: String,
    pub name: String,
    /// Key into the server-model catalog
    pub model: String,
    pub manufacturer: String,
    #[serde(default)]
    pub serial_number: String,
    pub cpu_type: String,
    pub cpu_count: u8,
    #[serde(rename = "ramTotalGB")]
    pub ram_total_gb: u32,
    pub power_usage_watts: Watts,
    pub cpu_usage_pct: u8,
    pub ram_usage_pct: u8,
    /// 1-based slot within the rack
    pub position_u: u32,
    pub status: ServerStatus,
    pub install_date: NaiveDate,
    pub last_maintenance_date: NaiveDate,
}

/// A rack at a fixed grid cell, owning its servers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rack {
    pub id: String,
    /// Site address derived from the grid cell, see `layout::location_code`
    pub location: String,
    pub grid_row: u16,
    pub grid_col: u16,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub power_usage_watts: Watts,
    pub max_power_watts: Watts,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    #[serde(default)]
    pub servers: Vec<Server>,
}

impl Rack {
    pub fn server_count(&self) -> usize {
        self.servers.len()
    }

    /// Whether any mounted server id is in `ids`
    pub fn hosts_any(&self, ids: &BTreeSet<String>) -> bool {
        !ids.is_empty() && self.servers.iter().any(|s| ids.contains(&s.id))
    }

    /// Whether any server name contains `needle_lower` (already lowercased)
    pub fn has_server_named(&self, needle_lower: &str) -> bool {
        self.servers
            .iter()
            .any(|s| s.name.to_lowercase().contains(needle_lower))
    }

    /// Drawn power as a fraction of the rack budget (0.0 when the budget is 0)
    pub fn power_utilization(&self) -> f64 {
        if self.max_power_watts > 0 {
            self.power_usage_watts as f64 / self.max_power_watts as f64
        } else {
            0.0
        }
    }
}

/// One floor of the data center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub racks: Vec<Rack>,
}

/// Everything a data source hands over: the catalog, the grid the racks were
/// placed on, and the floors
#[derive(Debug, Clone)]
pub struct Inventory {
    pub catalog: Catalog,
    pub grid: GridConfig,
    pub floors: Vec<Floor>,
}

#[cfg(test)]
pub(crate) mod fixtures {
    //! Small hand-built racks shared by the unit tests

    use super::*;
    use crate::layout::location_code;

    pub fn server(id: &str, position_u: u32) -> Server {
        Server {
            id: id.to_string(),
            name: id.replace("SRV", "SERVER"),
            model: "DELL-R730".to_string(),
            manufacturer: "Dell".to_string(),
            serial_number: "SNTEST0001".to_string(),
            cpu_type: "Intel Xeon Gold 6330".to_string(),
            cpu_count: 2,
            ram_total_gb: 256,
            power_usage_watts: 500,
            cpu_usage_pct: 40,
            ram_usage_pct: 60,
            position_u,
            status: ServerStatus::Active,
            install_date: NaiveDate::from_ymd_opt(2021, 3, 14).unwrap(),
            last_maintenance_date: NaiveDate::from_ymd_opt(2023, 9, 1).unwrap(),
        }
    }

    /// Rack at (row, col) with `servers` servers and the given power draw
    pub fn rack(row: u16, col: u16, power: Watts, servers: usize) -> Rack {
        let location = location_code(row, col);
        Rack {
            id: format!("rack-{}-{}", row, col),
            x: 50.0 + col as f64 * 25.0,
            y: 50.0 + row as f64 * 20.0,
            width: 18.0,
            height: 12.0,
            power_usage_watts: power,
            max_power_watts: 2000,
            temperature_c: 24.0,
            humidity_pct: 50.0,
            servers: (1..=servers)
                .map(|n| server(&format!("SRV-{}-{}", location, n), n as u32))
                .collect(),
            location,
            grid_row: row,
            grid_col: col,
        }
    }

    pub fn floor(id: u32, racks: Vec<Rack>) -> Floor {
        Floor {
            id,
            name: format!("Floor {}", id),
            racks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_power_range_contains_is_inclusive() {
        let range = PowerRange::new(100, 1500);
        assert!(range.contains(100));
        assert!(range.contains(1500));
        assert!(!range.contains(99));
        assert!(!range.contains(1501));
    }

    #[test]
    fn test_power_range_clamp() {
        let range = PowerRange::new(100, 1500);
        assert_eq!(range.clamp(20), 100);
        assert_eq!(range.clamp(700), 700);
        assert_eq!(range.clamp(4000), 1500);
    }

    #[test]
    fn test_hosts_any_ignores_empty_set() {
        let rack = rack(0, 0, 500, 3);
        assert!(!rack.hosts_any(&BTreeSet::new()));

        let ids: BTreeSet<String> = ["SRV-001-02A-2".to_string()].into();
        assert!(rack.hosts_any(&ids));

        let other: BTreeSet<String> = ["SRV-002-02A-2".to_string()].into();
        assert!(!rack.hosts_any(&other));
    }

    #[test]
    fn test_has_server_named_expects_lowercase_needle() {
        let rack = rack(1, 4, 500, 2);
        assert!(rack.has_server_named("server-005-02b-1"));
        assert!(!rack.has_server_named("server-005-02b-3"));
    }

    #[test]
    fn test_power_utilization_zero_budget() {
        let mut rack = rack(0, 0, 500, 0);
        assert!((rack.power_utilization() - 0.25).abs() < f64::EPSILON);
        rack.max_power_watts = 0;
        assert_eq!(rack.power_utilization(), 0.0);
    }

    #[test]
    fn test_server_deserializes_from_camel_case() {
        let json = r#"{
            "id": "SRV-001-02A-1",
            "name": "SERVER-001-02A-1",
            "model": "HPE-DL380-G11",
            "manufacturer": "HPE",
            "cpuType": "AMD EPYC 7763",
            "cpuCount": 1,
            "ramTotalGB": 512,
            "powerUsageWatts": 640,
            "cpuUsagePct": 12,
            "ramUsagePct": 88,
            "positionU": 1,
            "status": "Warning",
            "installDate": "2020-05-01",
            "lastMaintenanceDate": "2024-01-20"
        }"#;
        let server: Server = serde_json::from_str(json).unwrap();
        assert_eq!(server.ram_total_gb, 512);
        assert_eq!(server.status, ServerStatus::Warning);
        assert!(server.serial_number.is_empty());
    }
}
