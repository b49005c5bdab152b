// Seeded synthetic inventory
//
// Produces plausible floors for demos and tests. The same seed and settings
// always produce the same inventory, apart from the generation date which
// bounds install and maintenance dates.

use super::{FloorSource, SourceError};
use crate::app::config::RACK_BUDGET_W;
use crate::layout::{layout, GridConfig};
use crate::model::{Catalog, Floor, Inventory, PowerRange, Rack, Server, ServerStatus};
use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const CPU_TYPES: [&str; 2] = ["Intel Xeon Gold 6330", "AMD EPYC 7763"];
const RAM_SIZES_GB: [u32; 3] = [128, 256, 512];
const SERIAL_ALPHABET: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Generator settings
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    pub seed: u64,
    pub floors: u32,
    pub grid: GridConfig,
    /// Rack draw is sampled from and clamped into this range
    pub power: PowerRange,
    /// Latest possible install or maintenance date
    pub today: NaiveDate,
}

impl SyntheticSource {
    pub fn new(seed: u64, floors: u32, grid: GridConfig, power: PowerRange) -> Self {
        Self {
            seed,
            floors,
            grid,
            power,
            today: chrono::Local::now().date_naive(),
        }
    }

    fn epoch() -> NaiveDate {
        NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
    }

    fn random_date(&self, rng: &mut StdRng) -> NaiveDate {
        let start = Self::epoch();
        let days = (self.today - start).num_days().max(0) as u64;
        let offset = rng.random_range(0..=days);
        start.checked_add_days(Days::new(offset)).unwrap_or(start)
    }

    fn serial_number(rng: &mut StdRng) -> String {
        let body: String = (0..9)
            .map(|_| SERIAL_ALPHABET[rng.random_range(0..SERIAL_ALPHABET.len())] as char)
            .collect();
        format!("SN{}", body)
    }

    fn servers(
        &self,
        rng: &mut StdRng,
        catalog: &Catalog,
        models: &[&str],
        location: &str,
    ) -> Vec<Server> {
        let count = rng.random_range(10..30usize);
        (1..=count)
            .map(|n| {
                let model = models[rng.random_range(0..models.len())];
                let manufacturer = catalog
                    .get(model)
                    .and_then(|m| m.display_name.split_whitespace().next())
                    .unwrap_or("Unknown")
                    .to_string();
                Server {
                    id: format!("SRV-{}-{}", location, n),
                    name: format!("SERVER-{}-{}", location, n),
                    model: model.to_string(),
                    manufacturer,
                    serial_number: Self::serial_number(rng),
                    cpu_type: CPU_TYPES[rng.random_range(0..CPU_TYPES.len())].to_string(),
                    cpu_count: rng.random_range(1..=2u8),
                    ram_total_gb: RAM_SIZES_GB[rng.random_range(0..RAM_SIZES_GB.len())],
                    power_usage_watts: rng.random_range(300..=800u32),
                    cpu_usage_pct: rng.random_range(0..=100u8),
                    ram_usage_pct: rng.random_range(0..=100u8),
                    position_u: n as u32,
                    status: ServerStatus::ALL[rng.random_range(0..ServerStatus::ALL.len())],
                    install_date: self.random_date(rng),
                    last_maintenance_date: self.random_date(rng),
                }
            })
            .collect()
    }

    fn racks(&self, rng: &mut StdRng, catalog: &Catalog, models: &[&str]) -> Vec<Rack> {
        layout(&self.grid)
            .into_iter()
            .map(|cell| {
                let sampled = if self.power.span() == 0 {
                    self.power.min_watts
                } else {
                    rng.random_range(self.power.min_watts..self.power.max_watts)
                };
                let servers = self.servers(rng, catalog, models, &cell.location);
                Rack {
                    id: format!("rack-{}-{}", cell.row, cell.col),
                    location: cell.location,
                    grid_row: cell.row,
                    grid_col: cell.col,
                    x: cell.bounds.x,
                    y: cell.bounds.y,
                    width: cell.bounds.width,
                    height: cell.bounds.height,
                    power_usage_watts: self.power.clamp(sampled),
                    max_power_watts: RACK_BUDGET_W,
                    temperature_c: rng.random_range(20..=30u8) as f64,
                    humidity_pct: rng.random_range(40..=60u8) as f64,
                    servers,
                }
            })
            .collect()
    }
}

impl FloorSource for SyntheticSource {
    fn describe(&self) -> String {
        format!("synthetic (seed {})", self.seed)
    }

    fn load(&self) -> Result<Inventory, SourceError> {
        self.grid.validate()?;

        let catalog = Catalog::builtin();
        let models: Vec<&str> = catalog.keys().collect();
        let mut rng = StdRng::seed_from_u64(self.seed);

        let floors = (1..=self.floors)
            .map(|id| Floor {
                id,
                name: format!("Floor {}", id),
                racks: self.racks(&mut rng, &catalog, &models),
            })
            .collect();

        tracing::debug!(
            seed = self.seed,
            floors = self.floors,
            last = %self.grid.last_location(),
            "Generated synthetic inventory"
        );

        Ok(Inventory {
            catalog,
            grid: self.grid.clone(),
            floors,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::ConfigError;
    use crate::model::FloorPlan;
    use std::collections::HashSet;

    fn source(seed: u64) -> SyntheticSource {
        SyntheticSource {
            seed,
            floors: 2,
            grid: GridConfig {
                rows: 4,
                cols: 5,
                ..GridConfig::default()
            },
            power: PowerRange::new(100, 1500),
            today: NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        }
    }

    #[test]
    fn test_generated_inventory_is_valid() {
        let inventory = source(7).load().unwrap();
        assert_eq!(inventory.floors.len(), 2);
        assert_eq!(inventory.floors[1].name, "Floor 2");
        assert_eq!(inventory.floors[0].racks.len(), 20);
        let plan = FloorPlan::new(inventory).unwrap();
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_same_seed_same_inventory() {
        let a = source(99).load().unwrap();
        let b = source(99).load().unwrap();
        assert_eq!(a.floors, b.floors);

        let c = source(100).load().unwrap();
        assert_ne!(a.floors, c.floors);
    }

    #[test]
    fn test_generated_values_respect_contract() {
        let src = source(3);
        let inventory = src.load().unwrap();
        let epoch = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        for floor in &inventory.floors {
            let mut locations = HashSet::new();
            for rack in &floor.racks {
                assert!(locations.insert(rack.location.clone()));
                assert!(src.power.contains(rack.power_usage_watts));
                assert_eq!(rack.max_power_watts, 2000);
                assert!((20.0..=30.0).contains(&rack.temperature_c));
                assert!((40.0..=60.0).contains(&rack.humidity_pct));
                assert!((10..30).contains(&rack.servers.len()));
                assert_eq!(rack.x, 50.0 + rack.grid_col as f64 * 25.0);
                assert_eq!(rack.y, 50.0 + rack.grid_row as f64 * 20.0);

                for (i, server) in rack.servers.iter().enumerate() {
                    assert_eq!(server.position_u, i as u32 + 1);
                    assert!((300..=800).contains(&server.power_usage_watts));
                    assert!(server.cpu_usage_pct <= 100);
                    assert!(server.serial_number.starts_with("SN"));
                    assert_eq!(server.serial_number.len(), 11);
                    assert!(server.install_date >= epoch && server.install_date <= src.today);
                    assert!(inventory.catalog.contains(&server.model));
                    assert!(server.id.starts_with(&format!("SRV-{}-", rack.location)));
                }
            }
        }
    }

    #[test]
    fn test_manufacturer_follows_model() {
        let inventory = source(11).load().unwrap();
        for server in inventory.floors[0].racks.iter().flat_map(|r| &r.servers) {
            let expected = match server.model.as_str() {
                "DELL-R730" => "Dell",
                _ => "HPE",
            };
            assert_eq!(server.manufacturer, expected);
        }
    }

    #[test]
    fn test_flat_power_range() {
        let mut src = source(5);
        src.power = PowerRange::new(600, 600);
        let inventory = src.load().unwrap();
        assert!(inventory.floors[0]
            .racks
            .iter()
            .all(|r| r.power_usage_watts == 600));
    }

    #[test]
    fn test_invalid_grid_is_rejected() {
        let mut src = source(5);
        src.grid.rows = 30;
        match src.load() {
            Err(SourceError::Config(ConfigError::Rows(30))) => {}
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
