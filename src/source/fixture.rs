// JSON floor documents
//
// Document shape:
//
//   { "models": { "<key>": model, ... },   optional
//     "grid": { "rows": 4, ... },           optional, unset fields default
//     "floors": [ Floor, ... ] }
//
// Models from the document are merged over the builtin catalog, so a document
// may reference DELL-R730 without redefining it. Rack geometry must match the
// document's grid; FloorPlan::new checks it.

use super::{FloorSource, SourceError};
use crate::layout::GridConfig;
use crate::model::{Catalog, Floor, Inventory};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Deserialize)]
struct FloorDocument {
    #[serde(default)]
    models: Catalog,
    #[serde(default)]
    grid: GridConfig,
    floors: Vec<Floor>,
}

/// Loads floors from a JSON file on disk
#[derive(Debug, Clone)]
pub struct FixtureSource {
    pub path: PathBuf,
}

impl FixtureSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a document held in memory; `origin` only names it in errors
    pub fn parse(origin: &str, text: &str) -> Result<Inventory, SourceError> {
        let document: FloorDocument =
            serde_json::from_str(text).map_err(|source| SourceError::Parse {
                origin: origin.to_string(),
                source,
            })?;

        let mut catalog = Catalog::builtin();
        let custom_models = document.models.len();
        catalog.extend(document.models);

        tracing::debug!(
            origin,
            floors = document.floors.len(),
            custom_models,
            rows = document.grid.rows,
            cols = document.grid.cols,
            "Parsed floor document"
        );

        Ok(Inventory {
            catalog,
            grid: document.grid,
            floors: document.floors,
        })
    }
}

impl FloorSource for FixtureSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn load(&self) -> Result<Inventory, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|source| SourceError::Read {
            path: self.path.clone(),
            source,
        })?;
        Self::parse(&self.describe(), &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::plan::LoadError;
    use crate::model::{FloorPlan, ServerStatus};

    const SMALL_FLOOR: &str = include_str!("../../fixtures/small_floor.json");

    #[test]
    fn test_parse_sample_document() {
        let inventory = FixtureSource::parse("small_floor.json", SMALL_FLOOR).unwrap();
        assert_eq!(inventory.floors.len(), 2);
        assert_eq!(inventory.floors[0].name, "Hall A");
        assert_eq!(inventory.floors[0].racks.len(), 3);

        // builtin models survive next to the document's own
        assert!(inventory.catalog.contains("DELL-R730"));
        assert!(inventory.catalog.contains("HPE-DL380-G11"));
        let smc = inventory.catalog.get("SMC-SYS-1029U").unwrap();
        assert_eq!(smc.rack_units, 1);
        assert_eq!(smc.power_label(), "400W-750W");

        assert_eq!(inventory.grid.rows, 4);
        assert_eq!(inventory.grid.cols, 6);
        assert_eq!(inventory.grid.col_stride, 25.0);

        let server = &inventory.floors[0].racks[0].servers[1];
        assert_eq!(server.status, ServerStatus::Warning);
        assert_eq!(server.ram_total_gb, 512);
    }

    #[test]
    fn test_sample_document_builds_a_plan() {
        let inventory = FixtureSource::parse("small_floor.json", SMALL_FLOOR).unwrap();
        let plan = FloorPlan::new(inventory).unwrap();
        assert_eq!(plan.len(), 2);

        // server ids only need to be unique within a floor
        let hall_b = plan.floor_at(1).unwrap();
        assert!(hall_b.server("SRV-001-02A-1").is_some());
    }

    #[test]
    fn test_models_are_optional() {
        let text = r#"{ "floors": [ { "id": 3, "name": "Empty" } ] }"#;
        let inventory = FixtureSource::parse("inline", text).unwrap();
        assert_eq!(inventory.catalog, Catalog::builtin());
        assert_eq!(inventory.grid, GridConfig::default());
        assert!(inventory.floors[0].racks.is_empty());
    }

    #[test]
    fn test_unknown_model_fails_plan_validation() {
        let text = SMALL_FLOOR.replace("\"model\": \"SMC-SYS-1029U\"", "\"model\": \"NOPE\"");
        let inventory = FixtureSource::parse("edited", &text).unwrap();
        assert!(matches!(
            FloorPlan::new(inventory),
            Err(LoadError::UnknownModel { .. })
        ));
    }

    #[test]
    fn test_off_scale_power_fails_plan_validation() {
        let text = SMALL_FLOOR.replace("\"powerUsageWatts\": 1400", "\"powerUsageWatts\": 1800");
        let inventory = FixtureSource::parse("edited", &text).unwrap();
        match FloorPlan::new(inventory) {
            Err(LoadError::PowerOutOfScale { location, watts, .. }) => {
                assert_eq!(location, "001-02B");
                assert_eq!(watts, 1800);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_rack_off_its_cell_fails_plan_validation() {
        let text = SMALL_FLOOR.replace("\"x\": 75.0", "\"x\": 50.0");
        let inventory = FixtureSource::parse("edited", &text).unwrap();
        assert!(matches!(
            FloorPlan::new(inventory),
            Err(LoadError::GeometryMismatch { .. })
        ));
    }

    #[test]
    fn test_document_grid_bounds_racks() {
        let text = SMALL_FLOOR.replace("\"grid\": { \"rows\": 4, \"cols\": 6 }", "\"grid\": { \"rows\": 1 }");
        let inventory = FixtureSource::parse("edited", &text).unwrap();
        assert!(matches!(
            FloorPlan::new(inventory),
            Err(LoadError::OutsideGrid { row: 1, .. })
        ));
    }

    #[test]
    fn test_parse_error_names_origin() {
        let err = FixtureSource::parse("broken.json", "{ \"floors\": 7 }").unwrap_err();
        assert!(matches!(err, SourceError::Parse { .. }));
        assert!(err.to_string().starts_with("broken.json is not a valid floor document"));
    }

    #[test]
    fn test_missing_file() {
        let source = FixtureSource::new("/nonexistent/rackmap/floor.json");
        let err = source.load().unwrap_err();
        assert!(matches!(err, SourceError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/rackmap/floor.json"));
    }
}
