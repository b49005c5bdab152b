// Validated floor plan
//
// A FloorPlan is the only way the rest of rackmap sees inventory data. It is
// built once from a data source's Inventory; construction refuses ambiguous
// input (duplicate addresses, duplicate slots, unknown models, racks off the
// grid or off the power scale) and builds the id indexes used for every
// "which rack / which server" lookup.

use super::{Catalog, Floor, Inventory, Rack, Server, Watts, POWER_SCALE};
use crate::layout::{self, location_code, ConfigError, GridConfig};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

/// Largest distance between a rack's stored geometry and its grid cell
const GEOMETRY_TOLERANCE: f64 = 1e-6;

/// Fatal problems found while loading inventory data
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LoadError {
    #[error("the data source supplied no floors")]
    NoFloors,

    #[error("invalid grid: {0}")]
    Grid(#[from] ConfigError),

    #[error("floor id {0} appears more than once")]
    DuplicateFloorId(u32),

    #[error("floor {floor}: rack id {rack_id} appears more than once")]
    DuplicateRackId { floor: u32, rack_id: String },

    #[error("floor {floor}: location {location} is used by more than one rack")]
    DuplicateLocation { floor: u32, location: String },

    #[error(
        "floor {floor}: rack {rack_id} is labelled {location} but grid cell ({row}, {col}) is {expected}"
    )]
    LocationMismatch {
        floor: u32,
        rack_id: String,
        location: String,
        row: u16,
        col: u16,
        expected: String,
    },

    #[error("floor {floor}: rack {location} at ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutsideGrid {
        floor: u32,
        location: String,
        row: u16,
        col: u16,
        rows: u16,
        cols: u16,
    },

    #[error("floor {floor}: rack {location} is not drawn at its grid cell")]
    GeometryMismatch { floor: u32, location: String },

    #[error("floor {floor}: rack {location} draws {watts}W, outside the {min}W-{max}W scale")]
    PowerOutOfScale {
        floor: u32,
        location: String,
        watts: Watts,
        min: Watts,
        max: Watts,
    },

    #[error("rack {location}: slot U{position} is occupied more than once")]
    DuplicatePosition { location: String, position: u32 },

    #[error("floor {floor}: server id {server_id} appears more than once")]
    DuplicateServerId { floor: u32, server_id: String },

    #[error("server {server_id}: unknown model {model}")]
    UnknownModel { server_id: String, model: String },
}

/// A floor together with its lookup indexes
#[derive(Debug, Clone)]
pub struct IndexedFloor {
    floor: Floor,
    racks_by_id: HashMap<String, usize>,
    racks_by_location: HashMap<String, usize>,
    /// server id -> (rack index, server index)
    servers_by_id: HashMap<String, (usize, usize)>,
}

impl IndexedFloor {
    fn build(floor: Floor, catalog: &Catalog, grid: &GridConfig) -> Result<Self, LoadError> {
        let mut racks_by_id = HashMap::with_capacity(floor.racks.len());
        let mut racks_by_location = HashMap::with_capacity(floor.racks.len());
        let mut servers_by_id = HashMap::new();

        for (rack_idx, rack) in floor.racks.iter().enumerate() {
            if racks_by_id.insert(rack.id.clone(), rack_idx).is_some() {
                return Err(LoadError::DuplicateRackId {
                    floor: floor.id,
                    rack_id: rack.id.clone(),
                });
            }

            let expected = location_code(rack.grid_row, rack.grid_col);
            if rack.location != expected {
                return Err(LoadError::LocationMismatch {
                    floor: floor.id,
                    rack_id: rack.id.clone(),
                    location: rack.location.clone(),
                    row: rack.grid_row,
                    col: rack.grid_col,
                    expected,
                });
            }

            if !grid.contains_cell(rack.grid_row, rack.grid_col) {
                return Err(LoadError::OutsideGrid {
                    floor: floor.id,
                    location: rack.location.clone(),
                    row: rack.grid_row,
                    col: rack.grid_col,
                    rows: grid.rows,
                    cols: grid.cols,
                });
            }
            let cell = layout::anchor(grid, rack.grid_row, rack.grid_col);
            if !layout::rack_bounds(rack).approx_eq(&cell.bounds, GEOMETRY_TOLERANCE) {
                return Err(LoadError::GeometryMismatch {
                    floor: floor.id,
                    location: rack.location.clone(),
                });
            }
            if !POWER_SCALE.contains(rack.power_usage_watts) {
                return Err(LoadError::PowerOutOfScale {
                    floor: floor.id,
                    location: rack.location.clone(),
                    watts: rack.power_usage_watts,
                    min: POWER_SCALE.min_watts,
                    max: POWER_SCALE.max_watts,
                });
            }

            // Same location implies same grid cell, so this also rejects
            // two racks stacked on one cell.
            if racks_by_location
                .insert(rack.location.clone(), rack_idx)
                .is_some()
            {
                return Err(LoadError::DuplicateLocation {
                    floor: floor.id,
                    location: rack.location.clone(),
                });
            }

            let mut positions = HashSet::with_capacity(rack.servers.len());
            for (server_idx, server) in rack.servers.iter().enumerate() {
                if !positions.insert(server.position_u) {
                    return Err(LoadError::DuplicatePosition {
                        location: rack.location.clone(),
                        position: server.position_u,
                    });
                }
                if !catalog.contains(&server.model) {
                    return Err(LoadError::UnknownModel {
                        server_id: server.id.clone(),
                        model: server.model.clone(),
                    });
                }
                if servers_by_id
                    .insert(server.id.clone(), (rack_idx, server_idx))
                    .is_some()
                {
                    return Err(LoadError::DuplicateServerId {
                        floor: floor.id,
                        server_id: server.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            floor,
            racks_by_id,
            racks_by_location,
            servers_by_id,
        })
    }

    pub fn id(&self) -> u32 {
        self.floor.id
    }

    pub fn name(&self) -> &str {
        &self.floor.name
    }

    pub fn racks(&self) -> &[Rack] {
        &self.floor.racks
    }

    pub fn rack(&self, rack_id: &str) -> Option<&Rack> {
        self.racks_by_id
            .get(rack_id)
            .map(|&idx| &self.floor.racks[idx])
    }

    pub fn rack_at_location(&self, location: &str) -> Option<&Rack> {
        self.racks_by_location
            .get(location)
            .map(|&idx| &self.floor.racks[idx])
    }

    /// Look up a server and the rack that holds it
    pub fn server(&self, server_id: &str) -> Option<(&Rack, &Server)> {
        self.servers_by_id.get(server_id).map(|&(r, s)| {
            let rack = &self.floor.racks[r];
            (rack, &rack.servers[s])
        })
    }

    pub fn server_count(&self) -> usize {
        self.servers_by_id.len()
    }
}

/// Validated, indexed inventory for a session
#[derive(Debug, Clone)]
pub struct FloorPlan {
    catalog: Catalog,
    floors: Vec<IndexedFloor>,
}

impl FloorPlan {
    /// Validate an inventory and build the lookup indexes
    pub fn new(inventory: Inventory) -> Result<Self, LoadError> {
        let Inventory {
            catalog,
            grid,
            floors,
        } = inventory;
        if floors.is_empty() {
            return Err(LoadError::NoFloors);
        }
        grid.validate()?;

        let mut seen = HashSet::with_capacity(floors.len());
        let mut indexed = Vec::with_capacity(floors.len());
        for floor in floors {
            if !seen.insert(floor.id) {
                return Err(LoadError::DuplicateFloorId(floor.id));
            }
            indexed.push(IndexedFloor::build(floor, &catalog, &grid)?);
        }

        tracing::info!(
            floors = indexed.len(),
            racks = indexed.iter().map(|f| f.racks().len()).sum::<usize>(),
            servers = indexed.iter().map(IndexedFloor::server_count).sum::<usize>(),
            "Floor plan loaded"
        );

        Ok(Self {
            catalog,
            floors: indexed,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn floors(&self) -> &[IndexedFloor] {
        &self.floors
    }

    pub fn floor_at(&self, idx: usize) -> Option<&IndexedFloor> {
        self.floors.get(idx)
    }

    /// Position of the floor with the given id
    pub fn position_of(&self, floor_id: u32) -> Option<usize> {
        self.floors.iter().position(|f| f.id() == floor_id)
    }

    pub fn len(&self) -> usize {
        self.floors.len()
    }
}
