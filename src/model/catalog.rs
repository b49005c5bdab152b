// Server-model catalog
//
// Static description of every hardware model a server record may reference:
// display name, height in rack units, power envelope and the symbol drawn in
// the rack view.

use super::{PowerRange, Server};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Symbol used for a model in the rack view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSymbol {
    /// Short badge printed on the faceplate
    pub label: String,
    /// Status LED color as RGB
    pub led: (u8, u8, u8),
}

/// One entry of the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerModel {
    pub display_name: String,
    pub rack_units: u8,
    pub power_range_watts: PowerRange,
    pub symbol: ModelSymbol,
}

impl ServerModel {
    /// "750W-1100W" style label for the power envelope
    pub fn power_label(&self) -> String {
        format!(
            "{}W-{}W",
            self.power_range_watts.min_watts, self.power_range_watts.max_watts
        )
    }

    /// Fraction of the model's maximum power drawn by `server`
    pub fn utilization(&self, server: &Server) -> f64 {
        let max = self.power_range_watts.max_watts;
        if max == 0 {
            return 0.0;
        }
        server.power_usage_watts as f64 / max as f64
    }
}

/// Model key -> model description
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    models: BTreeMap<String, ServerModel>,
}

impl Catalog {
    /// The two models shipped with rackmap
    pub fn builtin() -> Self {
        let mut catalog = Self::default();
        catalog.insert(
            "DELL-R730",
            ServerModel {
                display_name: "Dell PowerEdge R730".to_string(),
                rack_units: 2,
                power_range_watts: PowerRange::new(750, 1100),
                symbol: ModelSymbol {
                    label: "R730".to_string(),
                    led: (0, 255, 0),
                },
            },
        );
        catalog.insert(
            "HPE-DL380-G11",
            ServerModel {
                display_name: "HPE ProLiant DL380 Gen11".to_string(),
                rack_units: 2,
                power_range_watts: PowerRange::new(800, 1600),
                symbol: ModelSymbol {
                    label: "DL380".to_string(),
                    led: (0, 0, 255),
                },
            },
        );
        catalog
    }

    pub fn insert(&mut self, key: impl Into<String>, model: ServerModel) {
        self.models.insert(key.into(), model);
    }

    /// Add every model of `other`, replacing entries with the same key
    pub fn extend(&mut self, other: Catalog) {
        self.models.extend(other.models);
    }

    pub fn get(&self, key: &str) -> Option<&ServerModel> {
        self.models.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.models.contains_key(key)
    }

    /// Model keys in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.models.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Power utilization of a server against its model's maximum draw
    pub fn utilization(&self, server: &Server) -> Option<f64> {
        self.get(&server.model).map(|m| m.utilization(server))
    }
}
