// Inventory data sources
//
// The floor plan does not care where racks and servers come from. A source
// hands over an Inventory; FloorPlan::new validates it afterwards.

mod fixture;
mod synthetic;

pub use fixture::FixtureSource;
pub use synthetic::SyntheticSource;

use crate::layout::ConfigError;
use crate::model::Inventory;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{origin} is not a valid floor document: {source}")]
    Parse {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid generator settings: {0}")]
    Config(#[from] ConfigError),
}

/// Anything that can produce floors for a session
pub trait FloorSource {
    /// Short description for logs and the header
    fn describe(&self) -> String;

    fn load(&self) -> Result<Inventory, SourceError>;
}
