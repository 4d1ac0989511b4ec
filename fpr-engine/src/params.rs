//! The parameter bundle handed to the engine for one run.
//!
//! ```json
//! {
//!   "structure": {
//!     "type": "fish_weir",
//!     "bottom_elev": 1400.0,
//!     "top_elev": 1520.0,
//!     "max_flow": 1500.0,
//!     "weir_start": "01-11",
//!     "weir_end": "28-02"
//!   },
//!   "route_effectiveness": {
//!     "flow_ratio": [0.0, 1.0],
//!     "spillway": [0.9, 0.95],
//!     "turbine": [0.8, 0.85],
//!     "regulating_outlet": [0.7, 0.7]
//!   },
//!   "routing": { "nets": false, "spillway_normally_used": true }
//! }
//! ```

use crate::distribution::RoutingOptions;
use fpr_core::error::LoadError;
use fpr_core::structure::StructureConfig;
use fpr_data::route_effectiveness::RouteEffectivenessTable;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct RunParameters {
    pub structure: StructureConfig,
    pub route_effectiveness: RouteEffectivenessTable,
    #[serde(default)]
    pub routing: RoutingOptions,
}

impl RunParameters {
    pub fn from_json(json: &str) -> Result<RunParameters, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<RunParameters, LoadError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
