use crate::error::ConfigError;
use crate::water_year::TemperatureSplits;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of fish passage structure installed at the dam.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum StructureType {
    /// No structure
    None,
    /// Fixed collector drawing recirculated attraction water
    Fsc,
    /// Floating surface structure drawing from turbine and RO flow
    Fss,
    /// Fixed orifice drawing from spillway, then RO, then turbine
    Fso,
    /// Seasonal weir diverting spillway flow
    FishWeir,
}

impl StructureType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StructureType::None => "none",
            StructureType::Fsc => "fsc",
            StructureType::Fss => "fss",
            StructureType::Fso => "fso",
            StructureType::FishWeir => "fish_weir",
        }
    }
}

impl FromStr for StructureType {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace([' ', '-'], "_");
        match normalized.as_str() {
            "none" => Ok(StructureType::None),
            "fsc" => Ok(StructureType::Fsc),
            "fss" => Ok(StructureType::Fss),
            "fso" => Ok(StructureType::Fso),
            "fish_weir" | "weir" => Ok(StructureType::FishWeir),
            _ => Err(ConfigError::UnknownStructureType(s.to_string())),
        }
    }
}

impl TryFrom<String> for StructureType {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StructureType> for String {
    fn from(value: StructureType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for StructureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StructureType::None => write!(f, "NONE"),
            StructureType::Fsc => write!(f, "FSC"),
            StructureType::Fss => write!(f, "FSS"),
            StructureType::Fso => write!(f, "FSO"),
            StructureType::FishWeir => write!(f, "FISH WEIR"),
        }
    }
}

/// Engineering parameters of the fish passage structure.
///
/// Unset elevation bounds and capacity are unbounded. Weir dates are kept
/// as the raw "DD-MM" strings they were configured with and are parsed when
/// the configuration is resolved for a run.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct StructureConfig {
    #[serde(rename = "type")]
    pub structure_type: StructureType,
    #[serde(default)]
    pub bottom_elev: Option<f64>,
    #[serde(default)]
    pub top_elev: Option<f64>,
    #[serde(default)]
    pub max_flow: Option<f64>,
    /// First active day of a fish weir, "DD-MM"
    #[serde(default)]
    pub weir_start: Option<String>,
    /// Last active day of a fish weir, "DD-MM"
    #[serde(default)]
    pub weir_end: Option<String>,
    /// FSS only: capture is driven by the temperature split of total outflow
    #[serde(default)]
    pub temperature_control: bool,
    #[serde(default)]
    pub temperature_splits: Option<TemperatureSplits>,
}

impl StructureConfig {
    /// A configuration with no structure at all.
    pub fn none() -> Self {
        StructureConfig::new(StructureType::None)
    }

    /// Unbounded configuration of the given type.
    pub fn new(structure_type: StructureType) -> Self {
        StructureConfig {
            structure_type,
            bottom_elev: None,
            top_elev: None,
            max_flow: None,
            weir_start: None,
            weir_end: None,
            temperature_control: false,
            temperature_splits: None,
        }
    }

    pub fn bottom_elev_or_min(&self) -> f64 {
        self.bottom_elev.unwrap_or(f64::NEG_INFINITY)
    }

    pub fn top_elev_or_max(&self) -> f64 {
        self.top_elev.unwrap_or(f64::INFINITY)
    }

    pub fn max_flow_or_unbounded(&self) -> f64 {
        self.max_flow.unwrap_or(f64::INFINITY)
    }

    /// 1.0 when `elev` lies strictly inside the operating window, else 0.0.
    pub fn elevation_adequate(&self, elev: f64) -> f64 {
        if self.bottom_elev_or_min() < elev && elev < self.top_elev_or_max() {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structure_type_from_str() {
        assert_eq!("FSC".parse::<StructureType>().unwrap(), StructureType::Fsc);
        assert_eq!("fss".parse::<StructureType>().unwrap(), StructureType::Fss);
        assert_eq!(" Fso ".parse::<StructureType>().unwrap(), StructureType::Fso);
        assert_eq!(
            "Fish Weir".parse::<StructureType>().unwrap(),
            StructureType::FishWeir
        );
        assert_eq!(
            "fish_weir".parse::<StructureType>().unwrap(),
            StructureType::FishWeir
        );
        assert_eq!("None".parse::<StructureType>().unwrap(), StructureType::None);
    }

    #[test]
    fn test_unknown_structure_type_is_config_error() {
        let err = "ladder".parse::<StructureType>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownStructureType("ladder".to_string()));
    }

    #[test]
    fn test_blank_structure_type_is_config_error() {
        for blank in ["", "   "] {
            let err = blank.parse::<StructureType>().unwrap_err();
            assert_eq!(err, ConfigError::UnknownStructureType(blank.to_string()));
        }

        let err = serde_json::from_str::<StructureConfig>(r#"{ "type": "  " }"#).unwrap_err();
        assert!(err.to_string().contains("Unrecognized structure type"));
    }

    #[test]
    fn test_deserialize_structure_config() {
        let json = r#"{ "type": "FSS", "bottom_elev": 1400.0, "max_flow": 2000.0 }"#;
        let cfg: StructureConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.structure_type, StructureType::Fss);
        assert_eq!(cfg.bottom_elev, Some(1400.0));
        assert_eq!(cfg.top_elev, None);
        assert!(!cfg.temperature_control);

        let bad = r#"{ "type": "ladder" }"#;
        let err = serde_json::from_str::<StructureConfig>(bad).unwrap_err();
        assert!(err.to_string().contains("Unrecognized structure type"));
    }

    #[test]
    fn test_unset_bounds_are_unbounded() {
        let cfg = StructureConfig::new(StructureType::Fsc);
        assert_eq!(cfg.elevation_adequate(-1.0e9), 1.0);
        assert_eq!(cfg.elevation_adequate(1.0e9), 1.0);
        assert!(cfg.max_flow_or_unbounded().is_infinite());
    }

    #[test]
    fn test_elevation_window_is_strict() {
        let cfg = StructureConfig {
            bottom_elev: Some(100.0),
            top_elev: Some(200.0),
            ..StructureConfig::new(StructureType::Fsc)
        };
        assert_eq!(cfg.elevation_adequate(100.0), 0.0);
        assert_eq!(cfg.elevation_adequate(100.1), 1.0);
        assert_eq!(cfg.elevation_adequate(199.9), 1.0);
        assert_eq!(cfg.elevation_adequate(200.0), 0.0);
    }
}
