/// Error types for the FPR core library
use crate::water_year::WaterYearType;
use crate::structure::StructureType;
use chrono::NaiveDate;
use thiserror::Error;

/// Fatal configuration problems. Any of these aborts the whole run.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Structure type tag not one of none/fsc/fss/fso/fish_weir
    #[error("Unrecognized structure type '{0}' (expected one of: none, fsc, fss, fso, fish_weir)")]
    UnknownStructureType(String),

    /// A month-day string could not be parsed
    #[error("Malformed {field}: {reason}")]
    MalformedDate { field: String, reason: String },

    /// The structure captures `max_flow` outright, so it must be bounded
    #[error("{0} structure requires a finite max_flow")]
    UnboundedCapacity(StructureType),

    /// Temperature control requested without a source of splits
    #[error("FSS temperature control is enabled but no temperature splits were provided")]
    MissingTemperatureSplits,

    /// No water year classification for a calendar year
    #[error("No water year type configured for year {0}")]
    MissingWaterYearType(i32),

    /// No temperature split for the day under its water year type
    #[error("No temperature split for {date} ({year_type})")]
    MissingTemperatureSplit {
        date: NaiveDate,
        year_type: WaterYearType,
    },

    /// Temperature split outside [0, 1]
    #[error("Temperature split {split} for {month_day} ({year_type}) is outside [0, 1]")]
    InvalidTemperatureSplit {
        month_day: String,
        year_type: WaterYearType,
        split: f64,
    },

    /// Route effectiveness table failed validation
    #[error("Invalid route effectiveness table: {0}")]
    InvalidEffectivenessTable(String),
}

/// Failures while loading daily records or parameter bundles.
#[derive(Error, Debug)]
pub enum LoadError {
    /// Failed to read an input file
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse CSV data
    #[error("Failed to parse CSV: {0}")]
    CsvParse(#[from] csv::Error),

    /// Failed to parse a JSON parameter bundle
    #[error("Failed to parse JSON parameters: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A daily record violates its invariants
    #[error("Invalid daily record at row {row} ({date}): {reason}")]
    InvalidRecord {
        row: usize,
        date: NaiveDate,
        reason: String,
    },

    /// The loaded configuration is unusable
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Type alias for Results using ConfigError
pub type Result<T> = std::result::Result<T, ConfigError>;
