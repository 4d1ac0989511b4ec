//! Core types for routing downstream-migrating fish through dam outlets.
//!
//! Daily hydrology, structure configuration, outlet bookkeeping and the
//! error/warning taxonomy shared by the engine and the command line.

pub mod daily_record;
pub mod error;
pub mod month_day;
pub mod outlet;
pub mod structure;
pub mod warning;
pub mod water_year;

pub use daily_record::DailyRecord;
pub use error::{ConfigError, LoadError};
pub use month_day::{MonthDay, MonthDayWindow};
pub use outlet::{Outlet, OutletValues};
pub use structure::{StructureConfig, StructureType};
pub use warning::ConsistencyWarning;
pub use water_year::{
    TemperatureSplitSource, TemperatureSplitTable, TemperatureSplits, WaterYearType,
};
