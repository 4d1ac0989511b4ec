//! Flow captured by the fish passage structure (FPS).
//!
//! Each structure type has its own capture policy. All of them except
//! [`StructureType::None`] are gated by the structure's elevation window:
//! outside `(bottom_elev, top_elev)` nothing is captured.

use chrono::NaiveDate;
use fpr_core::error::{ConfigError, Result};
use fpr_core::month_day::{MonthDay, MonthDayWindow};
use fpr_core::structure::{StructureConfig, StructureType};
use fpr_core::warning::ConsistencyWarning;
use fpr_core::water_year::{TemperatureSplitSource, TemperatureSplitTable};
use fpr_core::DailyRecord;
use log::{debug, warn};
use std::fmt;

/// When a fish weir operates.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum WeirSchedule {
    Window(MonthDayWindow),
    /// One or both bounds were not configured
    AlwaysActive,
}

impl WeirSchedule {
    pub fn is_active(&self, date: &NaiveDate) -> bool {
        match self {
            WeirSchedule::Window(window) => window.contains_date(date),
            WeirSchedule::AlwaysActive => true,
        }
    }
}

/// A [`StructureConfig`] checked and prepared for a run.
pub struct ResolvedStructure {
    config: StructureConfig,
    weir: WeirSchedule,
    temperature: Option<Box<dyn TemperatureSplitSource>>,
}

impl fmt::Debug for ResolvedStructure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedStructure")
            .field("config", &self.config)
            .field("weir", &self.weir)
            .field("temperature_control", &self.temperature.is_some())
            .finish()
    }
}

impl ResolvedStructure {
    /// Resolve a configuration, reading temperature splits from the config
    /// itself when FSS temperature control is enabled.
    pub fn resolve(config: &StructureConfig) -> Result<(Self, Vec<ConsistencyWarning>)> {
        Self::resolve_with(config, None)
    }

    /// Resolve a configuration, preferring `source` over any splits carried
    /// in the configuration.
    pub fn resolve_with(
        config: &StructureConfig,
        source: Option<Box<dyn TemperatureSplitSource>>,
    ) -> Result<(Self, Vec<ConsistencyWarning>)> {
        let mut warnings = Vec::new();

        let weir = match config.structure_type {
            StructureType::FishWeir => {
                let start = parse_weir_date("weir_start", config.weir_start.as_deref())?;
                let end = parse_weir_date("weir_end", config.weir_end.as_deref())?;
                match (start, end) {
                    (Some(start), Some(end)) => {
                        WeirSchedule::Window(MonthDayWindow::new(start, end))
                    }
                    (start, end) => {
                        let warning = ConsistencyWarning::MissingWeirWindow {
                            start_missing: start.is_none(),
                            end_missing: end.is_none(),
                        };
                        warn!("{warning}");
                        warnings.push(warning);
                        WeirSchedule::AlwaysActive
                    }
                }
            }
            _ => WeirSchedule::AlwaysActive,
        };

        if config.structure_type == StructureType::Fsc && config.max_flow.is_none() {
            return Err(ConfigError::UnboundedCapacity(StructureType::Fsc));
        }

        let temperature = if config.structure_type == StructureType::Fss
            && config.temperature_control
        {
            let source: Box<dyn TemperatureSplitSource> = match (source, &config.temperature_splits)
            {
                (Some(source), _) => source,
                (None, Some(splits)) => Box::new(TemperatureSplitTable::try_from(splits)?),
                (None, None) => return Err(ConfigError::MissingTemperatureSplits),
            };
            Some(source)
        } else {
            None
        };

        debug!(
            "Resolved {} structure: elevation ({}, {}), max flow {}",
            config.structure_type,
            config.bottom_elev_or_min(),
            config.top_elev_or_max(),
            config.max_flow_or_unbounded()
        );

        Ok((
            ResolvedStructure {
                config: config.clone(),
                weir,
                temperature,
            },
            warnings,
        ))
    }

    pub fn config(&self) -> &StructureConfig {
        &self.config
    }

    pub fn structure_type(&self) -> StructureType {
        self.config.structure_type
    }

    pub fn weir_schedule(&self) -> WeirSchedule {
        self.weir
    }

    /// True for an FSS operating under temperature control.
    pub fn uses_temperature_split(&self) -> bool {
        self.temperature.is_some()
    }

    /// Temperature split for `date`, or `None` when the structure does not
    /// use one.
    pub fn temperature_split(&self, date: NaiveDate) -> Result<Option<f64>> {
        match &self.temperature {
            Some(source) => source.split_for(date).map(Some),
            None => Ok(None),
        }
    }
}

fn parse_weir_date(field: &str, value: Option<&str>) -> Result<Option<MonthDay>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => MonthDay::parse(s)
            .map(Some)
            .map_err(|e| ConfigError::MalformedDate {
                field: field.to_string(),
                reason: e.0,
            }),
    }
}

/// Flow diverted to the fish passage structure on `day`.
///
/// `temp_split` is only consulted by an FSS under temperature control, for
/// which it is required.
pub fn compute_fps_flow(
    day: &DailyRecord,
    structure: &ResolvedStructure,
    temp_split: Option<f64>,
) -> Result<f64> {
    let config = &structure.config;
    let flow = match config.structure_type {
        StructureType::None => return Ok(0.0),
        StructureType::Fsc => fsc_flow(config),
        StructureType::Fss => {
            if structure.uses_temperature_split() {
                let split = temp_split.ok_or(ConfigError::MissingTemperatureSplits)?;
                fss_temperature_flow(day, config, split)
            } else {
                fss_flow(day, config)
            }
        }
        StructureType::Fso => fso_flow(day, config),
        StructureType::FishWeir => weir_flow(day, config, &structure.weir),
    };
    Ok(gate_by_elevation(day, config, flow))
}

fn gate_by_elevation(day: &DailyRecord, config: &StructureConfig, flow: f64) -> f64 {
    // an out-of-window day captures nothing, even with unbounded capacity
    if config.elevation_adequate(day.elev) > 0.0 {
        flow
    } else {
        0.0
    }
}

fn fsc_flow(config: &StructureConfig) -> f64 {
    config.max_flow_or_unbounded()
}

fn fss_flow(day: &DailyRecord, config: &StructureConfig) -> f64 {
    config
        .max_flow_or_unbounded()
        .min(day.turb_flow + day.ro_flow)
}

fn fss_temperature_flow(day: &DailyRecord, config: &StructureConfig, split: f64) -> f64 {
    config
        .max_flow_or_unbounded()
        .min(day.outflow * (1.0 - split))
}

fn fso_flow(day: &DailyRecord, config: &StructureConfig) -> f64 {
    config.max_flow_or_unbounded().min(day.outflow)
}

fn weir_flow(day: &DailyRecord, config: &StructureConfig, weir: &WeirSchedule) -> f64 {
    if weir.is_active(&day.date) {
        config.max_flow_or_unbounded().min(day.spill_flow)
    } else {
        0.0
    }
}
