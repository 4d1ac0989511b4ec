//! Running the engine over a daily series.
//!
//! Configuration is resolved once, before any day is routed, so fatal
//! configuration errors surface up front. Days are independent and are
//! routed in parallel unless a sequential run is requested; results keep
//! the input order either way.

use crate::allocation::allocate;
use crate::distribution::{
    distribute_verbose, DistributionResult, RoutingOptions, VerboseDistributionResult,
};
use crate::fps::{compute_fps_flow, ResolvedStructure};
use crate::params::RunParameters;
use fpr_core::error::Result;
use fpr_core::warning::ConsistencyWarning;
use fpr_core::water_year::TemperatureSplitSource;
use fpr_core::DailyRecord;
use fpr_data::route_effectiveness::RouteLookups;
use log::info;
use rayon::prelude::*;

/// How the days of a series are scheduled.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default)]
pub enum Execution {
    #[default]
    Parallel,
    Sequential,
}

/// Results of a run, one per input day in input order, plus every warning
/// raised while setting up and routing.
#[derive(Debug, PartialEq, Clone)]
pub struct RunReport<T> {
    pub results: Vec<T>,
    pub warnings: Vec<ConsistencyWarning>,
}

/// One routed day and the warning it raised, if any.
#[derive(Debug, PartialEq, Clone)]
pub struct DayOutcome {
    pub result: VerboseDistributionResult,
    pub warning: Option<ConsistencyWarning>,
}

/// Resolved, immutable inputs shared by every day of a run.
#[derive(Debug)]
pub struct Router {
    structure: ResolvedStructure,
    lookups: RouteLookups,
    options: RoutingOptions,
    setup_warnings: Vec<ConsistencyWarning>,
}

impl Router {
    pub fn new(params: &RunParameters) -> Result<Router> {
        Self::build(params, None)
    }

    /// Build a router whose FSS temperature splits come from `source`
    /// rather than from the parameter bundle.
    pub fn with_temperature_source(
        params: &RunParameters,
        source: Box<dyn TemperatureSplitSource>,
    ) -> Result<Router> {
        Self::build(params, Some(source))
    }

    fn build(
        params: &RunParameters,
        source: Option<Box<dyn TemperatureSplitSource>>,
    ) -> Result<Router> {
        let (structure, setup_warnings) =
            ResolvedStructure::resolve_with(&params.structure, source)?;
        let lookups = RouteLookups::from_table(&params.route_effectiveness)?;
        info!(
            "Routing with {} structure (nets: {}, spillway normally used: {})",
            structure.structure_type(),
            params.routing.nets,
            params.routing.spillway_normally_used
        );
        Ok(Router {
            structure,
            lookups,
            options: params.routing,
            setup_warnings,
        })
    }

    pub fn structure(&self) -> &ResolvedStructure {
        &self.structure
    }

    pub fn options(&self) -> &RoutingOptions {
        &self.options
    }

    /// Warnings raised while resolving the configuration.
    pub fn setup_warnings(&self) -> &[ConsistencyWarning] {
        &self.setup_warnings
    }

    /// Route a single day.
    pub fn route_day(&self, day: &DailyRecord) -> Result<DayOutcome> {
        let temp_split = self.structure.temperature_split(day.date)?;
        let fps_flow = compute_fps_flow(day, &self.structure, temp_split)?;
        let (allocation, warning) = allocate(day, fps_flow, self.structure.structure_type());
        let result = distribute_verbose(day, &allocation, &self.lookups, &self.options);
        Ok(DayOutcome { result, warning })
    }

    /// Route every day, keeping the intermediate flows, shares and
    /// effectiveness.
    pub fn run_verbose(
        &self,
        records: &[DailyRecord],
        execution: Execution,
    ) -> Result<RunReport<VerboseDistributionResult>> {
        let outcomes = match execution {
            Execution::Parallel => records
                .par_iter()
                .map(|day| self.route_day(day))
                .collect::<Result<Vec<_>>>()?,
            Execution::Sequential => records
                .iter()
                .map(|day| self.route_day(day))
                .collect::<Result<Vec<_>>>()?,
        };

        let mut warnings = self.setup_warnings.clone();
        let mut results = Vec::with_capacity(outcomes.len());
        for outcome in outcomes {
            warnings.extend(outcome.warning);
            results.push(outcome.result);
        }

        let undefined = results
            .iter()
            .filter(|r| r.passage.is_undefined())
            .count();
        info!(
            "Routed {} days: {} undefined, {} warnings",
            results.len(),
            undefined,
            warnings.len()
        );
        Ok(RunReport { results, warnings })
    }

    /// Route every day.
    pub fn run(
        &self,
        records: &[DailyRecord],
        execution: Execution,
    ) -> Result<RunReport<DistributionResult>> {
        let report = self.run_verbose(records, execution)?;
        Ok(RunReport {
            results: report.results.iter().map(DistributionResult::from).collect(),
            warnings: report.warnings,
        })
    }
}
