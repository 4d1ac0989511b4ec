//! Route effectiveness weighting and the final per-outlet distribution of
//! the day's approaching cohort.

use crate::allocation::OutletFlowAllocation;
use chrono::NaiveDate;
use fpr_core::outlet::{Outlet, OutletValues};
use fpr_core::DailyRecord;
use fpr_data::route_effectiveness::RouteLookups;
use log::debug;
use serde::{Deserialize, Serialize};

/// What to report for a day whose passage cannot be determined because
/// there is no flow (Q.Tot = 0) or no effective route (adj.Total = 0).
#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroFlowPolicy {
    /// Report [`Passage::Undefined`] and leave the decision downstream
    #[default]
    Undefined,
    /// Report zero passage through every outlet
    ZeroPassage,
}

/// Operational switches for the distribution step.
#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct RoutingOptions {
    /// Nets exclude fish from the turbine and RO routes
    #[serde(default)]
    pub nets: bool,
    /// Whether the spillway is part of normal operations
    #[serde(default)]
    pub spillway_normally_used: bool,
    #[serde(default)]
    pub zero_flow_policy: ZeroFlowPolicy,
}

/// Share of the approaching cohort passing through each outlet.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub enum Passage {
    Routed(OutletValues),
    /// No flow or no effective route on this day
    Undefined,
}

impl Passage {
    pub fn routed(&self) -> Option<&OutletValues> {
        match self {
            Passage::Routed(values) => Some(values),
            Passage::Undefined => None,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Passage::Undefined)
    }
}

/// Final per-outlet proportions for one day.
///
/// When passage is routed, the four outlet proportions sum to
/// `approaching_daily_post_dpe` and adding `no_pass` gives
/// `approaching_daily`.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct DistributionResult {
    pub date: NaiveDate,
    pub passage: Passage,
    /// Fish that never reach the passage decision
    pub no_pass: f64,
}

/// [`DistributionResult`] plus the intermediate values behind it.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct VerboseDistributionResult {
    pub date: NaiveDate,
    pub passage: Passage,
    pub no_pass: f64,
    pub allocation: OutletFlowAllocation,
    /// Flow share per outlet (p.X); NaN when Q.Tot is zero
    pub shares: OutletValues,
    /// Route effectiveness per outlet (RE.X)
    pub effectiveness: OutletValues,
    /// Effectiveness-weighted normalizer (adj.Total)
    pub adj_total: f64,
}

impl From<&VerboseDistributionResult> for DistributionResult {
    fn from(value: &VerboseDistributionResult) -> Self {
        DistributionResult {
            date: value.date,
            passage: value.passage,
            no_pass: value.no_pass,
        }
    }
}

impl From<VerboseDistributionResult> for DistributionResult {
    fn from(value: VerboseDistributionResult) -> Self {
        (&value).into()
    }
}

/// Distribute the day's approaching cohort among the outlets.
pub fn distribute(
    day: &DailyRecord,
    allocation: &OutletFlowAllocation,
    lookups: &RouteLookups,
    options: &RoutingOptions,
) -> DistributionResult {
    distribute_verbose(day, allocation, lookups, options).into()
}

/// As [`distribute`], keeping flow shares, effectiveness and the normalizer.
pub fn distribute_verbose(
    day: &DailyRecord,
    allocation: &OutletFlowAllocation,
    lookups: &RouteLookups,
    options: &RoutingOptions,
) -> VerboseDistributionResult {
    let q_tot = allocation.q_tot;
    let shares = allocation.fish_bearing.map(|_, flow| {
        if q_tot > 0.0 {
            flow / q_tot
        } else {
            f64::NAN
        }
    });
    let effectiveness = shares.map(|outlet, share| lookups.effectiveness(outlet, share));
    let adj_total: f64 = Outlet::ALL
        .iter()
        .map(|outlet| effectiveness[*outlet] * shares[*outlet])
        .sum();

    let post_dpe = day.approaching_daily_post_dpe;
    let determinate = adj_total.is_finite() && adj_total != 0.0;
    let weighted = |outlet: Outlet| post_dpe * effectiveness[outlet] * shares[outlet] / adj_total;

    let passage = if options.nets && options.spillway_normally_used {
        // all passage is forced through the FPS
        Passage::Routed(OutletValues::new(0.0, 0.0, 0.0, post_dpe))
    } else if !determinate {
        match options.zero_flow_policy {
            ZeroFlowPolicy::Undefined => Passage::Undefined,
            ZeroFlowPolicy::ZeroPassage => Passage::Routed(OutletValues::default()),
        }
    } else if options.nets {
        let spill = weighted(Outlet::Spillway);
        Passage::Routed(OutletValues::new(spill, 0.0, 0.0, post_dpe - spill))
    } else {
        Passage::Routed(OutletValues::from_fn(weighted))
    };

    if passage.is_undefined() {
        debug!("{}: passage undefined (Q.Tot {q_tot}, adj.Total {adj_total})", day.date);
    }

    VerboseDistributionResult {
        date: day.date,
        passage,
        no_pass: day.approaching_daily - post_dpe,
        allocation: *allocation,
        shares,
        effectiveness,
        adj_total,
    }
}
