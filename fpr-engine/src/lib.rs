//! Outlet fish-distribution engine.
//!
//! For each day the engine
//! 1. computes the flow captured by the fish passage structure ([`fps`]),
//! 2. reallocates fish-bearing flow among the outlets ([`allocation`]),
//! 3. weights flow shares by route effectiveness and distributes the
//!    approaching cohort ([`distribution`]).
//!
//! [`router`] runs the three steps over a whole series.

pub mod allocation;
pub mod distribution;
pub mod fps;
pub mod output;
pub mod params;
pub mod router;

pub use allocation::{allocate, OutletFlowAllocation};
pub use distribution::{
    distribute, distribute_verbose, DistributionResult, Passage, RoutingOptions,
    VerboseDistributionResult, ZeroFlowPolicy,
};
pub use fps::{compute_fps_flow, ResolvedStructure, WeirSchedule};
pub use params::RunParameters;
pub use router::{Execution, Router, RunReport};
