//! Redistribution of outlet flow into fish-bearing flow.
//!
//! The structure type decides where the FPS capture comes from: added
//! attraction water (FSC), turbine and RO (FSS), spillway first (FSO) or
//! spillway only (fish weir).

use fpr_core::outlet::OutletValues;
use fpr_core::structure::StructureType;
use fpr_core::warning::ConsistencyWarning;
use fpr_core::DailyRecord;
use log::warn;
use serde::Serialize;

/// Flow bookkeeping for one day after the FPS capture is accounted for.
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct OutletFlowAllocation {
    /// Flow captured by the fish passage structure
    pub fps_flow: f64,
    /// Outlet flows after physical diversion. FSO and fish weir captures
    /// reduce the outlets they draw from; `fps` carries the capture.
    pub outlet_flows: OutletValues,
    /// Fish-bearing flow per outlet (B.X)
    pub fish_bearing: OutletValues,
    /// Total flow the fish-bearing shares are measured against (Q.Tot)
    pub q_tot: f64,
}

/// Allocate the day's flow among the outlets for `structure_type`.
///
/// Returns a warning when a fish weir captured more than the spillway
/// carried.
pub fn allocate(
    day: &DailyRecord,
    fps_flow: f64,
    structure_type: StructureType,
) -> (OutletFlowAllocation, Option<ConsistencyWarning>) {
    let raw = OutletValues::new(day.spill_flow, day.turb_flow, day.ro_flow, 0.0);
    let q_tot = day.total_outlet_flow();
    match structure_type {
        StructureType::None => (allocate_none(raw, q_tot), None),
        StructureType::Fsc => (allocate_fsc(raw, q_tot, fps_flow), None),
        StructureType::Fss => (allocate_fss(raw, q_tot, fps_flow), None),
        StructureType::Fso => (allocate_fso(raw, fps_flow), None),
        StructureType::FishWeir => allocate_weir(day, raw, q_tot, fps_flow),
    }
}

fn allocate_none(raw: OutletValues, q_tot: f64) -> OutletFlowAllocation {
    OutletFlowAllocation {
        fps_flow: 0.0,
        outlet_flows: raw,
        fish_bearing: raw,
        q_tot,
    }
}

/// The collector adds recirculated water on top of Q.Tot, so every route,
/// the FPS included, is diluted by the same multiplier and the fish-bearing
/// total stays at Q.Tot.
fn allocate_fsc(raw: OutletValues, q_tot: f64, fps_flow: f64) -> OutletFlowAllocation {
    let denominator = q_tot + fps_flow;
    let multiplier = if denominator > 0.0 {
        q_tot / denominator
    } else {
        0.0
    };
    let with_fps = OutletValues { fps: fps_flow, ..raw };
    OutletFlowAllocation {
        fps_flow,
        outlet_flows: with_fps,
        fish_bearing: with_fps.map(|_, flow| flow * multiplier),
        q_tot,
    }
}

/// Capture comes out of turbine and RO in proportion to their flows;
/// shortfalls clip at zero rather than going negative.
fn allocate_fss(raw: OutletValues, q_tot: f64, fps_flow: f64) -> OutletFlowAllocation {
    let powerhouse = raw.turb + raw.ro;
    let pct_ro = if powerhouse > 0.0 {
        raw.ro / powerhouse
    } else {
        0.0
    };
    let fish_bearing = OutletValues {
        spill: raw.spill,
        turb: (raw.turb - fps_flow * (1.0 - pct_ro)).max(0.0),
        ro: (raw.ro - fps_flow * pct_ro).max(0.0),
        fps: fps_flow,
    };
    OutletFlowAllocation {
        fps_flow,
        outlet_flows: OutletValues { fps: fps_flow, ..raw },
        fish_bearing,
        q_tot,
    }
}

/// Capture comes from the spillway, then the RO, then the turbines. The
/// diversion is a real reduction of outlet flow.
fn allocate_fso(raw: OutletValues, fps_flow: f64) -> OutletFlowAllocation {
    let spill = (raw.spill - fps_flow).max(0.0);
    let spill_deficit = (raw.spill - fps_flow).min(0.0);
    let ro = (raw.ro + spill_deficit).max(0.0);
    let ro_deficit = (raw.ro + spill_deficit).min(0.0);
    let turb = (raw.turb + ro_deficit).max(0.0);
    let fish_bearing = OutletValues::new(spill, turb, ro, fps_flow);
    OutletFlowAllocation {
        fps_flow,
        outlet_flows: fish_bearing,
        fish_bearing,
        // equals the pre-diversion total unless the capture exceeds it
        q_tot: fish_bearing.sum(),
    }
}

/// Capture comes from the spillway only and may drive it negative.
fn allocate_weir(
    day: &DailyRecord,
    raw: OutletValues,
    q_tot: f64,
    fps_flow: f64,
) -> (OutletFlowAllocation, Option<ConsistencyWarning>) {
    let fish_bearing = OutletValues {
        spill: raw.spill - fps_flow,
        fps: fps_flow,
        ..raw
    };
    let warning = if fish_bearing.spill < 0.0 {
        let warning = ConsistencyWarning::NegativeWeirSpill {
            date: day.date,
            spill_flow: raw.spill,
            weir_flow: fps_flow,
        };
        warn!("{warning}");
        Some(warning)
    } else {
        None
    };
    (
        OutletFlowAllocation {
            fps_flow,
            outlet_flows: fish_bearing,
            fish_bearing,
            q_tot,
        },
        warning,
    )
}
