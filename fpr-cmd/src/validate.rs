//! Check a parameter bundle without routing.

use anyhow::Context;
use fpr_engine::{Router, RunParameters, WeirSchedule};
use log::{info, warn};

/// Load and resolve `params_json`, reporting what the run would use.
pub fn run_validate(params_json: &str) -> anyhow::Result<()> {
    let params = RunParameters::from_json_path(params_json)
        .with_context(|| format!("Failed to load parameters from {params_json}"))?;
    let router = Router::new(&params).context("Invalid configuration")?;

    let structure = router.structure();
    let config = structure.config();
    info!(
        "{} structure, elevation window ({}, {}), max flow {}",
        structure.structure_type(),
        config.bottom_elev_or_min(),
        config.top_elev_or_max(),
        config.max_flow_or_unbounded()
    );
    if let WeirSchedule::Window(window) = structure.weir_schedule() {
        info!("Fish weir active {window}");
    }
    let options = router.options();
    info!(
        "Routing: nets {}, spillway normally used {}, zero-flow days {:?}",
        options.nets, options.spillway_normally_used, options.zero_flow_policy
    );
    if structure.uses_temperature_split() {
        info!("FSS capture follows the daily temperature split");
    }
    if params.route_effectiveness.fps_absent() {
        info!("No FPS route effectiveness data; FPS effectiveness is zero");
    }
    for warning in router.setup_warnings() {
        warn!("{warning}");
    }
    info!("{params_json} is valid");
    Ok(())
}
