//! Route a daily series and write the per-day distribution.

use anyhow::Context;
use fpr_core::DailyRecord;
use fpr_engine::output::{write_results, write_verbose_results};
use fpr_engine::{Execution, Router, RunParameters};
use log::{info, warn};
use std::fs::File;
use std::io::BufWriter;

/// Run the distribution engine over `daily_csv` with the parameters in
/// `params_json`, writing one CSV row per input day to `output_csv`.
///
/// Configuration errors abort before any output is written. Consistency
/// warnings are logged and do not stop the run.
pub fn run_distribute(
    params_json: &str,
    daily_csv: &str,
    output_csv: &str,
    verbose: bool,
    sequential: bool,
) -> anyhow::Result<()> {
    let params = RunParameters::from_json_path(params_json)
        .with_context(|| format!("Failed to load parameters from {params_json}"))?;
    let records = DailyRecord::from_csv_path(daily_csv)
        .with_context(|| format!("Failed to load daily records from {daily_csv}"))?;
    let router = Router::new(&params).context("Invalid configuration")?;

    let execution = if sequential {
        Execution::Sequential
    } else {
        Execution::Parallel
    };

    let create = || -> anyhow::Result<BufWriter<File>> {
        let file = File::create(output_csv)
            .with_context(|| format!("Failed to create {output_csv}"))?;
        Ok(BufWriter::new(file))
    };

    let warnings = if verbose {
        let report = router.run_verbose(&records, execution)?;
        write_verbose_results(create()?, &report.results)?;
        report.warnings
    } else {
        let report = router.run(&records, execution)?;
        write_results(create()?, &report.results)?;
        report.warnings
    };

    for warning in &warnings {
        warn!("{warning}");
    }
    info!(
        "Distribution complete: {} days, {} warnings. Output: {}",
        records.len(),
        warnings.len(),
        output_csv
    );
    Ok(())
}
