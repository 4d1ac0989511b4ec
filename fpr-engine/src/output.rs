//! CSV output of distribution results.
//!
//! Undefined passage and not-a-number intermediates are written as empty
//! cells.

use crate::distribution::{DistributionResult, Passage, VerboseDistributionResult};
use fpr_utils::dates::format_date;
use serde::Serialize;
use std::io::Write;

fn finite(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

fn passage_cells(passage: &Passage) -> [Option<f64>; 4] {
    match passage.routed() {
        Some(v) => [Some(v.spill), Some(v.turb), Some(v.ro), Some(v.fps)],
        None => [None; 4],
    }
}

/// One row of `F.*` proportions.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DistributionRow {
    pub date: String,
    pub f_spill: Option<f64>,
    pub f_turb: Option<f64>,
    pub f_ro: Option<f64>,
    pub f_fps: Option<f64>,
    pub f_no_pass: f64,
}

impl From<&DistributionResult> for DistributionRow {
    fn from(value: &DistributionResult) -> Self {
        let [f_spill, f_turb, f_ro, f_fps] = passage_cells(&value.passage);
        DistributionRow {
            date: format_date(&value.date),
            f_spill,
            f_turb,
            f_ro,
            f_fps,
            f_no_pass: value.no_pass,
        }
    }
}

/// A [`DistributionRow`] followed by flows, shares and effectiveness.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct VerboseDistributionRow {
    pub date: String,
    pub f_spill: Option<f64>,
    pub f_turb: Option<f64>,
    pub f_ro: Option<f64>,
    pub f_fps: Option<f64>,
    pub f_no_pass: f64,
    pub q_tot: f64,
    pub fps_flow: f64,
    pub spill_flow: f64,
    pub turb_flow: f64,
    pub ro_flow: f64,
    pub b_spill: f64,
    pub b_turb: f64,
    pub b_ro: f64,
    pub b_fps: f64,
    pub p_spill: Option<f64>,
    pub p_turb: Option<f64>,
    pub p_ro: Option<f64>,
    pub p_fps: Option<f64>,
    pub re_spill: Option<f64>,
    pub re_turb: Option<f64>,
    pub re_ro: Option<f64>,
    pub re_fps: Option<f64>,
    pub adj_total: Option<f64>,
}

impl From<&VerboseDistributionResult> for VerboseDistributionRow {
    fn from(value: &VerboseDistributionResult) -> Self {
        let [f_spill, f_turb, f_ro, f_fps] = passage_cells(&value.passage);
        let alloc = &value.allocation;
        VerboseDistributionRow {
            date: format_date(&value.date),
            f_spill,
            f_turb,
            f_ro,
            f_fps,
            f_no_pass: value.no_pass,
            q_tot: alloc.q_tot,
            fps_flow: alloc.fps_flow,
            spill_flow: alloc.outlet_flows.spill,
            turb_flow: alloc.outlet_flows.turb,
            ro_flow: alloc.outlet_flows.ro,
            b_spill: alloc.fish_bearing.spill,
            b_turb: alloc.fish_bearing.turb,
            b_ro: alloc.fish_bearing.ro,
            b_fps: alloc.fish_bearing.fps,
            p_spill: finite(value.shares.spill),
            p_turb: finite(value.shares.turb),
            p_ro: finite(value.shares.ro),
            p_fps: finite(value.shares.fps),
            re_spill: finite(value.effectiveness.spill),
            re_turb: finite(value.effectiveness.turb),
            re_ro: finite(value.effectiveness.ro),
            re_fps: finite(value.effectiveness.fps),
            adj_total: finite(value.adj_total),
        }
    }
}

fn write_rows<W: Write, R: Serialize>(
    writer: W,
    rows: impl Iterator<Item = R>,
) -> csv::Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write results as CSV with a header row.
pub fn write_results<W: Write>(writer: W, results: &[DistributionResult]) -> csv::Result<()> {
    write_rows(writer, results.iter().map(DistributionRow::from))
}

/// Write verbose results as CSV with a header row.
pub fn write_verbose_results<W: Write>(
    writer: W,
    results: &[VerboseDistributionResult],
) -> csv::Result<()> {
    write_rows(writer, results.iter().map(VerboseDistributionRow::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use fpr_core::outlet::OutletValues;

    #[test]
    fn test_write_results_with_undefined_day() {
        let results = vec![
            DistributionResult {
                date: NaiveDate::from_ymd_opt(2020, 5, 1).unwrap(),
                passage: Passage::Routed(OutletValues::new(0.25, 0.5, 0.0, 0.125)),
                no_pass: 0.125,
            },
            DistributionResult {
                date: NaiveDate::from_ymd_opt(2020, 5, 2).unwrap(),
                passage: Passage::Undefined,
                no_pass: 0.0,
            },
        ];
        let mut buffer = Vec::new();
        write_results(&mut buffer, &results).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "date,f_spill,f_turb,f_ro,f_fps,f_no_pass");
        assert_eq!(lines[1], "2020-05-01,0.25,0.5,0.0,0.125,0.125");
        assert_eq!(lines[2], "2020-05-02,,,,,0.0");
    }
}
