//! Daily hydrology and cohort-approach records.
//!
//! # CSV Format
//!
//! Headers are required:
//! `date,elev,outflow,spill_flow,turb_flow,ro_flow,approaching_daily,approaching_daily_post_dpe`
//!
//! ```text
//! date,elev,outflow,spill_flow,turb_flow,ro_flow,approaching_daily,approaching_daily_post_dpe
//! 2011-04-01,1480.5,9000,1500,7000,500,0.012,0.011
//! ```

use crate::error::LoadError;
use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Slack allowed when checking `approaching_daily_post_dpe <= approaching_daily`.
const APPROACH_TOLERANCE: f64 = 1e-12;

/// One simulated day of hydrology plus the share of the annual cohort
/// approaching the dam.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    /// Pool elevation
    pub elev: f64,
    /// Total outflow
    pub outflow: f64,
    pub spill_flow: f64,
    pub turb_flow: f64,
    pub ro_flow: f64,
    /// Proportion of the annual cohort approaching the dam today
    pub approaching_daily: f64,
    /// Same, after dam passage efficiency is applied
    pub approaching_daily_post_dpe: f64,
}

impl DailyRecord {
    /// Sum of spillway, turbine and RO flow. FPS flow is never part of it.
    pub fn total_outlet_flow(&self) -> f64 {
        self.turb_flow + self.spill_flow + self.ro_flow
    }

    /// Returns the first invariant this record breaks, if any.
    pub fn invariant_violation(&self) -> Option<String> {
        let flows = [
            ("elev", self.elev),
            ("outflow", self.outflow),
            ("spill_flow", self.spill_flow),
            ("turb_flow", self.turb_flow),
            ("ro_flow", self.ro_flow),
            ("approaching_daily", self.approaching_daily),
            ("approaching_daily_post_dpe", self.approaching_daily_post_dpe),
        ];
        if let Some((name, value)) = flows.iter().find(|(_, v)| !v.is_finite()) {
            return Some(format!("{name} is not a finite number ({value})"));
        }
        if let Some((name, value)) = flows[1..5].iter().find(|(_, v)| *v < 0.0) {
            return Some(format!("{name} is negative ({value})"));
        }
        if self.approaching_daily < 0.0 || self.approaching_daily_post_dpe < 0.0 {
            return Some("approach proportions must be non-negative".to_string());
        }
        if self.approaching_daily_post_dpe > self.approaching_daily + APPROACH_TOLERANCE {
            return Some(format!(
                "approaching_daily_post_dpe ({}) exceeds approaching_daily ({})",
                self.approaching_daily_post_dpe, self.approaching_daily
            ));
        }
        None
    }

    /// Parse a CSV string of daily records, validating every row.
    pub fn parse_daily_csv(csv_object: &str) -> Result<Vec<DailyRecord>, LoadError> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(csv_object.as_bytes());
        Self::collect_records(rdr)
    }

    /// Read and validate daily records from a CSV file.
    pub fn from_csv_path<P: AsRef<Path>>(path: P) -> Result<Vec<DailyRecord>, LoadError> {
        let rdr = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)?;
        Self::collect_records(rdr)
    }

    fn collect_records<R: std::io::Read>(
        mut rdr: csv::Reader<R>,
    ) -> Result<Vec<DailyRecord>, LoadError> {
        let mut records = Vec::new();
        for (index, row) in rdr.deserialize::<DailyRecord>().enumerate() {
            let record = row?;
            if let Some(reason) = record.invariant_violation() {
                return Err(LoadError::InvalidRecord {
                    // header is line 1
                    row: index + 2,
                    date: record.date,
                    reason,
                });
            }
            records.push(record);
        }
        log::info!("Loaded {} daily records", records.len());
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "date,elev,outflow,spill_flow,turb_flow,ro_flow,approaching_daily,approaching_daily_post_dpe
2011-04-01,1480.5,9000,1500,7000,500,0.012,0.011
2011-04-02, 1481.0 ,0,0,0,0,0.0,0.0
";

    #[test]
    fn test_parse_daily_csv() {
        let records = DailyRecord::parse_daily_csv(CSV).unwrap();
        assert_eq!(records.len(), 2);
        let first = &records[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2011, 4, 1).unwrap());
        assert_eq!(first.elev, 1480.5);
        assert_eq!(first.total_outlet_flow(), 9000.0);
        assert_eq!(records[1].elev, 1481.0);
        assert_eq!(records[1].total_outlet_flow(), 0.0);
    }

    #[test]
    fn test_negative_flow_is_rejected_with_row() {
        let csv = "date,elev,outflow,spill_flow,turb_flow,ro_flow,approaching_daily,approaching_daily_post_dpe
2011-04-01,1480.5,9000,1500,7000,500,0.012,0.011
2011-04-02,1480.5,9000,-1,7000,500,0.012,0.011
";
        match DailyRecord::parse_daily_csv(csv) {
            Err(LoadError::InvalidRecord { row, reason, .. }) => {
                assert_eq!(row, 3);
                assert!(reason.contains("spill_flow"));
            }
            other => panic!("expected InvalidRecord, got {other:?}"),
        }
    }

    #[test]
    fn test_post_dpe_above_approaching_is_rejected() {
        let csv = "date,elev,outflow,spill_flow,turb_flow,ro_flow,approaching_daily,approaching_daily_post_dpe
2011-04-01,1480.5,9000,1500,7000,500,0.010,0.011
";
        assert!(matches!(
            DailyRecord::parse_daily_csv(csv),
            Err(LoadError::InvalidRecord { row: 2, .. })
        ));
    }

    #[test]
    fn test_bad_date_is_csv_error() {
        let csv = "date,elev,outflow,spill_flow,turb_flow,ro_flow,approaching_daily,approaching_daily_post_dpe
04/01/2011,1480.5,9000,1500,7000,500,0.012,0.011
";
        assert!(matches!(
            DailyRecord::parse_daily_csv(csv),
            Err(LoadError::CsvParse(_))
        ));
    }
}
