use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

/// Non-fatal inconsistencies noticed while processing a run.
///
/// Warnings never stop the computation; they are logged and handed back to
/// the caller alongside the results.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub enum ConsistencyWarning {
    /// A fish weir is missing one or both date bounds and is treated as
    /// active on every day.
    MissingWeirWindow {
        start_missing: bool,
        end_missing: bool,
    },
    /// Spill flow was smaller than the weir capture, leaving negative
    /// fish-bearing spill.
    NegativeWeirSpill {
        date: NaiveDate,
        spill_flow: f64,
        weir_flow: f64,
    },
}

impl fmt::Display for ConsistencyWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsistencyWarning::MissingWeirWindow {
                start_missing,
                end_missing,
            } => {
                let missing = match (start_missing, end_missing) {
                    (true, true) => "start and end dates",
                    (true, false) => "start date",
                    _ => "end date",
                };
                write!(
                    f,
                    "Fish weir {missing} not set; the weir is assumed active every day"
                )
            }
            ConsistencyWarning::NegativeWeirSpill {
                date,
                spill_flow,
                weir_flow,
            } => write!(
                f,
                "{date}: spill flow {spill_flow} is less than fish weir flow {weir_flow}; \
                 check weir elevation and dates"
            ),
        }
    }
}
