use crate::error::{ConfigError, Result};
use crate::month_day::MonthDay;
use chrono::NaiveDate;
use fpr_utils::dates::calendar_year;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Hydrological classification of a year, used to pick temperature splits.
#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaterYearType {
    Abundant,
    Adequate,
    Insufficient,
    Deficit,
}

impl fmt::Display for WaterYearType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaterYearType::Abundant => write!(f, "abundant"),
            WaterYearType::Adequate => write!(f, "adequate"),
            WaterYearType::Insufficient => write!(f, "insufficient"),
            WaterYearType::Deficit => write!(f, "deficit"),
        }
    }
}

/// Source of the daily temperature-split fraction used by an FSS under
/// temperature control.
///
/// Implementations must be free of side effects: the engine may query them
/// from several threads at once.
pub trait TemperatureSplitSource: Send + Sync {
    /// Fraction of total outflow reserved for temperature management on `date`.
    fn split_for(&self, date: NaiveDate) -> Result<f64>;
}

/// One day of a temperature-split schedule, as configured.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct DailySplit {
    /// "DD-MM"
    pub month_day: String,
    pub split: f64,
}

/// Precomputed temperature splits as they arrive from the parameter bundle:
/// a water year type per calendar year, and a daily schedule per type.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
pub struct TemperatureSplits {
    pub water_year_types: BTreeMap<i32, WaterYearType>,
    pub splits: BTreeMap<WaterYearType, Vec<DailySplit>>,
}

/// Resolved form of [`TemperatureSplits`] with parsed month-days.
#[derive(Debug, PartialEq, Clone)]
pub struct TemperatureSplitTable {
    water_year_types: BTreeMap<i32, WaterYearType>,
    splits: BTreeMap<(WaterYearType, MonthDay), f64>,
}

impl TemperatureSplitTable {
    pub fn new(water_year_types: BTreeMap<i32, WaterYearType>) -> Self {
        TemperatureSplitTable {
            water_year_types,
            splits: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, year_type: WaterYearType, month_day: MonthDay, split: f64) {
        self.splits.insert((year_type, month_day), split);
    }

    pub fn water_year_type(&self, year: i32) -> Result<WaterYearType> {
        self.water_year_types
            .get(&year)
            .copied()
            .ok_or(ConfigError::MissingWaterYearType(year))
    }
}

impl TryFrom<&TemperatureSplits> for TemperatureSplitTable {
    type Error = ConfigError;

    fn try_from(value: &TemperatureSplits) -> Result<Self> {
        let mut table = TemperatureSplitTable::new(value.water_year_types.clone());
        for (year_type, days) in &value.splits {
            for daily in days {
                let month_day =
                    MonthDay::parse(&daily.month_day).map_err(|e| ConfigError::MalformedDate {
                        field: format!("temperature split month_day ({year_type})"),
                        reason: e.0,
                    })?;
                if !(0.0..=1.0).contains(&daily.split) {
                    return Err(ConfigError::InvalidTemperatureSplit {
                        month_day: daily.month_day.clone(),
                        year_type: *year_type,
                        split: daily.split,
                    });
                }
                table.insert(*year_type, month_day, daily.split);
            }
        }
        Ok(table)
    }
}

impl TemperatureSplitSource for TemperatureSplitTable {
    fn split_for(&self, date: NaiveDate) -> Result<f64> {
        let year_type = self.water_year_type(calendar_year(&date))?;
        let month_day = MonthDay::from(date);
        let found = self.splits.get(&(year_type, month_day)).or_else(|| {
            // schedules are often written for a 365-day year
            if month_day.is_leap_day() {
                self.splits.get(&(year_type, MonthDay { month: 2, day: 28 }))
            } else {
                None
            }
        });
        found
            .copied()
            .ok_or(ConfigError::MissingTemperatureSplit { date, year_type })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn splits_json() -> &'static str {
        r#"{
            "water_year_types": { "2019": "abundant", "2020": "deficit" },
            "splits": {
                "abundant": [ { "month_day": "01-05", "split": 0.25 } ],
                "deficit": [
                    { "month_day": "01-05", "split": 0.6 },
                    { "month_day": "28-02", "split": 0.4 }
                ]
            }
        }"#
    }

    fn table() -> TemperatureSplitTable {
        let splits: TemperatureSplits = serde_json::from_str(splits_json()).unwrap();
        TemperatureSplitTable::try_from(&splits).unwrap()
    }

    #[test]
    fn test_split_follows_water_year_type() {
        let table = table();
        let may_2019 = NaiveDate::from_ymd_opt(2019, 5, 1).unwrap();
        let may_2020 = NaiveDate::from_ymd_opt(2020, 5, 1).unwrap();
        assert_eq!(table.split_for(may_2019).unwrap(), 0.25);
        assert_eq!(table.split_for(may_2020).unwrap(), 0.6);
    }

    #[test]
    fn test_leap_day_falls_back_to_feb_28() {
        let table = table();
        let leap = NaiveDate::from_ymd_opt(2020, 2, 29).unwrap();
        assert_eq!(table.split_for(leap).unwrap(), 0.4);
    }

    #[test]
    fn test_missing_year_and_day_are_errors() {
        let table = table();
        let year_2021 = NaiveDate::from_ymd_opt(2021, 5, 1).unwrap();
        assert_eq!(
            table.split_for(year_2021).unwrap_err(),
            ConfigError::MissingWaterYearType(2021)
        );
        let june = NaiveDate::from_ymd_opt(2019, 6, 1).unwrap();
        assert!(matches!(
            table.split_for(june).unwrap_err(),
            ConfigError::MissingTemperatureSplit {
                year_type: WaterYearType::Abundant,
                ..
            }
        ));
    }

    #[test]
    fn test_out_of_range_split_is_rejected() {
        let mut splits: TemperatureSplits = serde_json::from_str(splits_json()).unwrap();
        splits.splits.insert(
            WaterYearType::Adequate,
            vec![DailySplit {
                month_day: "01-01".to_string(),
                split: 1.5,
            }],
        );
        assert!(matches!(
            TemperatureSplitTable::try_from(&splits),
            Err(ConfigError::InvalidTemperatureSplit { .. })
        ));
    }

    #[test]
    fn test_malformed_month_day_names_format() {
        let mut splits: TemperatureSplits = serde_json::from_str(splits_json()).unwrap();
        splits.splits.insert(
            WaterYearType::Adequate,
            vec![DailySplit {
                month_day: "May 1".to_string(),
                split: 0.1,
            }],
        );
        let err = TemperatureSplitTable::try_from(&splits).unwrap_err();
        assert!(err.to_string().contains("DD-MM"));
    }
}
