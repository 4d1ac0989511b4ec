//! Route effectiveness tables and interpolation.
//!
//! This crate turns the configured effectiveness table into per-outlet
//! lookup functions mapping a flow share to a route effectiveness.

/// Piecewise-linear interpolation over a sorted set of points.
pub mod interpolation {
    /// A single point of a piecewise-linear curve
    #[derive(Debug, Clone, Copy, PartialEq)]
    pub struct DataPoint {
        pub x: f64,
        pub y: f64,
    }

    /// Linearly interpolate between two data points at `x`.
    ///
    /// If both points share the same `x`, the start value is returned.
    pub fn interpolate_pair(start: &DataPoint, end: &DataPoint, x: f64) -> f64 {
        let run = end.x - start.x;
        if run == 0.0 {
            return start.y;
        }
        let slope = (end.y - start.y) / run;
        start.y + slope * (x - start.x)
    }

    /// A curve that is either piecewise linear through sorted points or a
    /// constant.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Interpolant {
        Linear(Vec<DataPoint>),
        Constant(f64),
    }

    impl Interpolant {
        /// Evaluate the curve at `x`.
        ///
        /// Points must be sorted by strictly increasing `x`. Values of `x`
        /// outside the covered range take the nearest end value; there is no
        /// extrapolation. A NaN input yields NaN.
        pub fn evaluate(&self, x: f64) -> f64 {
            let points = match self {
                Interpolant::Constant(value) => return *value,
                Interpolant::Linear(points) => points,
            };
            if x.is_nan() {
                return f64::NAN;
            }
            let (first, last) = match (points.first(), points.last()) {
                (Some(first), Some(last)) => (first, last),
                _ => return f64::NAN,
            };
            if x <= first.x {
                return first.y;
            }
            if x >= last.x {
                return last.y;
            }
            // first index with point.x > x; always in 1..len here
            let upper = points.partition_point(|p| p.x <= x);
            interpolate_pair(&points[upper - 1], &points[upper], x)
        }
    }

}

/// Route effectiveness as a function of an outlet's share of total flow.
pub mod route_effectiveness {
    use crate::interpolation::{DataPoint, Interpolant};
    use fpr_core::error::{ConfigError, Result};
    use fpr_core::outlet::Outlet;
    use serde::{Deserialize, Serialize};

    /// Effectiveness values per outlet sampled at shared flow ratios.
    ///
    /// ```json
    /// {
    ///   "flow_ratio":        [0.0, 0.5, 1.0],
    ///   "spillway":          [0.9, 0.9, 0.95],
    ///   "turbine":           [0.8, 0.85, 0.9],
    ///   "regulating_outlet": [0.7, 0.7, 0.7],
    ///   "fps":               [1.5, 1.2, 1.0]
    /// }
    /// ```
    ///
    /// The `fps` column may be omitted, or given as all nulls, when there is
    /// no effectiveness data for the fish passage structure.
    #[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
    pub struct RouteEffectivenessTable {
        pub flow_ratio: Vec<f64>,
        pub spillway: Vec<f64>,
        pub turbine: Vec<f64>,
        pub regulating_outlet: Vec<f64>,
        #[serde(default)]
        pub fps: Option<Vec<Option<f64>>>,
    }

    impl RouteEffectivenessTable {
        /// True when the table carries no FPS effectiveness at all.
        pub fn fps_absent(&self) -> bool {
            match &self.fps {
                None => true,
                Some(values) => values.iter().all(Option::is_none),
            }
        }

        /// Check ratios and column shapes.
        pub fn validate(&self) -> Result<()> {
            let invalid = |reason: String| Err(ConfigError::InvalidEffectivenessTable(reason));
            let n = self.flow_ratio.len();
            if n < 2 {
                return invalid(format!("need at least two flow ratios, found {n}"));
            }
            if let Some(bad) = self
                .flow_ratio
                .iter()
                .find(|r| !r.is_finite() || **r < 0.0 || **r > 1.0)
            {
                return invalid(format!("flow ratio {bad} is outside [0, 1]"));
            }
            if self.flow_ratio.windows(2).any(|w| w[0] >= w[1]) {
                return invalid("flow ratios must be strictly increasing".to_string());
            }
            let columns = [
                (Outlet::Spillway, &self.spillway),
                (Outlet::Turbine, &self.turbine),
                (Outlet::RegulatingOutlet, &self.regulating_outlet),
            ];
            for (outlet, column) in columns {
                if column.len() != n {
                    return invalid(format!(
                        "{outlet} column has {} values for {n} flow ratios",
                        column.len()
                    ));
                }
                if column.iter().any(|v| !v.is_finite()) {
                    return invalid(format!("{outlet} column contains a non-finite value"));
                }
            }
            if let (Some(fps), false) = (&self.fps, self.fps_absent()) {
                if fps.len() != n {
                    return invalid(format!(
                        "fish passage structure column has {} values for {n} flow ratios",
                        fps.len()
                    ));
                }
                if fps.iter().any(|v| !matches!(v, Some(x) if x.is_finite())) {
                    return invalid(
                        "fish passage structure column is partially missing".to_string(),
                    );
                }
            }
            Ok(())
        }

        fn column(&self, outlet: Outlet) -> Option<Vec<f64>> {
            match outlet {
                Outlet::Spillway => Some(self.spillway.clone()),
                Outlet::Turbine => Some(self.turbine.clone()),
                Outlet::RegulatingOutlet => Some(self.regulating_outlet.clone()),
                Outlet::Fps => {
                    if self.fps_absent() {
                        None
                    } else {
                        self.fps
                            .as_ref()
                            .map(|values| values.iter().map(|v| v.unwrap_or(0.0)).collect())
                    }
                }
            }
        }
    }

    /// Build the lookup curve for one outlet.
    ///
    /// An absent FPS column yields the constant-zero curve.
    pub fn build_lookup(table: &RouteEffectivenessTable, outlet: Outlet) -> Result<Interpolant> {
        table.validate()?;
        Ok(lookup_unchecked(table, outlet))
    }

    fn lookup_unchecked(table: &RouteEffectivenessTable, outlet: Outlet) -> Interpolant {
        match table.column(outlet) {
            None => Interpolant::Constant(0.0),
            Some(values) => Interpolant::Linear(
                table
                    .flow_ratio
                    .iter()
                    .zip(values)
                    .map(|(x, y)| DataPoint { x: *x, y })
                    .collect(),
            ),
        }
    }

    /// Lookup curves for all four outlets.
    #[derive(Debug, Clone, PartialEq)]
    pub struct RouteLookups {
        spillway: Interpolant,
        turbine: Interpolant,
        regulating_outlet: Interpolant,
        fps: Interpolant,
    }

    impl RouteLookups {
        pub fn from_table(table: &RouteEffectivenessTable) -> Result<Self> {
            table.validate()?;
            if table.fps_absent() {
                log::info!(
                    "No fish passage structure effectiveness data; FPS route effectiveness is zero"
                );
            }
            Ok(RouteLookups {
                spillway: lookup_unchecked(table, Outlet::Spillway),
                turbine: lookup_unchecked(table, Outlet::Turbine),
                regulating_outlet: lookup_unchecked(table, Outlet::RegulatingOutlet),
                fps: lookup_unchecked(table, Outlet::Fps),
            })
        }

        pub fn lookup(&self, outlet: Outlet) -> &Interpolant {
            match outlet {
                Outlet::Spillway => &self.spillway,
                Outlet::Turbine => &self.turbine,
                Outlet::RegulatingOutlet => &self.regulating_outlet,
                Outlet::Fps => &self.fps,
            }
        }

        /// Route effectiveness of `outlet` at flow share `ratio`.
        pub fn effectiveness(&self, outlet: Outlet, ratio: f64) -> f64 {
            self.lookup(outlet).evaluate(ratio)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use approx::assert_abs_diff_eq;

        fn table() -> RouteEffectivenessTable {
            RouteEffectivenessTable {
                flow_ratio: vec![0.0, 0.5, 1.0],
                spillway: vec![0.9, 0.9, 0.95],
                turbine: vec![0.8, 0.85, 0.9],
                regulating_outlet: vec![0.7, 0.7, 0.7],
                fps: Some(vec![Some(1.5), Some(1.2), Some(1.0)]),
            }
        }

        #[test]
        fn test_lookup_interpolates_between_ratios() {
            let lookups = RouteLookups::from_table(&table()).unwrap();
            assert_abs_diff_eq!(
                lookups.effectiveness(Outlet::Turbine, 0.25),
                0.825,
                epsilon = 1e-12
            );
            assert_abs_diff_eq!(
                lookups.effectiveness(Outlet::Fps, 0.75),
                1.1,
                epsilon = 1e-12
            );
        }

        #[test]
        fn test_ratio_above_table_clamps_to_last_value() {
            let lookups = RouteLookups::from_table(&table()).unwrap();
            assert_eq!(lookups.effectiveness(Outlet::Spillway, 1.2), 0.95);
            assert_eq!(lookups.effectiveness(Outlet::Fps, 1.2), 1.0);
        }

        #[test]
        fn test_ratio_below_table_clamps_to_first_value() {
            let mut t = table();
            t.flow_ratio = vec![0.1, 0.5, 1.0];
            let lookups = RouteLookups::from_table(&t).unwrap();
            assert_eq!(lookups.effectiveness(Outlet::Turbine, 0.0), 0.8);
        }

        #[test]
        fn test_absent_fps_column_is_zero() {
            let mut t = table();
            t.fps = None;
            let lookups = RouteLookups::from_table(&t).unwrap();
            for ratio in [0.0, 0.3, 1.0, 1.2] {
                assert_eq!(lookups.effectiveness(Outlet::Fps, ratio), 0.0);
            }

            t.fps = Some(vec![None, None, None]);
            let fps = build_lookup(&t, Outlet::Fps).unwrap();
            assert_eq!(fps, Interpolant::Constant(0.0));
            assert_eq!(fps.evaluate(0.0), 0.0);
        }

        #[test]
        fn test_deserialize_without_fps() {
            let json = r#"{
                "flow_ratio": [0.0, 1.0],
                "spillway": [0.9, 0.9],
                "turbine": [0.8, 0.8],
                "regulating_outlet": [0.7, 0.7]
            }"#;
            let t: RouteEffectivenessTable = serde_json::from_str(json).unwrap();
            assert!(t.fps_absent());
            assert!(t.validate().is_ok());
        }

        #[test]
        fn test_validate_rejects_bad_tables() {
            let mut short = table();
            short.flow_ratio = vec![0.0];
            short.spillway = vec![0.9];
            assert!(short.validate().is_err());

            let mut unsorted = table();
            unsorted.flow_ratio = vec![0.0, 0.6, 0.5];
            assert!(unsorted.validate().is_err());

            let mut ragged = table();
            ragged.turbine.pop();
            assert!(ragged.validate().is_err());

            let mut partial = table();
            partial.fps = Some(vec![Some(1.0), None, Some(1.0)]);
            let err = partial.validate().unwrap_err();
            assert!(err.to_string().contains("partially missing"));

            let mut out_of_range = table();
            out_of_range.flow_ratio = vec![0.0, 0.5, 1.5];
            assert!(out_of_range.validate().is_err());
        }
    }
}
