//! Scenario runner for side-by-side comparisons and sensitivity sweeps
//!
//! Holds the projection configuration once, then runs any number of
//! assumption sets against it. Scenarios share nothing, so pairs and sweeps
//! run on the rayon pool.

use log::info;
use rayon::prelude::*;
use serde::Serialize;

use crate::assumptions::{catalog, AssumptionValues, Assumptions};
use crate::error::Result;
use crate::projection::{Metric, ProjectionConfig, ProjectionEngine, ProjectionResult, Waterfall};

/// Headroom applied to the largest value when sizing a shared chart axis
pub const Y_AXIS_HEADROOM: f64 = 1.1;

/// A named assumption set
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub assumptions: Assumptions,
}

impl Scenario {
    pub fn new(name: impl Into<String>, assumptions: Assumptions) -> Self {
        Self {
            name: name.into(),
            assumptions,
        }
    }
}

/// Projection output labelled with its scenario name
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub name: String,
    pub projection: ProjectionResult,
}

/// One year of a metric for both scenarios
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricComparisonRow {
    pub year: u32,
    pub first: Option<f64>,
    pub second: Option<f64>,
}

/// Two scenarios projected over the same horizon
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioComparison {
    pub first: ScenarioResult,
    pub second: ScenarioResult,
}

impl ScenarioComparison {
    /// Year-by-year values of one metric for both scenarios
    pub fn metric_series(&self, metric: Metric) -> Vec<MetricComparisonRow> {
        self.first
            .projection
            .rows
            .iter()
            .zip(&self.second.projection.rows)
            .map(|(a, b)| MetricComparisonRow {
                year: a.year,
                first: metric.value(a),
                second: metric.value(b),
            })
            .collect()
    }

    /// Shared y-axis upper limit for plotting `metrics` of both scenarios
    pub fn metrics_y_limit(&self, metrics: &[Metric]) -> f64 {
        let max = [&self.first, &self.second]
            .iter()
            .flat_map(|s| s.projection.rows.iter())
            .flat_map(|row| metrics.iter().filter_map(move |m| m.value(row)))
            .fold(f64::NEG_INFINITY, f64::max);
        if max.is_finite() {
            max * Y_AXIS_HEADROOM
        } else {
            0.0
        }
    }

    /// Shared y-axis upper limit for the two waterfall charts
    pub fn waterfall_y_limit(&self) -> f64 {
        let max = self
            .first
            .projection
            .contribution_column_max()
            .max(self.second.projection.contribution_column_max());
        max * Y_AXIS_HEADROOM
    }

    pub fn waterfalls(&self) -> (Waterfall, Waterfall) {
        (self.first.projection.waterfall(), self.second.projection.waterfall())
    }
}

/// Outcome of one point in a sensitivity sweep
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepPoint {
    pub value: f64,
    pub final_cumulative_profit: f64,
    pub final_roi_pct: f64,
    pub break_even_year: Option<u32>,
}

/// Pre-configured runner for batch projections
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    config: ProjectionConfig,
}

impl ScenarioRunner {
    /// Runner projecting `horizon_years` with the default volume growth
    pub fn new(horizon_years: u32) -> Self {
        Self {
            config: ProjectionConfig {
                horizon_years,
                ..Default::default()
            },
        }
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run a single scenario
    pub fn run(&self, scenario: &Scenario) -> ScenarioResult {
        info!("running scenario '{}'", scenario.name);
        let engine = ProjectionEngine::new(scenario.assumptions.clone(), self.config.clone());
        ScenarioResult {
            name: scenario.name.clone(),
            projection: engine.project(),
        }
    }

    /// Run two scenarios side by side
    pub fn compare(&self, first: &Scenario, second: &Scenario) -> ScenarioComparison {
        let (first, second) = rayon::join(|| self.run(first), || self.run(second));
        ScenarioComparison { first, second }
    }

    /// Run several scenarios, results in input order
    pub fn run_all(&self, scenarios: &[Scenario]) -> Vec<ScenarioResult> {
        scenarios.par_iter().map(|s| self.run(s)).collect()
    }

    /// Vary one assumption over `points`, keeping everything else at `base`
    ///
    /// The baseline flag is ignored: a sweep always models the chatbot.
    pub fn sweep(&self, base: &AssumptionValues, key: &str, points: &[f64]) -> Result<Vec<SweepPoint>> {
        catalog::require_known(key)?;
        let config = ProjectionConfig {
            baseline: false,
            ..self.config.clone()
        };

        let points: Vec<Option<SweepPoint>> = points
            .par_iter()
            .map(|&value| -> Result<Option<SweepPoint>> {
                let assumptions = Assumptions::from_values(&base.clone().with(key, value))?;
                let projection = ProjectionEngine::new(assumptions, config.clone()).project();
                Ok(projection.summary().map(|summary| SweepPoint {
                    value,
                    final_cumulative_profit: summary.final_cumulative_profit,
                    final_roi_pct: summary.final_roi_pct,
                    break_even_year: summary.break_even_year,
                }))
            })
            .collect::<Result<_>>()?;

        Ok(points.into_iter().flatten().collect())
    }
}

/// `steps` evenly spaced points from `from` to `to` inclusive
pub fn linspace(from: f64, to: f64, steps: usize) -> Vec<f64> {
    match steps {
        0 => Vec::new(),
        1 => vec![from],
        _ => {
            let step = (to - from) / (steps - 1) as f64;
            (0..steps).map(|i| from + step * i as f64).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::keys;
    use crate::error::RoiError;
    use approx::assert_relative_eq;

    fn scenarios() -> (Scenario, Scenario) {
        let base = Assumptions::default_scenario();
        let improved = base.with_value(keys::CURRENT_CONVERSION, 0.015).unwrap();
        (Scenario::new("Scenario 1", base), Scenario::new("Scenario 2", improved))
    }

    #[test]
    fn test_compare_matches_individual_runs() {
        let runner = ScenarioRunner::new(6);
        let (a, b) = scenarios();
        let comparison = runner.compare(&a, &b);

        assert_eq!(comparison.first.name, "Scenario 1");
        assert_eq!(comparison.first.projection, runner.run(&a).projection);
        assert_eq!(comparison.second.projection, runner.run(&b).projection);
    }

    #[test]
    fn test_metric_series() {
        let runner = ScenarioRunner::new(6);
        let (a, b) = scenarios();
        let comparison = runner.compare(&a, &b);

        let series = comparison.metric_series(Metric::NewCustomers);
        assert_eq!(series.len(), 7);
        for row in &series {
            assert!(row.second.unwrap() > row.first.unwrap());
        }
    }

    #[test]
    fn test_y_limits() {
        let runner = ScenarioRunner::new(6);
        let (a, b) = scenarios();
        let comparison = runner.compare(&a, &b);

        let roi_max = comparison
            .metric_series(Metric::Roi)
            .iter()
            .flat_map(|r| [r.first.unwrap(), r.second.unwrap()])
            .fold(f64::NEG_INFINITY, f64::max);
        assert_relative_eq!(comparison.metrics_y_limit(&[Metric::Roi]), roi_max * 1.1);
        assert_eq!(comparison.metrics_y_limit(&[]), 0.0);

        let expected = comparison
            .first
            .projection
            .contribution_column_max()
            .max(comparison.second.projection.contribution_column_max())
            * 1.1;
        assert_eq!(comparison.waterfall_y_limit(), expected);
    }

    #[test]
    fn test_run_all_keeps_order() {
        let runner = ScenarioRunner::new(3);
        let (a, b) = scenarios();
        let results = runner.run_all(&[b.clone(), a.clone()]);
        assert_eq!(results[0].name, "Scenario 2");
        assert_eq!(results[1].name, "Scenario 1");
    }

    #[test]
    fn test_sweep_conversion() {
        let runner = ScenarioRunner::new(6);
        let points = linspace(0.001, 0.025, 5);
        let sweep = runner
            .sweep(&AssumptionValues::defaults(), keys::CURRENT_CONVERSION, &points)
            .unwrap();

        assert_eq!(sweep.len(), 5);
        for (point, value) in sweep.iter().zip(&points) {
            assert_eq!(point.value, *value);
        }
        for pair in sweep.windows(2) {
            assert!(pair[1].final_cumulative_profit >= pair[0].final_cumulative_profit);
        }
    }

    #[test]
    fn test_sweep_unknown_key() {
        let runner = ScenarioRunner::new(6);
        assert!(matches!(
            runner.sweep(&AssumptionValues::defaults(), "bogus", &[1.0]),
            Err(RoiError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_sweep_missing_key() {
        let runner = ScenarioRunner::new(6);
        let mut base = AssumptionValues::defaults();
        base.remove(keys::NPS_INCREASE);
        assert!(matches!(
            runner.sweep(&base, keys::CURRENT_CONVERSION, &[0.01]),
            Err(RoiError::MissingKey { .. })
        ));
    }

    #[test]
    fn test_linspace() {
        assert!(linspace(0.0, 1.0, 0).is_empty());
        assert_eq!(linspace(0.5, 1.0, 1), vec![0.5]);
        assert_eq!(linspace(0.0, 1.0, 5), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
