//! Per-year projection output

use serde::{Deserialize, Serialize};

use crate::assumptions::ChannelMix;

/// Divisor used when reporting volumes and amounts in millions
pub const MILLION: f64 = 1_000_000.0;

/// Financial figures for one year of a chatbot scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearFinancials {
    pub conversion_rate: f64,
    pub new_customers: f64,
    pub retention_profit: f64,
    pub chatbot_savings: f64,
    /// Operating cost for the year (implementation cost included in year 0)
    pub costs: f64,
    pub net_profit: f64,
    pub cumulative_costs: f64,
    pub cumulative_profit: f64,
    pub roi_pct: f64,
}

/// A single row of projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRow {
    pub year: u32,
    pub total_contacts: f64,
    pub phone_contacts: f64,
    pub web_contacts: f64,
    pub chatbot_contacts: f64,

    /// Absent on the no-chatbot baseline
    pub financials: Option<YearFinancials>,
}

impl YearRow {
    pub fn from_mix(year: u32, mix: &ChannelMix) -> Self {
        Self {
            year,
            total_contacts: mix.total,
            phone_contacts: mix.phone,
            web_contacts: mix.web,
            chatbot_contacts: mix.chatbot,
            financials: None,
        }
    }
}

/// Complete projection for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub horizon_years: u32,
    /// True when the chatbot investment was not modeled
    pub baseline: bool,
    /// One row per year, 0..=horizon_years
    pub rows: Vec<YearRow>,
}

impl ProjectionResult {
    pub fn new(horizon_years: u32, baseline: bool) -> Self {
        Self {
            horizon_years,
            baseline,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, row: YearRow) {
        self.rows.push(row);
    }

    pub fn final_row(&self) -> Option<&YearRow> {
        self.rows.last()
    }

    fn financials(&self) -> impl Iterator<Item = &YearFinancials> {
        self.rows.iter().filter_map(|r| r.financials.as_ref())
    }

    /// Get summary statistics (`None` on the baseline)
    pub fn summary(&self) -> Option<ProjectionSummary> {
        let last = self.final_row()?.financials.as_ref()?;

        let break_even_year = self
            .rows
            .iter()
            .find(|r| matches!(&r.financials, Some(f) if f.cumulative_profit >= 0.0))
            .map(|r| r.year);

        Some(ProjectionSummary {
            years: self.rows.len() as u32,
            total_new_customers: self.financials().map(|f| f.new_customers).sum(),
            total_retention_profit: self.financials().map(|f| f.retention_profit).sum(),
            total_chatbot_savings: self.financials().map(|f| f.chatbot_savings).sum(),
            total_costs: self.financials().map(|f| f.costs).sum(),
            total_net_profit: self.financials().map(|f| f.net_profit).sum(),
            final_cumulative_costs: last.cumulative_costs,
            final_cumulative_profit: last.cumulative_profit,
            final_roi_pct: last.roi_pct,
            break_even_year,
        })
    }

    /// Cumulative profit contribution, in millions
    ///
    /// Steps are new customers, retention, savings and (negated) costs, each
    /// summed over all years.
    pub fn waterfall(&self) -> Waterfall {
        let components = [
            ("New Customers", self.financials().map(|f| f.new_customers).sum::<f64>()),
            ("Retention", self.financials().map(|f| f.retention_profit).sum::<f64>()),
            ("Savings", self.financials().map(|f| f.chatbot_savings).sum::<f64>()),
            ("Costs", -self.financials().map(|f| f.costs).sum::<f64>()),
        ];

        let mut running = 0.0;
        let steps = components
            .into_iter()
            .map(|(label, total)| {
                let value = total / MILLION;
                let start = running;
                running += value;
                WaterfallStep {
                    label: label.to_string(),
                    value,
                    start,
                    cumulative: running,
                }
            })
            .collect();

        Waterfall { steps }
    }

    /// Largest column total among the waterfall inputs, in millions
    ///
    /// Costs count with their positive sign here.
    pub fn contribution_column_max(&self) -> f64 {
        let columns = [
            self.financials().map(|f| f.new_customers).sum::<f64>(),
            self.financials().map(|f| f.retention_profit).sum::<f64>(),
            self.financials().map(|f| f.chatbot_savings).sum::<f64>(),
            self.financials().map(|f| f.costs).sum::<f64>(),
        ];
        columns
            .iter()
            .map(|total| total / MILLION)
            .fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub years: u32,
    pub total_new_customers: f64,
    pub total_retention_profit: f64,
    pub total_chatbot_savings: f64,
    pub total_costs: f64,
    pub total_net_profit: f64,
    pub final_cumulative_costs: f64,
    pub final_cumulative_profit: f64,
    pub final_roi_pct: f64,
    /// First year whose cumulative profit is not negative
    pub break_even_year: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterfallStep {
    pub label: String,
    pub value: f64,
    /// Bar base: cumulative total before this step
    pub start: f64,
    pub cumulative: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waterfall {
    pub steps: Vec<WaterfallStep>,
}

impl Waterfall {
    pub fn total(&self) -> f64 {
        self.steps.last().map(|s| s.cumulative).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_result_does_not_presize_rows() {
        let result = ProjectionResult::new(u32::MAX, false);
        assert!(result.rows.is_empty());
        assert_eq!(result.rows.capacity(), 0);
        assert!(result.summary().is_none());
        assert_eq!(result.waterfall().total(), 0.0);
    }
}
