//! Core projection engine for yearly chatbot ROI projections

use log::{debug, info};

use super::records::{ProjectionResult, YearFinancials, YearRow};
use super::state::ProjectionState;
use crate::assumptions::{catalog::DEFAULT_HORIZON_YEARS, Assumptions, VolumeGrowth};

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionConfig {
    /// Last projection year; rows run from year 0 to this year inclusive
    pub horizon_years: u32,

    /// Project the no-chatbot contact breakdown only
    pub baseline: bool,

    /// Growth of the overall contact volume
    pub growth: VolumeGrowth,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            horizon_years: DEFAULT_HORIZON_YEARS,
            baseline: false,
            growth: VolumeGrowth::default(),
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions and config
    pub fn new(assumptions: Assumptions, config: ProjectionConfig) -> Self {
        Self { assumptions, config }
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run the projection for years 0..=horizon
    pub fn project(&self) -> ProjectionResult {
        let mut result = ProjectionResult::new(self.config.horizon_years, self.config.baseline);
        let mut state = ProjectionState::new();

        for year in 0..=self.config.horizon_years {
            let row = if self.config.baseline {
                self.baseline_year(year)
            } else {
                self.calculate_year(&mut state)
            };
            result.add_row(row);
            state.advance_year();
        }

        match result.summary() {
            Some(summary) => info!(
                "projected {} years: cumulative profit {:.0}, ROI {:.1}%",
                summary.years, summary.final_cumulative_profit, summary.final_roi_pct
            ),
            None => info!("projected {} baseline years", result.rows.len()),
        }

        result
    }

    /// Contact breakdown without the chatbot; no financial figures
    fn baseline_year(&self, year: u32) -> YearRow {
        YearRow::from_mix(year, &self.assumptions.contacts.baseline_mix())
    }

    /// Calculate one year of the chatbot scenario
    fn calculate_year(&self, state: &mut ProjectionState) -> YearRow {
        let a = &self.assumptions;
        let year = state.year;

        let mix = a.contacts.channel_mix(year, &self.config.growth);
        let mut row = YearRow::from_mix(year, &mix);

        let conversion_rate = a.conversion.conversion_rate(year);
        let new_customers = a.pricing.new_customers(mix.total, conversion_rate);

        let retention_profit =
            a.retention
                .retention_profit(new_customers, year, a.pricing.own_policy_price);
        let chatbot_savings = a.costs.chatbot_savings(mix.total);

        let costs = a.costs.total_cost(year);
        let net_profit = retention_profit + chatbot_savings - costs;
        state.accumulate(costs, net_profit);

        debug!(
            "year {}: contacts {:.0}, new customers {:.1}, net profit {:.0}",
            year, mix.total, new_customers, net_profit
        );

        row.financials = Some(YearFinancials {
            conversion_rate,
            new_customers,
            retention_profit,
            chatbot_savings,
            costs,
            net_profit,
            cumulative_costs: state.cumulative_cost,
            cumulative_profit: state.cumulative_profit,
            roi_pct: state.roi_pct(),
        });

        row
    }
}

/// Project one scenario with the default volume growth
pub fn project(assumptions: &Assumptions, horizon_years: u32, baseline: bool) -> ProjectionResult {
    let config = ProjectionConfig {
        horizon_years,
        baseline,
        ..Default::default()
    };
    ProjectionEngine::new(assumptions.clone(), config).project()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::{ChannelDrift, ChannelShares};
    use crate::projection::Metric;
    use approx::assert_relative_eq;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn financials(row: &YearRow) -> &YearFinancials {
        row.financials.as_ref().expect("chatbot rows carry financials")
    }

    #[test]
    fn test_projection_runs() {
        let result = project(&Assumptions::default_scenario(), 6, false);

        assert_eq!(result.rows.len(), 7);
        for (i, row) in result.rows.iter().enumerate() {
            assert_eq!(row.year, i as u32);
            assert!(row.financials.is_some());
        }
    }

    #[test]
    fn test_reference_scenario_costs() {
        let result = project(&Assumptions::default_scenario(), 6, false);

        // 80_000 * 12 + 1_030_000, no economies of scale in year 0
        assert_eq!(financials(&result.rows[0]).costs, 1_990_000.0);
        assert_relative_eq!(
            financials(&result.rows[1]).costs,
            932_038.83,
            epsilon = 0.01
        );
        for row in &result.rows[1..] {
            let f = financials(row);
            assert!(f.costs < 960_000.0, "year {} includes one-time costs", row.year);
        }
    }

    #[test]
    fn test_reference_scenario_year_zero() {
        let result = project(&Assumptions::default_scenario(), 6, false);
        let row = &result.rows[0];
        let f = financials(row);

        assert_eq!(row.total_contacts, 1_277_500.0);
        assert_relative_eq!(row.chatbot_contacts, 1_277_500.0 * 0.05, max_relative = 1e-12);
        assert_relative_eq!(f.conversion_rate, 0.01);
        assert_relative_eq!(f.new_customers, 12_775.0, max_relative = 1e-12);
        // (2_000_000 + 12_775) * 0.02 * 60
        assert_relative_eq!(f.retention_profit, 2_415_330.0, max_relative = 1e-12);
        // 1_277_500 * 0.45
        assert_relative_eq!(f.chatbot_savings, 574_875.0, max_relative = 1e-12);
        assert_relative_eq!(
            f.net_profit,
            2_415_330.0 + 574_875.0 - 1_990_000.0,
            max_relative = 1e-12
        );
        assert_relative_eq!(f.roi_pct, f.cumulative_profit / f.cumulative_costs * 100.0);
    }

    #[test]
    fn test_cumulative_totals_and_roi() {
        let result = project(&Assumptions::default_scenario(), 8, false);

        let mut cost = 0.0;
        let mut profit = 0.0;
        for row in &result.rows {
            let f = financials(row);
            cost += f.costs;
            profit += f.net_profit;
            assert_relative_eq!(f.cumulative_costs, cost, max_relative = 1e-12);
            assert_relative_eq!(f.cumulative_profit, profit, max_relative = 1e-12);
            assert_eq!(f.roi_pct, f.cumulative_profit / f.cumulative_costs * 100.0);
        }
    }

    #[test]
    fn test_roi_zero_when_nothing_spent() {
        let mut assumptions = Assumptions::default_scenario();
        assumptions.costs.first_year_costs = 0.0;
        assumptions.costs.recurring_monthly_costs = 0.0;

        let result = project(&assumptions, 4, false);
        for row in &result.rows {
            let f = financials(row);
            assert_eq!(f.cumulative_costs, 0.0);
            assert_eq!(f.roi_pct, 0.0);
            assert!(f.cumulative_profit > 0.0);
        }
    }

    #[test]
    fn test_contact_volume_grows_one_percent_per_year() {
        let result = project(&Assumptions::default_scenario(), 5, false);
        for row in &result.rows {
            let expected = 1_277_500.0 * (1.0 + 0.01 * row.year as f64);
            assert_relative_eq!(row.total_contacts, expected, max_relative = 1e-12);
            let channels = row.phone_contacts + row.web_contacts + row.chatbot_contacts;
            assert!(channels <= row.total_contacts * (1.0 + 1e-12));
        }
    }

    #[test]
    fn test_chatbot_share_rises() {
        let result = project(&Assumptions::default_scenario(), 10, false);
        for pair in result.rows.windows(2) {
            let early = pair[0].chatbot_contacts / pair[0].total_contacts;
            let late = pair[1].chatbot_contacts / pair[1].total_contacts;
            assert!(late > early);
            let early_phone = pair[0].phone_contacts / pair[0].total_contacts;
            let late_phone = pair[1].phone_contacts / pair[1].total_contacts;
            assert!(late_phone < early_phone);
        }
    }

    #[test]
    fn test_savings_follow_total_volume() {
        let result = project(&Assumptions::default_scenario(), 3, false);
        for row in &result.rows {
            assert_relative_eq!(
                financials(row).chatbot_savings,
                row.total_contacts * 0.45,
                max_relative = 1e-9
            );
        }
    }

    #[test]
    fn test_negative_retention_preserved() {
        let mut assumptions = Assumptions::default_scenario();
        assumptions.retention.nps_diminishing_rate = 0.25;

        let result = project(&assumptions, 6, false);
        // Effect is 0.02 * (1 - 5 * 0.25) < 0 from year 5
        assert!(financials(&result.rows[5]).retention_profit < 0.0);
        assert!(financials(&result.rows[6]).retention_profit < 0.0);
    }

    #[test]
    fn test_baseline_has_no_chatbot_or_financials() {
        let mut assumptions = Assumptions::default_scenario();
        assumptions.contacts.initial_shares.chatbot = 0.4;
        assumptions.contacts.drift.chatbot_increase = 0.2;

        let result = project(&assumptions, 6, true);
        assert!(result.baseline);
        assert_eq!(result.rows.len(), 7);
        for row in &result.rows {
            assert_eq!(row.chatbot_contacts, 0.0);
            assert!(row.financials.is_none());
            assert_eq!(row.total_contacts, 1_277_500.0);
            assert_relative_eq!(row.phone_contacts, 1_277_500.0 * 0.6, max_relative = 1e-12);
        }
        assert!(result.summary().is_none());
        assert_eq!(result.waterfall().total(), 0.0);
    }

    #[test]
    fn test_zero_horizon_single_row() {
        let result = project(&Assumptions::default_scenario(), 0, false);
        assert_eq!(result.rows.len(), 1);
        assert_eq!(financials(&result.rows[0]).cumulative_costs, 1_990_000.0);
    }

    #[test]
    fn test_custom_growth() {
        let config = ProjectionConfig {
            horizon_years: 3,
            baseline: false,
            growth: VolumeGrowth::none(),
        };
        let result = ProjectionEngine::new(Assumptions::default_scenario(), config).project();
        for row in &result.rows {
            assert_eq!(row.total_contacts, 1_277_500.0);
        }
    }

    #[test]
    fn test_summary_and_waterfall() {
        let result = project(&Assumptions::default_scenario(), 6, false);
        let summary = result.summary().unwrap();
        let last = financials(result.final_row().unwrap());

        assert_eq!(summary.years, 7);
        assert_eq!(summary.final_cumulative_profit, last.cumulative_profit);
        assert_relative_eq!(summary.total_costs, last.cumulative_costs, max_relative = 1e-12);
        assert_relative_eq!(
            summary.total_net_profit,
            summary.total_retention_profit + summary.total_chatbot_savings - summary.total_costs,
            max_relative = 1e-9
        );
        // Year 0 nets 2_415_330 + 574_875 - 1_990_000 > 0
        assert_eq!(summary.break_even_year, Some(0));

        let waterfall = result.waterfall();
        let labels: Vec<_> = waterfall.steps.iter().map(|s| s.label.as_str()).collect();
        assert_eq!(labels, vec!["New Customers", "Retention", "Savings", "Costs"]);
        assert_eq!(waterfall.steps[0].start, 0.0);
        assert!(waterfall.steps[3].value < 0.0);
        for pair in waterfall.steps.windows(2) {
            assert_eq!(pair[1].start, pair[0].cumulative);
        }
        assert_relative_eq!(
            waterfall.steps[3].value,
            -summary.total_costs / 1_000_000.0,
            max_relative = 1e-12
        );

        let max = result.contribution_column_max();
        assert_relative_eq!(max, summary.total_retention_profit / 1_000_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_break_even_later_year() {
        let mut assumptions = Assumptions::default_scenario();
        assumptions.costs.first_year_costs = 5_000_000.0;
        let result = project(&assumptions, 6, false);
        let summary = result.summary().unwrap();
        let year = summary.break_even_year.unwrap();
        assert!(year > 0);
        let before = financials(&result.rows[year as usize - 1]);
        assert!(before.cumulative_profit < 0.0);
    }

    #[test]
    fn test_metric_values_for_rows() {
        let result = project(&Assumptions::default_scenario(), 2, false);
        let row = &result.rows[0];
        assert_eq!(Metric::Costs.value(row), Some(1.99));
        assert_eq!(Metric::TotalContacts.value(row), Some(1.2775));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(64))]

        #[test]
        fn prop_roi_matches_cumulative_ratio(
            horizon in 0u32..12,
            first_year_costs in 0u32..3_000_000,
            recurring in 0u32..200_000,
            nps_bp in 0u32..500,
            fade_bp in 0u32..3_000,
        ) {
            let mut assumptions = Assumptions::default_scenario();
            assumptions.costs.first_year_costs = first_year_costs as f64;
            assumptions.costs.recurring_monthly_costs = recurring as f64;
            assumptions.retention.nps_increase = nps_bp as f64 / 10_000.0;
            assumptions.retention.nps_diminishing_rate = fade_bp as f64 / 10_000.0;

            let result = project(&assumptions, horizon, false);
            prop_assert_eq!(result.rows.len(), horizon as usize + 1);
            for row in &result.rows {
                let f = row.financials.as_ref().unwrap();
                if f.cumulative_costs == 0.0 {
                    prop_assert_eq!(f.roi_pct, 0.0);
                } else {
                    prop_assert_eq!(f.roi_pct, f.cumulative_profit / f.cumulative_costs * 100.0);
                }
                let one_time = if row.year == 0 { first_year_costs as f64 } else { 0.0 };
                prop_assert_eq!(f.costs, assumptions.costs.recurring_cost(row.year) + one_time);
            }
        }

        #[test]
        fn prop_baseline_ignores_chatbot_assumptions(
            chatbot_bp in 0u32..10_000,
            increase_bp in 0u32..5_000,
            horizon in 0u32..10,
        ) {
            let mut assumptions = Assumptions::default_scenario();
            assumptions.contacts.initial_shares = ChannelShares {
                phone: 0.5,
                web: 0.3,
                chatbot: chatbot_bp as f64 / 10_000.0,
            };
            assumptions.contacts.drift = ChannelDrift {
                phone_decrease: 0.03,
                web_decrease: 0.01,
                chatbot_increase: increase_bp as f64 / 10_000.0,
            };
            let result = project(&assumptions, horizon, true);
            for row in &result.rows {
                prop_assert_eq!(row.chatbot_contacts, 0.0);
                prop_assert!(row.financials.is_none());
            }
        }
    }
}
