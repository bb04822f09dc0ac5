//! Retention revenue driven by the NPS improvement

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetentionAssumptions {
    /// Health policies in force at the start of the projection
    pub policies_in_force: f64,
    /// Retention improvement from the higher NPS
    pub nps_increase: f64,
    /// Yearly fade of the NPS effect
    pub nps_diminishing_rate: f64,
}

impl RetentionAssumptions {
    /// Retention effect for a projection year
    ///
    /// Not floored: a large enough year or fade rate gives a negative effect.
    pub fn retention_effect(&self, year: u32) -> f64 {
        self.nps_increase * (1.0 - year as f64 * self.nps_diminishing_rate)
    }

    /// Revenue from retained customers (existing base plus this year's new customers)
    pub fn retention_profit(&self, new_customers: f64, year: u32, policy_price: f64) -> f64 {
        let effect = self.retention_effect(year);
        let retained = self.policies_in_force * effect + new_customers * effect;
        retained * policy_price
    }
}
