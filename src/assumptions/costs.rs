//! Chatbot implementation costs and contact-handling savings

use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: f64 = 12.0;

/// One-time setup costs incurred in year 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImplementationCosts {
    pub design_and_implementation: f64,
    pub database_integration: f64,
    pub testing: f64,
}

impl Default for ImplementationCosts {
    fn default() -> Self {
        Self {
            design_and_implementation: 680_000.0,
            database_integration: 250_000.0,
            testing: 100_000.0,
        }
    }
}

impl ImplementationCosts {
    pub fn total(&self) -> f64 {
        self.design_and_implementation + self.database_integration + self.testing
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostAssumptions {
    /// One-time implementation cost added in year 0
    pub first_year_costs: f64,
    /// Infrastructure and API costs per month
    pub recurring_monthly_costs: f64,
    /// Yearly efficiency gain on recurring costs
    pub economies_scale_factor: f64,
    /// Cost of a phone interaction
    pub phone_cost_per_interaction: f64,
    /// Fraction of the phone cost saved per chatbot-handled interaction
    pub chatbot_cost_reduction: f64,
}

impl CostAssumptions {
    /// Recurring yearly cost after economies of scale
    pub fn recurring_cost(&self, year: u32) -> f64 {
        let nominal = self.recurring_monthly_costs * MONTHS_PER_YEAR;
        nominal / (1.0 + self.economies_scale_factor * year as f64)
    }

    /// Recurring cost plus the implementation cost in year 0
    pub fn total_cost(&self, year: u32) -> f64 {
        let recurring = self.recurring_cost(year);
        if year == 0 {
            recurring + self.first_year_costs
        } else {
            recurring
        }
    }

    /// Saving per contact, never negative
    pub fn savings_per_contact(&self) -> f64 {
        let chatbot_cost = self.phone_cost_per_interaction * (1.0 - self.chatbot_cost_reduction);
        (self.phone_cost_per_interaction - chatbot_cost).max(0.0)
    }

    /// Savings over a contact volume
    ///
    /// Applied to the year's total volume, not just the chatbot channel.
    pub fn chatbot_savings(&self, contact_volume: f64) -> f64 {
        contact_volume * self.savings_per_contact()
    }
}
