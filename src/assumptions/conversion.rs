//! Contact-to-customer conversion and price competitiveness

use serde::{Deserialize, Serialize};

/// Decay applied to the yearly conversion improvement
///
/// The improvement for year `y` is `increase / (1 + CONVERSION_DECAY * y)`.
/// With zero decay the improvement is the same flat increment every year.
pub const CONVERSION_DECAY: f64 = 0.0;

/// Conversion rate assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionAssumptions {
    /// Conversion rate before the chatbot
    pub current_rate: f64,
    /// Improvement added on top of the current rate
    pub yearly_increase: f64,
    /// Ceiling on the achievable conversion rate
    pub max_rate: f64,
}

impl ConversionAssumptions {
    /// Conversion rate for a projection year
    pub fn conversion_rate(&self, year: u32) -> f64 {
        let improvement = self.yearly_increase / (1.0 + CONVERSION_DECAY * year as f64);
        (self.current_rate + improvement).min(self.max_rate)
    }
}

/// Own and market policy pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingAssumptions {
    /// Average yearly revenue per policy for the company
    pub own_policy_price: f64,
    /// Average market price of a comparable policy
    pub market_policy_price: f64,
    pub price_elasticity: f64,
}

impl PricingAssumptions {
    /// (market / own) ^ elasticity; above 1 when cheaper than the market
    pub fn price_adjustment_factor(&self) -> f64 {
        (self.market_policy_price / self.own_policy_price).powf(self.price_elasticity)
    }

    /// New customers won from `total_contacts` at `conversion_rate`
    ///
    /// Fractional customers are kept; the result feeds aggregate revenue.
    pub fn new_customers(&self, total_contacts: f64, conversion_rate: f64) -> f64 {
        total_contacts * conversion_rate * self.price_adjustment_factor()
    }
}
