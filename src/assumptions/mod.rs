//! Business assumptions for one chatbot scenario

pub mod catalog;
mod contacts;
mod conversion;
mod costs;
mod retention;
mod values;
pub mod loader;

pub use catalog::{keys, Category, FormatClass, InputBounds, KeySpec, Provenance};
pub use contacts::{ChannelDrift, ChannelMix, ChannelShares, ContactAssumptions, VolumeGrowth, DAYS_PER_YEAR};
pub use conversion::{ConversionAssumptions, PricingAssumptions, CONVERSION_DECAY};
pub use costs::{CostAssumptions, ImplementationCosts, MONTHS_PER_YEAR};
pub use retention::RetentionAssumptions;
pub use values::{parse_value, AssumptionValues};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Figures carried for reporting only; the projection does not use them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketAssumptions {
    pub discount_rate: f64,
    pub company_growth_rate: f64,
}

/// Container for all scenario assumptions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assumptions {
    pub contacts: ContactAssumptions,
    pub conversion: ConversionAssumptions,
    pub pricing: PricingAssumptions,
    pub retention: RetentionAssumptions,
    pub costs: CostAssumptions,
    pub market: MarketAssumptions,
}

impl Assumptions {
    /// Every key at its catalog default
    pub fn default_scenario() -> Self {
        Self {
            contacts: ContactAssumptions {
                avg_daily_contacts: 3_500.0,
                initial_shares: ChannelShares {
                    phone: 0.6,
                    web: 1.0 - 0.6 - 0.05,
                    chatbot: 0.05,
                },
                drift: ChannelDrift {
                    phone_decrease: 0.02,
                    web_decrease: -0.02,
                    chatbot_increase: 0.05,
                },
            },
            conversion: ConversionAssumptions {
                current_rate: 0.005,
                yearly_increase: 0.005,
                max_rate: 0.03,
            },
            pricing: PricingAssumptions {
                own_policy_price: 60.0,
                market_policy_price: 60.0,
                price_elasticity: 0.7,
            },
            retention: RetentionAssumptions {
                policies_in_force: 2_000_000.0,
                nps_increase: 0.02,
                nps_diminishing_rate: 0.01,
            },
            costs: CostAssumptions {
                first_year_costs: ImplementationCosts::default().total(),
                recurring_monthly_costs: 80_000.0,
                economies_scale_factor: 0.03,
                phone_cost_per_interaction: 1.5,
                chatbot_cost_reduction: 0.3,
            },
            market: MarketAssumptions {
                discount_rate: 0.05,
                company_growth_rate: 0.095,
            },
        }
    }

    /// Build from flat key/value pairs
    ///
    /// Every required key must be present; optional keys default to 0.
    /// Unknown keys are logged and ignored.
    pub fn from_values(values: &AssumptionValues) -> Result<Self> {
        values.warn_unknown_keys();
        let v = |key: &str| values.resolve(key);

        Ok(Self {
            contacts: ContactAssumptions {
                avg_daily_contacts: v(keys::AVG_DAILY_CONTACTS)?,
                initial_shares: ChannelShares {
                    phone: v(keys::INITIAL_PHONE_RATE)?,
                    web: v(keys::INITIAL_WEB_RATE)?,
                    chatbot: v(keys::INITIAL_CHATBOT_RATE)?,
                },
                drift: ChannelDrift {
                    phone_decrease: v(keys::PHONE_DECREASE_RATE)?,
                    web_decrease: v(keys::WEB_DECREASE_RATE)?,
                    chatbot_increase: v(keys::CHATBOT_INCREASE_RATE)?,
                },
            },
            conversion: ConversionAssumptions {
                current_rate: v(keys::CURRENT_CONVERSION)?,
                yearly_increase: v(keys::CONVERSION_INCREASE)?,
                max_rate: v(keys::MAX_CONVERSION_RATE)?,
            },
            pricing: PricingAssumptions {
                own_policy_price: v(keys::OWN_POLICY_PRICE)?,
                market_policy_price: v(keys::MARKET_POLICY_PRICE)?,
                price_elasticity: v(keys::PRICE_ELASTICITY)?,
            },
            retention: RetentionAssumptions {
                policies_in_force: v(keys::INITIAL_POLICIES)?,
                nps_increase: v(keys::NPS_INCREASE)?,
                nps_diminishing_rate: v(keys::NPS_DIMINISHING_RATE)?,
            },
            costs: CostAssumptions {
                first_year_costs: v(keys::FIRST_YEAR_COSTS)?,
                recurring_monthly_costs: v(keys::RECURRING_MONTHLY_COSTS)?,
                economies_scale_factor: v(keys::ECONOMIES_SCALE_FACTOR)?,
                phone_cost_per_interaction: v(keys::PHONE_COST)?,
                chatbot_cost_reduction: v(keys::CHATBOT_COST_REDUCTION)?,
            },
            market: MarketAssumptions {
                discount_rate: v(keys::DISCOUNT_RATE)?,
                company_growth_rate: v(keys::COMPANY_GROWTH_RATE)?,
            },
        })
    }

    /// Flatten back to key/value pairs (for display and overrides)
    pub fn to_values(&self) -> AssumptionValues {
        AssumptionValues::new()
            .with(keys::AVG_DAILY_CONTACTS, self.contacts.avg_daily_contacts)
            .with(keys::INITIAL_PHONE_RATE, self.contacts.initial_shares.phone)
            .with(keys::INITIAL_WEB_RATE, self.contacts.initial_shares.web)
            .with(keys::INITIAL_CHATBOT_RATE, self.contacts.initial_shares.chatbot)
            .with(keys::PHONE_DECREASE_RATE, self.contacts.drift.phone_decrease)
            .with(keys::WEB_DECREASE_RATE, self.contacts.drift.web_decrease)
            .with(keys::CHATBOT_INCREASE_RATE, self.contacts.drift.chatbot_increase)
            .with(keys::CURRENT_CONVERSION, self.conversion.current_rate)
            .with(keys::CONVERSION_INCREASE, self.conversion.yearly_increase)
            .with(keys::MAX_CONVERSION_RATE, self.conversion.max_rate)
            .with(keys::OWN_POLICY_PRICE, self.pricing.own_policy_price)
            .with(keys::MARKET_POLICY_PRICE, self.pricing.market_policy_price)
            .with(keys::PRICE_ELASTICITY, self.pricing.price_elasticity)
            .with(keys::INITIAL_POLICIES, self.retention.policies_in_force)
            .with(keys::NPS_INCREASE, self.retention.nps_increase)
            .with(keys::NPS_DIMINISHING_RATE, self.retention.nps_diminishing_rate)
            .with(keys::FIRST_YEAR_COSTS, self.costs.first_year_costs)
            .with(keys::RECURRING_MONTHLY_COSTS, self.costs.recurring_monthly_costs)
            .with(keys::ECONOMIES_SCALE_FACTOR, self.costs.economies_scale_factor)
            .with(keys::PHONE_COST, self.costs.phone_cost_per_interaction)
            .with(keys::CHATBOT_COST_REDUCTION, self.costs.chatbot_cost_reduction)
            .with(keys::DISCOUNT_RATE, self.market.discount_rate)
            .with(keys::COMPANY_GROWTH_RATE, self.market.company_growth_rate)
    }

    /// Load a scenario file (CSV or JSON) over the catalog defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let values = loader::load_scenario(path, &[])?;
        Self::from_values(&values)
    }

    /// Copy with a single key changed
    pub fn with_value(&self, key: &str, value: f64) -> Result<Self> {
        catalog::require_known(key)?;
        Self::from_values(&self.to_values().with(key, value))
    }
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_scenario()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RoiError;

    #[test]
    fn test_defaults_match_catalog() {
        let from_catalog = Assumptions::from_values(&AssumptionValues::defaults()).unwrap();
        assert_eq!(from_catalog, Assumptions::default_scenario());
    }

    #[test]
    fn test_round_trip_through_values() {
        let assumptions = Assumptions::default_scenario();
        let values = assumptions.to_values();
        assert_eq!(values.len(), catalog::CATALOG.len());
        assert_eq!(Assumptions::from_values(&values).unwrap(), assumptions);
    }

    #[test]
    fn test_missing_required_key_fails_fast() {
        let mut values = AssumptionValues::defaults();
        values.remove(keys::RECURRING_MONTHLY_COSTS);
        let err = Assumptions::from_values(&values).unwrap_err();
        assert_eq!(
            err.to_string(),
            "missing configuration key: recurring_monthly_costs"
        );
    }

    #[test]
    fn test_missing_optional_keys_default_to_zero() {
        let mut values = AssumptionValues::defaults();
        values.remove(keys::DISCOUNT_RATE);
        values.remove(keys::COMPANY_GROWTH_RATE);
        let assumptions = Assumptions::from_values(&values).unwrap();
        assert_eq!(assumptions.market.discount_rate, 0.0);
        assert_eq!(assumptions.market.company_growth_rate, 0.0);
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let values = AssumptionValues::defaults().with("years", 6.0);
        assert!(Assumptions::from_values(&values).is_ok());
    }

    #[test]
    fn test_with_value() {
        let base = Assumptions::default_scenario();
        let cheaper = base.with_value(keys::OWN_POLICY_PRICE, 50.0).unwrap();
        assert_eq!(cheaper.pricing.own_policy_price, 50.0);
        assert_eq!(cheaper.costs, base.costs);

        assert!(matches!(
            base.with_value("not_a_key", 1.0),
            Err(RoiError::UnknownKey(_))
        ));
    }
}
