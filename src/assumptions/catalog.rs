//! Registry of every known assumption key
//!
//! Each entry records where the value comes from (fixed company data or a
//! scenario-specific input), whether the projection needs it, its default,
//! the input bounds for scenario inputs, and how it is shown in the
//! assumption comparison table.

use std::fmt;

use crate::error::{RoiError, Result};
use serde::Serialize;

/// Key names as they appear in scenario files and overrides
pub mod keys {
    pub const INITIAL_POLICIES: &str = "initial_insurance_company_health_policies";
    pub const AVG_DAILY_CONTACTS: &str = "avg_contacts_phone_web_daily";
    pub const NPS_INCREASE: &str = "nps_increase";
    pub const NPS_DIMINISHING_RATE: &str = "nps_diminishing_rate";
    pub const ECONOMIES_SCALE_FACTOR: &str = "economies_scale_cost_factor";
    pub const FIRST_YEAR_COSTS: &str = "first_year_costs";
    pub const RECURRING_MONTHLY_COSTS: &str = "recurring_monthly_costs";
    pub const CONVERSION_INCREASE: &str = "conversion_increase";
    pub const MAX_CONVERSION_RATE: &str = "max_conversion_rate";
    pub const DISCOUNT_RATE: &str = "discount_rate";
    pub const MARKET_POLICY_PRICE: &str = "avg_market_policy_price";
    pub const PRICE_ELASTICITY: &str = "price_elasticity";
    pub const INITIAL_PHONE_RATE: &str = "initial_phone_rate";
    pub const INITIAL_WEB_RATE: &str = "initial_web_rate";
    pub const INITIAL_CHATBOT_RATE: &str = "initial_chatbot_rate";
    pub const PHONE_DECREASE_RATE: &str = "phone_decrease_rate";
    pub const WEB_DECREASE_RATE: &str = "web_decrease_rate";
    pub const CHATBOT_INCREASE_RATE: &str = "chatbot_increase_rate";
    pub const COMPANY_GROWTH_RATE: &str = "health_insurance_yearly_company_growth_rate";
    pub const OWN_POLICY_PRICE: &str = "insurance_company_avg_policy_price";
    pub const CURRENT_CONVERSION: &str = "perc_estimated_current_conversion";
    pub const PHONE_COST: &str = "avg_telephone_cost_per_interaction";
    pub const CHATBOT_COST_REDUCTION: &str = "avg_chatbot_cost_per_interaction";
}

/// Horizon slider range in years (inclusive)
pub const MIN_HORIZON_YEARS: u32 = 2;
pub const MAX_HORIZON_YEARS: u32 = 10;
pub const DEFAULT_HORIZON_YEARS: u32 = 6;

/// Where an assumption value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Provenance {
    /// Company data or benchmark shared by every scenario
    Fixed,
    /// Scenario-specific input collected from the user
    Dynamic,
}

/// Display class used when formatting a value for the comparison table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormatClass {
    Percentage,
    CurrencyMillions,
    Currency,
    Count,
    /// Shown as the raw number with a humanized key name
    Plain,
}

/// Comparison table grouping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Category {
    ImplementationCosts,
    Business,
    Retention,
    FinancialAndCosts,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::ImplementationCosts,
        Category::Business,
        Category::Retention,
        Category::FinancialAndCosts,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Category::ImplementationCosts => "Implementation costs",
            Category::Business => "Business",
            Category::Retention => "Retention",
            Category::FinancialAndCosts => "Financial and costs",
        }
    }
}

/// Accepted range for an input value
///
/// `max` is infinite for keys with a lower limit only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InputBounds {
    pub min: f64,
    pub max: f64,
    /// False when `min` itself is rejected
    pub min_inclusive: bool,
}

impl InputBounds {
    pub const fn closed(min: f64, max: f64) -> Self {
        Self {
            min,
            max,
            min_inclusive: true,
        }
    }

    pub const fn at_least(min: f64) -> Self {
        Self {
            min,
            max: f64::INFINITY,
            min_inclusive: true,
        }
    }

    /// Strictly above zero, no upper limit
    pub const fn positive() -> Self {
        Self {
            min: 0.0,
            max: f64::INFINITY,
            min_inclusive: false,
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        let above_min = if self.min_inclusive {
            value >= self.min
        } else {
            value > self.min
        };
        above_min && value <= self.max
    }
}

impl fmt::Display for InputBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.min_inclusive { '[' } else { '(' };
        if self.max.is_infinite() {
            write!(f, "{}{}, inf)", open, self.min)
        } else {
            write!(f, "{}{}, {}]", open, self.min, self.max)
        }
    }
}

/// Catalog entry for one assumption key
#[derive(Debug, Clone, Copy, Serialize)]
pub struct KeySpec {
    pub name: &'static str,
    pub provenance: Provenance,
    /// Optional keys default to 0 when absent
    pub required: bool,
    pub default: f64,
    pub bounds: Option<InputBounds>,
    pub category: Option<Category>,
    pub label: Option<&'static str>,
    pub format: FormatClass,
}

impl KeySpec {
    /// Display label, falling back to the humanized key name
    pub fn display_label(&self) -> String {
        match self.label {
            Some(label) => label.to_string(),
            None => humanize_key(self.name),
        }
    }

    /// Check a value against the input bounds, if the key has any
    pub fn check_bounds(&self, value: f64) -> Result<()> {
        match self.bounds {
            Some(bounds) if !bounds.contains(value) => Err(RoiError::OutOfRange {
                key: self.name.to_string(),
                value,
                bounds,
            }),
            _ => Ok(()),
        }
    }
}

const fn fixed(
    name: &'static str,
    default: f64,
    category: Option<Category>,
    label: Option<&'static str>,
    format: FormatClass,
) -> KeySpec {
    KeySpec {
        name,
        provenance: Provenance::Fixed,
        required: true,
        default,
        bounds: None,
        category,
        label,
        format,
    }
}

/// Fixed key that still must not go below a limit
const fn fixed_bounded(name: &'static str, default: f64, bounds: InputBounds) -> KeySpec {
    KeySpec {
        name,
        provenance: Provenance::Fixed,
        required: true,
        default,
        bounds: Some(bounds),
        category: None,
        label: None,
        format: FormatClass::Plain,
    }
}

const fn dynamic(
    name: &'static str,
    default: f64,
    bounds: InputBounds,
    category: Category,
    label: &'static str,
    format: FormatClass,
) -> KeySpec {
    KeySpec {
        name,
        provenance: Provenance::Dynamic,
        required: true,
        default,
        bounds: Some(bounds),
        category: Some(category),
        label: Some(label),
        format,
    }
}

const fn informational(
    name: &'static str,
    default: f64,
    category: Category,
    label: &'static str,
) -> KeySpec {
    KeySpec {
        name,
        provenance: Provenance::Fixed,
        required: false,
        default,
        bounds: None,
        category: Some(category),
        label: Some(label),
        format: FormatClass::Percentage,
    }
}

/// Design & implementation, database configuration & integration, testing
pub const DEFAULT_FIRST_YEAR_COSTS: f64 = 680_000.0 + 250_000.0 + 100_000.0;

/// All known keys in comparison-table order
pub static CATALOG: &[KeySpec] = &[
    fixed(
        keys::FIRST_YEAR_COSTS,
        DEFAULT_FIRST_YEAR_COSTS,
        Some(Category::ImplementationCosts),
        Some("First-year costs (chatbot implementation)"),
        FormatClass::CurrencyMillions,
    ),
    fixed(
        keys::RECURRING_MONTHLY_COSTS,
        80_000.0,
        Some(Category::ImplementationCosts),
        Some("Recurring monthly costs"),
        FormatClass::CurrencyMillions,
    ),
    fixed(
        keys::INITIAL_POLICIES,
        2_000_000.0,
        Some(Category::Business),
        Some("Health policies in force at start"),
        FormatClass::Count,
    ),
    fixed(
        keys::AVG_DAILY_CONTACTS,
        3_500.0,
        Some(Category::Business),
        Some("Average daily interactions (phone + web)"),
        FormatClass::Count,
    ),
    informational(
        keys::COMPANY_GROWTH_RATE,
        0.095,
        Category::Business,
        "Yearly company growth rate",
    ),
    dynamic(
        keys::CURRENT_CONVERSION,
        0.005,
        InputBounds::closed(0.001, 0.025),
        Category::Business,
        "Estimated current conversion rate",
        FormatClass::Percentage,
    ),
    fixed(
        keys::CONVERSION_INCREASE,
        0.005,
        Some(Category::Business),
        Some("Yearly conversion increase"),
        FormatClass::Percentage,
    ),
    fixed(
        keys::MAX_CONVERSION_RATE,
        0.03,
        Some(Category::Business),
        Some("Maximum achievable conversion rate"),
        FormatClass::Percentage,
    ),
    fixed(
        keys::NPS_INCREASE,
        0.02,
        Some(Category::Retention),
        Some("NPS increase from the implementation"),
        FormatClass::Percentage,
    ),
    dynamic(
        keys::OWN_POLICY_PRICE,
        60.0,
        InputBounds::positive(),
        Category::FinancialAndCosts,
        "Average policy value",
        FormatClass::Currency,
    ),
    informational(
        keys::DISCOUNT_RATE,
        0.05,
        Category::FinancialAndCosts,
        "Inflation rate used in projections",
    ),
    dynamic(
        keys::PHONE_COST,
        1.5,
        InputBounds::at_least(0.0),
        Category::FinancialAndCosts,
        "Average cost per phone interaction",
        FormatClass::Currency,
    ),
    dynamic(
        keys::CHATBOT_COST_REDUCTION,
        0.3,
        InputBounds::closed(0.0, 0.6),
        Category::FinancialAndCosts,
        "Chatbot cost reduction per interaction",
        FormatClass::Percentage,
    ),
    fixed(keys::NPS_DIMINISHING_RATE, 0.01, None, None, FormatClass::Plain),
    fixed(keys::ECONOMIES_SCALE_FACTOR, 0.03, None, None, FormatClass::Plain),
    fixed(keys::MARKET_POLICY_PRICE, 60.0, None, None, FormatClass::Plain),
    fixed(keys::PRICE_ELASTICITY, 0.7, None, None, FormatClass::Plain),
    fixed(keys::INITIAL_PHONE_RATE, 0.6, None, None, FormatClass::Plain),
    fixed(keys::INITIAL_WEB_RATE, 1.0 - 0.6 - 0.05, None, None, FormatClass::Plain),
    fixed_bounded(keys::INITIAL_CHATBOT_RATE, 0.05, InputBounds::at_least(0.0)),
    fixed(keys::PHONE_DECREASE_RATE, 0.02, None, None, FormatClass::Plain),
    fixed(keys::WEB_DECREASE_RATE, -0.02, None, None, FormatClass::Plain),
    fixed_bounded(keys::CHATBOT_INCREASE_RATE, 0.05, InputBounds::at_least(0.0)),
];

/// Look up a key in the catalog
pub fn lookup(name: &str) -> Option<&'static KeySpec> {
    CATALOG.iter().find(|spec| spec.name == name)
}

/// Look up a key, failing for names the projection does not know
pub fn require_known(name: &str) -> Result<&'static KeySpec> {
    lookup(name).ok_or_else(|| RoiError::UnknownKey(name.to_string()))
}

/// Keys with an input range, in catalog order
pub fn bounded_keys() -> impl Iterator<Item = &'static KeySpec> {
    CATALOG.iter().filter(|spec| spec.bounds.is_some())
}

/// Scenario-specific keys, in catalog order
pub fn dynamic_keys() -> impl Iterator<Item = &'static KeySpec> {
    CATALOG
        .iter()
        .filter(|spec| spec.provenance == Provenance::Dynamic)
}

/// "max_conversion_rate" -> "Max conversion rate"
pub fn humanize_key(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        for (i, spec) in CATALOG.iter().enumerate() {
            assert!(
                CATALOG[i + 1..].iter().all(|other| other.name != spec.name),
                "duplicate key {}",
                spec.name
            );
        }
    }

    #[test]
    fn test_defaults_within_bounds() {
        for spec in bounded_keys() {
            assert!(spec.check_bounds(spec.default).is_ok(), "{}", spec.name);
        }
        assert_eq!(dynamic_keys().count(), 4);
        assert_eq!(bounded_keys().count(), 6);
    }

    #[test]
    fn test_conversion_bounds() {
        let spec = lookup(keys::CURRENT_CONVERSION).unwrap();
        assert!(spec.check_bounds(0.025).is_ok());
        match spec.check_bounds(0.03) {
            Err(RoiError::OutOfRange { key, bounds, .. }) => {
                assert_eq!(key, keys::CURRENT_CONVERSION);
                assert_eq!(bounds, InputBounds::closed(0.001, 0.025));
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
    }

    #[test]
    fn test_price_and_phone_cost_have_no_upper_limit() {
        let price = lookup(keys::OWN_POLICY_PRICE).unwrap();
        assert!(price.check_bounds(1_200.0).is_ok());
        assert!(price.check_bounds(0.01).is_ok());
        assert!(price.check_bounds(0.0).is_err());

        let phone = lookup(keys::PHONE_COST).unwrap();
        assert!(phone.check_bounds(25.0).is_ok());
        assert!(phone.check_bounds(0.0).is_ok());
        assert!(phone.check_bounds(-0.5).is_err());
    }

    #[test]
    fn test_chatbot_share_inputs_not_negative() {
        for key in [keys::INITIAL_CHATBOT_RATE, keys::CHATBOT_INCREASE_RATE] {
            let spec = lookup(key).unwrap();
            assert_eq!(spec.provenance, Provenance::Fixed);
            assert!(spec.check_bounds(0.0).is_ok());
            assert!(spec.check_bounds(-0.05).is_err(), "{}", key);
        }
    }

    #[test]
    fn test_bounds_display() {
        assert_eq!(InputBounds::closed(0.0, 0.6).to_string(), "[0, 0.6]");
        assert_eq!(InputBounds::at_least(0.0).to_string(), "[0, inf)");
        assert_eq!(InputBounds::positive().to_string(), "(0, inf)");
    }

    #[test]
    fn test_fixed_keys_have_no_bounds() {
        let spec = lookup(keys::FIRST_YEAR_COSTS).unwrap();
        assert!(spec.check_bounds(-1.0e12).is_ok());
        assert_eq!(spec.default, 1_030_000.0);
    }

    #[test]
    fn test_unknown_key() {
        assert!(lookup("chatbot_magic").is_none());
        assert!(matches!(
            require_known("chatbot_magic"),
            Err(RoiError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_humanize_key() {
        assert_eq!(humanize_key("max_conversion_rate"), "Max conversion rate");
        assert_eq!(humanize_key(""), "");
        let spec = lookup(keys::PRICE_ELASTICITY).unwrap();
        assert_eq!(spec.display_label(), "Price elasticity");
    }

    #[test]
    fn test_optional_keys() {
        let optional: Vec<_> = CATALOG.iter().filter(|s| !s.required).map(|s| s.name).collect();
        assert_eq!(optional, vec![keys::COMPANY_GROWTH_RATE, keys::DISCOUNT_RATE]);
    }
}
