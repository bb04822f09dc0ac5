//! Value formatting for assumption tables

use crate::assumptions::FormatClass;
use crate::projection::MILLION;

/// Placeholder for a value a scenario does not define
pub const MISSING: &str = "-";

/// Format a value according to its display class
pub fn format_value(class: FormatClass, value: f64) -> String {
    match class {
        FormatClass::Percentage => format!("{:.2}%", value * 100.0),
        FormatClass::CurrencyMillions => format!("€{:.2}M", value / MILLION),
        FormatClass::Currency => format!("€{:.2}", value),
        FormatClass::Count => format!("{:.0}", value),
        FormatClass::Plain => format!("{}", value),
    }
}

pub fn format_optional(class: FormatClass, value: Option<f64>) -> String {
    value
        .map(|v| format_value(class, v))
        .unwrap_or_else(|| MISSING.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_classes() {
        assert_eq!(format_value(FormatClass::Percentage, 0.005), "0.50%");
        assert_eq!(format_value(FormatClass::CurrencyMillions, 1_030_000.0), "€1.03M");
        assert_eq!(format_value(FormatClass::CurrencyMillions, 80_000.0), "€0.08M");
        assert_eq!(format_value(FormatClass::Currency, 1.5), "€1.50");
        assert_eq!(format_value(FormatClass::Count, 2_000_000.0), "2000000");
        assert_eq!(format_value(FormatClass::Plain, -0.02), "-0.02");
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(format_optional(FormatClass::Currency, None), "-");
        assert_eq!(format_optional(FormatClass::Currency, Some(60.0)), "€60.00");
    }
}
