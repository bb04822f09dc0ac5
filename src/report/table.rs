//! Side-by-side assumption comparison table

use serde::Serialize;

use super::format::format_optional;
use crate::assumptions::{catalog::CATALOG, AssumptionValues, Category, KeySpec};

/// Heading for keys that belong to no table category
pub const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssumptionTableRow {
    pub category: String,
    pub key: String,
    pub assumption: String,
    pub first: String,
    pub second: String,
}

impl AssumptionTableRow {
    fn new(category: &str, spec: &KeySpec, first: &AssumptionValues, second: &AssumptionValues) -> Self {
        Self {
            category: category.to_string(),
            key: spec.name.to_string(),
            assumption: spec.display_label(),
            first: format_optional(spec.format, first.get(spec.name)),
            second: format_optional(spec.format, second.get(spec.name)),
        }
    }
}

/// Rows for the assumption comparison table, grouped by category
///
/// With `include_other`, keys outside the table categories follow under
/// "Other" with their raw values.
pub fn assumption_comparison(
    first: &AssumptionValues,
    second: &AssumptionValues,
    include_other: bool,
) -> Vec<AssumptionTableRow> {
    let mut rows = Vec::new();

    for category in Category::ALL {
        for spec in CATALOG.iter().filter(|s| s.category == Some(category)) {
            rows.push(AssumptionTableRow::new(category.title(), spec, first, second));
        }
    }

    if include_other {
        for spec in CATALOG.iter().filter(|s| s.category.is_none()) {
            rows.push(AssumptionTableRow::new(OTHER_CATEGORY, spec, first, second));
        }
    }

    rows
}

/// Only the rows whose values differ between the scenarios
pub fn differing_rows(rows: &[AssumptionTableRow]) -> Vec<&AssumptionTableRow> {
    rows.iter().filter(|r| r.first != r.second).collect()
}
