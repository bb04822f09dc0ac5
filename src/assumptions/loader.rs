//! Scenario file loader
//!
//! Scenario files hold `key,value` rows (CSV with a header) or a flat JSON
//! object. Values in a file are laid over the catalog defaults, then
//! `key=value` overrides are applied and scenario inputs are range-checked.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use super::values::{parse_value, AssumptionValues};
use crate::error::{RoiError, Result};

/// Default directory holding scenario files
pub const DEFAULT_SCENARIO_PATH: &str = "data/scenarios";

/// Read `key,value` rows from CSV
///
/// Blank keys are skipped and `#` starts a comment line.
pub fn read_values_csv<R: Read>(reader: R) -> Result<AssumptionValues> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut values = AssumptionValues::new();
    for result in reader.records() {
        let record = result?;
        let key = record.get(0).unwrap_or("");
        if key.is_empty() {
            continue;
        }
        let raw = record.get(1).ok_or_else(|| RoiError::InvalidValue {
            key: key.to_string(),
            value: String::new(),
        })?;
        values.set(key, parse_value(key, raw)?);
    }

    Ok(values)
}

/// Read a flat JSON object of numbers
pub fn read_values_json<R: Read>(reader: R) -> Result<AssumptionValues> {
    let map: BTreeMap<String, f64> = serde_json::from_reader(reader)?;
    Ok(map.into_iter().collect())
}

/// Load a scenario file, choosing the format from its extension
pub fn load_values(path: &Path) -> Result<AssumptionValues> {
    let file = File::open(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let values = if is_json {
        read_values_json(file)?
    } else {
        read_values_csv(file)?
    };
    debug!("loaded {} assumption values from {}", values.len(), path.display());
    Ok(values)
}

/// Catalog defaults, overlaid with a file's values and then `key=value` overrides
///
/// Scenario-specific inputs are checked against their bounds.
pub fn load_scenario(path: &Path, overrides: &[String]) -> Result<AssumptionValues> {
    let file_values = load_values(path)?;
    build_scenario(Some(&file_values), overrides)
}

/// Same as [`load_scenario`] for values already in memory
pub fn build_scenario(
    file_values: Option<&AssumptionValues>,
    overrides: &[String],
) -> Result<AssumptionValues> {
    let mut values = AssumptionValues::defaults();
    if let Some(file_values) = file_values {
        values = values.merged(file_values);
    }
    for spec in overrides {
        values.apply_override(spec)?;
    }
    values.validate_bounds()?;
    Ok(values)
}
