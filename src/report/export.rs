//! CSV and JSON export of projection output

use std::io::Write;

use crate::error::Result;
use crate::projection::{Metric, ProjectionResult};
use crate::scenario::ScenarioComparison;

/// Write one row per projection year with every metric in display units
///
/// Financial columns are left empty on the baseline.
pub fn write_projection_csv<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);

    let mut header = vec!["Year".to_string()];
    header.extend(Metric::ALL.iter().map(|m| m.label().to_string()));
    csv.write_record(&header)?;

    for row in &result.rows {
        let mut record = vec![row.year.to_string()];
        record.extend(
            Metric::ALL
                .iter()
                .map(|m| m.value(row).map(|v| format!("{:.6}", v)).unwrap_or_default()),
        );
        csv.write_record(&record)?;
    }

    csv.flush()?;
    Ok(())
}

/// Write one metric for two scenarios side by side
pub fn write_comparison_csv<W: Write>(
    writer: W,
    comparison: &ScenarioComparison,
    metric: Metric,
) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record([
        "Year".to_string(),
        format!("{} - {}", comparison.first.name, metric.label()),
        format!("{} - {}", comparison.second.name, metric.label()),
    ])?;

    let cell = |v: Option<f64>| v.map(|v| format!("{:.6}", v)).unwrap_or_default();
    for row in comparison.metric_series(metric) {
        csv.write_record([row.year.to_string(), cell(row.first), cell(row.second)])?;
    }

    csv.flush()?;
    Ok(())
}

/// Full projection (raw units) as pretty-printed JSON
pub fn write_projection_json<W: Write>(writer: W, result: &ProjectionResult) -> Result<()> {
    serde_json::to_writer_pretty(writer, result)?;
    Ok(())
}
