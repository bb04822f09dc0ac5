//! Reporting: value formatting, assumption tables and projection output
//!
//! Text renderers return plain fixed-width tables for the terminal. CSV and
//! JSON writers live in [`export`].

pub mod export;
mod format;
mod table;

pub use export::{write_comparison_csv, write_projection_csv, write_projection_json};
pub use format::{format_optional, format_value, MISSING};
pub use table::{assumption_comparison, differing_rows, AssumptionTableRow, OTHER_CATEGORY};

use crate::projection::{Metric, ProjectionResult, Waterfall, MILLION};
use crate::scenario::{ScenarioComparison, SweepPoint};

fn cell(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.*}", decimals, v),
        None => MISSING.to_string(),
    }
}

fn push_line(out: &mut String, line: &str) {
    out.push_str(line);
    out.push('\n');
}

/// Year-by-year projection table
///
/// Volumes and amounts are in millions, ROI in percent.
pub fn render_projection_table(result: &ProjectionResult) -> String {
    let metrics: &[Metric] = if result.baseline {
        &Metric::ALL[..4]
    } else {
        &Metric::ALL
    };

    let mut out = String::new();
    let header: String = metrics
        .iter()
        .map(|metric| format!(" {:>22}", metric.label()))
        .collect();
    push_line(&mut out, &format!("{:>4}{}", "Year", header));
    push_line(&mut out, &"-".repeat(5 + 23 * metrics.len()));

    for row in &result.rows {
        let cells: String = metrics
            .iter()
            .map(|metric| {
                let decimals = if *metric == Metric::Roi { 1 } else { 3 };
                format!(" {:>22}", cell(metric.value(row), decimals))
            })
            .collect();
        push_line(&mut out, &format!("{:>4}{}", row.year, cells));
    }

    if let Some(summary) = result.summary() {
        let break_even = summary
            .break_even_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| "not reached".to_string());

        out.push('\n');
        push_line(&mut out, "Summary:");
        push_line(&mut out, &format!("  Total New Customers:     {:.0}", summary.total_new_customers));
        push_line(&mut out, &format!("  Total Retention Profit:  €{:.2}", summary.total_retention_profit));
        push_line(&mut out, &format!("  Total Chatbot Savings:   €{:.2}", summary.total_chatbot_savings));
        push_line(&mut out, &format!("  Total Costs:             €{:.2}", summary.total_costs));
        push_line(&mut out, &format!("  Final Cumulative Profit: €{:.2}", summary.final_cumulative_profit));
        push_line(&mut out, &format!("  Final ROI:               {:.2}%", summary.final_roi_pct));
        push_line(&mut out, &format!("  Break-even Year:         {}", break_even));
    }

    out
}

/// Assumption comparison grouped under category headings
pub fn render_assumption_table(
    rows: &[AssumptionTableRow],
    first_name: &str,
    second_name: &str,
) -> String {
    let mut out = String::new();
    push_line(
        &mut out,
        &format!("{:<48} {:>18} {:>18}", "Assumption", first_name, second_name),
    );
    push_line(&mut out, &"=".repeat(86));

    let mut current: Option<&str> = None;
    for row in rows {
        if current != Some(row.category.as_str()) {
            if current.is_some() {
                out.push('\n');
            }
            push_line(&mut out, &row.category);
            current = Some(row.category.as_str());
        }
        push_line(
            &mut out,
            &format!("  {:<46} {:>18} {:>18}", row.assumption, row.first, row.second),
        );
    }

    out
}

/// One metric for both scenarios, with the shared axis limit
pub fn render_metric_comparison(comparison: &ScenarioComparison, metric: Metric) -> String {
    let mut out = String::new();
    push_line(&mut out, metric.label());
    push_line(
        &mut out,
        &format!(
            "{:>4} {:>20} {:>20} {:>14}",
            "Year", comparison.first.name, comparison.second.name, "Difference"
        ),
    );
    push_line(&mut out, &"-".repeat(61));

    for row in comparison.metric_series(metric) {
        let diff = match (row.first, row.second) {
            (Some(a), Some(b)) => Some(b - a),
            _ => None,
        };
        push_line(
            &mut out,
            &format!(
                "{:>4} {:>20} {:>20} {:>14}",
                row.year,
                cell(row.first, 3),
                cell(row.second, 3),
                cell(diff, 3)
            ),
        );
    }

    push_line(
        &mut out,
        &format!("Shared y-axis limit: {:.3}", comparison.metrics_y_limit(&[metric])),
    );
    out
}

/// Waterfall steps with their running totals (€M)
pub fn render_waterfall(title: &str, waterfall: &Waterfall, y_limit: f64) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("{} (€M, axis limit {:.2})", title, y_limit));
    push_line(
        &mut out,
        &format!("{:<16} {:>12} {:>12} {:>12}", "Step", "Value", "Start", "Cumulative"),
    );
    push_line(&mut out, &"-".repeat(55));

    for step in &waterfall.steps {
        push_line(
            &mut out,
            &format!(
                "{:<16} {:>12.3} {:>12.3} {:>12.3}",
                step.label, step.value, step.start, step.cumulative
            ),
        );
    }
    push_line(&mut out, &format!("{:<16} {:>12.3}", "Total", waterfall.total()));
    out
}

/// Sensitivity sweep results for one key
pub fn render_sweep(key: &str, points: &[SweepPoint]) -> String {
    let mut out = String::new();
    push_line(&mut out, &format!("Sensitivity of final results to '{}'", key));
    push_line(
        &mut out,
        &format!(
            "{:>14} {:>24} {:>12} {:>12}",
            "Value", "Cumulative Profit (€M)", "ROI (%)", "Break-even"
        ),
    );
    push_line(&mut out, &"-".repeat(65));

    for point in points {
        let break_even = point
            .break_even_year
            .map(|y| y.to_string())
            .unwrap_or_else(|| MISSING.to_string());
        push_line(
            &mut out,
            &format!(
                "{:>14.6} {:>24.3} {:>12.2} {:>12}",
                point.value,
                point.final_cumulative_profit / MILLION,
                point.final_roi_pct,
                break_even
            ),
        );
    }
    out
}
