//! Two-way sensitivity grid over the scenario inputs
//!
//! Projects every combination of policy price (half to twice the market
//! price) and current conversion rate (its full input range) and writes
//! final profit and ROI to CSV.

use std::fs::File;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use rayon::prelude::*;

use chatbot_roi::assumptions::catalog::{self, keys, DEFAULT_HORIZON_YEARS};
use chatbot_roi::projection::MILLION;
use chatbot_roi::scenario::linspace;
use chatbot_roi::{AssumptionValues, Assumptions, ProjectionConfig, ProjectionEngine};

const GRID_STEPS: usize = 21;
/// Policy prices covered by the grid
const PRICE_RANGE: (f64, f64) = (30.0, 120.0);
const OUTPUT_PATH: &str = "sensitivity_grid.csv";

struct GridCell {
    price: f64,
    conversion: f64,
    cumulative_profit: f64,
    roi_pct: f64,
    break_even_year: Option<u32>,
}

/// Grid points spanning a key's closed input range
fn axis(key: &str) -> Result<Vec<f64>> {
    let bounds = catalog::require_known(key)?
        .bounds
        .with_context(|| format!("'{}' has no input range", key))?;
    if !bounds.max.is_finite() {
        bail!("'{}' has no upper limit, give the grid an explicit range", key);
    }
    Ok(linspace(bounds.min, bounds.max, GRID_STEPS))
}

fn main() -> Result<()> {
    env_logger::init();

    let prices = linspace(PRICE_RANGE.0, PRICE_RANGE.1, GRID_STEPS);
    let conversions = axis(keys::CURRENT_CONVERSION)?;
    let base = AssumptionValues::defaults();
    let config = ProjectionConfig {
        horizon_years: DEFAULT_HORIZON_YEARS,
        ..Default::default()
    };

    println!(
        "Running {} x {} grid over {} years...",
        prices.len(),
        conversions.len(),
        config.horizon_years
    );
    let start = Instant::now();

    let pairs: Vec<(f64, f64)> = prices
        .iter()
        .flat_map(|&p| conversions.iter().map(move |&c| (p, c)))
        .collect();

    let cells = pairs
        .par_iter()
        .map(|&(price, conversion)| -> Result<Option<GridCell>> {
            let values = base
                .clone()
                .with(keys::OWN_POLICY_PRICE, price)
                .with(keys::CURRENT_CONVERSION, conversion);
            let assumptions = Assumptions::from_values(&values)?;
            let result = ProjectionEngine::new(assumptions, config.clone()).project();
            Ok(result.summary().map(|summary| GridCell {
                price,
                conversion,
                cumulative_profit: summary.final_cumulative_profit,
                roi_pct: summary.final_roi_pct,
                break_even_year: summary.break_even_year,
            }))
        })
        .collect::<Result<Vec<_>>>()?;

    println!("Grid complete in {:?}", start.elapsed());

    let file = File::create(OUTPUT_PATH)
        .with_context(|| format!("unable to create {}", OUTPUT_PATH))?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record([
        "PolicyPrice",
        "ConversionRate",
        "CumulativeProfitM",
        "RoiPct",
        "BreakEvenYear",
    ])?;

    let mut profitable = 0;
    for cell in cells.iter().flatten() {
        if cell.cumulative_profit >= 0.0 {
            profitable += 1;
        }
        writer.write_record([
            format!("{:.2}", cell.price),
            format!("{:.5}", cell.conversion),
            format!("{:.4}", cell.cumulative_profit / MILLION),
            format!("{:.2}", cell.roi_pct),
            cell.break_even_year.map(|y| y.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    println!(
        "{} of {} combinations break even within the horizon",
        profitable,
        cells.len()
    );
    println!("Output written to {}", OUTPUT_PATH);
    Ok(())
}
