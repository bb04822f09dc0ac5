//! Chatbot ROI CLI
//!
//! Command-line interface for projecting and comparing chatbot scenarios

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;

use chatbot_roi::assumptions::catalog::{
    self, DEFAULT_HORIZON_YEARS, MAX_HORIZON_YEARS, MIN_HORIZON_YEARS,
};
use chatbot_roi::assumptions::loader;
use chatbot_roi::report;
use chatbot_roi::scenario::linspace;
use chatbot_roi::{AssumptionValues, Assumptions, Metric, ProjectionConfig, Scenario, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(
    name = "chatbot-roi",
    version,
    about = "Yearly ROI projection for a customer-service chatbot"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project a single scenario year by year
    Project(ProjectArgs),
    /// Project two scenarios side by side
    Compare(CompareArgs),
    /// Show the assumption table for two scenarios, or the key catalog
    Assumptions(AssumptionsArgs),
    /// Vary one assumption and report final profit and ROI
    Sweep(SweepArgs),
}

#[derive(Args, Debug)]
struct HorizonArg {
    #[arg(
        long,
        default_value_t = DEFAULT_HORIZON_YEARS,
        value_parser = clap::value_parser!(u32).range(MIN_HORIZON_YEARS as i64..=MAX_HORIZON_YEARS as i64),
        help = "Projection horizon in years"
    )]
    years: u32,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long, help = "Scenario file (CSV key,value rows or a JSON object)")]
    assumptions: Option<PathBuf>,
    #[arg(long = "set", value_name = "KEY=VALUE", help = "Override one assumption")]
    overrides: Vec<String>,
    #[command(flatten)]
    horizon: HorizonArg,
    #[arg(long, help = "Project the no-chatbot baseline")]
    baseline: bool,
    #[arg(long, help = "Do not fill missing keys from the catalog defaults")]
    strict: bool,
    #[arg(long, help = "Write the yearly table to a CSV file")]
    csv: Option<PathBuf>,
    #[arg(long, help = "Write the full projection to a JSON file")]
    json: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CompareArgs {
    #[arg(long = "scenario-1")]
    scenario_1: Option<PathBuf>,
    #[arg(long = "scenario-2")]
    scenario_2: Option<PathBuf>,
    #[arg(long = "set-1", value_name = "KEY=VALUE")]
    set_1: Vec<String>,
    #[arg(long = "set-2", value_name = "KEY=VALUE")]
    set_2: Vec<String>,
    #[command(flatten)]
    horizon: HorizonArg,
    #[arg(
        long,
        default_value = "cumulative_profit",
        help = "Metric to compare (snake-case name)"
    )]
    metric: Metric,
    #[arg(long, help = "Show keys outside the table categories too")]
    all_keys: bool,
    #[arg(long, help = "Write the compared metric to a CSV file")]
    csv: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct AssumptionsArgs {
    #[arg(long = "scenario-1")]
    scenario_1: Option<PathBuf>,
    #[arg(long = "scenario-2")]
    scenario_2: Option<PathBuf>,
    #[arg(long = "set-1", value_name = "KEY=VALUE")]
    set_1: Vec<String>,
    #[arg(long = "set-2", value_name = "KEY=VALUE")]
    set_2: Vec<String>,
    #[arg(long, help = "Show keys outside the table categories too")]
    all_keys: bool,
    #[arg(long, help = "Only show assumptions that differ")]
    diff_only: bool,
    #[arg(long, help = "List every known key with its default and range")]
    catalog: bool,
    #[arg(long, requires = "catalog", help = "Print the catalog as JSON")]
    json: bool,
}

#[derive(Args, Debug)]
struct SweepArgs {
    #[arg(long)]
    assumptions: Option<PathBuf>,
    #[arg(long = "set", value_name = "KEY=VALUE")]
    overrides: Vec<String>,
    #[arg(long, help = "Assumption key to vary")]
    key: String,
    #[arg(long)]
    from: f64,
    #[arg(long)]
    to: f64,
    #[arg(long, default_value_t = 11)]
    steps: usize,
    #[command(flatten)]
    horizon: HorizonArg,
}

fn load_values(path: Option<&Path>, overrides: &[String], strict: bool) -> Result<AssumptionValues> {
    let file_values = match path {
        Some(path) => Some(
            loader::load_values(path)
                .with_context(|| format!("failed to load scenario {}", path.display()))?,
        ),
        None => None,
    };

    if !strict {
        return Ok(loader::build_scenario(file_values.as_ref(), overrides)?);
    }

    let mut values = file_values.unwrap_or_default();
    for spec in overrides {
        values.apply_override(spec)?;
    }
    values.validate_bounds()?;
    Ok(values)
}

fn run_project(args: ProjectArgs) -> Result<()> {
    let values = load_values(args.assumptions.as_deref(), &args.overrides, args.strict)?;
    let assumptions = Assumptions::from_values(&values)?;

    let config = ProjectionConfig {
        horizon_years: args.horizon.years,
        baseline: args.baseline,
        ..Default::default()
    };
    let result = ScenarioRunner::with_config(config)
        .run(&Scenario::new("Scenario", assumptions))
        .projection;

    println!("{}", report::render_projection_table(&result));

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        report::write_projection_csv(BufWriter::new(file), &result)?;
        println!("Yearly table written to: {}", path.display());
    }
    if let Some(path) = &args.json {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        report::write_projection_json(BufWriter::new(file), &result)?;
        println!("Projection written to: {}", path.display());
    }

    Ok(())
}

fn run_compare(args: CompareArgs) -> Result<()> {
    let values_1 = load_values(args.scenario_1.as_deref(), &args.set_1, false)?;
    let values_2 = load_values(args.scenario_2.as_deref(), &args.set_2, false)?;

    let first = Scenario::new("Scenario 1", Assumptions::from_values(&values_1)?);
    let second = Scenario::new("Scenario 2", Assumptions::from_values(&values_2)?);

    let runner = ScenarioRunner::new(args.horizon.years);
    let comparison = runner.compare(&first, &second);

    let rows = report::assumption_comparison(&values_1, &values_2, args.all_keys);
    println!("{}", report::render_assumption_table(&rows, &first.name, &second.name));
    println!("{}", report::render_metric_comparison(&comparison, args.metric));

    let y_limit = comparison.waterfall_y_limit();
    let (waterfall_1, waterfall_2) = comparison.waterfalls();
    println!("{}", report::render_waterfall(&first.name, &waterfall_1, y_limit));
    println!("{}", report::render_waterfall(&second.name, &waterfall_2, y_limit));

    if let Some(path) = &args.csv {
        let file = File::create(path)
            .with_context(|| format!("unable to create {}", path.display()))?;
        report::write_comparison_csv(BufWriter::new(file), &comparison, args.metric)?;
        println!("Comparison written to: {}", path.display());
    }

    Ok(())
}

fn run_assumptions(args: AssumptionsArgs) -> Result<()> {
    if args.catalog {
        return print_catalog(args.json);
    }

    let values_1 = load_values(args.scenario_1.as_deref(), &args.set_1, false)?;
    let values_2 = load_values(args.scenario_2.as_deref(), &args.set_2, false)?;
    let rows = report::assumption_comparison(&values_1, &values_2, args.all_keys);
    let rows: Vec<report::AssumptionTableRow> = if args.diff_only {
        report::differing_rows(&rows).into_iter().cloned().collect()
    } else {
        rows
    };

    println!("{}", report::render_assumption_table(&rows, "Scenario 1", "Scenario 2"));
    Ok(())
}

fn print_catalog(json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(catalog::CATALOG)?);
        return Ok(());
    }

    println!(
        "{:<45} {:>9} {:>9} {:>14} {:>18}",
        "Key", "Source", "Required", "Default", "Range"
    );
    println!("{}", "-".repeat(99));
    for spec in catalog::CATALOG {
        let range = spec
            .bounds
            .map(|b| b.to_string())
            .unwrap_or_else(|| report::MISSING.to_string());
        println!(
            "{:<45} {:>9} {:>9} {:>14} {:>18}",
            spec.name,
            format!("{:?}", spec.provenance),
            if spec.required { "yes" } else { "no" },
            spec.default,
            range
        );
    }
    Ok(())
}

fn run_sweep(args: SweepArgs) -> Result<()> {
    if args.steps == 0 {
        bail!("--steps must be at least 1");
    }
    let values = load_values(args.assumptions.as_deref(), &args.overrides, false)?;
    let points = linspace(args.from, args.to, args.steps);

    info!("sweeping '{}' over {} points", args.key, points.len());
    let results = ScenarioRunner::new(args.horizon.years)
        .sweep(&values, &args.key, &points)
        .with_context(|| format!("sweep of '{}' failed", args.key))?;

    println!("{}", report::render_sweep(&args.key, &results));
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Project(args) => run_project(args),
        Command::Compare(args) => run_compare(args),
        Command::Assumptions(args) => run_assumptions(args),
        Command::Sweep(args) => run_sweep(args),
    }
}
