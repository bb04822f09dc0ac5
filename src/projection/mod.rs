//! Yearly financial projection for a single scenario

mod engine;
mod metrics;
mod records;
mod state;

pub use engine::{project, ProjectionConfig, ProjectionEngine};
pub use metrics::Metric;
pub use records::{ProjectionResult, ProjectionSummary, Waterfall, WaterfallStep, YearFinancials, YearRow, MILLION};
pub use state::ProjectionState;
