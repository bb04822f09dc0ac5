//! Chatbot ROI - Yearly projection of a customer-service chatbot investment
//!
//! This library provides:
//! - Scenario assumptions with a key catalog, defaults and input bounds
//! - Contact volume and phone / web / chatbot channel mix projection
//! - New customers, retention profit, savings, costs and cumulative ROI
//! - No-chatbot baseline and side-by-side scenario comparison
//! - Assumption tables and CSV / JSON / text reports

pub mod assumptions;
pub mod error;
pub mod projection;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use assumptions::{AssumptionValues, Assumptions};
pub use error::{Result, RoiError};
pub use projection::{project, Metric, ProjectionConfig, ProjectionEngine, ProjectionResult, YearRow};
pub use scenario::{Scenario, ScenarioComparison, ScenarioRunner};
