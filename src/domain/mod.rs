//! Domain layer: models, commands, and the services that implement the
//! bill-splitting calculations.

pub mod commands;
pub mod models;
pub mod parsing;

pub mod export_service;
pub mod reconciliation_service;
pub mod session_service;
pub mod totals_service;

pub use export_service::{Clipboard, ExportService};
pub use reconciliation_service::ReconciliationService;
pub use session_service::SessionService;
pub use totals_service::TotalsService;

/// Tolerance for "close enough" floating-point quantity comparisons.
pub const BALANCE_EPSILON: f64 = 1e-4;

/// Paid-vs-calculated differences below this read as rounding noise.
pub const ROUNDING_TOLERANCE: f64 = 0.05;
