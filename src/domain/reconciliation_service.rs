//! Consumption reconciliation for the bill splitter.
//!
//! Checks, per item, that the quantity people recorded as consumed adds up
//! to the declared total quantity. A mismatch is a reportable condition,
//! never an error: it gates the detailed totals view off until the inputs
//! are fixed, but computation itself always succeeds.

use crate::domain::commands::reports::{ItemReconciliation, ReconciliationReport};
use crate::domain::models::session::SessionState;

/// Compares each item's declared quantity against recorded consumption
#[derive(Clone, Default)]
pub struct ReconciliationService;

impl ReconciliationService {
    pub fn new() -> Self {
        Self
    }

    /// Per-item consumed-vs-declared report. Consumption is summed over the
    /// current people only, so stale entries for removed people never count.
    pub fn reconcile(&self, state: &SessionState) -> ReconciliationReport {
        let items = state
            .items
            .iter()
            .map(|item| {
                let consumed: f64 = state
                    .people
                    .iter()
                    .map(|person| item.consumption_for(&person.id))
                    .sum();
                ItemReconciliation {
                    id: item.id.clone(),
                    label: item.label.clone(),
                    total_quantity: item.total_quantity,
                    consumed,
                    delta: item.total_quantity - consumed,
                }
            })
            .collect();
        ReconciliationReport { items }
    }
}
