//! # Bill Splitter
//!
//! Core engine for a bill-splitting calculator: people, purchased items with
//! per-person consumption, flat shared charges, and a reconciled per-person
//! totals breakdown compared against the amount actually paid.
//!
//! This crate is the computation core only. Rendering, event wiring, and the
//! system clipboard are collaborators: they call the mutation API here and
//! re-query the derived views after every change. The session is persisted
//! to a JSON file after each mutation, best effort, and restored on startup.

pub mod domain;
pub mod storage;

use anyhow::Result;
use std::sync::Arc;

use domain::commands::charges::{
    AddSharedChargeCommand, AddSharedChargeResult, SetChargeParticipantCommand,
};
use domain::commands::items::{
    AddItemCommand, AddItemResult, SetConsumptionCommand, SplitItemEquallyResult,
};
use domain::commands::people::{AddPersonCommand, AddPersonResult};
use domain::commands::reports::{ReconciliationReport, ResultsView, TotalsBreakdown};
use domain::models::item::SplitItemError;
use domain::models::session::SessionState;
use domain::{Clipboard, ExportService, ReconciliationService, SessionService, TotalsService};
use storage::JsonConnection;

/// Facade owning the session and the derived-view services.
///
/// Mutations go through here, then callers re-query `results_view` (or the
/// individual queries) for fresh derived data. Everything is synchronous;
/// state is immediately consistent when a mutating call returns.
pub struct BillSplitter {
    session_service: SessionService<JsonConnection>,
    reconciliation_service: ReconciliationService,
    totals_service: TotalsService,
    export_service: ExportService,
}

impl BillSplitter {
    /// Create a splitter on an explicit data directory connection, restoring
    /// any previously saved session.
    pub fn new(connection: JsonConnection) -> Self {
        let session_service = SessionService::new(Arc::new(connection));
        Self {
            session_service,
            reconciliation_service: ReconciliationService::new(),
            totals_service: TotalsService::new(),
            export_service: ExportService::new(),
        }
    }

    /// Create a splitter on the default data directory.
    pub fn new_default() -> Result<Self> {
        Ok(Self::new(JsonConnection::new_default()?))
    }

    // --- Mutation API ---

    pub fn add_person(&mut self, command: AddPersonCommand) -> Result<AddPersonResult> {
        self.session_service.add_person(command)
    }

    pub fn remove_person(&mut self, person_id: &str) {
        self.session_service.remove_person(person_id)
    }

    pub fn add_item(&mut self, command: AddItemCommand) -> Result<AddItemResult> {
        self.session_service.add_item(command)
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.session_service.remove_item(item_id)
    }

    pub fn add_shared_charge(
        &mut self,
        command: AddSharedChargeCommand,
    ) -> Result<AddSharedChargeResult> {
        self.session_service.add_shared_charge(command)
    }

    pub fn remove_shared_charge(&mut self, charge_id: &str) {
        self.session_service.remove_shared_charge(charge_id)
    }

    pub fn set_charge_participant(&mut self, command: SetChargeParticipantCommand) {
        self.session_service.set_charge_participant(command)
    }

    pub fn set_consumption(&mut self, command: SetConsumptionCommand) {
        self.session_service.set_consumption(command)
    }

    pub fn set_paid_total(&mut self, raw: &str) {
        self.session_service.set_paid_total(raw)
    }

    pub fn split_item_equally(
        &mut self,
        item_id: &str,
    ) -> Result<SplitItemEquallyResult, SplitItemError> {
        self.session_service.split_item_equally(item_id)
    }

    // --- Query API ---

    pub fn state(&self) -> &SessionState {
        self.session_service.state()
    }

    /// Full money breakdown; always succeeds, even with zero people.
    pub fn compute_totals(&self) -> TotalsBreakdown {
        self.totals_service.compute(self.session_service.state())
    }

    /// Per-item consumed-vs-declared report.
    pub fn consumption_reconciliation(&self) -> ReconciliationReport {
        self.reconciliation_service
            .reconcile(self.session_service.state())
    }

    /// The participants a charge currently resolves to (the dynamic
    /// all-people fallback applied). `None` for an unknown charge id.
    pub fn resolved_participants(&self, charge_id: &str) -> Option<Vec<String>> {
        let state = self.session_service.state();
        state
            .shared_charges
            .iter()
            .find(|c| c.id == charge_id)
            .map(|c| c.resolved_participants(&state.people))
    }

    /// What to render: the detailed breakdown only when every item's
    /// consumption reconciles; otherwise the list of unbalanced items so the
    /// input can be fixed first.
    pub fn results_view(&self) -> ResultsView {
        let report = self.consumption_reconciliation();
        if report.is_balanced() {
            ResultsView::Ready(self.compute_totals())
        } else {
            ResultsView::Unbalanced(
                report
                    .items
                    .into_iter()
                    .filter(|item| !item.is_balanced())
                    .collect(),
            )
        }
    }

    /// The shareable "name: total" summary text.
    pub fn summary_text(&self) -> String {
        self.export_service.summary_text(&self.compute_totals())
    }

    /// Build the summary and hand it to the clipboard collaborator.
    pub fn copy_summary(&self, clipboard: &dyn Clipboard) -> Result<()> {
        self.export_service
            .copy_summary(&self.compute_totals(), clipboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn setup_test() -> BillSplitter {
        let temp_dir = tempdir().unwrap();
        let conn = JsonConnection::new(temp_dir.path().to_path_buf()).unwrap();
        BillSplitter::new(conn)
    }

    fn add_person(splitter: &mut BillSplitter, name: &str) -> String {
        splitter
            .add_person(AddPersonCommand {
                name: name.to_string(),
            })
            .unwrap()
            .person
            .id
    }

    fn add_item(splitter: &mut BillSplitter, label: &str, price: &str, qty: &str) -> String {
        splitter
            .add_item(AddItemCommand {
                label: label.to_string(),
                total_price: price.to_string(),
                total_quantity: qty.to_string(),
                item_type: "units".to_string(),
            })
            .unwrap()
            .item
            .id
    }

    #[test]
    fn test_unbalanced_consumption_gates_results_view() {
        let mut splitter = setup_test();
        let ana = add_person(&mut splitter, "Ana");
        let ben = add_person(&mut splitter, "Ben");
        let item_id = add_item(&mut splitter, "Beers", "25", "5");

        // 4 of 5 units assigned: results must be gated off.
        splitter.set_consumption(SetConsumptionCommand {
            item_id: item_id.clone(),
            person_id: ana.clone(),
            value: "3".to_string(),
        });
        splitter.set_consumption(SetConsumptionCommand {
            item_id: item_id.clone(),
            person_id: ben.clone(),
            value: "1".to_string(),
        });

        match splitter.results_view() {
            ResultsView::Unbalanced(items) => {
                assert_eq!(items.len(), 1);
                assert!((items[0].delta - 1.0).abs() < 1e-9);
            }
            ResultsView::Ready(_) => panic!("expected gated results"),
        }

        // Assign the missing unit and the detailed view comes back.
        splitter.set_consumption(SetConsumptionCommand {
            item_id,
            person_id: ben,
            value: "2".to_string(),
        });
        match splitter.results_view() {
            ResultsView::Ready(breakdown) => {
                assert!((breakdown.calculated_total - 25.0).abs() < 1e-9);
            }
            ResultsView::Unbalanced(_) => panic!("expected ready results"),
        }
    }

    #[test]
    fn test_resolved_participants_query() {
        let mut splitter = setup_test();
        let ana = add_person(&mut splitter, "Ana");
        let charge_id = splitter
            .add_shared_charge(AddSharedChargeCommand {
                label: "Tip".to_string(),
                amount: "9".to_string(),
            })
            .unwrap()
            .charge
            .id;

        assert_eq!(
            splitter.resolved_participants(&charge_id),
            Some(vec![ana.clone()])
        );
        assert_eq!(splitter.resolved_participants("unknown"), None);

        // Empty the explicit list: the charge resolves to everyone again,
        // including people added later.
        splitter.set_charge_participant(SetChargeParticipantCommand {
            charge_id: charge_id.clone(),
            person_id: ana.clone(),
            include: false,
        });
        let ben = add_person(&mut splitter, "Ben");
        assert_eq!(
            splitter.resolved_participants(&charge_id),
            Some(vec![ana, ben])
        );
    }

    #[test]
    fn test_end_to_end_dinner() {
        let mut splitter = setup_test();
        let ana = add_person(&mut splitter, "Ana");
        let ben = add_person(&mut splitter, "Ben");
        let cyd = add_person(&mut splitter, "Cyd");

        // $30 of beers, one each.
        let beers = add_item(&mut splitter, "Beers", "30", "3");
        for id in [&ana, &ben, &cyd] {
            splitter.set_consumption(SetConsumptionCommand {
                item_id: beers.clone(),
                person_id: id.clone(),
                value: "1".to_string(),
            });
        }

        // $9 tip split across all three.
        splitter
            .add_shared_charge(AddSharedChargeCommand {
                label: "Tip".to_string(),
                amount: "9".to_string(),
            })
            .unwrap();

        splitter.set_paid_total("39.02");

        let breakdown = match splitter.results_view() {
            ResultsView::Ready(b) => b,
            ResultsView::Unbalanced(_) => panic!("expected balanced session"),
        };
        for p in &breakdown.per_person {
            assert!((p.item_subtotal - 10.0).abs() < 1e-9);
            assert!((p.shared_charges - 3.0).abs() < 1e-9);
            assert!((p.final_total - 13.0).abs() < 1e-9);
        }
        assert!(!breakdown.variance_in_shared);
        assert!((breakdown.calculated_total - 39.0).abs() < 1e-9);
        assert!((breakdown.difference.unwrap() - 0.02).abs() < 1e-9);

        assert_eq!(
            splitter.summary_text(),
            "Ana: 13.00\nBen: 13.00\nCyd: 13.00"
        );
    }
}
