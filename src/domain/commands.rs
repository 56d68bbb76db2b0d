//! Domain-level command and result types.
//!
//! These structs are the inputs and outputs of the services in this layer.
//! Numeric fields on commands are raw strings exactly as a form field
//! produces them; parsing happens once, inside the service, through
//! `domain::parsing`.

pub mod people {
    use crate::domain::models::person::Person;

    /// Input for adding a person to the split.
    #[derive(Debug, Clone)]
    pub struct AddPersonCommand {
        pub name: String,
    }

    /// Result of adding a person.
    #[derive(Debug, Clone)]
    pub struct AddPersonResult {
        pub person: Person,
    }
}

pub mod items {
    use crate::domain::models::item::Item;

    /// Input for adding a purchased item.
    #[derive(Debug, Clone)]
    pub struct AddItemCommand {
        pub label: String,
        /// Raw price input; coerced to a non-negative number (default 0).
        pub total_price: String,
        /// Raw quantity input; coerced to a positive number (default 1).
        pub total_quantity: String,
        /// Raw item type; anything other than "shared" means "units".
        pub item_type: String,
    }

    /// Result of adding an item.
    #[derive(Debug, Clone)]
    pub struct AddItemResult {
        pub item: Item,
    }

    /// Input for recording how much of an item a person consumed.
    #[derive(Debug, Clone)]
    pub struct SetConsumptionCommand {
        pub item_id: String,
        pub person_id: String,
        /// Raw quantity input; coerced to a non-negative number (default 0).
        pub value: String,
    }

    /// Result of splitting an item equally among its participants.
    #[derive(Debug, Clone)]
    pub struct SplitItemEquallyResult {
        pub item_id: String,
        /// Quantity assigned to each participant.
        pub share: f64,
        pub participant_ids: Vec<String>,
    }
}

pub mod charges {
    use crate::domain::models::shared_charge::SharedCharge;

    /// Input for adding a flat shared charge (tax, tip, delivery).
    #[derive(Debug, Clone)]
    pub struct AddSharedChargeCommand {
        pub label: String,
        /// Raw amount input; coerced to a non-negative number (default 0).
        pub amount: String,
    }

    /// Result of adding a shared charge.
    #[derive(Debug, Clone)]
    pub struct AddSharedChargeResult {
        pub charge: SharedCharge,
    }

    /// Input for including or excluding a person from a charge.
    #[derive(Debug, Clone)]
    pub struct SetChargeParticipantCommand {
        pub charge_id: String,
        pub person_id: String,
        pub include: bool,
    }
}

pub mod reports {
    //! Derived views returned by the query services. All of these are
    //! recomputed from the session on every call; nothing here is stored.

    use crate::domain::{BALANCE_EPSILON, ROUNDING_TOLERANCE};

    /// Consumed-vs-declared accounting for one item. `delta` is signed:
    /// positive means quantity is still unassigned, negative means people
    /// consumed more than was declared.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ItemReconciliation {
        pub id: String,
        pub label: String,
        pub total_quantity: f64,
        pub consumed: f64,
        pub delta: f64,
    }

    impl ItemReconciliation {
        pub fn is_balanced(&self) -> bool {
            self.delta.abs() <= BALANCE_EPSILON
        }
    }

    /// Per-item reconciliation across the whole session.
    #[derive(Debug, Clone, PartialEq)]
    pub struct ReconciliationReport {
        pub items: Vec<ItemReconciliation>,
    }

    impl ReconciliationReport {
        /// Items whose consumption does not add up to the declared quantity.
        pub fn unbalanced(&self) -> Vec<&ItemReconciliation> {
            self.items.iter().filter(|i| !i.is_balanced()).collect()
        }

        pub fn is_balanced(&self) -> bool {
            self.items.iter().all(ItemReconciliation::is_balanced)
        }
    }

    /// One person's share of the bill.
    #[derive(Debug, Clone, PartialEq)]
    pub struct PersonTotal {
        pub id: String,
        pub name: String,
        pub item_subtotal: f64,
        pub shared_charges: f64,
        pub final_total: f64,
    }

    /// How to read the paid-vs-calculated difference.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DifferenceKind {
        /// Small enough to be rounding noise; informational only.
        LikelyRounding,
        /// Worth a second look at the inputs; still never blocks results.
        Mismatch,
    }

    /// The full money breakdown for the session.
    #[derive(Debug, Clone, PartialEq)]
    pub struct TotalsBreakdown {
        /// One record per person, in insertion order.
        pub per_person: Vec<PersonTotal>,
        /// Sum of every person's final total.
        pub calculated_total: f64,
        /// The declared paid total, echoed back; `None` if not entered.
        pub paid_total: Option<f64>,
        /// `paid_total - calculated_total`, when a paid total was entered.
        pub difference: Option<f64>,
        /// True when shared-charge allocations differ between people.
        pub variance_in_shared: bool,
        /// Sum of shared-charge amounts actually distributed (skipped
        /// charges excluded).
        pub total_shared_amount: f64,
    }

    impl TotalsBreakdown {
        pub fn classify_difference(&self) -> Option<DifferenceKind> {
            self.difference.map(|diff| {
                if diff.abs() < ROUNDING_TOLERANCE {
                    DifferenceKind::LikelyRounding
                } else {
                    DifferenceKind::Mismatch
                }
            })
        }
    }

    /// What the caller should render: unbalanced consumption gates the
    /// detailed breakdown off until the inputs are fixed.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ResultsView {
        /// At least one item's consumption does not match its quantity.
        Unbalanced(Vec<ItemReconciliation>),
        /// Every item reconciles; the breakdown is trustworthy.
        Ready(TotalsBreakdown),
    }
}
