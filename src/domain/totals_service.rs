//! The totals engine: per-person subtotals, shared-charge allocation, and
//! reconciliation against the declared paid total.
//!
//! Computation never fails: with zero people it returns an empty breakdown,
//! and charges that cannot be distributed (zero amount or zero resolved
//! participants) are skipped rather than erroring.

use std::collections::HashMap;

use crate::domain::commands::reports::{PersonTotal, TotalsBreakdown};
use crate::domain::models::session::SessionState;
use crate::domain::BALANCE_EPSILON;

/// Computes the per-person money breakdown for the whole session
#[derive(Clone, Default)]
pub struct TotalsService;

impl TotalsService {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, state: &SessionState) -> TotalsBreakdown {
        // Item subtotals: derived unit price times recorded consumption.
        let mut per_person: Vec<PersonTotal> = state
            .people
            .iter()
            .map(|person| {
                let item_subtotal = state
                    .items
                    .iter()
                    .map(|item| item.unit_price() * item.consumption_for(&person.id))
                    .sum();
                PersonTotal {
                    id: person.id.clone(),
                    name: person.name.clone(),
                    item_subtotal,
                    shared_charges: 0.0,
                    final_total: 0.0,
                }
            })
            .collect();

        let index_by_id: HashMap<&str, usize> = per_person
            .iter()
            .enumerate()
            .map(|(index, p)| (p.id.as_str(), index))
            .collect();

        // Shared charges: equal split over the resolved participant set.
        let mut total_shared_amount = 0.0;
        let mut shared_shares: Vec<(usize, f64)> = Vec::new();
        for charge in &state.shared_charges {
            if charge.amount <= 0.0 {
                continue;
            }
            let participants = charge.resolved_participants(&state.people);
            if participants.is_empty() {
                continue;
            }
            total_shared_amount += charge.amount;
            let share = charge.amount / participants.len() as f64;
            for participant_id in &participants {
                if let Some(&index) = index_by_id.get(participant_id.as_str()) {
                    shared_shares.push((index, share));
                }
            }
        }
        for (index, share) in shared_shares {
            per_person[index].shared_charges += share;
        }

        let baseline_shared = per_person.first().map(|p| p.shared_charges).unwrap_or(0.0);
        let variance_in_shared = per_person
            .iter()
            .any(|p| (p.shared_charges - baseline_shared).abs() > BALANCE_EPSILON);

        for person in &mut per_person {
            person.final_total = person.item_subtotal + person.shared_charges;
        }

        let calculated_total: f64 = per_person.iter().map(|p| p.final_total).sum();
        let paid_total = state.paid_total;
        let difference = paid_total.map(|paid| paid - calculated_total);

        TotalsBreakdown {
            per_person,
            calculated_total,
            paid_total,
            difference,
            variance_in_shared,
            total_shared_amount,
        }
    }
}
