//! Session mutations for the bill splitter.
//!
//! The service owns the in-memory `SessionState` and is the only place that
//! mutates it. Every successful mutation is persisted best-effort: a failed
//! save is logged and never surfaced, so the in-memory state stays the
//! source of truth for all subsequent computation.

use anyhow::Result;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::domain::commands::charges::{
    AddSharedChargeCommand, AddSharedChargeResult, SetChargeParticipantCommand,
};
use crate::domain::commands::items::{
    AddItemCommand, AddItemResult, SetConsumptionCommand, SplitItemEquallyResult,
};
use crate::domain::commands::people::{AddPersonCommand, AddPersonResult};
use crate::domain::models::item::{Item, ItemType, SplitItemError};
use crate::domain::models::person::Person;
use crate::domain::models::session::SessionState;
use crate::domain::models::shared_charge::{SharedCharge, SplitMode};
use crate::domain::models::ValidationError;
use crate::domain::parsing::{
    parse_non_negative_number, parse_optional_number, parse_positive_number,
};
use crate::storage::traits::{Connection, SessionStorage};

/// Service owning the session state and every mutation on it
pub struct SessionService<C: Connection> {
    state: SessionState,
    session_repository: C::SessionRepository,
}

impl<C: Connection> SessionService<C> {
    /// Create the service, restoring any previously saved session. A missing
    /// or unreadable save starts a fresh, empty session rather than failing.
    pub fn new(connection: Arc<C>) -> Self {
        let session_repository = connection.create_session_repository();
        let state = match session_repository.load_session() {
            Ok(Some(state)) => {
                info!(
                    "Restored saved session: {} people, {} items, {} charges",
                    state.people.len(),
                    state.items.len(),
                    state.shared_charges.len()
                );
                state
            }
            Ok(None) => SessionState::default(),
            Err(e) => {
                warn!("Failed to load saved session, starting fresh: {:#}", e);
                SessionState::default()
            }
        };
        Self {
            state,
            session_repository,
        }
    }

    /// Read access to the current session for the query services.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Persist the current session. Best effort: failures are logged and
    /// never surfaced, the in-memory state remains authoritative.
    fn persist(&self) {
        if let Err(e) = self.session_repository.save_session(&self.state) {
            warn!("Failed to persist session: {:#}", e);
        }
    }

    /// Add a person and back-fill a zero consumption entry on every item.
    pub fn add_person(&mut self, command: AddPersonCommand) -> Result<AddPersonResult> {
        let name = command.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        let person = Person {
            id: Person::generate_id(),
            name: name.to_string(),
        };
        for item in &mut self.state.items {
            item.consumptions.entry(person.id.clone()).or_insert(0.0);
        }
        info!("Added person: {} ({})", person.name, person.id);
        self.state.people.push(person.clone());
        self.persist();
        Ok(AddPersonResult { person })
    }

    /// Remove a person and sweep every reference to them: consumption
    /// entries on items and participant lists on shared charges. Unknown ids
    /// are a silent no-op.
    pub fn remove_person(&mut self, person_id: &str) {
        self.state.people.retain(|p| p.id != person_id);
        for item in &mut self.state.items {
            item.consumptions.remove(person_id);
        }
        for charge in &mut self.state.shared_charges {
            charge.participant_ids.retain(|id| id != person_id);
        }
        info!("Removed person {}", person_id);
        self.persist();
    }

    /// Add an item, seeding a zero consumption entry for every current person.
    pub fn add_item(&mut self, command: AddItemCommand) -> Result<AddItemResult> {
        let label = command.label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        let mut consumptions = BTreeMap::new();
        for person in &self.state.people {
            consumptions.insert(person.id.clone(), 0.0);
        }
        let item = Item {
            id: Item::generate_id(),
            label: label.to_string(),
            total_price: parse_non_negative_number(&command.total_price, 0.0),
            total_quantity: parse_positive_number(&command.total_quantity, 1.0),
            item_type: ItemType::from_input(&command.item_type),
            consumptions,
        };
        info!(
            "Added item: {} (price {:.2}, quantity {})",
            item.label, item.total_price, item.total_quantity
        );
        self.state.items.push(item.clone());
        self.persist();
        Ok(AddItemResult { item })
    }

    pub fn remove_item(&mut self, item_id: &str) {
        self.state.items.retain(|it| it.id != item_id);
        info!("Removed item {}", item_id);
        self.persist();
    }

    /// Add a shared charge. The participant list is a snapshot of all
    /// current people, not a live view.
    pub fn add_shared_charge(
        &mut self,
        command: AddSharedChargeCommand,
    ) -> Result<AddSharedChargeResult> {
        let label = command.label.trim();
        if label.is_empty() {
            return Err(ValidationError::EmptyLabel.into());
        }
        let charge = SharedCharge {
            id: SharedCharge::generate_id(),
            label: label.to_string(),
            amount: parse_non_negative_number(&command.amount, 0.0),
            split_mode: SplitMode::Equal,
            participant_ids: self.state.person_ids(),
        };
        info!("Added shared charge: {} ({:.2})", charge.label, charge.amount);
        self.state.shared_charges.push(charge.clone());
        self.persist();
        Ok(AddSharedChargeResult { charge })
    }

    pub fn remove_shared_charge(&mut self, charge_id: &str) {
        self.state.shared_charges.retain(|c| c.id != charge_id);
        info!("Removed shared charge {}", charge_id);
        self.persist();
    }

    /// Include or exclude a person from a charge. Idempotent on the list
    /// contents: re-including keeps exactly one entry, re-excluding is a
    /// no-op. Note that excluding from a charge with an *empty* stored list
    /// does not opt the person out; the list stays empty and keeps resolving
    /// to everyone (see `SharedCharge::resolved_participants`).
    pub fn set_charge_participant(&mut self, command: SetChargeParticipantCommand) {
        let Some(charge) = self
            .state
            .shared_charges
            .iter_mut()
            .find(|c| c.id == command.charge_id)
        else {
            debug!(
                "Ignoring participant change for unknown charge {}",
                command.charge_id
            );
            return;
        };
        if command.include {
            if !charge.participant_ids.iter().any(|id| *id == command.person_id) {
                charge.participant_ids.push(command.person_id.clone());
            }
        } else {
            charge.participant_ids.retain(|id| *id != command.person_id);
        }
        self.persist();
    }

    /// Overwrite one person's consumption of an item. The value is never
    /// clamped to the remaining quantity; over- and under-consumption are
    /// representable and surfaced by reconciliation instead.
    pub fn set_consumption(&mut self, command: SetConsumptionCommand) {
        let Some(item) = self
            .state
            .items
            .iter_mut()
            .find(|it| it.id == command.item_id)
        else {
            debug!(
                "Ignoring consumption change for unknown item {}",
                command.item_id
            );
            return;
        };
        let value = parse_non_negative_number(&command.value, 0.0);
        item.consumptions.insert(command.person_id.clone(), value);
        self.persist();
    }

    /// Record the actual amount paid. Empty or unparseable input unsets the
    /// field, which is distinct from entering zero.
    pub fn set_paid_total(&mut self, raw: &str) {
        self.state.paid_total = parse_optional_number(raw);
        self.persist();
    }

    /// Redistribute an item's declared quantity equally among the people who
    /// already have a consumption greater than zero, and zero out everyone
    /// else. The row is fully reset on each call, so repeating the operation
    /// is idempotent.
    pub fn split_item_equally(
        &mut self,
        item_id: &str,
    ) -> Result<SplitItemEquallyResult, SplitItemError> {
        let people_ids = self.state.person_ids();
        let Some(item) = self.state.items.iter_mut().find(|it| it.id == item_id) else {
            return Err(SplitItemError::ItemNotFound(item_id.to_string()));
        };
        let participant_ids: Vec<String> = people_ids
            .iter()
            .filter(|id| item.consumption_for(id) > 0.0)
            .cloned()
            .collect();
        if participant_ids.is_empty() {
            return Err(SplitItemError::NoParticipantsSelected);
        }
        let share = item.total_quantity / participant_ids.len() as f64;
        for id in &people_ids {
            let value = if participant_ids.contains(id) { share } else { 0.0 };
            item.consumptions.insert(id.clone(), value);
        }
        info!(
            "Split {} equally: {:.4} each across {} people",
            item.label,
            share,
            participant_ids.len()
        );
        self.persist();
        Ok(SplitItemEquallyResult {
            item_id: item_id.to_string(),
            share,
            participant_ids,
        })
    }
}
