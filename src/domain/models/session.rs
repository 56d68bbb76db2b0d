use serde::{Deserialize, Serialize};

use super::item::Item;
use super::person::Person;
use super::shared_charge::SharedCharge;

/// The aggregate root: everything a bill-splitting session holds.
///
/// Items and shared charges reference people by id only; removing a person
/// must sweep those references explicitly (see `SessionService`). The wire
/// layout (camelCase field names, single record) matches sessions saved by
/// earlier builds and must not change.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    #[serde(default)]
    pub people: Vec<Person>,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub shared_charges: Vec<SharedCharge>,
    #[serde(default)]
    pub paid_total: Option<f64>,
}

impl SessionState {
    /// Ids of all current people, in insertion order.
    pub fn person_ids(&self) -> Vec<String> {
        self.people.iter().map(|p| p.id.clone()).collect()
    }
}
