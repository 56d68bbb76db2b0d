use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// How an item's quantity is read: discrete units (e.g. 15 cans in a pack)
/// or portions of a single shared dish. Purely presentational for now; the
/// arithmetic is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    #[default]
    Units,
    Shared,
}

impl ItemType {
    /// Coerce raw input; anything other than "shared" means plain units.
    pub fn from_input(raw: &str) -> Self {
        if raw.trim() == "shared" {
            ItemType::Shared
        } else {
            ItemType::Units
        }
    }
}

/// Domain model representing a purchased item divisible among people.
///
/// `consumptions` maps person id to the quantity attributed to that person.
/// The sum of consumptions should equal `total_quantity`; a mismatch is a
/// warning surfaced by reconciliation, never an enforced constraint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub label: String,
    pub total_price: f64,
    pub total_quantity: f64,
    #[serde(default)]
    pub item_type: ItemType,
    #[serde(default)]
    pub consumptions: BTreeMap<String, f64>,
}

impl Item {
    /// Generate a unique ID for an item
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Derived price of a single unit/portion. A zero quantity yields zero
    /// rather than a division error.
    pub fn unit_price(&self) -> f64 {
        if self.total_quantity == 0.0 {
            0.0
        } else {
            self.total_price / self.total_quantity
        }
    }

    /// Consumption recorded for a person; missing entries read as zero.
    pub fn consumption_for(&self, person_id: &str) -> f64 {
        self.consumptions.get(person_id).copied().unwrap_or(0.0)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SplitItemError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),
    #[error("Select at least one person first by entering a quantity > 0 for them")]
    NoParticipantsSelected,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_price() {
        let item = Item {
            id: Item::generate_id(),
            label: "Beers".to_string(),
            total_price: 30.0,
            total_quantity: 3.0,
            item_type: ItemType::Units,
            consumptions: BTreeMap::new(),
        };
        assert_eq!(item.unit_price(), 10.0);
    }

    #[test]
    fn test_unit_price_zero_quantity() {
        let item = Item {
            id: Item::generate_id(),
            label: "Mystery".to_string(),
            total_price: 12.0,
            total_quantity: 0.0,
            item_type: ItemType::Units,
            consumptions: BTreeMap::new(),
        };
        assert_eq!(item.unit_price(), 0.0);
    }

    #[test]
    fn test_consumption_for_missing_entry_is_zero() {
        let item = Item {
            id: Item::generate_id(),
            label: "Fries".to_string(),
            total_price: 5.0,
            total_quantity: 1.0,
            item_type: ItemType::Shared,
            consumptions: BTreeMap::new(),
        };
        assert_eq!(item.consumption_for("nobody"), 0.0);
    }

    #[test]
    fn test_item_type_from_input() {
        assert_eq!(ItemType::from_input("shared"), ItemType::Shared);
        assert_eq!(ItemType::from_input("units"), ItemType::Units);
        assert_eq!(ItemType::from_input("anything else"), ItemType::Units);
        assert_eq!(ItemType::from_input(""), ItemType::Units);
    }
}
