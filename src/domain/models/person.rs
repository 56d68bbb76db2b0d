use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Domain model representing a participant in the bill split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,
    pub name: String,
}

impl Person {
    /// Generate a unique, stable ID for a person
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}
