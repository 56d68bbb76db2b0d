use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use super::person::Person;

/// How a shared charge is divided among its participants. Only an equal
/// split exists today; the field is persisted so saved sessions stay
/// readable if more modes are ever added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    #[default]
    Equal,
}

/// Domain model representing a flat fee (tax, tip, delivery) split among a
/// chosen subset of people.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedCharge {
    pub id: String,
    pub label: String,
    pub amount: f64,
    #[serde(default)]
    pub split_mode: SplitMode,
    #[serde(default, deserialize_with = "lenient_id_list")]
    pub participant_ids: Vec<String>,
}

impl SharedCharge {
    /// Generate a unique ID for a shared charge
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// The people who actually share this charge. An empty explicit list
    /// falls back to *all current people*, re-evaluated on every call rather
    /// than snapshotted: a person added after a charge with no explicit list
    /// becomes an implicit participant of it. That is observable behavior of
    /// existing saved sessions and is preserved deliberately.
    pub fn resolved_participants(&self, people: &[Person]) -> Vec<String> {
        if !self.participant_ids.is_empty() {
            return self.participant_ids.clone();
        }
        people.iter().map(|p| p.id.clone()).collect()
    }
}

/// Saved sessions written by older builds may carry anything in
/// `participantIds`. A missing or non-array value reads as an empty list so
/// the all-people fallback applies instead of failing the whole load.
fn lenient_id_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(entries) => Ok(entries
            .into_iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(id: &str, name: &str) -> Person {
        Person {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn test_resolved_participants_explicit_list() {
        let charge = SharedCharge {
            id: SharedCharge::generate_id(),
            label: "Tip".to_string(),
            amount: 9.0,
            split_mode: SplitMode::Equal,
            participant_ids: vec!["a".to_string(), "b".to_string()],
        };
        let people = vec![person("a", "Ana"), person("b", "Ben"), person("c", "Cyd")];
        assert_eq!(charge.resolved_participants(&people), vec!["a", "b"]);
    }

    #[test]
    fn test_resolved_participants_empty_list_falls_back_to_everyone() {
        let charge = SharedCharge {
            id: SharedCharge::generate_id(),
            label: "Tax".to_string(),
            amount: 5.0,
            split_mode: SplitMode::Equal,
            participant_ids: Vec::new(),
        };
        let mut people = vec![person("a", "Ana"), person("b", "Ben")];
        assert_eq!(charge.resolved_participants(&people), vec!["a", "b"]);

        // The fallback is dynamic: someone added later joins the charge too.
        people.push(person("c", "Cyd"));
        assert_eq!(charge.resolved_participants(&people), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_participant_ids_lenient_deserialization() {
        // Non-array participantIds from an old/corrupt save reads as empty.
        let raw = r#"{"id":"x","label":"Tax","amount":2.5,"splitMode":"equal","participantIds":"oops"}"#;
        let charge: SharedCharge = serde_json::from_str(raw).unwrap();
        assert!(charge.participant_ids.is_empty());

        // Missing participantIds also reads as empty.
        let raw = r#"{"id":"x","label":"Tax","amount":2.5}"#;
        let charge: SharedCharge = serde_json::from_str(raw).unwrap();
        assert!(charge.participant_ids.is_empty());
        assert_eq!(charge.split_mode, SplitMode::Equal);
    }

    #[test]
    fn test_split_mode_wire_format() {
        let charge = SharedCharge {
            id: "x".to_string(),
            label: "Tip".to_string(),
            amount: 1.0,
            split_mode: SplitMode::Equal,
            participant_ids: vec!["a".to_string()],
        };
        let json = serde_json::to_value(&charge).unwrap();
        assert_eq!(json["splitMode"], "equal");
        assert_eq!(json["participantIds"][0], "a");
    }
}
