pub mod item;
pub mod person;
pub mod session;
pub mod shared_charge;

/// Raised when an add operation receives a blank name or label. All other
/// malformed input is coerced to a safe default instead of rejected.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Person name cannot be empty")]
    EmptyName,
    #[error("Label cannot be empty")]
    EmptyLabel,
}
