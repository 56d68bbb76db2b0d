pub mod json;
pub mod traits;

pub use json::{JsonConnection, SessionRepository};
pub use traits::{Connection, SessionStorage};
