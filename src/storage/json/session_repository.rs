use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::sync::Arc;

use super::connection::JsonConnection;
use crate::domain::models::session::SessionState;
use crate::storage::traits::SessionStorage;

/// JSON-file session repository: the whole session lives in one
/// `session.json` document under the connection's data directory, using the
/// same record layout earlier builds saved.
#[derive(Clone)]
pub struct SessionRepository {
    connection: Arc<JsonConnection>,
}

impl SessionRepository {
    /// Create a new JSON session repository
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { connection }
    }
}

impl SessionStorage for SessionRepository {
    fn load_session(&self) -> Result<Option<SessionState>> {
        let path = self.connection.session_file_path();
        if !path.exists() {
            debug!("No saved session at {}", path.display());
            return Ok(None);
        }
        let raw = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read session file {}", path.display()))?;
        match serde_json::from_str::<SessionState>(&raw) {
            Ok(state) => Ok(Some(state)),
            Err(e) => {
                warn!("Ignoring malformed session file {}: {}", path.display(), e);
                Ok(None)
            }
        }
    }

    fn save_session(&self, state: &SessionState) -> Result<()> {
        let path = self.connection.session_file_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json =
            serde_json::to_string_pretty(state).context("Failed to serialize session state")?;
        // Write to a sibling temp file first, then rename over the old copy,
        // so a crash mid-write never clobbers the saved session.
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, json)
            .with_context(|| format!("Failed to write {}", tmp_path.display()))?;
        fs::rename(&tmp_path, &path)
            .with_context(|| format!("Failed to replace {}", path.display()))?;
        debug!("Saved session to {}", path.display());
        Ok(())
    }
}
