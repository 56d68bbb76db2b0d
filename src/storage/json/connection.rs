use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::session_repository::SessionRepository;
use crate::storage::traits::Connection;

/// JsonConnection manages the data directory that holds the saved session
#[derive(Clone)]
pub struct JsonConnection {
    base_directory: Arc<PathBuf>,
}

impl JsonConnection {
    /// Create a new connection with a base directory, creating it if needed
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }
        Ok(Self {
            base_directory: Arc::new(base_path),
        })
    }

    /// Create a connection in the default data directory
    /// (~/Documents/Bill Splitter)
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;
        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Bill Splitter");
        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the single session document.
    pub fn session_file_path(&self) -> PathBuf {
        self.base_directory.join("session.json")
    }
}

impl Connection for JsonConnection {
    type SessionRepository = SessionRepository;

    fn create_session_repository(&self) -> SessionRepository {
        SessionRepository::new(Arc::new(self.clone()))
    }
}
