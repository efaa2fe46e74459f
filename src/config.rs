use std::path::PathBuf;

use crate::storage::FileStorage;
use crate::timetable::AssignmentStore;

/// Runtime settings for the planner
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the saved assignment entry
    pub data_dir: PathBuf,
    pub bind_host: String,
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            bind_host: "0.0.0.0".to_string(),
            port: 8080,
            static_dir: PathBuf::from("static"),
        }
    }
}

impl Config {
    pub fn storage(&self) -> FileStorage {
        FileStorage::new(&self.data_dir)
    }

    pub fn open_store(&self) -> AssignmentStore<FileStorage> {
        AssignmentStore::open(self.storage())
    }
}
