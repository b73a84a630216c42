// Application state module
// Shared per-process state handed to every connection

use super::types::Config;
use crate::schedule::ScheduleStore;

/// Application state
pub struct AppState {
    pub config: Config,
    pub store: ScheduleStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = ScheduleStore::new(&config.schedule.data_dir);
        Self { config, store }
    }

    pub const fn access_log_enabled(&self) -> bool {
        self.config.logging.access_log
    }
}
