use std::sync::Arc;

use crate::config::Config;
use crate::storage::RecordStore;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub store: RecordStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = RecordStore::new(config.save_dir.clone(), config.on_collision);
        Self { config, store }
    }
}
