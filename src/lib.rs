pub mod api;
pub mod config;
pub mod store;

use config::Config;
use store::Store;

pub struct AppState {
    pub config: Config,
    pub store: Store,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            store: Store::new(),
        }
    }
}
