use std::sync::Arc;

use tokio::sync::Mutex;

use crate::Config;
use crate::core::Guide;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct Backend {
    pub guide: Arc<Mutex<Guide>>,
    pub config: Arc<Config>,
}

impl Backend {
    pub fn new(config: Config, guide: Guide) -> Self {
        Self {
            guide: Arc::new(Mutex::new(guide)),
            config: Arc::new(config),
        }
    }

    /// Backend over the configured store with a fresh cache
    pub fn from_config(config: Config) -> Self {
        let guide = Guide::open(config.store_path.clone());
        Self::new(config, guide)
    }
}
