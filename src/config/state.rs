// Application state module
// Owns the expense store shared by every connection

use tokio::sync::RwLock;

use super::types::Config;
use crate::store::ExpenseStore;

/// Application state
pub struct AppState {
    pub config: Config,
    /// The single expense collection; writes take the lock exclusively
    pub store: RwLock<ExpenseStore>,
    /// Copied from `logging.access_log` at startup
    pub access_log: bool,
}

impl AppState {
    /// Create `AppState` with a store built from the `[store]` section
    pub fn new(config: &Config) -> Self {
        Self::with_store(config, ExpenseStore::from_config(&config.store))
    }

    /// Create `AppState` around an existing store
    pub fn with_store(config: &Config, store: ExpenseStore) -> Self {
        Self {
            config: config.clone(),
            store: RwLock::new(store),
            access_log: config.logging.access_log,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Overrides;

    #[test]
    fn test_access_log_follows_config() {
        let mut cfg = Config::load_from("does-not-exist/config", &Overrides::default()).unwrap();
        assert!(AppState::new(&cfg).access_log);

        cfg.logging.access_log = false;
        assert!(!AppState::new(&cfg).access_log);
    }
}
