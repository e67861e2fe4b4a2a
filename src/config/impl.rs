use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::StaticConfig;

static CONFIG: OnceLock<ArcSwap<StaticConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Falls back to defaults when `init_config`
/// was never called, so library consumers and tests can skip setup.
pub fn get_config() -> Arc<StaticConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(StaticConfig::default()))
        .load_full()
}

/// Initialize the global configuration from `config.toml` and the environment
///
/// # Examples
/// ```no_run
/// use collateral_insights::config::init_config;
/// init_config();
/// ```
pub fn init_config() {
    init_config_from(super::DEFAULT_CONFIG_PATH);
}

/// Initialize the global configuration from an explicit file path
pub fn init_config_from(path: &str) {
    let loaded = StaticConfig::load_from(path);
    match CONFIG.get() {
        Some(existing) => existing.store(Arc::new(loaded)),
        None => {
            let _ = CONFIG.set(ArcSwap::from_pointee(loaded));
        }
    }
}
