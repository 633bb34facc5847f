// Configuration module
// Public interface for configuration loading

mod loader;
mod settings;

pub use loader::{config_path, load_config, load_config_from, CONFIG_PATH_ENV};
pub use settings::{BadgeConfig, ClientConfig, Config, DEFAULT_DAEMON_ADDRESS};
