mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use settings::{NotifySettings, ServerSettings, Settings, StoreSettings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server, store and notify configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        .add_source(Environment::default().separator("_"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            http_port: partial
                .server
                .as_ref()
                .and_then(|s| s.http_port)
                .unwrap_or(default.server.http_port),
            ws_port: partial
                .server
                .as_ref()
                .and_then(|s| s.ws_port)
                .unwrap_or(default.server.ws_port),
        },
        store: StoreSettings {
            path: partial
                .store
                .as_ref()
                .and_then(|s| s.path.clone())
                .unwrap_or(default.store.path),
        },
        notify: NotifySettings {
            queue_capacity: partial
                .notify
                .as_ref()
                .and_then(|n| n.queue_capacity)
                .unwrap_or(default.notify.queue_capacity),
            finish_delay_ms: partial
                .notify
                .as_ref()
                .and_then(|n| n.finish_delay_ms)
                .unwrap_or(default.notify.finish_delay_ms),
        },
    })
}

#[cfg(test)]
mod tests;
