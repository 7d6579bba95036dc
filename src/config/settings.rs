use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the servers, the article store, and the
/// notification queue.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub store: StoreSettings,
    pub notify: NotifySettings,
}

/// Configuration settings for the two listeners.
///
/// The CRUD surface and the WebSocket feed bind separately on the same host.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub http_port: u16,
    pub ws_port: u16,
}

/// Configuration settings for the article store.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreSettings {
    pub path: String,
}

/// Configuration settings for the notification pipeline.
///
/// `queue_capacity` bounds the dispatch queue between the write path and the
/// notifier. `finish_delay_ms` is how long a feed-submitted article spends
/// "in production" before it is marked finished and announced.
#[derive(Debug, Deserialize, Clone)]
pub struct NotifySettings {
    pub queue_capacity: usize,
    pub finish_delay_ms: u64,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub store: Option<PartialStoreSettings>,
    pub notify: Option<PartialNotifySettings>,
}

/// Partial server settings.
///
/// Used when loading server configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub http_port: Option<u16>,
    pub ws_port: Option<u16>,
}

/// Partial store settings.
#[derive(Debug, Deserialize)]
pub struct PartialStoreSettings {
    pub path: Option<String>,
}

/// Partial notification settings.
#[derive(Debug, Deserialize)]
pub struct PartialNotifySettings {
    pub queue_capacity: Option<usize>,
    pub finish_delay_ms: Option<u64>,
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is provided.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                http_port: 8000,
                ws_port: 8001,
            },
            store: StoreSettings {
                path: "blog_db".to_string(),
            },
            notify: NotifySettings {
                queue_capacity: 256,
                finish_delay_ms: 3000,
            },
        }
    }
}
