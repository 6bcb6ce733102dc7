use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub logging: LoggingSettings,
    pub api: ApiSettings,
    pub vision: VisionSettings,
    pub search: SearchSettings,
    pub secrets: SecretSettings,
}

/// Logging configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
}

/// Configuration for the API server.
#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    pub host: String,
    pub port: u32,
}

/// Base URL of the remote vision gateway.
#[derive(Debug, Deserialize, Clone)]
pub struct VisionSettings {
    pub endpoint: String,
}

/// Base URL of the remote search gateway.
#[derive(Debug, Deserialize, Clone)]
pub struct SearchSettings {
    pub endpoint: String,
}

/// Secrets come in through the environment (`APP__SECRETS__*`), never from
/// the checked-in settings file.
#[derive(Debug, Deserialize, Clone)]
pub struct SecretSettings {
    pub serper_key: String,
    pub gcp_credentials: String,
}
