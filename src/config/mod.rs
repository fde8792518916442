use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub integrations: IntegrationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Public base URL of the marketing site, used when resolving
    /// relative links in outbound emails and feeds.
    pub site_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminConfig {
    /// Bearer token for the /admin surface. Empty disables admin routes.
    #[serde(default)]
    pub api_token: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct IntegrationConfig {
    pub email: Option<EmailConfig>,
    pub webhook: Option<WebhookConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EmailConfig {
    pub enabled: bool,
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// From header for all outbound mail, e.g. "Mango Law <intake@mango.law>".
    pub from_address: String,
    /// Where new-lead notifications are delivered inside the firm.
    pub intake_address: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebhookConfig {
    pub enabled: bool,
    pub url: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("server.site_url", "https://mango.law")?
            .set_default("database.max_connections", 10)?
            .set_default("admin.api_token", "")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with DOCKET__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("DOCKET").separator("__"))

            .build()?;

        config.try_deserialize()
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                site_url: "https://mango.law".to_string(),
            },
            database: DatabaseConfig {
                url: "sqlite://docket.db".to_string(),
                max_connections: 10,
            },
            admin: AdminConfig {
                api_token: String::new(),
            },
            integrations: IntegrationConfig {
                email: None,
                webhook: None,
            },
        }
    }
}
