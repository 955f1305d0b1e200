use serde::Deserialize;
use config::{Config, ConfigError, Environment, File};

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Connection settings for the Megaphone store.
#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub driver: DatabaseDriver,
    pub server: String,
    pub database: String,
    pub username: String,
    pub password: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseDriver {
    Mysql,
    Sqlite,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DisplayConfig {
    pub truncate_at: usize,
    pub date_format: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            truncate_at: 300,
            date_format: "%-d%o %B %Y".to_string(),
        }
    }
}

impl DatabaseConfig {
    /// Build the URL handed to the sqlx `Any` driver.
    ///
    /// For SQLite only `database` is used, as the file path (or `:memory:`).
    pub fn connection_url(&self) -> String {
        match self.driver {
            DatabaseDriver::Mysql => {
                let credentials = if self.username.is_empty() {
                    String::new()
                } else if self.password.is_empty() {
                    format!("{}@", urlencoding::encode(&self.username))
                } else {
                    format!(
                        "{}:{}@",
                        urlencoding::encode(&self.username),
                        urlencoding::encode(&self.password),
                    )
                };
                format!("mysql://{}{}/{}", credentials, self.server, self.database)
            }
            DatabaseDriver::Sqlite if self.database == ":memory:" => "sqlite::memory:".to_string(),
            DatabaseDriver::Sqlite => format!("sqlite://{}", self.database),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("database.driver", "mysql")?
            .set_default("database.server", "localhost")?
            .set_default("database.database", "megaphone")?
            .set_default("database.username", "")?
            .set_default("database.password", "")?
            .set_default("database.max_connections", 5)?
            .set_default("display.truncate_at", 300)?
            .set_default("display.date_format", "%-d%o %B %Y")?

            // Add config file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))

            // Add environment variables (with MEGAPHONE__ prefix, double underscore separates levels)
            .add_source(Environment::with_prefix("MEGAPHONE").separator("__"))

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
            },
            database: DatabaseConfig {
                driver: DatabaseDriver::Sqlite,
                server: String::new(),
                database: "megaphone.db".to_string(),
                username: String::new(),
                password: String::new(),
                max_connections: 5,
            },
            display: DisplayConfig::default(),
        }
    }
}
