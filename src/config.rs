use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::domain::Tier;
use crate::engine::visibility::{MaskPolicy, DEFAULT_MASKED_LABEL, DEFAULT_MASKED_REASON};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub visibility: VisibilityConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL URL. Absent means the in-memory store.
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: default_max_connections(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Per-surface truncation limits
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Max ids accepted by the featured fixtures surface
    pub featured_max_ids: usize,
    /// Max fixtures returned by a filter-driven list
    pub list_cap: usize,
    /// Fixtures of a filtered list that are joined with predictions
    pub card_fixtures: usize,
    pub prediction_limit_default: usize,
    pub prediction_limit_max: usize,
    pub player_recent_predictions: usize,
    pub league_fixtures: usize,
    pub watchlist_players: usize,
    pub available_seasons: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            featured_max_ids: 6,
            list_cap: 60,
            card_fixtures: 6,
            prediction_limit_default: 100,
            prediction_limit_max: 500,
            player_recent_predictions: 10,
            league_fixtures: 10,
            watchlist_players: 20,
            available_seasons: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct VisibilityConfig {
    #[serde(default = "default_masked_label")]
    pub masked_label: String,
    #[serde(default = "default_masked_reason")]
    pub masked_reason: String,
}

fn default_masked_label() -> String {
    DEFAULT_MASKED_LABEL.to_string()
}

fn default_masked_reason() -> String {
    DEFAULT_MASKED_REASON.to_string()
}

impl Default for VisibilityConfig {
    fn default() -> Self {
        Self {
            masked_label: default_masked_label(),
            masked_reason: default_masked_reason(),
        }
    }
}

impl VisibilityConfig {
    pub fn mask_policy(&self) -> MaskPolicy {
        MaskPolicy::new(&self.masked_label, &self.masked_reason)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

/// A static API token and the tier it grants
#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub token: String,
    #[serde(default)]
    pub tier: Tier,
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config")
    }

    /// Load configuration from a specific directory
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, ConfigError> {
        let config_dir = config_dir.as_ref();

        let builder = Config::builder()
            .set_default("server.host", default_host())?
            .set_default("server.port", default_port() as i64)?
            .set_default("logging.level", "info")?
            .set_default("logging.json", false)?
            .set_default("database.max_connections", default_max_connections() as i64)?
            .add_source(File::from(config_dir.join("default.toml")).required(false))
            // Environment-specific overrides, e.g. config/production.toml
            .add_source(
                File::from(config_dir.join(
                    std::env::var("MATCHDAY_ENV").unwrap_or_else(|_| "development".to_string()),
                ))
                .required(false),
            )
            // MATCHDAY_SERVER__PORT, MATCHDAY_DATABASE__URL, ...
            .add_source(
                Environment::with_prefix("MATCHDAY")
                    .separator("__")
                    .try_parsing(true),
            );

        builder.build()?.try_deserialize()
    }

    /// Validate configuration, collecting every problem
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let limits = &self.limits;

        if self.server.port == 0 {
            errors.push("server.port must be non-zero".to_string());
        }

        if self.database.max_connections == 0 {
            errors.push("database.max_connections must be at least 1".to_string());
        }

        if let Some(url) = &self.database.url {
            if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                errors.push("database.url must be a postgres:// URL".to_string());
            }
        }

        for (name, value) in [
            ("featured_max_ids", limits.featured_max_ids),
            ("list_cap", limits.list_cap),
            ("card_fixtures", limits.card_fixtures),
            ("prediction_limit_default", limits.prediction_limit_default),
            ("prediction_limit_max", limits.prediction_limit_max),
            ("player_recent_predictions", limits.player_recent_predictions),
            ("league_fixtures", limits.league_fixtures),
            ("watchlist_players", limits.watchlist_players),
            ("available_seasons", limits.available_seasons),
        ] {
            if value == 0 {
                errors.push(format!("limits.{} must be positive", name));
            }
        }

        if limits.prediction_limit_default > limits.prediction_limit_max {
            errors.push(format!(
                "limits.prediction_limit_default ({}) exceeds prediction_limit_max ({})",
                limits.prediction_limit_default, limits.prediction_limit_max
            ));
        }

        if limits.card_fixtures > limits.list_cap {
            errors.push("limits.card_fixtures must not exceed limits.list_cap".to_string());
        }

        if self.visibility.masked_label.trim().is_empty() {
            errors.push("visibility.masked_label must not be empty".to_string());
        }

        for (i, entry) in self.auth.tokens.iter().enumerate() {
            if entry.token.trim().len() < 8 {
                errors.push(format!("auth.tokens[{}] must be at least 8 characters", i));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
