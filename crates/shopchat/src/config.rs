//! Application configuration.
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! `GEMINI_API_KEY`, then `SHOPCHAT_`-prefixed environment variables where
//! `__` separates sections (e.g. `SHOPCHAT_SERVER__BIND`).

use std::fmt::{self, Debug};
use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use shopchat_gemini_model::{GeminiConfig, GeminiConfigBuilder};

use crate::assistant::DEFAULT_SYSTEM_INSTRUCTION;

/// Errors while loading the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The configuration file given explicitly doesn't exist.
    #[error("config file not found: {}", .0.display())]
    MissingFile(PathBuf),
    /// A source couldn't be read or a value has the wrong type.
    #[error(transparent)]
    Invalid(#[from] Box<figment::Error>),
}

/// All settings of the application.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// The model provider.
    pub gemini: GeminiSettings,
    /// The HTTP server.
    pub server: ServerSettings,
    /// Sample data generated at startup.
    pub seed: SeedSettings,
}

/// Model provider settings.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeminiSettings {
    /// The API key. Without one, chat answers with a configuration message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// The model name.
    pub model: String,
    /// Sampling temperature of the first round-trip.
    pub temperature: f64,
    /// The system instruction sent with every request.
    pub instructions: String,
    /// The API base URL.
    pub base_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gemini-2.0-flash".to_owned(),
            temperature: 0.7,
            instructions: DEFAULT_SYSTEM_INSTRUCTION.to_owned(),
            base_url: "https://generativelanguage.googleapis.com/v1beta"
                .to_owned(),
            timeout_secs: 60,
        }
    }
}

impl Debug for GeminiSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeminiSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "<deducted>"))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish_non_exhaustive()
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// The address to listen on.
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_owned(),
        }
    }
}

/// Sample data settings.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedSettings {
    /// Number of random clients to create.
    pub clients: usize,
    /// Number of random orders to create.
    pub orders: usize,
}

impl AppConfig {
    /// Loads the configuration from all sources.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment =
            Figment::new().merge(Serialized::defaults(AppConfig::default()));
        if let Some(path) = path {
            if !path.exists() {
                return Err(ConfigError::MissingFile(path.to_owned()));
            }
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(
                Env::raw()
                    .only(&["GEMINI_API_KEY"])
                    .map(|_| "gemini.api_key".into()),
            )
            .merge(Env::prefixed("SHOPCHAT_").split("__"))
            .extract()
            .map_err(|err| ConfigError::Invalid(Box::new(err)))
    }

    /// Returns the API key, if one is set and not blank.
    pub fn api_key(&self) -> Option<&str> {
        self.gemini
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
    }

    /// Builds the provider configuration.
    pub fn gemini_config(&self) -> GeminiConfig {
        GeminiConfigBuilder::with_api_key(self.api_key().unwrap_or_default())
            .with_model(&self.gemini.model)
            .with_base_url(&self.gemini.base_url)
            .with_timeout(Duration::from_secs(self.gemini.timeout_secs))
            .build()
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    fn load(path: Option<&str>) -> Result<AppConfig, figment::Error> {
        AppConfig::load(path.map(Path::new)).map_err(|err| err.to_string().into())
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.gemini.model, "gemini-2.0-flash");
        assert_eq!(config.gemini.temperature, 0.7);
        assert_eq!(config.gemini.timeout_secs, 60);
        assert_eq!(config.server.bind, "0.0.0.0:8080");
        assert_eq!(config.seed.clients, 0);
        assert!(config.gemini.instructions.contains("PLN"));
        assert_eq!(config.api_key(), None);
    }

    #[test]
    fn test_file_and_env_layers() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "shopchat.toml",
                r#"
                [gemini]
                model = "gemini-2.5-pro"
                temperature = 0.2

                [seed]
                clients = 10
                orders = 30
                "#,
            )?;
            jail.set_env("GEMINI_API_KEY", "from-env");
            jail.set_env("SHOPCHAT_SERVER__BIND", "127.0.0.1:9000");
            jail.set_env("SHOPCHAT_GEMINI__TEMPERATURE", "0.4");

            let config = load(Some("shopchat.toml"))?;
            assert_eq!(config.gemini.model, "gemini-2.5-pro");
            assert_eq!(config.gemini.temperature, 0.4);
            assert_eq!(config.api_key(), Some("from-env"));
            assert_eq!(config.server.bind, "127.0.0.1:9000");
            assert_eq!((config.seed.clients, config.seed.orders), (10, 30));
            assert_eq!(config.gemini.timeout_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn test_prefixed_key_wins() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "plain");
            jail.set_env("SHOPCHAT_GEMINI__API_KEY", "prefixed");
            assert_eq!(load(None)?.api_key(), Some("prefixed"));
            Ok(())
        });
    }

    #[test]
    fn test_blank_key_is_no_key() {
        Jail::expect_with(|jail| {
            jail.set_env("GEMINI_API_KEY", "   ");
            assert_eq!(load(None)?.api_key(), None);
            Ok(())
        });
    }

    #[test]
    fn test_missing_file() {
        let err = AppConfig::load(Some(Path::new("/nonexistent/shopchat.toml")))
            .unwrap_err();
        assert!(matches!(err, ConfigError::MissingFile(_)));
    }

    #[test]
    fn test_debug_hides_key() {
        let mut config = AppConfig::default();
        config.gemini.api_key = Some("secret-key".to_owned());
        let debug = format!("{config:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("<deducted>"));
    }
}
