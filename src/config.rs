//! Process configuration
//!
//! Everything is read once at startup and handed to the handlers; nothing
//! looks at the environment after that.

use std::fmt;
use std::net::SocketAddr;
use std::time::Duration;
use thiserror::Error;

use crate::completion::OPENAI_BASE_URL;
use crate::conversation_log::DEFAULT_LOG_TABLE;

/// Errors raised while assembling the configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required setting: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// A bot identity served under its own route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Persona {
    /// Path segment under `/api`
    pub route: String,
    /// Model identifier sent to the completion endpoint
    pub model: String,
    /// Name recorded with every logged turn
    pub bot_name: String,
    /// Whether replies are run through the classification extractor
    pub classification_enabled: bool,
}

impl Persona {
    /// Persona whose replies carry a classification payload, served at `/api/chat`
    pub fn classifier(model: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            route: "chat".to_string(),
            model: model.into(),
            bot_name: bot_name.into(),
            classification_enabled: true,
        }
    }

    /// Persona relaying replies verbatim, served at `/api/chat-plain`
    pub fn plain(model: impl Into<String>, bot_name: impl Into<String>) -> Self {
        Self {
            route: "chat-plain".to_string(),
            model: model.into(),
            bot_name: bot_name.into(),
            classification_enabled: false,
        }
    }
}

/// Top-level configuration
#[derive(Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub supabase_url: String,
    pub supabase_service_role_key: String,
    pub log_table: String,
    /// Total timeout applied to each outbound request
    pub request_timeout: Duration,
    pub personas: Vec<Persona>,
}

impl AppConfig {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read the configuration through an arbitrary key lookup
    ///
    /// Empty values are treated as unset.
    ///
    /// # Example
    ///
    /// ```
    /// use chat_relay::config::AppConfig;
    ///
    /// let config = AppConfig::from_lookup(|name| match name {
    ///     "OPENAI_API_KEY" => Some("sk-test".to_string()),
    ///     "SUPABASE_URL" => Some("https://project.supabase.co".to_string()),
    ///     "SUPABASE_SERVICE_ROLE_KEY" => Some("service-key".to_string()),
    ///     _ => None,
    /// })
    /// .unwrap();
    /// assert_eq!(config.personas.len(), 2);
    /// ```
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let require = |name: &'static str| get(name).ok_or(ConfigError::Missing(name));
        let or_default = |name: &str, default: &str| get(name).unwrap_or_else(|| default.to_string());

        let bind_addr = match get("BIND_ADDR") {
            Some(value) => value.parse::<SocketAddr>().map_err(|_| ConfigError::Invalid {
                name: "BIND_ADDR",
                value,
            })?,
            None => SocketAddr::from(([127, 0, 0, 1], 3030)),
        };

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(value) => match value.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "REQUEST_TIMEOUT_SECS",
                        value,
                    })
                }
            },
            None => Duration::from_secs(60),
        };

        let personas = vec![
            Persona::classifier(
                or_default("CLASSIFIER_MODEL", "gpt-5-nano"),
                or_default("CLASSIFIER_BOT_NAME", "Noah"),
            ),
            Persona::plain(
                or_default("PLAIN_MODEL", "gpt-4o-mini"),
                or_default("PLAIN_BOT_NAME", "Emma"),
            ),
        ];

        Ok(Self {
            bind_addr,
            openai_api_key: require("OPENAI_API_KEY")?,
            openai_base_url: or_default("OPENAI_BASE_URL", OPENAI_BASE_URL),
            supabase_url: require("SUPABASE_URL")?,
            supabase_service_role_key: require("SUPABASE_SERVICE_ROLE_KEY")?,
            log_table: or_default("SUPABASE_LOG_TABLE", DEFAULT_LOG_TABLE),
            request_timeout,
            personas,
        })
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("bind_addr", &self.bind_addr)
            .field("openai_api_key", &"<redacted>")
            .field("openai_base_url", &self.openai_base_url)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_service_role_key", &"<redacted>")
            .field("log_table", &self.log_table)
            .field("request_timeout", &self.request_timeout)
            .field("personas", &self.personas)
            .finish()
    }
}
