use anyhow::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Settings {
    pub server: ServerConfig,
    pub session: SessionConfig,
    pub ui: UiConfig,
    pub anthropic: AnthropicConfig,
    pub limits: LimitsConfig,
    pub prompts: PromptsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    pub ttl_seconds: u64,
    pub idle_seconds: u64,
    pub cleanup_interval_seconds: u64,
    pub max_sessions: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct UiConfig {
    pub page_title: String,
    pub stylesheet_path: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AnthropicConfig {
    pub base_url: String,
    pub api_version: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LimitsConfig {
    pub generate_concurrency: usize,
    pub acquire_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PromptsConfig {
    pub system_prompt: String,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    /// Fallback filter when `RUST_LOG` is not set
    pub filter: String,
    pub json: bool,
    /// Write a daily rolling log file here in addition to stdout
    #[serde(default)]
    pub directory: Option<String>,
}

const DEFAULT_SYSTEM_PROMPT: &str = "You are an expert software architect. \
Turn the user's project description into a single, detailed prompt that an AI-powered IDE \
can follow to scaffold and build the project end to end. Cover project structure, \
key features, data model, API surface, testing and deployment. \
Answer with the prompt only, formatted as Markdown.";

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8501,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: "codeprompt_session".to_string(),
            ttl_seconds: 6 * 60 * 60,
            idle_seconds: 30 * 60,
            cleanup_interval_seconds: 300,
            max_sessions: 10_000,
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            page_title: "CodePromptPro".to_string(),
            stylesheet_path: "static/styles.css".to_string(),
        }
    }
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.anthropic.com".to_string(),
            api_version: "2023-06-01".to_string(),
            model: "claude-3-5-sonnet-latest".to_string(),
            max_tokens: 4096,
            timeout_seconds: 120,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            generate_concurrency: 4,
            acquire_timeout_ms: 30_000,
        }
    }
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info,codeprompt_server=debug".to_string(),
            json: true,
            directory: None,
        }
    }
}

impl Settings {
    /// Layered load: built-in defaults, `config/settings.toml`, then `APP__*` env vars.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();

        let defaults = Settings::default();
        let config = Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("session.cookie_name", defaults.session.cookie_name)?
            .set_default("session.ttl_seconds", defaults.session.ttl_seconds as i64)?
            .set_default("session.idle_seconds", defaults.session.idle_seconds as i64)?
            .set_default(
                "session.cleanup_interval_seconds",
                defaults.session.cleanup_interval_seconds as i64,
            )?
            .set_default("session.max_sessions", defaults.session.max_sessions as i64)?
            .set_default("ui.page_title", defaults.ui.page_title)?
            .set_default("ui.stylesheet_path", defaults.ui.stylesheet_path)?
            .set_default("anthropic.base_url", defaults.anthropic.base_url)?
            .set_default("anthropic.api_version", defaults.anthropic.api_version)?
            .set_default("anthropic.model", defaults.anthropic.model)?
            .set_default("anthropic.max_tokens", i64::from(defaults.anthropic.max_tokens))?
            .set_default("anthropic.timeout_seconds", defaults.anthropic.timeout_seconds as i64)?
            .set_default(
                "limits.generate_concurrency",
                defaults.limits.generate_concurrency as i64,
            )?
            .set_default("limits.acquire_timeout_ms", defaults.limits.acquire_timeout_ms as i64)?
            .set_default("prompts.system_prompt", defaults.prompts.system_prompt)?
            .set_default("logging.filter", defaults.logging.filter)?
            .set_default("logging.json", defaults.logging.json)?
            .add_source(File::with_name("config/settings").required(false))
            .add_source(
                Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }
}

impl SessionConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_seconds)
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_seconds.max(1))
    }
}

impl LimitsConfig {
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_millis(self.acquire_timeout_ms.max(1))
    }
}
