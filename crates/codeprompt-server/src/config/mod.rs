pub mod settings;

pub use settings::{
    AnthropicConfig, LimitsConfig, LoggingConfig, PromptsConfig, ServerConfig, SessionConfig,
    Settings, UiConfig,
};
