pub mod anthropic;
pub mod prompt_generator;

pub use anthropic::AnthropicClient;
pub use prompt_generator::PromptGenerator;
