pub mod forms;
pub mod prompt;

pub use forms::PassForm;
pub use prompt::{GeneratedPrompt, GenerationOutcome, PromptRequest};
