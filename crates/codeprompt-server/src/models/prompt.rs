use chrono::{DateTime, Utc};
use serde::Serialize;

/// Project parameters collected on the generate page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PromptRequest {
    pub project_description: String,
    pub key_features: String,
    pub technical_requirements: String,
}

impl PromptRequest {
    /// Single user message forwarded to the model.
    pub fn to_user_message(&self) -> String {
        let mut sections = vec![format!(
            "## Project description\n{}",
            self.project_description.trim()
        )];

        if !self.key_features.trim().is_empty() {
            sections.push(format!("## Key features\n{}", self.key_features.trim()));
        }
        if !self.technical_requirements.trim().is_empty() {
            sections.push(format!(
                "## Technical requirements\n{}",
                self.technical_requirements.trim()
            ));
        }

        sections.join("\n\n")
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedPrompt {
    pub text: String,
    pub model: String,
    pub generated_at: DateTime<Utc>,
}

impl GeneratedPrompt {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            generated_at: Utc::now(),
        }
    }
}

/// Result of the last generate click, kept in the session for re-rendering.
#[derive(Debug, Clone)]
pub enum GenerationOutcome {
    Generated(GeneratedPrompt),
    Failed(String),
}
