use serde::Deserialize;

use crate::router::NavEvent;

/// Everything one page submission can carry. Absent fields mean
/// "widget not on the page", so the retained value is kept.
#[derive(Debug, Default, Deserialize)]
pub struct PassForm {
    #[serde(default)]
    pub nav: Option<NavEvent>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub project_description: Option<String>,
    #[serde(default)]
    pub key_features: Option<String>,
    #[serde(default)]
    pub technical_requirements: Option<String>,
}

impl PassForm {
    /// A plain `GET /`. The key widget renders fresh, so the entered key
    /// is cleared while the view and the draft are kept.
    pub fn reload() -> Self {
        Self {
            api_key: Some(String::new()),
            ..Self::default()
        }
    }
}
