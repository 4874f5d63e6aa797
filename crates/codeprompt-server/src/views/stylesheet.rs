use anyhow::{Context, Result};
use std::path::Path;
use tracing::info;

/// Stylesheet injected verbatim into every page.
#[derive(Debug, Clone, Default)]
pub struct Stylesheet {
    css: String,
}

impl Stylesheet {
    /// Missing file is a startup failure.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let css = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read stylesheet {}", path.display()))?;
        info!("Loaded stylesheet {} ({} bytes)", path.display(), css.len());
        Ok(Self { css })
    }

    pub fn from_source(css: impl Into<String>) -> Self {
        Self { css: css.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.css
    }
}
