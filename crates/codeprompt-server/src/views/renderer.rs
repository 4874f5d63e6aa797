//! HTML page rendering.
//!
//! Templates are compiled into the binary and registered once at startup.
//! The layout wraps every page in a single form so that one submission
//! carries all widget values, the same way a full re-render would.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use pulldown_cmark::{html, Event, Options, Parser};
use serde_json::{json, Value};

use super::stylesheet::Stylesheet;
use crate::models::GenerationOutcome;
use crate::router::{RenderTarget, ViewState};
use crate::session::SessionContext;
use crate::utils::error::ApiError;

const LAYOUT: &str = include_str!("../../templates/layout.hbs");
const SIDEBAR: &str = include_str!("../../templates/sidebar.hbs");
const HOME: &str = include_str!("../../templates/home.hbs");
const GENERATE: &str = include_str!("../../templates/generate.hbs");
const BLOCKED: &str = include_str!("../../templates/blocked.hbs");

pub struct PageRenderer {
    registry: Handlebars<'static>,
    stylesheet: Stylesheet,
    page_title: String,
}

impl PageRenderer {
    pub fn new(stylesheet: Stylesheet, page_title: impl Into<String>) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_partial("sidebar", SIDEBAR)
            .context("sidebar template")?;
        for (name, source) in [
            ("layout", LAYOUT),
            ("home", HOME),
            ("generate", GENERATE),
            ("blocked", BLOCKED),
        ] {
            registry
                .register_template_string(name, source)
                .with_context(|| format!("{} template", name))?;
        }

        Ok(Self {
            registry,
            stylesheet,
            page_title: page_title.into(),
        })
    }

    pub fn render(&self, target: RenderTarget, session: &SessionContext) -> Result<String, ApiError> {
        let content = match target {
            RenderTarget::Home => self
                .registry
                .render("home", &json!({ "page_title": self.page_title }))?,
            RenderTarget::GeneratePrompt => self
                .registry
                .render("generate", &generate_data(session))?,
            RenderTarget::Blocked => self.registry.render("blocked", &json!({}))?,
        };

        let view = session.router.current_view();
        let page = self.registry.render(
            "layout",
            &json!({
                "page_title": self.page_title,
                "stylesheet": self.stylesheet.as_str(),
                "home_active": view == ViewState::Home,
                "generate_active": view == ViewState::GeneratePrompt,
                "api_key": session.api_key_input,
                "content": content,
            }),
        )?;
        Ok(page)
    }
}

fn generate_data(session: &SessionContext) -> Value {
    let (prompt, error) = match &session.last_outcome {
        Some(GenerationOutcome::Generated(prompt)) => (
            json!({
                "text": prompt.text,
                "html": markdown_to_html(&prompt.text),
                "model": prompt.model,
                "generated_at": prompt.generated_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            }),
            Value::Null,
        ),
        Some(GenerationOutcome::Failed(message)) => (Value::Null, json!(message)),
        None => (Value::Null, Value::Null),
    };

    json!({
        "draft": session.draft,
        "prompt": prompt,
        "error": error,
    })
}

/// Markdown to HTML with any embedded raw HTML turned into plain text.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES;
    let parser = Parser::new_ext(markdown, options).map(|event| match event {
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
