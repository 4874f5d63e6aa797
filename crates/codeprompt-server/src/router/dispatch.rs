use serde::Serialize;

use super::view::ViewState;
use crate::security::CredentialGate;

/// What a render pass actually shows. `Blocked` overrides `GeneratePrompt`
/// for the current pass only and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderTarget {
    Home,
    GeneratePrompt,
    Blocked,
}

pub fn dispatch(view: ViewState, gate: &CredentialGate) -> RenderTarget {
    match view {
        ViewState::Home => RenderTarget::Home,
        ViewState::GeneratePrompt if gate.permits() => RenderTarget::GeneratePrompt,
        ViewState::GeneratePrompt => RenderTarget::Blocked,
    }
}
