use serde::{Deserialize, Serialize};

/// Page selected for the main content area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewState {
    #[default]
    Home,
    GeneratePrompt,
}

/// Sidebar navigation buttons, as submitted in the `nav` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NavEvent {
    Home,
    GeneratePrompt,
}

impl NavEvent {
    pub fn target(self) -> ViewState {
        match self {
            NavEvent::Home => ViewState::Home,
            NavEvent::GeneratePrompt => ViewState::GeneratePrompt,
        }
    }
}

/// Transition table. Every button leads to its own page from any state.
pub fn transition(state: ViewState, event: NavEvent) -> ViewState {
    match (state, event) {
        (ViewState::Home, NavEvent::Home) => ViewState::Home,
        (ViewState::Home, NavEvent::GeneratePrompt) => ViewState::GeneratePrompt,
        (ViewState::GeneratePrompt, NavEvent::Home) => ViewState::Home,
        (ViewState::GeneratePrompt, NavEvent::GeneratePrompt) => ViewState::GeneratePrompt,
    }
}

/// Holds the persisted view for one session.
#[derive(Debug, Clone, Default)]
pub struct ViewRouter {
    current: ViewState,
}

impl ViewRouter {
    pub fn current_view(&self) -> ViewState {
        self.current
    }

    pub fn select(&mut self, view: ViewState) {
        self.current = view;
    }

    pub fn apply(&mut self, event: NavEvent) -> ViewState {
        self.current = transition(self.current, event);
        self.current
    }
}
