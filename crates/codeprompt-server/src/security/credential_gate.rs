//! Credential gate for the prompt generation view.
//!
//! The gate is rebuilt from the sidebar key input on every render pass and
//! keeps no memory of earlier passes. A non-empty input is a credential; the
//! same check decides both publishing and entry to the generation view.

use std::fmt;

/// An API key entered by the user. Never empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty input. Whitespace is kept as entered.
    pub fn parse(input: &str) -> Option<Self> {
        if input.is_empty() {
            None
        } else {
            Some(Self(input.to_string()))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Credential(***)")
    }
}

/// Session-scoped slot the generation collaborator reads the key from.
#[derive(Debug, Clone, Default)]
pub struct CredentialSlot {
    published: Option<Credential>,
}

impl CredentialSlot {
    pub fn get(&self) -> Option<&Credential> {
        self.published.as_ref()
    }
}

#[derive(Debug, Clone)]
pub struct CredentialGate {
    current: Option<Credential>,
}

impl CredentialGate {
    pub fn read(input: &str) -> Self {
        Self {
            current: Credential::parse(input),
        }
    }

    pub fn current_credential(&self) -> Option<&Credential> {
        self.current.as_ref()
    }

    /// Entry to the generation view is allowed iff a credential is present now.
    pub fn permits(&self) -> bool {
        self.current.is_some()
    }

    /// Copies the current credential into `slot`. Returns whether anything was written.
    ///
    /// There is no clear path: an empty input leaves the previous value in place,
    /// but the guard never consults the slot.
    pub fn publish(&self, slot: &mut CredentialSlot) -> bool {
        match &self.current {
            Some(credential) => {
                slot.published = Some(credential.clone());
                true
            }
            None => false,
        }
    }
}
