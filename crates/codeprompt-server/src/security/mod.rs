pub mod credential_gate;

pub use credential_gate::{Credential, CredentialGate, CredentialSlot};
