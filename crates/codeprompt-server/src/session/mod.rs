pub mod cookie;
pub mod store;
pub mod types;

pub use store::SessionStore;
pub use types::{SessionContext, SessionId};
