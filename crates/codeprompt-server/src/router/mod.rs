pub mod dispatch;
pub mod pass;
pub mod view;

pub use dispatch::{dispatch, RenderTarget};
pub use pass::run_pass;
pub use view::{transition, NavEvent, ViewRouter, ViewState};
