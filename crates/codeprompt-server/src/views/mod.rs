pub mod renderer;
pub mod stylesheet;

pub use renderer::PageRenderer;
pub use stylesheet::Stylesheet;
