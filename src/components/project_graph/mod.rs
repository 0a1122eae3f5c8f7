mod component;
mod filter;
mod render;
mod state;

pub use component::ProjectGraphCanvas;
pub use filter::PageFilter;
