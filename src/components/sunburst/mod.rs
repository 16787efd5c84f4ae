mod arc;
mod component;
mod config;
mod partition;
mod render;
pub mod scale;
mod state;
mod types;

pub use component::SunburstCanvas;
pub use state::HoverLabel;
pub use types::TreeNode;
