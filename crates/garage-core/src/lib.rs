pub mod actions;
pub mod config;
pub mod format;
pub mod html;
pub mod protocol;
pub mod reducer;
pub mod registry;
pub mod render;
pub mod state;

pub use actions::*;
pub use reducer::*;
pub use render::*;
pub use state::*;
