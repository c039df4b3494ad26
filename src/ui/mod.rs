//! User interface rendering and input handling.
//!
//! - **renderer**: `CrosstermBackend`, the terminal `Backend` built on crossterm
//! - **keymapper**: crossterm events to mover keys

pub mod keymapper;
pub mod renderer;

pub use keymapper::{Key, KeyMapper};
pub use renderer::CrosstermBackend;
