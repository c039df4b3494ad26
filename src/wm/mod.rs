//! Window management - the movable panel and its control loop.
//!
//! ```text
//! wm/
//! ├── mod.rs    - Module exports
//! ├── panel.rs  - Panel geometry, label and border style
//! └── mover.rs  - Arrow-key transitions and the blocking loop
//! ```

pub mod panel;
pub mod mover;

pub use panel::{BorderStyle, Panel, PanelId};
pub use mover::{open_panel, run_loop, Mover};
