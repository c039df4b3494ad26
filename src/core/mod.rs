//! Core terminal session components.
//!
//! - **backend**: the `Backend` trait every terminal implementation provides
//! - **session**: `Session`, the initialized terminal and its lifecycle
//!
//! # Architecture
//!
//! ```text
//! Session<B: Backend>
//! ├── state (Uninitialized → Running → Terminated)
//! ├── panels (handles owned by the session)
//! └── B (CrosstermBackend, or FakeBackend in tests)
//! ```

pub mod backend;
pub mod session;

#[cfg(test)]
pub mod fake;
