//! Session management
//!
//! A `Session` is the initialized terminal. It is created once, torn down
//! once, and owns every panel allocated while it runs.

use thiserror::Error;
use tracing::{debug, info, warn};

use super::backend::{Backend, BackendError};
use crate::wm::{Panel, PanelId};

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Running,
    Terminated,
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SessionState::Uninitialized => "uninitialized",
            SessionState::Running => "running",
            SessionState::Terminated => "terminated",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Cannot {op} while session is {state}")]
    InvalidState { op: &'static str, state: SessionState },

    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub type Result<T> = std::result::Result<T, SessionError>;

/// An initialized terminal session
pub struct Session<B: Backend> {
    backend: B,
    state: SessionState,
    /// Panels created and not yet destroyed
    panels: Vec<PanelId>,
}

impl<B: Backend> Session<B> {
    /// Wrap a backend; nothing touches the terminal until `initialize`
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            state: SessionState::Uninitialized,
            panels: Vec::new(),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Enter raw mode and start the session
    pub fn initialize(&mut self) -> Result<()> {
        self.expect_state("initialize", SessionState::Uninitialized)?;
        self.backend.initialize()?;
        self.state = SessionState::Running;

        let (cols, rows) = self.backend.screen_size();
        info!("Session initialized ({}x{})", cols, rows);
        Ok(())
    }

    /// Allocate a panel owned by this session
    pub fn create_panel(&mut self, panel: Panel) -> Result<PanelId> {
        self.expect_state("create a panel", SessionState::Running)?;
        debug!(
            "Creating panel {}x{} at ({}, {})",
            panel.width, panel.height, panel.x, panel.y
        );
        let id = self.backend.create_panel(panel)?;
        self.panels.push(id);
        Ok(id)
    }

    /// Destroy `panel` (and any other panel still alive), then restore the
    /// terminal. Valid exactly once, while running.
    pub fn shutdown(&mut self, panel: PanelId) -> Result<()> {
        self.expect_state("shut down", SessionState::Running)?;
        self.state = SessionState::Terminated;

        if let Some(pos) = self.panels.iter().position(|p| *p == panel) {
            self.panels.remove(pos);
        }
        // Keep going after a failed destroy so the terminal is always
        // restored; the first error wins.
        let mut first_err = self.backend.destroy_panel(panel).err();
        for other in std::mem::take(&mut self.panels) {
            if let Err(e) = self.backend.destroy_panel(other) {
                warn!("Failed to destroy {}: {}", other, e);
                first_err.get_or_insert(e);
            }
        }
        let restored = self.backend.shutdown();

        if let Some(e) = first_err {
            warn!("Panel cleanup failed: {}", e);
            return Err(e.into());
        }
        restored?;

        info!("Session terminated");
        Ok(())
    }

    fn expect_state(&self, op: &'static str, wanted: SessionState) -> Result<()> {
        if self.state != wanted {
            return Err(SessionError::InvalidState {
                op,
                state: self.state,
            });
        }
        Ok(())
    }
}

impl<B: Backend> Drop for Session<B> {
    fn drop(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        warn!("Session dropped while running, restoring terminal");
        self.state = SessionState::Terminated;
        for panel in std::mem::take(&mut self.panels) {
            let _ = self.backend.destroy_panel(panel);
        }
        let _ = self.backend.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fake::{Call, FakeBackend};

    #[test]
    fn test_lifecycle() {
        let mut fake = FakeBackend::new(80, 24);
        {
            let mut session = Session::new(&mut fake);
            assert_eq!(session.state(), SessionState::Uninitialized);

            session.initialize().unwrap();
            assert_eq!(session.state(), SessionState::Running);

            let id = session.create_panel(Panel::new(5, 20, 5, 10, "hi")).unwrap();
            session.shutdown(id).unwrap();
            assert_eq!(session.state(), SessionState::Terminated);
        }

        assert_eq!(fake.count(&Call::Initialize), 1);
        assert_eq!(fake.count_matching(|c| matches!(c, Call::DestroyPanel(_))), 1);
        assert_eq!(fake.count(&Call::Shutdown), 1);
        assert!(fake.panels.is_empty());
    }

    #[test]
    fn test_create_panel_requires_running() {
        let mut session = Session::new(FakeBackend::new(80, 24));
        let err = session.create_panel(Panel::new(5, 20, 5, 10, "hi")).unwrap_err();
        assert!(matches!(
            err,
            SessionError::InvalidState { state: SessionState::Uninitialized, .. }
        ));
        assert!(session.backend().calls.is_empty());
    }

    #[test]
    fn test_double_shutdown_is_rejected() {
        let mut fake = FakeBackend::new(80, 24);
        {
            let mut session = Session::new(&mut fake);
            session.initialize().unwrap();
            let id = session.create_panel(Panel::new(5, 20, 5, 10, "hi")).unwrap();
            session.shutdown(id).unwrap();

            let err = session.shutdown(id).unwrap_err();
            assert!(matches!(
                err,
                SessionError::InvalidState { state: SessionState::Terminated, .. }
            ));
        }
        assert_eq!(fake.count(&Call::Shutdown), 1);
    }

    #[test]
    fn test_failed_destroy_still_restores_terminal() {
        let mut fake = FakeBackend::new(80, 24);
        {
            let mut session = Session::new(&mut fake);
            session.initialize().unwrap();
            session.create_panel(Panel::new(5, 20, 5, 10, "hi")).unwrap();

            let err = session.shutdown(PanelId(42)).unwrap_err();
            assert!(matches!(
                err,
                SessionError::Backend(BackendError::UnknownPanel(PanelId(42)))
            ));
            assert_eq!(session.state(), SessionState::Terminated);
        }
        // The live panel was still destroyed and the terminal restored once
        assert_eq!(fake.count_matching(|c| matches!(c, Call::DestroyPanel(_))), 2);
        assert_eq!(fake.count(&Call::Shutdown), 1);
        assert!(fake.panels.is_empty());
    }

    #[test]
    fn test_double_initialize_is_rejected() {
        let mut session = Session::new(FakeBackend::new(80, 24));
        session.initialize().unwrap();
        assert!(session.initialize().is_err());
        assert_eq!(session.backend().count(&Call::Initialize), 1);
    }

    #[test]
    fn test_drop_while_running_restores_terminal() {
        let mut fake = FakeBackend::new(80, 24);
        {
            let mut session = Session::new(&mut fake);
            session.initialize().unwrap();
            session.create_panel(Panel::new(5, 20, 5, 10, "hi")).unwrap();
        }
        assert_eq!(fake.count_matching(|c| matches!(c, Call::DestroyPanel(_))), 1);
        assert_eq!(fake.count(&Call::Shutdown), 1);
    }

    #[test]
    fn test_drop_uninitialized_does_nothing() {
        let mut fake = FakeBackend::new(80, 24);
        drop(Session::new(&mut fake));
        assert!(fake.calls.is_empty());
    }
}
