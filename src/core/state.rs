use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Running,
    Terminating,
}

/// Mutable state threaded through every loop iteration.
#[derive(Debug, Clone)]
pub struct Session {
    status: i32,
    home: Option<PathBuf>,
    state: SessionState,
}

impl Session {
    pub fn new(home: Option<PathBuf>) -> Self {
        Self {
            status: 0,
            home,
            state: SessionState::Running,
        }
    }

    /// Last foreground exit value, or the failure code of a built-in.
    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = status;
    }

    pub fn home(&self) -> Option<&Path> {
        self.home.as_deref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SessionState::Running
    }

    pub fn terminate(&mut self) {
        self.state = SessionState::Terminating;
    }
}
