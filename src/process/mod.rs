use std::fmt;

pub mod launcher;
pub mod plan;
pub mod reaper;
pub mod signal;

pub use launcher::{Launch, Launcher};
pub use plan::{LaunchPlan, Redirect};
pub use reaper::{Reaped, Reaper};
pub use signal::InterruptMonitor;

#[derive(Debug)]
pub enum ProcessError {
    /// The kernel refused to create another process.
    Spawn(std::io::Error),
    Wait(std::io::Error),
    InvalidArgument(String),
    SignalError(String),
    Io(std::io::Error),
}

impl ProcessError {
    pub fn is_fatal(&self) -> bool {
        matches!(self, ProcessError::Spawn(_))
    }
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::Spawn(e) => write!(f, "cannot create process: {}", e),
            ProcessError::Wait(e) => write!(f, "wait failed: {}", e),
            ProcessError::InvalidArgument(arg) => write!(f, "invalid argument: {:?}", arg),
            ProcessError::SignalError(msg) => write!(f, "Signal error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
