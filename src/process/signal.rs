use crate::process::ProcessError;

use signal_hook::consts::SIGINT;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Records SIGINT deliveries to the shell so the main loop can report them.
///
/// The handler itself only flips an atomic; printing happens in `take`.
pub struct InterruptMonitor {
    pending: Arc<AtomicBool>,
}

impl InterruptMonitor {
    pub fn install() -> Result<Self, ProcessError> {
        let pending = Arc::new(AtomicBool::new(false));
        signal_hook::flag::register(SIGINT, Arc::clone(&pending))
            .map_err(|e| ProcessError::SignalError(e.to_string()))?;
        Ok(Self { pending })
    }

    /// A monitor that is never triggered by the OS.
    pub fn detached() -> Self {
        Self {
            pending: Arc::new(AtomicBool::new(false)),
        }
    }

    #[cfg(test)]
    pub(crate) fn trip(&self) {
        self.pending.store(true, Ordering::SeqCst);
    }

    /// Returns the signal number if an interrupt arrived since the last call.
    pub fn take(&self) -> Option<i32> {
        self.pending.swap(false, Ordering::SeqCst).then_some(SIGINT)
    }
}

/// Makes the calling process ignore SIGINT. Async-signal-safe.
pub fn ignore_interrupt() {
    // SAFETY: installing SIG_IGN touches no Rust state.
    unsafe {
        libc::signal(libc::SIGINT, libc::SIG_IGN);
    }
}

pub fn interrupt_notice(signal: i32) -> String {
    format!("terminated by signal {}", signal)
}
