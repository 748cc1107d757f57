use std::env;
use std::path::PathBuf;

/// Puts the working directory back when a test that runs `cd` finishes.
pub(crate) struct CwdGuard {
    saved: PathBuf,
}

impl CwdGuard {
    pub(crate) fn new() -> Self {
        Self {
            saved: env::current_dir().unwrap(),
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        let _ = env::set_current_dir(&self.saved);
    }
}
