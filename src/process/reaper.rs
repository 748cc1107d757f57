use std::io::Write;

use super::ProcessError;
use crate::config::ReapPolicy;

/// A background child collected by a non-blocking wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reaped {
    Exited { pid: i32, code: i32 },
    /// Killed by SIGTERM. `raw` is the undecoded wait status.
    Terminated { pid: i32, raw: i32 },
    /// Any other ending; collected but not reported.
    Other { pid: i32, raw: i32 },
}

impl Reaped {
    fn from_wait(pid: i32, raw: i32) -> Self {
        if libc::WIFEXITED(raw) {
            Reaped::Exited {
                pid,
                code: libc::WEXITSTATUS(raw),
            }
        } else if libc::WIFSIGNALED(raw) && libc::WTERMSIG(raw) == libc::SIGTERM {
            Reaped::Terminated { pid, raw }
        } else {
            Reaped::Other { pid, raw }
        }
    }

    pub fn pid(&self) -> i32 {
        match *self {
            Reaped::Exited { pid, .. } | Reaped::Terminated { pid, .. } | Reaped::Other { pid, .. } => {
                pid
            }
        }
    }

    /// The line printed for this child, if any.
    pub fn report(&self) -> Option<String> {
        match *self {
            Reaped::Exited { pid, code } => {
                Some(format!("background pid {} is done: exit value {}", pid, code))
            }
            Reaped::Terminated { pid, raw } => Some(format!(
                "background pid {} is done: terminated by signal {}",
                pid, raw
            )),
            Reaped::Other { .. } => None,
        }
    }
}

/// Collects finished background children between prompts.
///
/// Background jobs are not tracked anywhere; whatever child `waitpid(-1)`
/// hands back is reported. Foreground children are always waited on by pid
/// before the next sweep, so only background jobs can turn up here.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reaper {
    policy: ReapPolicy,
}

impl Reaper {
    pub fn new(policy: ReapPolicy) -> Self {
        Self { policy }
    }

    pub fn try_reap(&self) -> Option<Reaped> {
        let mut raw = 0;
        // SAFETY: WNOHANG never blocks and `raw` outlives the call.
        let pid = unsafe { libc::waitpid(-1, &mut raw, libc::WNOHANG) };
        if pid <= 0 {
            return None;
        }
        Some(Reaped::from_wait(pid, raw))
    }

    /// One sweep: a single child by default, all ready children when draining.
    pub fn sweep(&self, out: &mut dyn Write) -> Result<Vec<Reaped>, ProcessError> {
        let mut reaped = Vec::new();
        while let Some(child) = self.try_reap() {
            log::debug!("reaped pid {}: {:?}", child.pid(), child);
            if let Some(line) = child.report() {
                writeln!(out, "{}", line)?;
            }
            reaped.push(child);
            if self.policy == ReapPolicy::OnePerPrompt {
                break;
            }
        }
        Ok(reaped)
    }
}
