use std::ffi::{CStr, CString};
use std::io::{self, Write};
use std::os::unix::ffi::OsStrExt;
use std::os::unix::process::CommandExt;
use std::path::Path;
use std::process::{Command, ExitStatus};

use super::plan::{LaunchPlan, Redirect};
use super::{signal, ProcessError};
use crate::core::state::Session;

/// What became of a spawned plan.
#[derive(Debug)]
pub enum Launch {
    Background(u32),
    Foreground(ExitStatus),
}

/// Spawns external programs, wiring redirection and SIGINT disposition in the
/// child before its image is replaced.
///
/// The child loads the program itself, so a program that cannot be executed
/// still yields a pid whose exit value is 1.
#[derive(Debug, Clone, Default)]
pub struct Launcher;

impl Launcher {
    pub fn new() -> Self {
        Self
    }

    /// Runs `plan` and records the result in `session`.
    ///
    /// Background jobs print their pid and are left for the reaper. Foreground
    /// jobs are waited on; only a normal exit updates the status register.
    pub fn run(
        &self,
        plan: &LaunchPlan,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<(), ProcessError> {
        // The child shares our stdout; anything buffered must land first.
        out.flush()?;

        match self.spawn(plan)? {
            Launch::Background(pid) => {
                writeln!(out, "background pid is {}", pid)?;
            }
            Launch::Foreground(status) => match status.code() {
                Some(code) => session.set_status(code),
                None => log::debug!("{} ended abnormally: {}", plan.program(), status),
            },
        }
        Ok(())
    }

    pub fn spawn(&self, plan: &LaunchPlan) -> Result<Launch, ProcessError> {
        let setup = ChildSetup::from_plan(plan)?;

        let mut command = Command::new(plan.program());
        command.args(&plan.argv[1..]);
        // SAFETY: `apply` only performs async-signal-safe libc calls on data
        // prepared before the fork, and never returns once it has run.
        unsafe {
            command.pre_exec(move || setup.apply());
        }

        let mut child = match command.spawn() {
            Ok(child) => child,
            Err(e) if is_resource_exhaustion(&e) => return Err(ProcessError::Spawn(e)),
            Err(e) => return Err(ProcessError::Io(e)),
        };

        let pid = child.id();
        log::debug!("spawned {} as pid {} ({:?})", plan.program(), pid, plan);

        if plan.background {
            return Ok(Launch::Background(pid));
        }

        let status = child.wait().map_err(ProcessError::Wait)?;
        Ok(Launch::Foreground(status))
    }
}

fn is_resource_exhaustion(err: &io::Error) -> bool {
    matches!(err.raw_os_error(), Some(libc::EAGAIN) | Some(libc::ENOMEM))
}

enum ChildRedirect {
    Input { path: CString, failure: Vec<u8> },
    Output { path: CString },
}

/// Everything the child needs between fork and exec, allocated up front.
struct ChildSetup {
    argv: Vec<CString>,
    // NULL-terminated pointers into `argv`; the heap buffers never move.
    argv_ptrs: Vec<*const libc::c_char>,
    exec_failure: Vec<u8>,
    redirect: Option<ChildRedirect>,
    ignore_interrupt: bool,
}

// SAFETY: the raw pointers only refer to buffers owned by `argv`, which is
// never mutated after construction.
unsafe impl Send for ChildSetup {}
unsafe impl Sync for ChildSetup {}

impl ChildSetup {
    fn from_plan(plan: &LaunchPlan) -> Result<Self, ProcessError> {
        let argv = plan
            .argv
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| ProcessError::InvalidArgument(arg.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let argv_ptrs = argv
            .iter()
            .map(|arg| arg.as_ptr())
            .chain(std::iter::once(std::ptr::null()))
            .collect();

        let redirect = match &plan.redirect {
            None => None,
            Some(Redirect::Input(path)) => Some(ChildRedirect::Input {
                path: c_path(path)?,
                failure: format!("smallsh: cannot open {} for input\n", path.display())
                    .into_bytes(),
            }),
            Some(Redirect::Output(path)) => Some(ChildRedirect::Output {
                path: c_path(path)?,
            }),
        };

        Ok(Self {
            argv,
            argv_ptrs,
            exec_failure: format!("{}: ", plan.program()).into_bytes(),
            redirect,
            ignore_interrupt: plan.background,
        })
    }

    fn apply(&self) -> io::Result<()> {
        match &self.redirect {
            Some(ChildRedirect::Input { path, failure }) => {
                // SAFETY: plain syscalls on a NUL-terminated path and owned bytes.
                unsafe {
                    let fd = libc::open(path.as_ptr(), libc::O_RDONLY);
                    if fd == -1 {
                        write_all(libc::STDOUT_FILENO, failure);
                        libc::_exit(1);
                    }
                    move_fd(fd, libc::STDIN_FILENO);
                }
            }
            Some(ChildRedirect::Output { path }) => {
                // A failed open leaves the inherited stdout in place.
                unsafe {
                    let fd = libc::open(
                        path.as_ptr(),
                        libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
                        0o644 as libc::c_uint,
                    );
                    if fd != -1 {
                        move_fd(fd, libc::STDOUT_FILENO);
                    }
                }
            }
            None => {}
        }

        if self.ignore_interrupt {
            signal::ignore_interrupt();
        }

        // SAFETY: `argv_ptrs` is NULL-terminated and points into `argv`.
        unsafe {
            libc::execvp(self.argv[0].as_ptr(), self.argv_ptrs.as_ptr());

            let errno = io::Error::last_os_error().raw_os_error().unwrap_or(0);
            write_all(libc::STDERR_FILENO, &self.exec_failure);
            write_all(libc::STDERR_FILENO, describe_errno(errno).to_bytes());
            write_all(libc::STDERR_FILENO, b"\n");
            libc::_exit(1);
        }
    }
}

fn describe_errno(errno: libc::c_int) -> &'static CStr {
    // SAFETY: strerror returns a NUL-terminated string that stays valid
    // until the next call, which never happens before exec or _exit.
    unsafe { CStr::from_ptr(libc::strerror(errno)) }
}

unsafe fn write_all(fd: libc::c_int, bytes: &[u8]) {
    libc::write(fd, bytes.as_ptr().cast(), bytes.len());
}

unsafe fn move_fd(fd: libc::c_int, target: libc::c_int) {
    if fd != target {
        libc::dup2(fd, target);
        libc::close(fd);
    }
}

fn c_path(path: &Path) -> Result<CString, ProcessError> {
    CString::new(path.as_os_str().as_bytes())
        .map_err(|_| ProcessError::InvalidArgument(path.display().to_string()))
}
