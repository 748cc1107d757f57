//! Where command lines come from.

mod stream;
mod terminal;

pub use stream::StreamInput;
pub use terminal::{TerminalInput, PROMPT};

use crate::error::ShellError;
use std::fs::OpenOptions;
use std::io;
use std::os::unix::io::AsRawFd;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// One line with its newline removed.
    Text(String),
    /// Ctrl-C was pressed while editing the line.
    Interrupted,
    Eof,
}

pub trait LineSource {
    fn read_line(&mut self) -> Result<Line, ShellError>;
}

/// Points standard input at the controlling terminal.
pub fn reattach_terminal() -> io::Result<()> {
    let tty = OpenOptions::new().read(true).write(true).open("/dev/tty")?;
    // SAFETY: both descriptors are valid for the duration of the call.
    if unsafe { libc::dup2(tty.as_raw_fd(), libc::STDIN_FILENO) } == -1 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}
