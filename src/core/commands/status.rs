use super::{Command, CommandError, Flow};
use crate::core::state::Session;
use std::io::Write;

/// Prints the status register and clears it, so a second `status` shows 0.
#[derive(Clone, Default)]
pub struct StatusCommand;

impl StatusCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for StatusCommand {
    fn execute(
        &self,
        _args: &[String],
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        writeln!(out, "exit value {}", session.status())?;
        session.set_status(0);
        Ok(Flow::Continue)
    }
}
