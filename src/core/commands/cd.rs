use super::{Command, CommandError, Flow};
use crate::core::state::Session;
use std::env;
use std::io::Write;
use std::path::Path;

/// `cd`, `cd ~` and `cd DIR`. Failures are reported and set the status to 1.
#[derive(Clone)]
pub struct CdCommand;

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for CdCommand {
    fn execute(
        &self,
        args: &[String],
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let (target, failure) = match args.first().map(String::as_str) {
            None | Some("~") => (session.home(), "Unable to change to home directory"),
            Some(dir) => (Some(Path::new(dir)), "Unable to change directory"),
        };

        let result = match target {
            Some(path) => env::set_current_dir(path),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "no home directory",
            )),
        };

        if let Err(e) = result {
            log::debug!("cd {:?}: {}", target, e);
            writeln!(out, "{}", failure)?;
            session.set_status(1);
        }
        Ok(Flow::Continue)
    }
}
