use std::collections::BTreeMap;
use std::io::Write;

mod cd;
mod exit;
mod status;

pub use cd::CdCommand;
pub use exit::ExitCommand;
pub use status::StatusCommand;

use crate::core::state::Session;
use crate::core::tokenizer::Invocation;
use crate::process::{LaunchPlan, Launcher, ProcessError};

#[derive(Debug)]
pub enum CommandError {
    IoError(std::io::Error),
    ProcessError(ProcessError),
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::IoError(err) => write!(f, "IO error: {}", err),
            CommandError::ProcessError(err) => write!(f, "Process error: {}", err),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

impl From<ProcessError> for CommandError {
    fn from(err: ProcessError) -> Self {
        CommandError::ProcessError(err)
    }
}

/// Tells the session loop whether to keep prompting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// A command handled inside the shell process. Never forks.
pub trait Command {
    fn execute(
        &self,
        args: &[String],
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
    Status(StatusCommand),
}

impl Command for CommandType {
    fn execute(
        &self,
        args: &[String],
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, session, out),
            CommandType::Exit(cmd) => cmd.execute(args, session, out),
            CommandType::Status(cmd) => cmd.execute(args, session, out),
        }
    }
}

/// Routes an invocation to a built-in or to the process launcher.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    launcher: Launcher,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("status", CommandType::Status(StatusCommand::new()));

        Self {
            commands,
            launcher: Launcher::new(),
        }
    }

    pub fn execute(
        &self,
        invocation: Invocation,
        session: &mut Session,
        out: &mut dyn Write,
    ) -> Result<Flow, CommandError> {
        let program = invocation.program();

        if is_comment(program) {
            session.set_status(0);
            return Ok(Flow::Continue);
        }

        if let Some(cmd) = self.commands.get(program) {
            log::debug!("builtin {} {:?}", program, invocation.operands());
            return cmd.execute(invocation.operands(), session, out);
        }

        let plan = LaunchPlan::from_invocation(invocation);
        self.launcher.run(&plan, session, out)?;
        Ok(Flow::Continue)
    }

    #[cfg(test)]
    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}

fn is_comment(program: &str) -> bool {
    program.is_empty() || program.starts_with('#')
}
