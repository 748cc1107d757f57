use super::Shell;
use crate::core::commands::Flow;
use crate::core::tokenizer::tokenize;
use crate::error::ShellError;
use std::io::Write;

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str) -> Result<(), ShellError>;
}

impl<W: Write> CommandHandler for Shell<W> {
    fn execute_line(&mut self, line: &str) -> Result<(), ShellError> {
        let invocation = tokenize(line);
        if invocation.is_blank() {
            return Ok(());
        }
        log::debug!("invocation {:?}", invocation.args());

        self.reaper.sweep(&mut self.out)?;

        if self
            .executor
            .execute(invocation, &mut self.session, &mut self.out)?
            == Flow::Exit
        {
            self.session.terminate();
        }
        Ok(())
    }
}
