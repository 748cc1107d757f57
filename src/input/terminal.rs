use super::{Line, LineSource};
use crate::error::ShellError;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

pub const PROMPT: &str = ":";

/// Line editor used when a person is typing. History is not kept.
pub struct TerminalInput {
    editor: DefaultEditor,
}

impl TerminalInput {
    pub fn new() -> Result<Self, ShellError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }
}

impl LineSource for TerminalInput {
    fn read_line(&mut self) -> Result<Line, ShellError> {
        match self.editor.readline(PROMPT) {
            Ok(line) => Ok(Line::Text(line)),
            Err(ReadlineError::Interrupted) => Ok(Line::Interrupted),
            Err(ReadlineError::Eof) => Ok(Line::Eof),
            Err(e) => Err(e.into()),
        }
    }
}
