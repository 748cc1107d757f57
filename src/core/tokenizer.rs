//! Splits one input line into an [`Invocation`].
//!
//! Only the ASCII space separates words. Runs of spaces collapse, tabs and
//! quotes are ordinary characters.

/// The words of one command line, program name first.
///
/// Never empty: a blank line still carries an empty program name so that
/// downstream code can always look at `program()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
}

impl Invocation {
    pub fn new(args: Vec<String>) -> Self {
        if args.is_empty() {
            return Self::blank();
        }
        Self { args }
    }

    pub fn blank() -> Self {
        Self {
            args: vec![String::new()],
        }
    }

    /// True when the line carried no words at all.
    pub fn is_blank(&self) -> bool {
        self.args.len() == 1 && self.args[0].is_empty()
    }

    pub fn program(&self) -> &str {
        &self.args[0]
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    pub fn into_args(self) -> Vec<String> {
        self.args
    }

    /// Words after the program name.
    pub fn operands(&self) -> &[String] {
        &self.args[1..]
    }
}

pub fn tokenize(line: &str) -> Invocation {
    let line = line.strip_suffix('\n').unwrap_or(line);
    let args: Vec<String> = line
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(str::to_owned)
        .collect();

    Invocation::new(args)
}
