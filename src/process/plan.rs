//! Turns an external [`Invocation`] into what actually gets executed.

use crate::core::tokenizer::Invocation;
use std::path::PathBuf;

pub const INPUT_MARKER: &str = "<";
pub const OUTPUT_MARKER: &str = ">";
pub const BACKGROUND_MARKER: &str = "&";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Redirect {
    Input(PathBuf),
    Output(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchPlan {
    pub argv: Vec<String>,
    pub redirect: Option<Redirect>,
    pub background: bool,
}

impl LaunchPlan {
    /// Strips a trailing `&` and the first `<`/`>` clause from `invocation`.
    ///
    /// Only one redirection is honoured. Everything from its marker onward is
    /// dropped from the argument list. A marker with no path after it, or a
    /// lone `&` in the program slot, is left as an ordinary word.
    pub fn from_invocation(invocation: Invocation) -> Self {
        let mut argv = invocation.into_args();

        let background = argv.len() > 1 && argv.last().is_some_and(|w| w == BACKGROUND_MARKER);
        if background {
            argv.pop();
        }

        let mut redirect = None;
        for i in 1..argv.len().saturating_sub(1) {
            let path = PathBuf::from(&argv[i + 1]);
            redirect = match argv[i].as_str() {
                INPUT_MARKER => Some(Redirect::Input(path)),
                OUTPUT_MARKER => Some(Redirect::Output(path)),
                _ => continue,
            };
            argv.truncate(i);
            break;
        }

        LaunchPlan {
            argv,
            redirect,
            background,
        }
    }

    pub fn program(&self) -> &str {
        &self.argv[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::tokenizer::tokenize;

    fn plan(line: &str) -> LaunchPlan {
        LaunchPlan::from_invocation(tokenize(line))
    }

    #[test]
    fn test_plain_command() {
        let p = plan("ls -l");
        assert_eq!(p.argv, ["ls", "-l"]);
        assert_eq!(p.redirect, None);
        assert!(!p.background);
    }

    #[test]
    fn test_input_redirect_removed_from_argv() {
        let p = plan("sort < infile");
        assert_eq!(p.argv, ["sort"]);
        assert_eq!(p.redirect, Some(Redirect::Input(PathBuf::from("infile"))));
    }

    #[test]
    fn test_output_redirect_drops_trailing_words() {
        let p = plan("ls -a > out.txt extra words");
        assert_eq!(p.argv, ["ls", "-a"]);
        assert_eq!(p.redirect, Some(Redirect::Output(PathBuf::from("out.txt"))));
    }

    #[test]
    fn test_only_first_redirect_applies() {
        let p = plan("sort < in > out");
        assert_eq!(p.argv, ["sort"]);
        assert_eq!(p.redirect, Some(Redirect::Input(PathBuf::from("in"))));
    }

    #[test]
    fn test_background_with_redirect() {
        let p = plan("sleep 5 > log &");
        assert!(p.background);
        assert_eq!(p.argv, ["sleep", "5"]);
        assert_eq!(p.redirect, Some(Redirect::Output(PathBuf::from("log"))));
    }

    #[test]
    fn test_background_marker_only_at_end() {
        let p = plan("echo & done");
        assert!(!p.background);
        assert_eq!(p.argv, ["echo", "&", "done"]);
    }

    #[test]
    fn test_lone_ampersand_is_a_program_name() {
        let p = plan("&");
        assert!(!p.background);
        assert_eq!(p.argv, ["&"]);
    }

    #[test]
    fn test_marker_without_path_is_ordinary_word() {
        let p = plan("echo >");
        assert_eq!(p.argv, ["echo", ">"]);
        assert_eq!(p.redirect, None);

        let p = plan("cat < &");
        assert!(p.background);
        assert_eq!(p.argv, ["cat", "<"]);
        assert_eq!(p.redirect, None);
    }

    #[test]
    fn test_marker_in_program_slot_is_not_a_redirect() {
        let p = plan("> file");
        assert_eq!(p.argv, [">", "file"]);
        assert_eq!(p.redirect, None);
    }
}
