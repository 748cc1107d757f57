use crate::flags::Flags;
use std::env;
use std::io::IsTerminal;
use std::path::PathBuf;

/// How many finished background jobs the reaper reports per prompt cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReapPolicy {
    #[default]
    OnePerPrompt,
    Drain,
}

/// Settings fixed for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub home: Option<PathBuf>,
    pub interactive: bool,
    pub reap_policy: ReapPolicy,
    pub tty_after_script: bool,
    pub debug: bool,
}

impl Config {
    pub fn from_flags(flags: &Flags) -> Self {
        Config {
            home: home_dir(),
            interactive: std::io::stdin().is_terminal(),
            reap_policy: if flags.is_set("reap-all") {
                ReapPolicy::Drain
            } else {
                ReapPolicy::OnePerPrompt
            },
            tty_after_script: flags.is_set("tty-after-script"),
            debug: flags.is_set("debug"),
        }
    }
}

// HOME wins over the password database, matching what login shells export.
fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}
