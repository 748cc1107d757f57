//! A small interactive command interpreter.
//!
//! Each input line is split on spaces, then either handled by a built-in
//! (`cd`, `status`, `exit`, comments) or run as an external program with an
//! optional `<`/`>` redirection and a trailing `&` for background jobs.

pub mod config;
pub mod error;
pub mod flags;
pub mod highlight;
pub mod logging;
pub mod shell;

pub mod core;
pub mod input;
pub mod process;

#[cfg(test)]
mod testing;
