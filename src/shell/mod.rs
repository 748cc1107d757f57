use std::io::{self, Write};

mod executor;

use crate::{
    config::Config,
    core::{commands::CommandExecutor, state::Session},
    error::ShellError,
    input::{self, Line, LineSource, StreamInput, TerminalInput},
    process::{signal::interrupt_notice, InterruptMonitor, Reaper},
};

use executor::CommandHandler;

pub struct Shell<W: Write> {
    pub(crate) input: Box<dyn LineSource>,
    pub(crate) out: W,
    pub(crate) session: Session,
    pub(crate) executor: CommandExecutor,
    pub(crate) reaper: Reaper,
    pub(crate) interrupts: InterruptMonitor,
    pub(crate) config: Config,
}

impl Shell<io::Stdout> {
    /// A shell reading the process's stdin and writing to its stdout.
    pub fn new(config: Config) -> Result<Self, ShellError> {
        let input: Box<dyn LineSource> = if config.interactive {
            Box::new(TerminalInput::new()?)
        } else {
            Box::new(StreamInput::new(io::stdin().lock()))
        };
        let interrupts = InterruptMonitor::install()?;

        Ok(Self::with_parts(config, input, io::stdout(), interrupts))
    }
}

impl<W: Write> Shell<W> {
    pub fn with_parts(
        config: Config,
        input: Box<dyn LineSource>,
        out: W,
        interrupts: InterruptMonitor,
    ) -> Self {
        Shell {
            input,
            out,
            session: Session::new(config.home.clone()),
            executor: CommandExecutor::new(),
            reaper: Reaper::new(config.reap_policy),
            interrupts,
            config,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs one line as if it had been read from the input.
    pub fn execute(&mut self, line: &str) -> Result<(), ShellError> {
        self.execute_line(line)
    }

    pub fn run(&mut self) -> Result<(), ShellError> {
        while self.session.is_running() {
            self.report_interrupt()?;
            self.out.flush()?;

            let line = match self.input.read_line()? {
                Line::Text(line) => line,
                Line::Interrupted => {
                    writeln!(self.out, "{}", interrupt_notice(libc::SIGINT))?;
                    continue;
                }
                Line::Eof => {
                    self.end_of_input()?;
                    continue;
                }
            };

            if let Err(e) = self.execute_line(&line) {
                if e.is_fatal() {
                    return Err(e);
                }
                eprintln!("smallsh: {}", e);
            }
        }

        self.out.flush()?;
        log::debug!("session over, last status {}", self.session.status());
        Ok(())
    }

    fn report_interrupt(&mut self) -> Result<(), ShellError> {
        if let Some(signal) = self.interrupts.take() {
            log::debug!("interrupt received");
            writeln!(self.out, "{}", interrupt_notice(signal))?;
        }
        Ok(())
    }

    fn end_of_input(&mut self) -> Result<(), ShellError> {
        if self.config.tty_after_script && !self.config.interactive {
            match input::reattach_terminal() {
                Ok(()) => {
                    log::debug!("input exhausted, continuing on /dev/tty");
                    self.input = Box::new(TerminalInput::new()?);
                    self.config.interactive = true;
                    return Ok(());
                }
                Err(e) => log::warn!("cannot reopen /dev/tty: {}", e),
            }
        }

        self.session.terminate();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ReapPolicy;
    use crate::core::state::SessionState;
    use crate::testing::CwdGuard;
    use serial_test::serial;
    use std::io::Cursor;
    use std::time::{Duration, Instant};

    fn shell(script: &str) -> Shell<Vec<u8>> {
        shell_with(Config::default(), script)
    }

    fn shell_with(config: Config, script: &str) -> Shell<Vec<u8>> {
        let input = Box::new(StreamInput::new(Cursor::new(script.to_string())));
        Shell::with_parts(config, input, Vec::new(), InterruptMonitor::detached())
    }

    fn output(shell: &Shell<Vec<u8>>) -> String {
        String::from_utf8(shell.output().clone()).unwrap()
    }

    fn drain_children() {
        while Reaper::new(ReapPolicy::Drain).try_reap().is_some() {}
    }

    fn background_pid(text: &str) -> i32 {
        text.lines()
            .find_map(|line| line.strip_prefix("background pid is "))
            .unwrap()
            .parse()
            .unwrap()
    }

    /// Feeds `tick` until `needle` shows up, each line being one prompt cycle.
    fn cycle_until(shell: &mut Shell<Vec<u8>>, tick: &str, needle: &str) -> bool {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if output(shell).contains(needle) {
                return true;
            }
            shell.execute(tick).unwrap();
            std::thread::sleep(Duration::from_millis(20));
        }
        false
    }

    #[test]
    #[serial]
    fn test_status_twice() {
        let mut sh = shell("status\nstatus\n");
        sh.run().unwrap();
        assert_eq!(output(&sh), "exit value 0\nexit value 0\n");
    }

    #[test]
    #[serial]
    fn test_failed_cd_sets_status() {
        let _cwd = CwdGuard::new();
        let before = std::env::current_dir().unwrap();
        let mut sh = shell("cd /nonexistent\nstatus\nstatus\n");
        sh.run().unwrap();
        assert_eq!(
            output(&sh),
            "Unable to change directory\nexit value 1\nexit value 0\n"
        );
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    #[serial]
    fn test_foreground_exit_value_propagates() {
        let mut sh = shell("false\nstatus\ntrue\nstatus\n");
        sh.run().unwrap();
        assert_eq!(output(&sh), "exit value 1\nexit value 0\n");
    }

    #[test]
    #[serial]
    fn test_blank_lines_skip_reaper() {
        drain_children();
        let pid = std::process::Command::new("true").spawn().unwrap().id() as i32;
        std::thread::sleep(Duration::from_millis(300));

        let mut sh = shell("\n     \n\n");
        sh.run().unwrap();
        assert_eq!(output(&sh), "");

        let mut sh = shell("# now\n");
        sh.run().unwrap();
        assert_eq!(
            output(&sh),
            format!("background pid {} is done: exit value 0\n", pid)
        );
    }

    #[test]
    #[serial]
    fn test_background_job_lifecycle() {
        drain_children();
        let mut sh = shell("");
        let started = Instant::now();

        sh.execute("sleep 1 &").unwrap();

        assert!(started.elapsed() < Duration::from_secs(1));
        let pid = background_pid(&output(&sh));
        let done = format!("background pid {} is done: exit value 0", pid);
        assert!(cycle_until(&mut sh, "# tick", &done));
    }

    #[test]
    #[serial]
    fn test_background_completion_leaves_status_alone() {
        let _cwd = CwdGuard::new();
        drain_children();
        let mut sh = shell("");
        sh.execute("false").unwrap();
        sh.execute("true &").unwrap();
        let pid = background_pid(&output(&sh));

        // `cd .` succeeds without touching the register.
        let done = format!("background pid {} is done: exit value 0", pid);
        assert!(cycle_until(&mut sh, "cd .", &done));
        sh.execute("status").unwrap();
        assert!(output(&sh).ends_with("exit value 1\n"));
    }

    #[test]
    #[serial]
    fn test_unexecutable_background_job_is_reaped_with_exit_one() {
        drain_children();
        let mut sh = shell("");

        sh.execute("smallsh-no-such-program-xyz &").unwrap();

        let pid = background_pid(&output(&sh));
        let done = format!("background pid {} is done: exit value 1", pid);
        assert!(cycle_until(&mut sh, "# tick", &done));
    }

    #[test]
    #[serial]
    fn test_signaled_foreground_leaves_status() {
        // Only spaces split words, so the tabs reach `sh` inside one argument.
        let mut sh = shell("false\nsh -c kill\t-TERM\t$$\nstatus\n");
        sh.run().unwrap();
        assert_eq!(output(&sh), "exit value 1\n");
    }

    #[test]
    #[serial]
    fn test_exit_stops_reading() {
        let mut sh = shell("exit\nstatus\n");
        sh.run().unwrap();
        assert_eq!(output(&sh), "");
        assert_eq!(sh.session().state(), SessionState::Terminating);
    }

    #[test]
    #[serial]
    fn test_exit_does_not_wait_for_background_jobs() {
        drain_children();
        let started = Instant::now();
        let mut sh = shell("sleep 5 &\nexit\n");
        sh.run().unwrap();
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(!sh.session().is_running());

        let pid = background_pid(&output(&sh));
        unsafe {
            libc::kill(pid, libc::SIGKILL);
        }
        drain_children();
    }

    #[test]
    #[serial]
    fn test_end_of_input_terminates() {
        let mut sh = shell("# only a comment");
        sh.run().unwrap();
        assert!(!sh.session().is_running());
    }

    #[test]
    #[serial]
    fn test_tty_after_script_without_terminal_still_ends() {
        let config = Config {
            tty_after_script: true,
            ..Config::default()
        };
        let mut sh = shell_with(config, "");
        // Under a test harness there is usually no controlling terminal; either
        // way the call must return rather than hang on a missing device.
        if std::fs::File::open("/dev/tty").is_err() {
            sh.run().unwrap();
            assert!(!sh.session().is_running());
        }
    }

    #[test]
    #[serial]
    fn test_interrupt_reported_before_next_prompt() {
        let mut sh = shell("status\n");
        sh.interrupts.trip();
        sh.run().unwrap();
        assert_eq!(output(&sh), "terminated by signal 2\nexit value 0\n");
    }

    #[test]
    #[serial]
    fn test_redirected_output_written_to_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let target = dir.path().join("listing");
        let mut sh = shell(&format!("echo one two > {}\nstatus\n", target.display()));
        sh.run().unwrap();
        assert_eq!(std::fs::read_to_string(&target).unwrap(), "one two\n");
        assert_eq!(output(&sh), "exit value 0\n");
    }

    #[test]
    #[serial]
    fn test_missing_input_file_status() {
        let mut sh = shell("cat < /nonexistent/smallsh-in\nstatus\n");
        sh.run().unwrap();
        assert_eq!(output(&sh), "exit value 1\n");
    }
}
