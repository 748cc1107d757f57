use smallsh::config::Config;
use smallsh::error::ShellError;
use smallsh::flags::Flags;
use smallsh::highlight::Painter;
use smallsh::logging;
use smallsh::shell::Shell;
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", Painter::new().error(&format!("smallsh: {}", e)));
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), ShellError> {
    let mut flags = Flags::new();
    let args: Vec<String> = env::args().skip(1).collect();
    flags.parse(&args)?;

    if flags.is_set("help") {
        flags.print_help();
        return Ok(());
    }

    if flags.is_set("version") {
        let version = format!("smallsh {}", env!("CARGO_PKG_VERSION"));
        println!("{}", Painter::new().heading(&version));
        return Ok(());
    }

    let config = Config::from_flags(&flags);
    logging::init(config.debug);

    // The status register never becomes the process exit code.
    let mut shell = Shell::new(config)?;
    shell.run()
}
