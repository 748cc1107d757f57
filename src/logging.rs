use env_logger::{Builder, Env};

pub const LOG_ENV: &str = "SMALLSH_LOG";

/// Installs the stderr logger. `debug` overrides whatever `SMALLSH_LOG` asks for.
pub fn init(debug: bool) {
    let mut builder = Builder::from_env(Env::default().filter_or(LOG_ENV, "warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_target(false);

    // A logger may already be installed when embedded in tests.
    let _ = builder.try_init();
}
