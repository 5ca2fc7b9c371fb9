//! Log setup for the CLI.
//!
//! Pipeline modules log through the `log` facade: `info` for stage
//! summaries, `debug` per file. The inventory printed after each command
//! is separate and lives in [`crate::output`].

use env_logger::{Builder, Env};
use std::io::Write;

/// Default filter when `RUST_LOG` is unset.
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Install the global logger. `RUST_LOG` overrides the default level.
pub fn init(verbose: bool) {
    let env = Env::default().filter_or("RUST_LOG", default_filter(verbose));
    Builder::from_env(env)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}
