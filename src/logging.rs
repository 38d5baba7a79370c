use std::fs::File;
use std::io;
use std::path::Path;

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Initializes the global logger, writing to `log_file`.
///
/// The terminal front-end owns stdout/stderr, so records go to a file.
/// When `verbose` is `true`, debug messages are included; otherwise only
/// info and above.  `RUST_LOG` overrides both.
pub fn init(verbose: bool, log_file: &Path) -> io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = File::create(log_file)?;
    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.target(Target::Pipe(Box::new(file)));

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
    Ok(())
}
