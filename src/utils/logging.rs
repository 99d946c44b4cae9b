//! Logger setup.
//!
//! The terminal belongs to the renderer while the game runs, so log output
//! goes to `~/.flappy/flappy.log` instead of stderr. The filter comes from
//! `RUST_LOG` and defaults to `info`.

use crate::core::constants::LOG_FILE_NAME;
use crate::utils::paths::flappy_dir;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;

/// Install the global logger. Returns the log file path on success.
///
/// Failure to open the log file is reported to the caller; the game runs
/// without logging in that case.
pub fn init_file_logger() -> io::Result<PathBuf> {
    let path = flappy_dir()?.join(LOG_FILE_NAME);
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::AlreadyExists, e))?;

    Ok(path)
}
