use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Environment variable naming the default directory scanned for dumps
pub const DUMP_DIR_ENV: &str = "THREAD_DUMP_DIR";

/// Get the default dump directory: `$THREAD_DUMP_DIR`, else the current directory
pub fn get_dump_dir() -> Result<PathBuf> {
    match env::var_os(DUMP_DIR_ENV) {
        Some(dir) if !dir.is_empty() => Ok(PathBuf::from(dir)),
        _ => env::current_dir().context("Failed to determine current directory"),
    }
}
