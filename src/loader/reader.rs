use std::path::{Path, PathBuf};

use anyhow::Result;
use rayon::prelude::*;

use crate::models::ThreadDump;
use crate::parsers::parse_thread_dump;
use crate::utils::read_text_lossy;

/// Read and parse one dump file
///
/// The file name supplies the capture date.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or read, or exceeds
/// [`MAX_DUMP_SIZE_BYTES`](crate::utils::MAX_DUMP_SIZE_BYTES). Content problems never fail;
/// see [`parse_thread_dump`].
pub fn read_dump_file(path: &Path) -> Result<ThreadDump> {
    let text = read_text_lossy(path)?;
    let filename = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();

    let dump = parse_thread_dump(&text, &filename);
    if dump.stats.unrecognized_lines > 0 {
        log::info!(
            "Parsed {}: {} threads ({} lines not recognized)",
            path.display(),
            dump.threads.len(),
            dump.stats.unrecognized_lines
        );
    }

    Ok(dump)
}

/// Parse many dump files in parallel
///
/// Results come back in the order of `paths`. Each parse is independent; one file failing
/// does not affect the others.
pub fn load_dumps(paths: &[PathBuf]) -> Vec<(PathBuf, Result<ThreadDump>)> {
    paths.par_iter().map(|path| (path.clone(), read_dump_file(path))).collect()
}
