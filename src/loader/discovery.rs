use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use walkdir::WalkDir;

/// Maximum number of dump files collected from one directory (resource exhaustion guard)
const MAX_DUMP_FILES: usize = 10_000;

/// Maximum directory depth searched below the root
const MAX_DEPTH: usize = 4;

/// Discover thread dump files (`*.txt`) below `dir`
///
/// Returns paths sorted lexically. Symlinks are skipped rather than followed.
///
/// # Errors
///
/// Returns an error if `dir` is not a directory, or if more than [`MAX_DUMP_FILES`]
/// dumps are found.
///
/// Entries that cannot be read are logged as warnings and skipped.
pub fn discover_dumps(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        bail!("Not a directory: {}", dir.display());
    }

    let mut dumps = Vec::new();

    for entry in WalkDir::new(dir).max_depth(MAX_DEPTH).follow_links(false) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("Skipping unreadable entry under {}: {}", dir.display(), e);
                continue;
            }
        };

        if entry.path_is_symlink() {
            log::debug!("Skipping symlink {}", entry.path().display());
            continue;
        }

        if !entry.file_type().is_file() || !is_dump_file(entry.path()) {
            continue;
        }

        if dumps.len() >= MAX_DUMP_FILES {
            bail!(
                "Resource limit exceeded: Found more than {} dump files under {}",
                MAX_DUMP_FILES,
                dir.display()
            );
        }

        dumps.push(entry.into_path());
    }

    dumps.sort();
    Ok(dumps)
}

fn is_dump_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("txt"))
}
