use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};

// Maximum accepted dump size: 64MB
pub const MAX_DUMP_SIZE_BYTES: u64 = 64 * 1024 * 1024;

/// Validates that a file's size is within acceptable limits
///
/// Takes an open file handle so the size checked is the size of the file that is
/// subsequently read.
///
/// # Errors
///
/// Returns an error if:
/// - The file metadata cannot be read
/// - The file is larger than [`MAX_DUMP_SIZE_BYTES`]
pub fn validate_file_size(file: &File, path: &Path) -> Result<()> {
    let metadata = file
        .metadata()
        .with_context(|| format!("Failed to read file metadata: {}", path.display()))?;

    let file_size = metadata.len();
    if file_size > MAX_DUMP_SIZE_BYTES {
        bail!(
            "File too large: {} ({} bytes, max {} bytes)",
            path.display(),
            file_size,
            MAX_DUMP_SIZE_BYTES
        );
    }

    Ok(())
}

/// Read a whole text file, replacing invalid UTF-8 instead of failing
///
/// Dumps are occasionally captured with a platform encoding; thread names are the only
/// part that may be affected.
pub fn read_text_lossy(path: &Path) -> Result<String> {
    let mut file =
        File::open(path).with_context(|| format!("Failed to open dump file: {}", path.display()))?;
    validate_file_size(&file, path)?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .with_context(|| format!("Failed to read dump file: {}", path.display()))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
