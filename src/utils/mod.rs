pub mod environment;
pub mod files;

pub use environment::{DUMP_DIR_ENV, get_dump_dir};
pub use files::{MAX_DUMP_SIZE_BYTES, read_text_lossy, validate_file_size};
